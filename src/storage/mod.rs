//! Storage and persistence layer
//!
//! Throughput rows are persisted as append-only CSV files.

pub mod row_log;

// Re-export main storage types
pub use row_log::{append_row, RowLog};

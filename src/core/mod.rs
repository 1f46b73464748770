//! Core system types and foundations
//!
//! This module contains the fundamental building blocks of the throughput log,
//! including type definitions, error handling and configuration.

pub mod types;
pub mod error;
pub mod config;

// Re-export commonly used items
pub use types::{Destination, Row, ROW_FIELDS};
pub use error::{Error, Result};
pub use config::Config;

//! Throughput Log - append benchmark results to per-device CSV logs
//!
//! Each invocation appends exactly one [`Row`] to exactly one log file,
//! chosen by a [`Destination`]. Log files are append-only: they are created
//! on first use and prior contents are never rewritten.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod storage;
pub mod cli;

// Re-export commonly used items for convenience
pub use self::core::{Config, Destination, Error, Result, Row};
pub use storage::RowLog;

use tracing_subscriber::EnvFilter;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize tracing on stderr.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more
/// than once is harmless.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Initialized {} v{}", NAME, VERSION);
}

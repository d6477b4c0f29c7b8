// Library module for stale-sweep
// Re-exports modules for use in integration tests and the binary

pub mod cleaner;
pub mod clock;
pub mod error;
pub mod fs;
pub mod logger;

pub use error::SweepError;
pub use logger::{LogLevel, Logger};

//! Cleaner module - deletes files older than a retention window
//!
//! Each configured folder is swept flat: only its immediate files are
//! considered, subdirectories are left alone.

pub mod config;
pub mod format;
pub mod report;
pub mod scanner;
pub mod stats;

pub use config::{Config, FolderTarget};
pub use format::format_size;
pub use report::{report, run, RunReport};
pub use scanner::{RetentionPolicy, Sweeper};
pub use stats::{DeletedFile, DeletionSummary, SweepOutcome};

// Centralized error handling module
// Every variant renders on a single line so it can be logged as one event

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for sweep operations
#[derive(Debug)]
pub enum SweepError {
    /// Folder-level errors: the target cannot be swept at all
    FolderNotFound { path: PathBuf },
    NotADirectory { path: PathBuf },

    /// Per-file errors: recorded and the sweep moves on
    StatFailed { path: PathBuf, source: io::Error },
    MissingModifiedTime { path: PathBuf },
    DeleteFailed { path: PathBuf, source: io::Error },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Configuration and logging setup errors
    ConfigRead { path: PathBuf, source: io::Error },
    ConfigParse { path: PathBuf, reason: String },
    InvalidConfig { reason: String },
    LogFileOpen { path: PathBuf, source: io::Error },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SweepError::FolderNotFound { path } => {
                write!(f, "Folder not found: {}", path.display())
            }
            SweepError::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            SweepError::StatFailed { path, source } => {
                write!(f, "Could not read metadata of {}: {}", path.display(), source)
            }
            SweepError::MissingModifiedTime { path } => {
                write!(f, "No modification time available for {}", path.display())
            }
            SweepError::DeleteFailed { path, source } => {
                write!(f, "Could not delete file {}: {}", path.display(), source)
            }
            SweepError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} {}", operation, path.display())
            }
            SweepError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} {}: {}", operation, p.display(), source)
                } else {
                    write!(f, "I/O error while {}: {}", operation, source)
                }
            }
            SweepError::ConfigRead { path, source } => {
                write!(f, "Could not read config file {}: {}", path.display(), source)
            }
            SweepError::ConfigParse { path, reason } => {
                write!(f, "Invalid config file {}: {}", path.display(), reason)
            }
            SweepError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            SweepError::LogFileOpen { path, source } => {
                write!(f, "Could not open log file {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::StatFailed { source, .. }
            | SweepError::DeleteFailed { source, .. }
            | SweepError::IoError { source, .. }
            | SweepError::ConfigRead { source, .. }
            | SweepError::LogFileOpen { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SweepError {
    /// Create an error with context about the operation and optional path.
    ///
    /// `NotFound` on a listing becomes `FolderNotFound`, `PermissionDenied` keeps the
    /// operation name, deletes and stats get their own variants.
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        let Some(p) = path else {
            return SweepError::IoError {
                path: None,
                operation: operation.to_string(),
                source: err,
            };
        };

        match err.kind() {
            io::ErrorKind::NotFound if operation.contains("listing") => {
                SweepError::FolderNotFound { path: p }
            }
            io::ErrorKind::PermissionDenied => SweepError::PermissionDenied {
                path: p,
                operation: operation.to_string(),
            },
            _ if operation.contains("deleting") => SweepError::DeleteFailed { path: p, source: err },
            _ if operation.contains("reading metadata") => {
                SweepError::StatFailed { path: p, source: err }
            }
            _ => SweepError::IoError {
                path: Some(p),
                operation: operation.to_string(),
                source: err,
            },
        }
    }
}

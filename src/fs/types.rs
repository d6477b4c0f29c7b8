use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// One immediate child of a scanned folder.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub modified: Option<DateTime<Utc>>,
    /// Why metadata could not be read while listing, if it could not
    pub stat_error: Option<String>,
}

/// File metadata from stat operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub size: u64,
    pub is_dir: bool,
    pub modified: Option<DateTime<Utc>>,
}

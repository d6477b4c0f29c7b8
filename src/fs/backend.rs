use std::path::Path;

use crate::error::SweepError;
use crate::fs::types::{FileEntry, FileStat};

/// File-system access used by the sweeper.
///
/// All operations are blocking. Implementations never recurse: `list_dir` returns
/// the immediate children of `path`, sorted by name.
pub trait FileSystem {
    /// Check whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// List directory contents
    fn list_dir(&self, path: &Path) -> Result<Vec<FileEntry>, SweepError>;

    /// Get file metadata without following symlinks
    fn stat(&self, path: &Path) -> Result<FileStat, SweepError>;

    /// Delete a single file
    fn remove_file(&self, path: &Path) -> Result<(), SweepError>;
}

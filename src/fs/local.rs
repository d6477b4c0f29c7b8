use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::SweepError;
use crate::fs::backend::FileSystem;
use crate::fs::types::{FileEntry, FileStat};

/// The real file system, through `std::fs`.
///
/// Metadata is read with `symlink_metadata`, so a symlink is reported as a file
/// and deleting it removes the link, not its target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<FileEntry>, SweepError> {
        let read_dir = fs::read_dir(path)
            .map_err(|e| SweepError::from_io_error(e, "listing", Some(path.to_path_buf())))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry
                .map_err(|e| SweepError::from_io_error(e, "listing", Some(path.to_path_buf())))?;
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // An unreadable entry is still listed with its error; the sweeper records it
            let (is_dir, modified, stat_error) = match fs::symlink_metadata(&entry_path) {
                Ok(metadata) => (
                    metadata.is_dir(),
                    metadata.modified().ok().map(to_utc),
                    None,
                ),
                Err(e) => (
                    false,
                    None,
                    Some(
                        SweepError::from_io_error(e, "reading metadata of", Some(entry_path.clone()))
                            .to_string(),
                    ),
                ),
            };

            entries.push(FileEntry {
                name,
                path: entry_path,
                is_dir,
                modified,
                stat_error,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> Result<FileStat, SweepError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| {
            SweepError::from_io_error(e, "reading metadata of", Some(path.to_path_buf()))
        })?;

        Ok(FileStat {
            size: metadata.len(),
            is_dir: metadata.is_dir(),
            modified: metadata.modified().ok().map(to_utc),
        })
    }

    fn remove_file(&self, path: &Path) -> Result<(), SweepError> {
        fs::remove_file(path)
            .map_err(|e| SweepError::from_io_error(e, "deleting", Some(path.to_path_buf())))
    }
}

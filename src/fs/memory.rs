use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SweepError;
use crate::fs::backend::FileSystem;
use crate::fs::types::{FileEntry, FileStat};

#[derive(Debug, Clone)]
struct Node {
    is_dir: bool,
    size: u64,
    modified: Option<DateTime<Utc>>,
}

/// In-memory file system with injectable failures.
///
/// Paths are stored verbatim; parents are not created implicitly, so add the
/// folder with [`MemoryFs::add_dir`] before adding files into it.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    deny_delete: BTreeSet<PathBuf>,
    deny_stat: BTreeSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.nodes.get_mut().insert(
            path.into(),
            Node {
                is_dir: true,
                size: 0,
                modified: None,
            },
        );
        self
    }

    pub fn add_file(
        &mut self,
        path: impl Into<PathBuf>,
        size: u64,
        modified: DateTime<Utc>,
    ) -> &mut Self {
        self.nodes.get_mut().insert(
            path.into(),
            Node {
                is_dir: false,
                size,
                modified: Some(modified),
            },
        );
        self
    }

    /// Add a file whose modification time cannot be read.
    pub fn add_file_without_mtime(&mut self, path: impl Into<PathBuf>, size: u64) -> &mut Self {
        self.nodes.get_mut().insert(
            path.into(),
            Node {
                is_dir: false,
                size,
                modified: None,
            },
        );
        self
    }

    /// Make every delete of `path` fail with permission denied.
    pub fn deny_delete(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.deny_delete.insert(path.into());
        self
    }

    /// Make every stat of `path` fail, including the metadata read while listing.
    pub fn deny_stat(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.deny_stat.insert(path.into());
        self
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.nodes.borrow().contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }
}

fn stat_refused(path: &Path) -> SweepError {
    SweepError::StatFailed {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::Other, "stat refused"),
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.nodes.borrow().get(path).is_some_and(|n| n.is_dir)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<FileEntry>, SweepError> {
        let nodes = self.nodes.borrow();
        match nodes.get(path) {
            None => return Err(SweepError::FolderNotFound { path: path.to_path_buf() }),
            Some(node) if !node.is_dir => {
                return Err(SweepError::NotADirectory { path: path.to_path_buf() })
            }
            Some(_) => {}
        }

        let mut entries: Vec<FileEntry> = nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, node)| FileEntry {
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                path: p.clone(),
                is_dir: node.is_dir,
                modified: node.modified,
                stat_error: self.deny_stat.contains(p.as_path()).then(|| {
                    stat_refused(p).to_string()
                }),
            })
            .collect();

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> Result<FileStat, SweepError> {
        if self.deny_stat.contains(path) {
            return Err(stat_refused(path));
        }

        self.nodes
            .borrow()
            .get(path)
            .map(|node| FileStat {
                size: node.size,
                is_dir: node.is_dir,
                modified: node.modified,
            })
            .ok_or_else(|| SweepError::StatFailed {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            })
    }

    fn remove_file(&self, path: &Path) -> Result<(), SweepError> {
        if self.deny_delete.contains(path) {
            return Err(SweepError::PermissionDenied {
                path: path.to_path_buf(),
                operation: "deleting".to_string(),
            });
        }

        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(path).map(|node| node.is_dir) {
            Some(true) => Err(SweepError::DeleteFailed {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "is a directory"),
            }),
            Some(false) => {
                nodes.remove(path);
                Ok(())
            }
            None => Err(SweepError::DeleteFailed {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

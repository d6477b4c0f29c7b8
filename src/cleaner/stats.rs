//! Per-folder deletion statistics.

/// A file that was deleted (or, in dry-run mode, would have been).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedFile {
    pub name: String,
    pub size: u64,
}

/// Aggregate result of sweeping one folder.
///
/// `count == deleted_files.len()` and `total_size_purged` is the sum of the
/// recorded sizes; fields are only mutated through the `record_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionSummary {
    count: usize,
    folder: String,
    total_size_purged: u64,
    deleted_files: Vec<DeletedFile>,
    errors: Vec<String>,
    dry_run: bool,
}

impl DeletionSummary {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            count: 0,
            folder: folder.into(),
            total_size_purged: 0,
            deleted_files: Vec::new(),
            errors: Vec::new(),
            dry_run: false,
        }
    }

    /// Mark the summary as a preview: recorded files were selected, not removed.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn record_deleted(&mut self, name: impl Into<String>, size: u64) {
        self.count += 1;
        self.total_size_purged += size;
        self.deleted_files.push(DeletedFile {
            name: name.into(),
            size,
        });
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn total_size_purged(&self) -> u64 {
        self.total_size_purged
    }

    pub fn deleted_files(&self) -> &[DeletedFile] {
        &self.deleted_files
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Outcome of sweeping one folder: either the folder could not be swept at
/// all, or a summary of what happened inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepOutcome {
    Failure(String),
    Summary(DeletionSummary),
}

impl SweepOutcome {
    pub fn summary(&self) -> Option<&DeletionSummary> {
        match self {
            SweepOutcome::Summary(summary) => Some(summary),
            SweepOutcome::Failure(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SweepOutcome::Failure(_))
    }
}

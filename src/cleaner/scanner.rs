// Folder sweeping module
// Lists the immediate children of a folder and deletes files past the retention window

use chrono::{DateTime, Duration, Utc};

use super::config::{FolderTarget, DEFAULT_RETENTION_DAYS};
use super::stats::{DeletionSummary, SweepOutcome};
use crate::clock::Clock;
use crate::error::SweepError;
use crate::fs::{FileEntry, FileSystem};

/// How old a file must be before it is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub days: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RetentionPolicy {
    pub fn new(days: u32) -> Self {
        Self { days }
    }

    pub fn threshold(&self) -> Duration {
        Duration::days(i64::from(self.days))
    }

    /// A file is expired when its age strictly exceeds the threshold.
    pub fn is_expired(&self, modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - modified > self.threshold()
    }
}

/// Sweeps folders through an injected file system and clock.
pub struct Sweeper<'a> {
    fs: &'a dyn FileSystem,
    clock: &'a dyn Clock,
    policy: RetentionPolicy,
    dry_run: bool,
}

impl<'a> Sweeper<'a> {
    pub fn new(fs: &'a dyn FileSystem, clock: &'a dyn Clock) -> Self {
        Self {
            fs,
            clock,
            policy: RetentionPolicy::default(),
            dry_run: false,
        }
    }

    pub fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Select and size candidates but never call `remove_file`
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sweep one folder.
    ///
    /// A missing folder, or a path that is not a directory, yields
    /// [`SweepOutcome::Failure`] and nothing is touched. Otherwise every
    /// expired file directly inside the folder is deleted; per-file failures
    /// are recorded in the summary and the sweep carries on.
    pub fn sweep(&self, target: &FolderTarget) -> SweepOutcome {
        let path = target.path.as_path();

        if !self.fs.exists(path) {
            return SweepOutcome::Failure(
                SweepError::FolderNotFound { path: path.to_path_buf() }.to_string(),
            );
        }
        if !self.fs.is_dir(path) {
            return SweepOutcome::Failure(
                SweepError::NotADirectory { path: path.to_path_buf() }.to_string(),
            );
        }

        let entries = match self.fs.list_dir(path) {
            Ok(entries) => entries,
            Err(e) => return SweepOutcome::Failure(e.to_string()),
        };

        let now = self.clock.now();
        let mut summary = DeletionSummary::new(target.identifier()).with_dry_run(self.dry_run);

        for entry in entries.iter().filter(|e| !e.is_dir) {
            if let Some(error) = &entry.stat_error {
                summary.record_error(error.clone());
                continue;
            }
            let Some(modified) = entry.modified else {
                summary.record_error(
                    SweepError::MissingModifiedTime { path: entry.path.clone() }.to_string(),
                );
                continue;
            };

            if !self.policy.is_expired(modified, now) {
                continue;
            }

            match self.purge(entry) {
                Ok(size) => summary.record_deleted(entry.name.clone(), size),
                Err(e) => summary.record_error(e.to_string()),
            }
        }

        SweepOutcome::Summary(summary)
    }

    /// Stat then delete; returns the size of the removed file.
    fn purge(&self, entry: &FileEntry) -> Result<u64, SweepError> {
        let stat = self.fs.stat(&entry.path)?;
        if !self.dry_run {
            self.fs.remove_file(&entry.path)?;
        }
        Ok(stat.size)
    }
}

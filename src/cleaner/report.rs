//! Summary reporting and the per-run driver.

use super::config::Config;
use super::format::format_size;
use super::scanner::{RetentionPolicy, Sweeper};
use super::stats::SweepOutcome;
use crate::clock::Clock;
use crate::fs::FileSystem;
use crate::logger::Logger;

/// Log the outcome of one folder.
///
/// Returns the bytes reclaimed (or, in a dry run, that would be), or `None`
/// when the folder failed or nothing was deleted. A folder whose every
/// deletion failed still gets its errors logged.
pub fn report(outcome: &SweepOutcome, logger: &Logger) -> Option<u64> {
    let summary = match outcome {
        SweepOutcome::Failure(message) => {
            logger.error(message);
            return None;
        }
        SweepOutcome::Summary(summary) => summary,
    };

    if summary.count() == 0 && summary.errors().is_empty() {
        return None;
    }

    let verb = if summary.is_dry_run() { "would delete" } else { "deleted" };

    for file in summary.deleted_files() {
        logger.debug(format!(
            "{} {} ({}) from {}",
            verb,
            file.name,
            format_size(file.size),
            summary.folder()
        ));
    }

    if summary.count() > 0 {
        logger.info(format!(
            "{} {} files ({}) from {}",
            verb,
            summary.count(),
            format_size(summary.total_size_purged()),
            summary.folder()
        ));
    }

    if !summary.errors().is_empty() {
        logger.error(format!(
            "{} errors while cleaning {}",
            summary.errors().len(),
            summary.folder()
        ));
        for error in summary.errors() {
            logger.debug(error);
        }
    }

    (summary.count() > 0).then(|| summary.total_size_purged())
}

/// Result of sweeping every configured folder.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: Vec<SweepOutcome>,
    pub total_reclaimed: u64,
    pub dry_run: bool,
}

impl RunReport {
    pub fn failed_folders(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn files_deleted(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(SweepOutcome::summary)
            .map(|s| s.count())
            .sum()
    }
}

/// Sweep every folder in `config`, in order, and log the grand total.
///
/// Never fails: folder and file errors end up in the log and in the report.
pub fn run(config: &Config, fs: &dyn FileSystem, clock: &dyn Clock, logger: &Logger) -> RunReport {
    let sweeper = Sweeper::new(fs, clock)
        .with_policy(RetentionPolicy::new(config.retention_days))
        .with_dry_run(config.dry_run);

    if config.dry_run {
        logger.info("dry run: nothing will be deleted");
    }

    let mut outcomes = Vec::with_capacity(config.folders.len());
    let mut total_reclaimed = 0u64;

    for target in &config.folders {
        let outcome = sweeper.sweep(target);
        if let Some(bytes) = report(&outcome, logger) {
            total_reclaimed += bytes;
        }
        outcomes.push(outcome);
    }

    if config.dry_run {
        logger.info(format!(
            "total space that would be reclaimed: {}",
            format_size(total_reclaimed)
        ));
    } else {
        logger.info(format!("total space reclaimed: {}", format_size(total_reclaimed)));
    }

    RunReport {
        outcomes,
        total_reclaimed,
        dry_run: config.dry_run,
    }
}

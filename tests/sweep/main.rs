// Integration tests for stale-sweep
// In-memory sweeps, real folders on disk, and the logged summary

mod sweep_tests;

use chrono::{DateTime, TimeZone, Utc};
use stale_sweep::{LogLevel, Logger};
use std::path::{Path, PathBuf};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap()
}

/// File-only logger inside `dir`, so tests can read back what was logged.
pub fn test_logger(dir: &Path, level: LogLevel) -> (Logger, PathBuf) {
    let path = dir.join("sweep.log");
    let logger = Logger::file_only("fileDeleter", &path, level).unwrap();
    (logger, path)
}

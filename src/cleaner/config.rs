//! Sweep configuration, loaded from TOML.
//!
//! ```toml
//! logger_name = "fileDeleter"
//! log_file = "//Capture2/shared/logs/delete_converted.log"
//! log_level = "info"
//! retention_days = 90
//!
//! [[folders]]
//! path = "//Capture2/convert/processed"
//!
//! [[folders]]
//! path = "//CAPTURE2/Capture2/SHARED/MP4"
//! label = "mp4"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SweepError;
use crate::logger::LogLevel;

pub const DEFAULT_RETENTION_DAYS: u32 = 90;
pub const DEFAULT_LOGGER_NAME: &str = "fileDeleter";
pub const DEFAULT_LOG_FILE: &str = "//Capture2/shared/logs/delete_converted.log";
pub const DEFAULT_FOLDERS: &[&str] = &[
    "//Capture2/convert/processed",
    "//CAPTURE2/CONVERT_fast/processed",
    "//CAPTURE2/Capture2/SHARED/MP4",
];

const CONFIG_DIR_NAME: &str = "stale-sweep";
const CONFIG_FILE_NAME: &str = "config.toml";

/// One folder to sweep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FolderTarget {
    pub path: PathBuf,
    /// Name used in log lines; derived from the path when absent
    #[serde(default)]
    pub label: Option<String>,
}

impl FolderTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Identifier for log lines: the label, else the parent folder's name
    /// (`//Capture2/convert/processed` is `convert`), else the path itself.
    pub fn identifier(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }

        // Split by hand: a UNC prefix like `//host/share` has no `file_name`
        let parent = self
            .path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        parent
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string)
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub logger_name: String,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
    pub retention_days: u32,
    pub dry_run: bool,
    pub folders: Vec<FolderTarget>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: LogLevel::Info,
            retention_days: DEFAULT_RETENTION_DAYS,
            dry_run: false,
            folders: DEFAULT_FOLDERS.iter().map(|p| FolderTarget::new(*p)).collect(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the per-user
    /// `stale-sweep/config.toml` is used when present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SweepError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Per-user config location, e.g. `~/.config/stale-sweep/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> Result<Self, SweepError> {
        let content = fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|reason| SweepError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.message().to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        if self.retention_days == 0 {
            return Err(SweepError::InvalidConfig {
                reason: "retention_days must be at least 1".to_string(),
            });
        }
        if self.logger_name.trim().is_empty() {
            return Err(SweepError::InvalidConfig {
                reason: "logger_name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

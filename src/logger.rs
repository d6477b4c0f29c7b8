//! Logging handle with a file sink and a console sink.
//!
//! The handle owns a private `tracing` dispatcher that is never installed as the
//! global default, so every function that logs receives the handle explicitly.
//! Both sinks share one line format:
//!
//! ```text
//! 2024-05-01 03:00:00 - fileDeleter - INFO - deleted 3 files (1.20 GB) from convert
//! ```

use chrono::Local;
use serde::Deserialize;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use crate::error::SweepError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum severity a logger emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Error,
}

impl LogLevel {
    fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// `<timestamp> - <logger name> - <LEVEL> - <message>`
struct LineFormat {
    name: Arc<str>,
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            self.name,
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Explicitly constructed logging handle.
///
/// Dropping the handle syncs and closes the file sink.
pub struct Logger {
    name: String,
    level: LogLevel,
    dispatch: Dispatch,
    file: Option<Arc<File>>,
    file_path: Option<PathBuf>,
}

impl Logger {
    /// Logger writing to an append-mode file and to stdout.
    ///
    /// Missing parent directories of `file_path` are created.
    pub fn new(name: &str, file_path: &Path, level: LogLevel) -> Result<Self, SweepError> {
        Self::build(name, Some(file_path), Some(BoxMakeWriter::new(std::io::stdout)), level)
    }

    /// Logger writing to an append-mode file and to `console` instead of stdout.
    pub fn with_console_writer<W>(
        name: &str,
        file_path: &Path,
        level: LogLevel,
        console: W,
    ) -> Result<Self, SweepError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(name, Some(file_path), Some(BoxMakeWriter::new(console)), level)
    }

    /// Logger writing to stdout only.
    pub fn console(name: &str, level: LogLevel) -> Self {
        let (dispatch, _) =
            Self::dispatch(name, None, Some(BoxMakeWriter::new(std::io::stdout)), level);
        Self {
            name: name.to_string(),
            level,
            dispatch,
            file: None,
            file_path: None,
        }
    }

    /// Logger writing to an append-mode file only.
    pub fn file_only(name: &str, file_path: &Path, level: LogLevel) -> Result<Self, SweepError> {
        Self::build(name, Some(file_path), None, level)
    }

    fn build(
        name: &str,
        file_path: Option<&Path>,
        console: Option<BoxMakeWriter>,
        level: LogLevel,
    ) -> Result<Self, SweepError> {
        let file = match file_path {
            Some(path) => Some(Arc::new(open_append(path)?)),
            None => None,
        };
        let (dispatch, file) = Self::dispatch(name, file, console, level);

        Ok(Self {
            name: name.to_string(),
            level,
            dispatch,
            file,
            file_path: file_path.map(Path::to_path_buf),
        })
    }

    fn dispatch(
        name: &str,
        file: Option<Arc<File>>,
        console: Option<BoxMakeWriter>,
        level: LogLevel,
    ) -> (Dispatch, Option<Arc<File>>) {
        let name: Arc<str> = Arc::from(name);

        let file_layer = file.clone().map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(LineFormat { name: name.clone() })
                .with_writer(file)
        });
        let console_layer = console.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(LineFormat { name: name.clone() })
                .with_writer(writer)
        });

        let subscriber = tracing_subscriber::registry()
            .with(level.filter())
            .with(file_layer)
            .with(console_layer);

        (Dispatch::new(subscriber), file)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::debug!("{}", message));
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::info!("{}", message));
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::error!("{}", message));
    }

    /// Push buffered file contents to disk.
    pub fn flush(&self) -> std::io::Result<()> {
        match &self.file {
            Some(file) => file.sync_all(),
            None => Ok(()),
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("file_path", &self.file_path)
            .finish()
    }
}

fn open_append(path: &Path) -> Result<File, SweepError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SweepError::LogFileOpen {
            path: path.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| SweepError::LogFileOpen {
            path: path.to_path_buf(),
            source,
        })
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use stale_sweep::cleaner::{self, Config, FolderTarget};
use stale_sweep::clock::SystemClock;
use stale_sweep::fs::LocalFs;
use stale_sweep::{LogLevel, Logger};

/// Delete files older than a retention window from a list of folders
#[derive(Debug, Parser)]
#[command(name = "stale-sweep", version, about)]
struct Cli {
    /// Config file (defaults to the per-user stale-sweep/config.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Delete files last modified more than this many days ago
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,

    /// Log file, opened in append mode
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Minimum level written to the log
    #[arg(long, value_enum)]
    level: Option<LogLevel>,

    /// Report what would be deleted without deleting anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Folders to sweep, replacing the configured list
    #[arg(value_name = "FOLDER")]
    folders: Vec<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(days) = self.days {
            config.retention_days = days;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        if let Some(level) = self.level {
            config.log_level = level;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if !self.folders.is_empty() {
            config.folders = self.folders.into_iter().map(FolderTarget::new).collect();
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = cli.apply(config);

    // A missing log share must not stop the sweep
    let logger = match Logger::new(&config.logger_name, &config.log_file, config.log_level) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Warning: {}; logging to console only", e);
            Logger::console(&config.logger_name, config.log_level)
        }
    };

    cleaner::run(&config, &LocalFs::new(), &SystemClock, &logger);
    drop(logger);

    println!("Done!");
    Ok(())
}

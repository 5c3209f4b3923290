//! Command-line configuration.
//!
//! # Responsibility
//! - Parse startup flags.
//! - Resolve data, log, and export directories to absolute paths.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ghostscramble_core::db::db_path;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "ghostscramble";
const LOG_DIR_NAME: &str = "logs";

/// Ghost Scramble: a prompt-driven journaling session keeper.
#[derive(Debug, Parser)]
#[command(name = "ghostscramble", version)]
pub struct Args {
    /// Directory holding the session database and logs.
    #[arg(long, env = "GHOSTSCRAMBLE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory exports are written to. Defaults to the working directory.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub export_dir: PathBuf,
}

impl AppConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot read working directory")?;
        let data_dir = match args.data_dir {
            Some(dir) => absolutize(&cwd, dir),
            None => dirs::data_local_dir()
                .ok_or_else(|| anyhow!("no platform data directory; pass --data-dir"))?
                .join(APP_DIR_NAME),
        };
        let export_dir = args
            .export_dir
            .map(|dir| absolutize(&cwd, dir))
            .unwrap_or(cwd);

        Ok(Self {
            db_path: db_path(&data_dir),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level: args
                .log_level
                .unwrap_or_else(|| ghostscramble_core::default_log_level().to_string()),
            export_dir,
        })
    }
}

fn absolutize(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Args};
    use clap::Parser;

    #[test]
    fn explicit_dirs_are_made_absolute() {
        let args = Args::parse_from([
            "ghostscramble",
            "--data-dir",
            "journal",
            "--export-dir",
            "/tmp/out",
            "--log-level",
            "warn",
        ]);
        let config = AppConfig::from_args(args).unwrap();

        assert!(config.db_path.is_absolute());
        assert!(config.db_path.ends_with("journal/ghostscramble.sqlite3"));
        assert!(config.log_dir.ends_with("journal/logs"));
        assert_eq!(config.export_dir, std::path::PathBuf::from("/tmp/out"));
        assert_eq!(config.log_level, "warn");
    }
}

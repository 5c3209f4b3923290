//! Terminal entry point for Ghost Scramble.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open storage.
//! - Hand a wired `SessionService` to the line-oriented front-end.

mod config;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, Args};
use ghostscramble_core::db::open_db;
use ghostscramble_core::{
    init_logging, DirectoryExportSink, SessionService, SessionStore, SqliteSnapshotStorage,
    UserPrompter,
};
use log::info;
use std::io::{self, BufRead, Write};

/// Prompter reading `y/n` answers from stdin and printing alerts to stdout.
struct TerminalPrompter;

impl UserPrompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&mut self, message: &str) {
        println!("{message}");
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_args(Args::parse())?;
    init_logging(&config.log_level, &config.log_dir).context("failed to initialize logging")?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let store = SessionStore::load(SqliteSnapshotStorage::new(&conn))
        .context("failed to read saved sessions")?;
    info!(
        "event=cli_start module=cli status=ok sessions={}",
        store.len()
    );

    let mut service = SessionService::new(store, TerminalPrompter);
    let mut sink = DirectoryExportSink::new(&config.export_dir);
    let mut out = io::stdout();
    repl::run(&mut service, &mut sink, &mut io::stdin(), &mut out)?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

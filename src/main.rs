mod config;
mod db;
mod error;
mod export;
mod import;
mod ledger;
mod models;
mod query;
mod run;
mod status;
mod ui;
mod validate;

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::load()?;
    init_logging(&config)?;

    let db = db::Database::open(&config.db_path)?;
    let mut ledger = ledger::Ledger::open(db, config.storage_key.as_str())
        .with_context(|| format!("Failed to open ledger in {}", config.db_path.display()))?;

    match args.len() {
        1 => run::as_tui(&mut ledger),
        2.. => run::as_cli(&args, &mut ledger),
        _ => {
            eprintln!("Usage: salaryui [command]");
            Ok(())
        }
    }
}

/// Log to a file; the terminal belongs to the TUI.
fn init_logging(config: &Config) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file: {}", config.log_path.display()))?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    info!(
        "salaryui {} starting, database {}",
        env!("CARGO_PKG_VERSION"),
        config.db_path.display()
    );
    Ok(())
}

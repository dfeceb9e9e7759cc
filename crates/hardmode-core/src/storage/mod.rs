mod config;
pub mod database;
mod ledger;
pub mod migrations;
mod sync;

pub use config::{Config, DayConfig};
pub use database::{Database, DaySummary, PomoRecord, PomoStatus};
pub use ledger::{DayLedger, DayReflection, NewTask, PlannedTask, PomoCompletion};
pub use sync::{sync_day, DayUpload, SyncClient};

use std::path::PathBuf;

/// Returns the directory holding the database and config file.
///
/// `HARDMODE_HOME` wins when set. Otherwise `~/.config/hardmode[-dev]/`,
/// with the `-dev` suffix when `HARDMODE_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("HARDMODE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HARDMODE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("hardmode-dev")
            } else {
                base_dir.join("hardmode")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

mod config;
pub mod database;
pub mod migrations;
pub mod record;
pub mod store;

pub use config::{ClassifierConfig, Config, LeaderboardConfig};
pub use database::UserDb;
pub use record::{EmotionLogEntry, UserRecord};
pub use store::{MemoryStore, UpdateFn, UserStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml` and `soultracker.db`.
///
/// `SOULTRACKER_DATA_DIR` wins when set. Otherwise `~/.config/soultracker`,
/// or `~/.config/soultracker-dev` with `SOULTRACKER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::NoDataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Location [`data_dir`] resolves to, without creating it.
pub fn data_dir_path() -> PathBuf {
    match std::env::var_os("SOULTRACKER_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SOULTRACKER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("soultracker-dev")
            } else {
                base_dir.join("soultracker")
            }
        }
    }
}

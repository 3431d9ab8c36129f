pub mod booster;
pub mod checkin;
pub mod classify;
pub mod config;
pub mod leaderboard;
pub mod mood;
pub mod user;

use chrono::NaiveDate;
use serde::Serialize;
use soultracker_core::calendar::parse_date;
use soultracker_core::{Config, Tracker, UserDb};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Tracker over the on-disk database, configured from `config.toml`.
pub fn open_tracker() -> Result<Tracker<UserDb>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    Ok(Tracker::from_config(UserDb::open()?, &config)?)
}

/// `--today` override, or the local calendar date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match today {
        Some(s) => parse_date(s).map_err(|e| format!("invalid date '{s}': {e}").into()),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

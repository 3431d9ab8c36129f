use clap::Subcommand;
use soultracker_core::Config;

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the whole configuration
    Show,
    /// Get a config value
    Get {
        /// Dotted key (e.g. "ledger.daily_bonus", "classifier.preset")
        key: String,
    },
    /// Set a config value
    Set {
        /// Dotted key
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

pub fn run(action: ConfigAction) -> CmdResult {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => print_json(&config)?,
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            println!("ok");
        }
    }
    Ok(())
}

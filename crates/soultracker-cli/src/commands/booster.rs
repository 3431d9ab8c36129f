use clap::Subcommand;

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum BoosterAction {
    /// Record a completed booster and award its points
    Complete {
        email: String,
        /// Override the configured award
        #[arg(long, allow_negative_numbers = true)]
        points: Option<i64>,
    },
}

pub fn run(action: BoosterAction) -> CmdResult {
    let tracker = open_tracker()?;

    match action {
        BoosterAction::Complete { email, points } => {
            let user = tracker.user_by_email(&email)?;
            let award = tracker.complete_booster(&user.id, points)?;
            print_json(&award)?;
        }
    }
    Ok(())
}

use clap::Args;

use super::{open_tracker, print_json, resolve_today, CmdResult};

#[derive(Args)]
pub struct CheckinArgs {
    /// Account email
    email: String,
    /// Check in as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    today: Option<String>,
}

pub fn run(args: CheckinArgs) -> CmdResult {
    let tracker = open_tracker()?;
    let today = resolve_today(args.today.as_deref())?;
    let outcome = tracker.log_in(&args.email, today)?;
    print_json(&outcome)
}

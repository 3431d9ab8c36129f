use clap::Args;

use super::{open_tracker, print_json, CmdResult};

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Email of the user viewing the board
    email: String,
}

pub fn run(args: LeaderboardArgs) -> CmdResult {
    let tracker = open_tracker()?;
    let user = tracker.user_by_email(&args.email)?;
    print_json(&tracker.leaderboard(&user.id)?)
}

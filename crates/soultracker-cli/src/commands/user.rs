use clap::Subcommand;
use serde::Serialize;
use soultracker_core::{Level, UserStore};

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum UserAction {
    /// Create an account
    Signup {
        email: String,
    },
    /// Show one account
    Show {
        email: String,
    },
    /// List all accounts
    List,
}

#[derive(Serialize)]
struct UserRow {
    id: String,
    email: String,
    points: i64,
    current_streak: i64,
    level: &'static str,
}

pub fn run(action: UserAction) -> CmdResult {
    let tracker = open_tracker()?;

    match action {
        UserAction::Signup { email } => {
            let user = tracker.sign_up(&email, chrono::Utc::now())?;
            print_json(&user)?;
        }
        UserAction::Show { email } => {
            let user = tracker.user_by_email(&email)?;
            print_json(&user)?;
        }
        UserAction::List => {
            let mut users = tracker.store().all()?;
            users.sort_by(|a, b| a.email.cmp(&b.email));
            let rows: Vec<UserRow> = users
                .into_iter()
                .map(|u| UserRow {
                    level: Level::for_points(u.points).name(),
                    id: u.id,
                    email: u.email,
                    points: u.points,
                    current_streak: u.current_streak,
                })
                .collect();
            print_json(&rows)?;
        }
    }
    Ok(())
}

use clap::Subcommand;
use chrono::Utc;
use soultracker_core::{Emotion, MAX_WINDOW_DAYS};

use super::{open_tracker, print_json, CmdResult};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Log an emotion directly
    Log {
        email: String,
        /// joy, calm, anxiety, frustration, sadness or neutral
        emotion: String,
    },
    /// Log the emotion detected in a message
    Message {
        email: String,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Progress and mood summary
    Summary {
        email: String,
        /// Trailing window in days
        #[arg(
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u32).range(..=MAX_WINDOW_DAYS as i64)
        )]
        days: u32,
    },
}

pub fn run(action: MoodAction) -> CmdResult {
    let tracker = open_tracker()?;

    match action {
        MoodAction::Log { email, emotion } => {
            let emotion: Emotion = emotion.parse()?;
            let user = tracker.user_by_email(&email)?;
            let user = tracker.log_emotion(&user.id, emotion, Utc::now())?;
            print_json(&user.emotion_log.last())?;
        }
        MoodAction::Message { email, text } => {
            let user = tracker.user_by_email(&email)?;
            let analysis = tracker.record_message(&user.id, &text.join(" "), Utc::now())?;
            print_json(&analysis)?;
        }
        MoodAction::Summary { email, days } => {
            let user = tracker.user_by_email(&email)?;
            // log entries are bucketed by UTC day
            let summary = tracker.summary(&user.id, Utc::now().date_naive(), days)?;
            print_json(&summary)?;
        }
    }
    Ok(())
}

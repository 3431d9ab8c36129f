//! Persisted per-user record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::checkin::CheckinState;
use crate::emotion::Emotion;

/// One logged mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionLogEntry {
    pub emotion: Emotion,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub points: i64,
    pub current_streak: i64,
    pub last_checkin_date: Option<NaiveDate>,
    #[serde(default)]
    pub emotion_log: Vec<EmotionLogEntry>,
    #[serde(default)]
    pub boosters_completed: u32,
    pub joined_at: DateTime<Utc>,
}

impl UserRecord {
    /// Fresh account: no points, no streak, never checked in.
    pub fn new(id: impl Into<String>, email: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            points: 0,
            current_streak: 0,
            last_checkin_date: None,
            emotion_log: Vec::new(),
            boosters_completed: 0,
            joined_at,
        }
    }

    /// Copy of the fields the ledger works on.
    pub fn checkin_state(&self) -> CheckinState {
        CheckinState {
            last_checkin_date: self.last_checkin_date,
            current_streak: self.current_streak,
            points: self.points,
        }
    }

    pub fn apply_checkin(&mut self, state: &CheckinState) {
        self.last_checkin_date = state.last_checkin_date;
        self.current_streak = state.current_streak;
        self.points = state.points;
    }

    pub fn log_emotion(&mut self, emotion: Emotion, logged_at: DateTime<Utc>) {
        self.emotion_log.push(EmotionLogEntry { emotion, logged_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn checkin_state_roundtrips_through_record() {
        let joined = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let mut user = UserRecord::new("user-1", "test@example.com", joined);
        assert_eq!(user.checkin_state(), CheckinState::default());

        let state = CheckinState::new(NaiveDate::from_ymd_opt(2024, 1, 2), 3, 40);
        user.apply_checkin(&state);
        assert_eq!(user.checkin_state(), state);
        assert!(user.emotion_log.is_empty());
    }
}

//! User-facing operations over an injected store.
//!
//! `Tracker` pairs a store handle with the classifier and ledger and applies
//! their results through [`UserStore::update`], so each operation is one
//! atomic read-modify-write of a single user record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::checkin::{CheckinResult, Ledger};
use crate::emotion::{Emotion, EmotionClassifier, MoodBooster};
use crate::error::{Result, StoreError};
use crate::leaderboard::Leaderboard;
use crate::progress::{LevelProgress, MoodSummary};
use crate::storage::{Config, UserRecord, UserStore};

/// Result of logging in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub user: UserRecord,
    /// True when the login earned a check-in bonus
    pub daily_checkin: bool,
    pub checkin: CheckinResult,
}

/// Classification of one chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAnalysis {
    pub emotion: Emotion,
    pub booster: Option<MoodBooster>,
}

/// Result of completing a booster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoosterAward {
    pub points: i64,
    pub new_total: i64,
}

/// Dashboard view of one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub email: String,
    pub points: i64,
    pub current_streak: i64,
    pub last_checkin_date: Option<NaiveDate>,
    pub progress: LevelProgress,
    pub boosters_completed: u32,
    pub moods: MoodSummary,
}

pub struct Tracker<S: UserStore> {
    store: S,
    classifier: EmotionClassifier,
    ledger: Ledger,
    leaderboard_size: usize,
}

impl<S: UserStore> Tracker<S> {
    /// Tracker with the standard keyword table and default bonuses.
    pub fn new(store: S) -> Self {
        Self {
            store,
            classifier: EmotionClassifier::new(),
            ledger: Ledger::new(),
            leaderboard_size: 10,
        }
    }

    /// Tracker configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the ledger bonuses are negative.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        Ok(Self {
            store,
            classifier: EmotionClassifier::with_table(config.classifier.keyword_table()),
            ledger: Ledger::with_config(config.ledger.clone())?,
            leaderboard_size: config.leaderboard.size,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn classifier(&self) -> &EmotionClassifier {
        &self.classifier
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// [`StoreError::DuplicateEmail`] if the email is already registered.
    pub fn sign_up(&self, email: &str, now: DateTime<Utc>) -> Result<UserRecord> {
        let id = format!("user-{}", uuid::Uuid::new_v4());
        let record = UserRecord::new(id, email.trim(), now);
        self.store.insert(record.clone())?;
        info!(user_id = %record.id, "signed up");
        Ok(record)
    }

    pub fn user_by_email(&self, email: &str) -> Result<UserRecord> {
        let email = email.trim();
        self.store
            .find_by_email(email)?
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()).into())
    }

    /// Log in by email, applying the day's check-in.
    pub fn log_in(&self, email: &str, today: NaiveDate) -> Result<LoginOutcome> {
        let user = self.user_by_email(email)?;
        let (user, checkin) = self.check_in(&user.id, today)?;
        Ok(LoginOutcome {
            daily_checkin: checkin.bonus_awarded(),
            user,
            checkin,
        })
    }

    /// Apply the day's check-in for `user_id`.
    pub fn check_in(&self, user_id: &str, today: NaiveDate) -> Result<(UserRecord, CheckinResult)> {
        let mut outcome = None;
        let user = self.store.update(user_id, &mut |user| {
            let result = self.ledger.checkin(&user.checkin_state(), today)?;
            user.apply_checkin(&result.new_state);
            outcome = Some(result);
            Ok(())
        })?;

        let result = outcome.ok_or_else(|| StoreError::Corrupt {
            id: user_id.to_string(),
            message: "store reported success without applying the check-in".to_string(),
        })?;
        info!(
            user_id = %user_id,
            outcome = ?result.outcome,
            streak = user.current_streak,
            awarded = result.points_awarded,
            "check-in applied"
        );
        Ok((user, result))
    }

    pub fn log_emotion(&self, user_id: &str, emotion: Emotion, at: DateTime<Utc>) -> Result<UserRecord> {
        self.store.update(user_id, &mut |user| {
            user.log_emotion(emotion, at);
            Ok(())
        })
    }

    /// Classify a chat message, log its emotion and suggest a booster for
    /// negative categories.
    pub fn record_message(&self, user_id: &str, text: &str, at: DateTime<Utc>) -> Result<MessageAnalysis> {
        let emotion = self.classifier.classify(text);
        let user = self.log_emotion(user_id, emotion, at)?;
        let booster = MoodBooster::suggest_with_points(
            emotion,
            user.emotion_log.len(),
            self.ledger.config().booster_points,
        );
        Ok(MessageAnalysis { emotion, booster })
    }

    /// Award booster points; `None` uses the configured amount.
    pub fn complete_booster(&self, user_id: &str, points: Option<i64>) -> Result<BoosterAward> {
        let award = points.unwrap_or(self.ledger.config().booster_points);
        let user = self.store.update(user_id, &mut |user| {
            user.points = crate::checkin::award_booster_completion(user.points, award)?;
            user.boosters_completed = user.boosters_completed.saturating_add(1);
            Ok(())
        })?;
        info!(user_id = %user_id, award, total = user.points, "booster completed");
        Ok(BoosterAward {
            points: award,
            new_total: user.points,
        })
    }

    pub fn leaderboard(&self, current_user_id: &str) -> Result<Leaderboard> {
        let users = self.store.all()?;
        Ok(Leaderboard::build(&users, current_user_id, self.leaderboard_size))
    }

    pub fn summary(&self, user_id: &str, today: NaiveDate, window_days: u32) -> Result<UserSummary> {
        let user = self.store.get(user_id)?;
        Ok(UserSummary {
            progress: LevelProgress::for_points(user.points),
            moods: MoodSummary::from_log(&user.emotion_log, today, window_days),
            email: user.email,
            points: user.points,
            current_streak: user.current_streak,
            last_checkin_date: user.last_checkin_date,
            boosters_completed: user.boosters_completed,
        })
    }
}

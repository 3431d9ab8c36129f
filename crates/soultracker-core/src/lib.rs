//! # SoulTracker Core Library
//!
//! This library provides the domain logic behind the SoulTracker wellness
//! companion: classifying how a message sounds, keeping daily check-in
//! streaks and awarding points. A standalone CLI binary exposes the same
//! operations.
//!
//! ## Architecture
//!
//! - **Emotion Classifier**: ordered keyword tables, first whole-word hit wins
//! - **Check-in Ledger**: pure streak/points state machine over calendar days;
//!   the caller supplies "today"
//! - **Storage**: a `UserStore` trait with in-memory and SQLite backends, and
//!   TOML-based configuration
//! - **Tracker**: applies ledger results to a store as atomic updates
//!
//! ## Key Components
//!
//! - [`EmotionClassifier`]: text to [`Emotion`]
//! - [`Ledger`]: check-in state transitions and booster awards
//! - [`UserStore`]: injectable user-record persistence
//! - [`Tracker`]: sign-up, log-in, mood logging, leaderboard

pub mod calendar;
pub mod checkin;
pub mod emotion;
pub mod error;
pub mod leaderboard;
pub mod progress;
pub mod storage;
pub mod tracker;

pub use checkin::{
    award_booster_completion, CheckinOutcome, CheckinResult, CheckinState, Ledger, LedgerConfig,
    DEFAULT_BOOSTER_POINTS,
};
pub use emotion::{Emotion, EmotionClassifier, KeywordGroup, KeywordTable, MoodBooster, TablePreset};
pub use error::{ConfigError, CoreError, LedgerError, StoreError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use progress::{Level, LevelProgress, MoodSummary, MAX_WINDOW_DAYS};
pub use storage::{Config, MemoryStore, UserDb, UserRecord, UserStore};
pub use tracker::{BoosterAward, LoginOutcome, MessageAnalysis, Tracker, UserSummary};

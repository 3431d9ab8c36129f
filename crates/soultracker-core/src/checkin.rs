//! Daily check-in streak ledger.
//!
//! The ledger receives a copy of a user's check-in state and the caller's
//! idea of "today", and returns the state that should be persisted. It
//! never touches the store and never reads the clock, so replaying the same
//! `(state, today)` pair always produces the same answer.
//!
//! | previous check-in      | effect                                   |
//! |------------------------|------------------------------------------|
//! | none                   | streak = 1, first-check-in bonus          |
//! | same day (or later)    | nothing                                  |
//! | yesterday              | streak + 1, daily bonus                   |
//! | two or more days ago   | streak = 1, no bonus, points kept         |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::DayRelation;
use crate::error::LedgerError;

/// Points granted on the very first check-in.
pub const FIRST_CHECKIN_BONUS: i64 = 5;
/// Points granted for continuing a streak.
pub const DAILY_BONUS: i64 = 5;
/// Points granted for completing a mood booster.
pub const DEFAULT_BOOSTER_POINTS: i64 = 10;

/// Per-user check-in record as held by the user store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinState {
    /// Day of the most recent counted check-in
    pub last_checkin_date: Option<NaiveDate>,

    /// Consecutive days including `last_checkin_date`
    pub current_streak: i64,

    /// Banked points; never decreases
    pub points: i64,
}

impl CheckinState {
    pub fn new(last_checkin_date: Option<NaiveDate>, current_streak: i64, points: i64) -> Self {
        Self {
            last_checkin_date,
            current_streak,
            points,
        }
    }

    /// Reject negative counters.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.current_streak < 0 {
            return Err(LedgerError::InvalidState {
                field: "current_streak",
                value: self.current_streak,
            });
        }
        if self.points < 0 {
            return Err(LedgerError::InvalidState {
                field: "points",
                value: self.points,
            });
        }
        Ok(())
    }
}

/// Which branch of the ledger was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinOutcome {
    FirstCheckin,
    AlreadyCheckedIn,
    Continued,
    Reset,
}

/// Result of a single check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinResult {
    pub new_state: CheckinState,
    pub streak_changed: bool,
    pub points_awarded: i64,
    pub outcome: CheckinOutcome,
}

impl CheckinResult {
    /// True when this check-in earned a bonus (first or consecutive day).
    pub fn bonus_awarded(&self) -> bool {
        self.points_awarded > 0
    }
}

/// Bonus-point amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_first_checkin_bonus")]
    pub first_checkin_bonus: i64,

    #[serde(default = "default_daily_bonus")]
    pub daily_bonus: i64,

    #[serde(default = "default_booster_points")]
    pub booster_points: i64,
}

fn default_first_checkin_bonus() -> i64 {
    FIRST_CHECKIN_BONUS
}
fn default_daily_bonus() -> i64 {
    DAILY_BONUS
}
fn default_booster_points() -> i64 {
    DEFAULT_BOOSTER_POINTS
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            first_checkin_bonus: FIRST_CHECKIN_BONUS,
            daily_bonus: DAILY_BONUS,
            booster_points: DEFAULT_BOOSTER_POINTS,
        }
    }
}

impl LedgerConfig {
    /// Bonuses must be non-negative so points can never go down.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (field, value) in [
            ("first_checkin_bonus", self.first_checkin_bonus),
            ("daily_bonus", self.daily_bonus),
            ("booster_points", self.booster_points),
        ] {
            if value < 0 {
                return Err(LedgerError::InvalidArgument { field, value });
            }
        }
        Ok(())
    }
}

/// Streak and points calculator.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger with the default bonuses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with custom bonuses.
    pub fn with_config(config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Apply a check-in for `today` to `state`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidState`] if the streak or points are negative.
    pub fn checkin(&self, state: &CheckinState, today: NaiveDate) -> Result<CheckinResult, LedgerError> {
        if let Err(e) = state.validate() {
            warn!(error = %e, "rejecting check-in for invalid state");
            return Err(e);
        }

        let Some(last) = state.last_checkin_date else {
            let awarded = self.config.first_checkin_bonus;
            debug!(%today, awarded, "first check-in");
            return Ok(CheckinResult {
                new_state: CheckinState {
                    last_checkin_date: Some(today),
                    current_streak: 1,
                    points: state.points.saturating_add(awarded),
                },
                streak_changed: true,
                points_awarded: awarded,
                outcome: CheckinOutcome::FirstCheckin,
            });
        };

        let result = match DayRelation::between(last, today) {
            DayRelation::SameDay | DayRelation::Earlier(_) => CheckinResult {
                new_state: state.clone(),
                streak_changed: false,
                points_awarded: 0,
                outcome: CheckinOutcome::AlreadyCheckedIn,
            },
            DayRelation::Consecutive => {
                let awarded = self.config.daily_bonus;
                CheckinResult {
                    new_state: CheckinState {
                        last_checkin_date: Some(today),
                        current_streak: state.current_streak.saturating_add(1),
                        points: state.points.saturating_add(awarded),
                    },
                    streak_changed: true,
                    points_awarded: awarded,
                    outcome: CheckinOutcome::Continued,
                }
            }
            DayRelation::Gap(_) => CheckinResult {
                new_state: CheckinState {
                    last_checkin_date: Some(today),
                    current_streak: 1,
                    points: state.points,
                },
                streak_changed: true,
                points_awarded: 0,
                outcome: CheckinOutcome::Reset,
            },
        };

        debug!(
            %last,
            %today,
            outcome = ?result.outcome,
            streak = result.new_state.current_streak,
            awarded = result.points_awarded,
            "check-in evaluated"
        );
        Ok(result)
    }

    /// Award the configured booster points.
    pub fn award_booster(&self, current_points: i64) -> Result<i64, LedgerError> {
        award_booster_completion(current_points, self.config.booster_points)
    }
}

/// Add a booster award to a point balance.
///
/// # Errors
///
/// [`LedgerError::InvalidArgument`] for a negative award,
/// [`LedgerError::InvalidState`] for a negative balance.
pub fn award_booster_completion(current_points: i64, booster_points: i64) -> Result<i64, LedgerError> {
    if booster_points < 0 {
        return Err(LedgerError::InvalidArgument {
            field: "booster_points",
            value: booster_points,
        });
    }
    if current_points < 0 {
        return Err(LedgerError::InvalidState {
            field: "points",
            value: current_points,
        });
    }
    Ok(current_points.saturating_add(booster_points))
}

//! Calendar-day comparison helpers.
//!
//! Every comparison pins both sides to noon before differencing, so a
//! daylight-saving shift or a late-evening timestamp never moves a value
//! onto the neighbouring day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default()
}

/// `date` at 12:00 wall-clock time.
pub fn at_noon(date: NaiveDate) -> NaiveDateTime {
    date.and_time(noon())
}

/// Calendar date of a timestamp in its own time zone.
pub fn day_of<Tz: TimeZone>(ts: &DateTime<Tz>) -> NaiveDate {
    ts.date_naive()
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let secs = (at_noon(to) - at_noon(from)).num_seconds();
    (secs as f64 / SECONDS_PER_DAY).round() as i64
}

/// Whole calendar days between two timestamps, each pinned to local noon
/// in its own zone first.
pub fn days_between_timestamps<A: TimeZone, B: TimeZone>(from: &DateTime<A>, to: &DateTime<B>) -> i64 {
    match (local_noon(from), local_noon(to)) {
        (Some(a), Some(b)) => {
            let secs = (b - a).num_seconds();
            (secs as f64 / SECONDS_PER_DAY).round() as i64
        }
        _ => days_between(day_of(from), day_of(to)),
    }
}

fn local_noon<Tz: TimeZone>(ts: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    ts.timezone()
        .from_local_datetime(&at_noon(ts.date_naive()))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// True when both dates are the same calendar day.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    days_between(a, b) == 0
}

/// True when `later` is exactly the day after `earlier`.
pub fn are_consecutive_days(earlier: NaiveDate, later: NaiveDate) -> bool {
    days_between(earlier, later) == 1
}

/// How `today` relates to a previous check-in day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "days")]
pub enum DayRelation {
    SameDay,
    Consecutive,
    /// More than one day later
    Gap(i64),
    /// `today` is before the previous day (clock skew)
    Earlier(i64),
}

impl DayRelation {
    pub fn between(previous: NaiveDate, today: NaiveDate) -> Self {
        match days_between(previous, today) {
            0 => DayRelation::SameDay,
            1 => DayRelation::Consecutive,
            n if n > 1 => DayRelation::Gap(n),
            n => DayRelation::Earlier(-n),
        }
    }
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its calendar date
/// in its own offset.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(date_err) => DateTime::parse_from_rfc3339(s)
            .map(|dt| day_of(&dt))
            .map_err(|_| date_err),
    }
}

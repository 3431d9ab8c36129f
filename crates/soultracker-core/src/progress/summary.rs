//! Mood summary over a trailing window of days.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{day_of, days_between};
use crate::emotion::Emotion;
use crate::storage::EmotionLogEntry;

/// Longest window a summary covers; larger requests are clamped.
pub const MAX_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: u32,
    /// Rounded share of the window total
    pub percentage: u32,
}

/// Per-day tallies, one entry per day of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounts {
    pub date: NaiveDate,
    pub counts: BTreeMap<Emotion, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub window_days: u32,
    pub total: u32,
    /// Non-zero categories, most frequent first
    pub top_emotions: Vec<EmotionCount>,
    /// Oldest day first
    pub trend: Vec<DayCounts>,
    /// Distinct non-neutral categories seen in the window
    pub distinct_categories: usize,
}

impl MoodSummary {
    /// Summarize entries logged in the `window_days` days ending with `today`.
    ///
    /// Entries are bucketed by their UTC calendar day. The window is clamped
    /// to [`MAX_WINDOW_DAYS`] and stops at the earliest representable date.
    pub fn from_log(entries: &[EmotionLogEntry], today: NaiveDate, window_days: u32) -> Self {
        let requested = window_days.min(MAX_WINDOW_DAYS);
        let mut trend: Vec<DayCounts> = (0..requested)
            .map_while(|back| today.checked_sub_days(Days::new(u64::from(back))))
            .map(|date| DayCounts {
                date,
                counts: BTreeMap::new(),
            })
            .collect();
        trend.reverse();
        let window_days = trend.len() as u32;

        let mut totals: BTreeMap<Emotion, u32> = BTreeMap::new();
        for entry in entries {
            let age = days_between(day_of(&entry.logged_at), today);
            if age < 0 || age >= i64::from(window_days) {
                continue;
            }
            *totals.entry(entry.emotion).or_default() += 1;
            let slot = trend.len() - 1 - age as usize;
            *trend[slot].counts.entry(entry.emotion).or_default() += 1;
        }

        let total: u32 = totals.values().sum();
        let mut top_emotions: Vec<EmotionCount> = totals
            .iter()
            .map(|(&emotion, &count)| EmotionCount {
                emotion,
                count,
                percentage: percentage(count, total),
            })
            .collect();
        // BTreeMap order is category order, so a stable sort keeps it for ties.
        top_emotions.sort_by(|a, b| b.count.cmp(&a.count));

        let distinct_categories = totals.keys().filter(|e| **e != Emotion::Neutral).count();

        Self {
            window_days,
            total,
            top_emotions,
            trend,
            distinct_categories,
        }
    }

    /// True once every non-neutral category has been logged in the window.
    pub fn explored_all_categories(&self) -> bool {
        self.distinct_categories == Emotion::ALL.len() - 1
    }
}

fn percentage(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(count) * 100.0 / f64::from(total)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(emotion: Emotion, y: i32, m: u32, d: u32) -> EmotionLogEntry {
        EmotionLogEntry {
            emotion,
            logged_at: Utc.with_ymd_and_hms(y, m, d, 15, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 21).unwrap()
    }

    #[test]
    fn counts_within_window_only() {
        let log = vec![
            entry(Emotion::Calm, 2024, 1, 21),
            entry(Emotion::Calm, 2024, 1, 20),
            entry(Emotion::Joy, 2024, 1, 15),
            entry(Emotion::Sadness, 2024, 1, 14), // 7 days back, outside
            entry(Emotion::Anxiety, 2024, 1, 22), // future
        ];
        let summary = MoodSummary::from_log(&log, today(), 7);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.top_emotions[0].emotion, Emotion::Calm);
        assert_eq!(summary.top_emotions[0].count, 2);
        assert_eq!(summary.top_emotions[0].percentage, 67);
        assert_eq!(summary.top_emotions[1].percentage, 33);
        assert_eq!(summary.distinct_categories, 2);
        assert!(!summary.explored_all_categories());
    }

    #[test]
    fn trend_has_one_slot_per_day() {
        let log = vec![entry(Emotion::Joy, 2024, 1, 15), entry(Emotion::Joy, 2024, 1, 21)];
        let summary = MoodSummary::from_log(&log, today(), 7);

        assert_eq!(summary.trend.len(), 7);
        assert_eq!(summary.trend[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(summary.trend[6].date, today());
        assert_eq!(summary.trend[0].counts.get(&Emotion::Joy), Some(&1));
        assert_eq!(summary.trend[6].counts.get(&Emotion::Joy), Some(&1));
        assert!(summary.trend[3].counts.is_empty());
    }

    #[test]
    fn ties_keep_category_order() {
        let log = vec![
            entry(Emotion::Sadness, 2024, 1, 21),
            entry(Emotion::Joy, 2024, 1, 21),
        ];
        let summary = MoodSummary::from_log(&log, today(), 1);
        assert_eq!(summary.top_emotions[0].emotion, Emotion::Joy);
        assert_eq!(summary.top_emotions[1].emotion, Emotion::Sadness);
    }

    #[test]
    fn oversized_window_is_clamped() {
        let log = vec![entry(Emotion::Calm, 2010, 6, 1), entry(Emotion::Joy, 2024, 1, 21)];
        let summary = MoodSummary::from_log(&log, today(), u32::MAX);

        assert_eq!(summary.window_days, MAX_WINDOW_DAYS);
        assert_eq!(summary.trend.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(summary.trend.last().map(|d| d.date), Some(today()));
        // 2010 is more than ten years back
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn window_stops_at_earliest_date() {
        let today = NaiveDate::MIN + Days::new(4);
        let summary = MoodSummary::from_log(&[], today, 100);

        assert_eq!(summary.window_days, 5);
        assert_eq!(summary.trend.first().map(|d| d.date), Some(NaiveDate::MIN));
        assert_eq!(summary.total, 0);
    }

    #[test]
    fn all_categories_and_empty_window() {
        let log: Vec<_> = [
            Emotion::Joy,
            Emotion::Calm,
            Emotion::Anxiety,
            Emotion::Frustration,
            Emotion::Sadness,
            Emotion::Neutral,
        ]
        .into_iter()
        .map(|e| entry(e, 2024, 1, 20))
        .collect();
        assert!(MoodSummary::from_log(&log, today(), 7).explored_all_categories());

        let empty = MoodSummary::from_log(&log, today(), 0);
        assert_eq!(empty.total, 0);
        assert!(empty.trend.is_empty());
        assert!(empty.top_emotions.is_empty());
    }
}

//! Point-based progress levels and mood summaries.

pub mod summary;

pub use summary::{EmotionCount, MoodSummary, MAX_WINDOW_DAYS};

use serde::{Deserialize, Serialize};

/// Progress tier, ordered by the points needed to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    EmotionalNewbie,
    MindfulExplorer,
    WellnessWarrior,
    EmotionalExpert,
    ZenMaster,
    EmotionalWizard,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::EmotionalNewbie,
        Level::MindfulExplorer,
        Level::WellnessWarrior,
        Level::EmotionalExpert,
        Level::ZenMaster,
        Level::EmotionalWizard,
    ];

    /// Points at which this level starts.
    pub fn min_points(&self) -> i64 {
        match self {
            Level::EmotionalNewbie => 0,
            Level::MindfulExplorer => 100,
            Level::WellnessWarrior => 300,
            Level::EmotionalExpert => 600,
            Level::ZenMaster => 1000,
            Level::EmotionalWizard => 2000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::EmotionalNewbie => "Emotional Newbie",
            Level::MindfulExplorer => "Mindful Explorer",
            Level::WellnessWarrior => "Wellness Warrior",
            Level::EmotionalExpert => "Emotional Expert",
            Level::ZenMaster => "Zen Master",
            Level::EmotionalWizard => "Emotional Wizard",
        }
    }

    /// Highest level whose minimum is reached; negative balances get the first.
    pub fn for_points(points: i64) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|level| points >= level.min_points())
            .unwrap_or(Level::EmotionalNewbie)
    }

    pub fn next(&self) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level > self)
    }
}

/// Where a balance sits between its level and the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: Level,
    pub next: Option<Level>,
    /// 0–100; 100 at the top level
    pub percent_to_next: f64,
}

impl LevelProgress {
    pub fn for_points(points: i64) -> Self {
        let level = Level::for_points(points);
        let next = level.next();
        let percent_to_next = match next {
            Some(next) => {
                let span = (next.min_points() - level.min_points()) as f64;
                let done = (points.max(0) - level.min_points()) as f64;
                (done / span * 100.0).clamp(0.0, 100.0)
            }
            None => 100.0,
        };
        Self {
            level,
            next,
            percent_to_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(Level::for_points(-10), Level::EmotionalNewbie);
        assert_eq!(Level::for_points(0), Level::EmotionalNewbie);
        assert_eq!(Level::for_points(99), Level::EmotionalNewbie);
        assert_eq!(Level::for_points(100), Level::MindfulExplorer);
        assert_eq!(Level::for_points(599), Level::WellnessWarrior);
        assert_eq!(Level::for_points(1999), Level::ZenMaster);
        assert_eq!(Level::for_points(2000), Level::EmotionalWizard);
        assert_eq!(Level::for_points(i64::MAX), Level::EmotionalWizard);
    }

    #[test]
    fn progress_between_levels() {
        let p = LevelProgress::for_points(200);
        assert_eq!(p.level, Level::MindfulExplorer);
        assert_eq!(p.next, Some(Level::WellnessWarrior));
        assert!((p.percent_to_next - 50.0).abs() < f64::EPSILON);

        let top = LevelProgress::for_points(5000);
        assert_eq!(top.next, None);
        assert_eq!(top.percent_to_next, 100.0);

        assert_eq!(LevelProgress::for_points(-5).percent_to_next, 0.0);
    }

    #[test]
    fn names() {
        assert_eq!(Level::ZenMaster.name(), "Zen Master");
        assert_eq!(Level::EmotionalWizard.next(), None);
    }
}

//! Mood-booster catalog.
//!
//! Negative categories get a short micro-exercise suggestion. Completing one
//! awards points through [`crate::checkin::award_booster_completion`].

use serde::{Deserialize, Serialize};

use super::Emotion;
use crate::checkin::DEFAULT_BOOSTER_POINTS;

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoosterTemplate {
    pub title: &'static str,
    pub description: &'static str,
}

const ANXIETY: [BoosterTemplate; 3] = [
    BoosterTemplate {
        title: "5-Minute Breathing Exercise",
        description: "Take 5 deep breaths, counting to 4 on inhale and 6 on exhale",
    },
    BoosterTemplate {
        title: "Grounding Technique",
        description: "Name 5 things you can see, 4 you can touch, 3 you can hear",
    },
    BoosterTemplate {
        title: "Gentle Movement",
        description: "Do some light stretching or take a short walk",
    },
];

const FRUSTRATION: [BoosterTemplate; 3] = [
    BoosterTemplate {
        title: "Write It Out",
        description: "Spend 3 minutes writing about what's frustrating you",
    },
    BoosterTemplate {
        title: "Progressive Muscle Relaxation",
        description: "Tense and release each muscle group for 5 seconds",
    },
    BoosterTemplate {
        title: "Cooling Visualization",
        description: "Imagine a peaceful, cool place for 2 minutes",
    },
];

const SADNESS: [BoosterTemplate; 3] = [
    BoosterTemplate {
        title: "Gratitude Practice",
        description: "Write down 3 things you're grateful for today",
    },
    BoosterTemplate {
        title: "Self-Compassion Break",
        description: "Give yourself the kindness you'd give a good friend",
    },
    BoosterTemplate {
        title: "Gentle Self-Care",
        description: "Do one small thing that brings you comfort",
    },
];

/// Catalog entries for a category; empty for non-negative ones.
pub fn catalog(emotion: Emotion) -> &'static [BoosterTemplate] {
    match emotion {
        Emotion::Anxiety => &ANXIETY,
        Emotion::Frustration => &FRUSTRATION,
        Emotion::Sadness => &SADNESS,
        Emotion::Joy | Emotion::Calm | Emotion::Neutral => &[],
    }
}

/// A booster offered to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodBooster {
    pub id: String,
    pub emotion: Emotion,
    pub title: String,
    pub description: String,
    pub points: i64,
    pub completed: bool,
}

impl MoodBooster {
    /// Pick a booster for `emotion`, or `None` when the category has none.
    ///
    /// Selection is `seed % catalog_len` so callers control variety
    /// (e.g. by passing the number of messages logged so far).
    pub fn suggest(emotion: Emotion, seed: usize) -> Option<Self> {
        Self::suggest_with_points(emotion, seed, DEFAULT_BOOSTER_POINTS)
    }

    pub fn suggest_with_points(emotion: Emotion, seed: usize, points: i64) -> Option<Self> {
        let entries = catalog(emotion);
        if entries.is_empty() {
            return None;
        }
        let index = seed % entries.len();
        let template = entries[index];
        Some(Self {
            id: format!("mb-{}-{}", emotion, index),
            emotion,
            title: template.title.to_string(),
            description: template.description.to_string(),
            points,
            completed: false,
        })
    }
}

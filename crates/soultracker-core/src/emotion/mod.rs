//! Emotion categories, keyword classification and mood boosters.

pub mod booster;
pub mod classifier;

pub use booster::{MoodBooster, BoosterTemplate};
pub use classifier::{EmotionClassifier, KeywordGroup, KeywordTable, TablePreset};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse affect label used for theming and booster selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Calm,
    Anxiety,
    Frustration,
    Sadness,
    Neutral,
}

impl Emotion {
    /// All categories in classification priority order, `Neutral` last.
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Calm,
        Emotion::Anxiety,
        Emotion::Frustration,
        Emotion::Sadness,
        Emotion::Neutral,
    ];

    /// Categories that get a mood-booster suggestion
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Emotion::Anxiety | Emotion::Frustration | Emotion::Sadness
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Calm => "calm",
            Emotion::Anxiety => "anxiety",
            Emotion::Frustration => "frustration",
            Emotion::Sadness => "sadness",
            Emotion::Neutral => "neutral",
        }
    }

    /// Avatar hint shown next to companion replies.
    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Joy => "😊",
            Emotion::Calm => "😌",
            Emotion::Anxiety => "😟",
            Emotion::Frustration => "😤",
            Emotion::Sadness => "😢",
            Emotion::Neutral => "🙂",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == needle)
            .ok_or_else(|| format!("unknown emotion: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Joy".parse::<Emotion>(), Ok(Emotion::Joy));
        assert_eq!(" SADNESS ".parse::<Emotion>(), Ok(Emotion::Sadness));
        assert!("bliss".parse::<Emotion>().is_err());
    }

    #[test]
    fn only_three_categories_are_negative() {
        let negative: Vec<_> = Emotion::ALL.into_iter().filter(|e| e.is_negative()).collect();
        assert_eq!(
            negative,
            vec![Emotion::Anxiety, Emotion::Frustration, Emotion::Sadness]
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Emotion::Calm).unwrap(), "\"calm\"");
        let parsed: Emotion = serde_json::from_str("\"frustration\"").unwrap();
        assert_eq!(parsed, Emotion::Frustration);
    }
}

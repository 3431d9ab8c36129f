//! Keyword-based emotion classification.
//!
//! Text is lower-cased and split into word tokens (runs of alphanumeric
//! characters or `_`). Keyword groups are tested in table order and the
//! first group with a whole-word hit decides the category. When nothing
//! matches the table's default category is returned.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Emotion;

/// A category together with the words that signal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub emotion: Emotion,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    pub fn new(emotion: Emotion, keywords: &[&str]) -> Self {
        Self {
            emotion,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Built-in keyword tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TablePreset {
    /// Mood-log word list, falls back to `Neutral`
    #[default]
    Standard,
    /// Check-in chat word list, falls back to `Calm`
    Extended,
}

/// Ordered keyword groups plus the fallback category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTable {
    groups: Vec<KeywordGroup>,
    default_emotion: Emotion,
}

impl KeywordTable {
    /// Build a table; group order is match priority.
    pub fn new(groups: Vec<KeywordGroup>, default_emotion: Emotion) -> Self {
        let groups = groups
            .into_iter()
            .map(|g| KeywordGroup {
                emotion: g.emotion,
                keywords: g
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();
        Self {
            groups,
            default_emotion,
        }
    }

    pub fn from_preset(preset: TablePreset) -> Self {
        match preset {
            TablePreset::Standard => Self::standard(),
            TablePreset::Extended => Self::extended(),
        }
    }

    pub fn standard() -> Self {
        Self::new(
            vec![
                KeywordGroup::new(
                    Emotion::Joy,
                    &["happy", "joy", "excited", "great", "wonderful", "amazing", "fantastic", "love"],
                ),
                KeywordGroup::new(
                    Emotion::Calm,
                    &["calm", "peaceful", "relaxed", "serene", "content"],
                ),
                KeywordGroup::new(
                    Emotion::Anxiety,
                    &["anxious", "worried", "nervous", "stressed", "scared", "overwhelmed"],
                ),
                KeywordGroup::new(
                    Emotion::Frustration,
                    &["angry", "frustrated", "annoyed", "irritated", "mad", "pissed"],
                ),
                KeywordGroup::new(
                    Emotion::Sadness,
                    &["sad", "down", "upset", "depressed", "miserable", "crying", "lonely"],
                ),
            ],
            Emotion::Neutral,
        )
    }

    pub fn extended() -> Self {
        Self::new(
            vec![
                KeywordGroup::new(
                    Emotion::Joy,
                    &[
                        "happy", "joy", "excited", "great", "amazing", "wonderful", "fantastic",
                        "love", "awesome", "brilliant", "perfect", "excellent",
                    ],
                ),
                KeywordGroup::new(
                    Emotion::Calm,
                    &[
                        "calm", "peaceful", "relaxed", "serene", "tranquil", "zen", "meditation",
                        "mindful", "centered", "balanced",
                    ],
                ),
                KeywordGroup::new(
                    Emotion::Anxiety,
                    &[
                        "anxious", "worried", "nervous", "stress", "panic", "overwhelmed",
                        "scared", "fear", "uncertain", "tense",
                    ],
                ),
                KeywordGroup::new(
                    Emotion::Frustration,
                    &[
                        "frustrated", "angry", "annoyed", "irritated", "mad", "upset", "furious",
                        "rage", "hate", "disgusted",
                    ],
                ),
                KeywordGroup::new(
                    Emotion::Sadness,
                    &[
                        "sad", "depressed", "down", "blue", "lonely", "empty", "hopeless",
                        "disappointed", "hurt", "grief",
                    ],
                ),
            ],
            Emotion::Calm,
        )
    }

    /// Replace the fallback category.
    pub fn with_default(mut self, default_emotion: Emotion) -> Self {
        self.default_emotion = default_emotion;
        self
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    pub fn default_emotion(&self) -> Emotion {
        self.default_emotion
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pure text-to-category classifier.
#[derive(Debug, Clone, Default)]
pub struct EmotionClassifier {
    table: KeywordTable,
}

impl EmotionClassifier {
    /// Create a classifier with the standard table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Classify free-form text. Never fails.
    pub fn classify(&self, text: &str) -> Emotion {
        let lower = text.to_lowercase();
        let tokens = tokenize(&lower);
        if tokens.is_empty() {
            return self.table.default_emotion;
        }

        for group in &self.table.groups {
            if let Some(keyword) = group.keywords.iter().find(|k| contains_word(&tokens, k)) {
                debug!(emotion = %group.emotion, keyword = %keyword, "keyword match");
                return group.emotion;
            }
        }

        self.table.default_emotion
    }

    /// Classify possibly-absent text; `None` yields the default category.
    pub fn classify_opt(&self, text: Option<&str>) -> Emotion {
        match text {
            Some(text) => self.classify(text),
            None => self.table.default_emotion,
        }
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whole-word match; a multi-word keyword must appear as consecutive tokens.
fn contains_word(tokens: &[&str], keyword: &str) -> bool {
    let needle = tokenize(keyword);
    match needle.len() {
        0 => false,
        1 => tokens.contains(&needle[0]),
        n => tokens.windows(n).any(|w| w == needle.as_slice()),
    }
}

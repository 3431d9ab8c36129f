//! TOML-based application configuration.
//!
//! Stores:
//! - Which keyword table the classifier uses and its fallback category
//! - Bonus amounts for check-ins and mood boosters
//! - Leaderboard size
//!
//! Configuration is stored at `<data dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, data_dir_path};
use crate::checkin::LedgerConfig;
use crate::emotion::{Emotion, KeywordGroup, KeywordTable, TablePreset};
use crate::error::ConfigError;

/// Classifier configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub preset: TablePreset,
    /// Overrides the preset's fallback category.
    #[serde(default)]
    pub default_emotion: Option<Emotion>,
    /// Replaces the preset's groups when non-empty; order is priority.
    #[serde(default)]
    pub groups: Vec<KeywordGroup>,
}

impl ClassifierConfig {
    pub fn keyword_table(&self) -> KeywordTable {
        let base = KeywordTable::from_preset(self.preset);
        let table = if self.groups.is_empty() {
            base
        } else {
            KeywordTable::new(self.groups.clone(), base.default_emotion())
        };
        match self.default_emotion {
            Some(emotion) => table.with_default(emotion),
            None => table,
        }
    }
}

/// Leaderboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_leaderboard_size")]
    pub size: usize,
}

fn default_leaderboard_size() -> usize {
    10
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: default_leaderboard_size(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(invalid("config key is empty".to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<i64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // optional values are cleared with "none"
                    _ if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("null") => {
                        serde_json::Value::Null
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data dir or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, creating it with defaults when missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match Self::parse_file(path)? {
            Some(cfg) => Ok(cfg),
            None => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Read the data dir config without creating anything on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn read() -> Result<Self, ConfigError> {
        Self::read_from(&data_dir_path().join("config.toml"))
    }

    /// Like [`Config::load_from`], but a missing file yields the default
    /// and is not written.
    pub fn read_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::parse_file(path)?.unwrap_or_default())
    }

    fn parse_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.validate()?;
                Ok(Some(cfg))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data dir.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Bonus amounts must be non-negative and the leaderboard non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "ledger".to_string(),
                message: e.to_string(),
            })?;
        if self.leaderboard.size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "leaderboard.size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::Null => Some("none".to_string()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse or
    /// validate; `self` is left unchanged in that case.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save to the data dir.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.ledger.daily_bonus, 5);
        assert_eq!(parsed.leaderboard.size, 10);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let parsed: Config = toml::from_str(
            "[classifier]\npreset = \"extended\"\n\n[ledger]\ndaily_bonus = 7\n",
        )
        .unwrap();
        assert_eq!(parsed.classifier.preset, TablePreset::Extended);
        assert_eq!(parsed.ledger.daily_bonus, 7);
        assert_eq!(parsed.ledger.first_checkin_bonus, 5);
        assert_eq!(parsed.classifier.keyword_table().default_emotion(), Emotion::Calm);
    }

    #[test]
    fn custom_groups_replace_preset() {
        let parsed: Config = toml::from_str(
            r#"
            [classifier]
            default_emotion = "neutral"

            [[classifier.groups]]
            emotion = "sadness"
            keywords = ["meh"]
            "#,
        )
        .unwrap();
        let table = parsed.classifier.keyword_table();
        assert_eq!(table.groups().len(), 1);
        assert_eq!(table.groups()[0].emotion, Emotion::Sadness);
        assert_eq!(table.default_emotion(), Emotion::Neutral);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("ledger.daily_bonus").as_deref(), Some("5"));
        assert_eq!(cfg.get("classifier.preset").as_deref(), Some("standard"));
        assert!(cfg.get("ledger.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.apply("ledger.booster_points", "25").unwrap();
        cfg.apply("classifier.preset", "extended").unwrap();
        cfg.apply("classifier.default_emotion", "joy").unwrap();
        assert_eq!(cfg.ledger.booster_points, 25);
        assert_eq!(cfg.classifier.preset, TablePreset::Extended);
        assert_eq!(cfg.classifier.default_emotion, Some(Emotion::Joy));
    }

    #[test]
    fn apply_rejects_bad_input_and_keeps_state() {
        let mut cfg = Config::default();
        assert!(cfg.apply("ledger.nonexistent", "1").is_err());
        assert!(cfg.apply("ledger.daily_bonus", "lots").is_err());
        assert!(cfg.apply("ledger.daily_bonus", "-5").is_err());
        assert!(cfg.apply("leaderboard.size", "0").is_err());
        assert!(cfg.apply("classifier.preset", "klingon").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn optional_values_can_be_cleared() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("classifier.default_emotion").as_deref(), Some("none"));

        cfg.apply("classifier.default_emotion", "sadness").unwrap();
        assert_eq!(cfg.get("classifier.default_emotion").as_deref(), Some("sadness"));

        cfg.apply("classifier.default_emotion", "none").unwrap();
        assert_eq!(cfg.classifier.default_emotion, None);
        cfg.apply("classifier.default_emotion", "calm").unwrap();
        cfg.apply("classifier.default_emotion", "NULL").unwrap();
        assert_eq!(cfg.classifier.default_emotion, None);

        // required values stay required
        assert!(cfg.apply("classifier.preset", "none").is_err());
        assert_eq!(cfg.classifier.preset, TablePreset::Standard);
    }

    #[test]
    fn read_from_missing_file_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(Config::read_from(&path).unwrap(), Config::default());
        assert!(!path.exists());
        assert!(!dir.path().join("nested").exists());

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ledger]\ndaily_bonus = 9\n").unwrap();
        assert_eq!(Config::read_from(&path).unwrap().ledger.daily_bonus, 9);
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        std::fs::write(&path, "[ledger]\nfirst_checkin_bonus = -1\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}

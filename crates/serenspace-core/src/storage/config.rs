//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Breathing session defaults (exercise, cycle count)
//! - Notification preferences
//! - User-defined breathing profiles
//!
//! Configuration is stored at `~/.config/serenspace/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::breathing::BreathingProfile;
use crate::error::ConfigError;

/// Breathing session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_profile_id")]
    pub default_profile: String,
    #[serde(default = "default_target_cycles")]
    pub target_cycles: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/serenspace/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// User-defined breathing profiles, selectable alongside the built-ins.
    #[serde(default)]
    pub custom_profiles: Vec<BreathingProfile>,
}

// Default functions
fn default_profile_id() -> String {
    "box".into()
}
fn default_target_cycles() -> u32 {
    3
}
fn default_true() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_profile: default_profile_id(),
            target_cycles: default_target_cycles(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            notifications: NotificationsConfig::default(),
            custom_profiles: Vec::new(),
        }
    }
}

impl Config {
    fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, falling back to defaults when missing or invalid.
    pub fn load() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_from(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Load from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the file cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, text).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read a value by dotted key, e.g. `session.target_cycles`.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        let mut current = &root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(match current {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a value by dotted key. The value is parsed as JSON where
    /// possible (numbers, booleans) and treated as a string otherwise;
    /// if the parsed form does not fit the field, the raw string is tried
    /// as well ("478" is a profile id, not a number).
    ///
    /// # Errors
    /// Returns `UnknownKey` for a key that does not exist and
    /// `InvalidValue` when the value does not fit the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parsed: serde_json::Value = value
            .parse()
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

        let mut candidates = vec![parsed];
        if !candidates[0].is_string() {
            candidates.push(serde_json::Value::String(value.to_string()));
        }

        let mut last_message = String::new();
        for candidate in candidates {
            let mut root =
                serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
            Self::insert_at(&mut root, key, candidate)?;
            match serde_json::from_value(root) {
                Ok(updated) => {
                    *self = updated;
                    return Ok(());
                }
                Err(e) => last_message = e.to_string(),
            }
        }
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: last_message,
        })
    }

    fn insert_at(
        root: &mut serde_json::Value,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ConfigError> {
        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };

        let target = match parent_path {
            Some(parent) => {
                let mut current = &mut *root;
                for part in parent.split('.') {
                    current = current
                        .get_mut(part)
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                }
                current
            }
            None => root,
        };

        match target.as_object_mut() {
            Some(map) if map.contains_key(leaf) => {
                map.insert(leaf.to_string(), value);
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_box_breathing() {
        let config = Config::default();
        assert_eq!(config.session.default_profile, "box");
        assert_eq!(config.session.target_cycles, 3);
        assert!(config.notifications.enabled);
        assert!(config.custom_profiles.is_empty());
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.session.target_cycles = 7;
        config.custom_profiles.push(BreathingProfile {
            id: "slow".into(),
            name: "Slow Breathing".into(),
            description: "Long, even breaths".into(),
            benefits: String::new(),
            phases: crate::breathing::PhaseDurations {
                inhale: 6,
                hold: 2,
                exhale: 8,
                hold2: 0,
            },
        });

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.session.target_cycles, 7);
        assert_eq!(parsed.custom_profiles.len(), 1);
        assert_eq!(parsed.custom_profiles[0].id, "slow");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Config = toml::from_str("[session]\ntarget_cycles = 5\n").unwrap();
        assert_eq!(parsed.session.target_cycles, 5);
        assert_eq!(parsed.session.default_profile, "box");
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_by_dotted_key() {
        let config = Config::default();
        assert_eq!(config.get("session.default_profile").as_deref(), Some("box"));
        assert_eq!(config.get("session.target_cycles").as_deref(), Some("3"));
        assert_eq!(config.get("nope.nothing"), None);
    }

    #[test]
    fn set_by_dotted_key() {
        let mut config = Config::default();
        config.set("session.target_cycles", "10").unwrap();
        assert_eq!(config.session.target_cycles, 10);

        config.set("session.default_profile", "calm").unwrap();
        assert_eq!(config.session.default_profile, "calm");

        // Falls back to the raw string when the JSON form doesn't fit.
        config.set("session.default_profile", "478").unwrap();
        assert_eq!(config.session.default_profile, "478");

        config.set("notifications.enabled", "false").unwrap();
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn set_unknown_key_fails() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("session.bogus", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_wrong_type_fails() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("session.target_cycles", "lots"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn save_and_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.session.default_profile = "478".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.session.default_profile, "478");
    }
}

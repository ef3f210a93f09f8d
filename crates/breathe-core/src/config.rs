//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Interface language
//! - Sound cues (phase chime, per-second tick)
//! - Display behavior (frame rate, numeric timer)
//!
//! Configuration is stored at `~/.config/breathe/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::{MAX_FPS, MIN_FPS};
use crate::error::ConfigError;

/// Returns the configuration directory, honoring two overrides:
/// `BREATHE_CONFIG_DIR` replaces the directory outright, and
/// `BREATHE_ENV=dev` switches to `~/.config/breathe-dev/`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BREATHE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BREATHE_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("breathe-dev")
    } else {
        base_dir.join("breathe")
    }
}

/// Sound cue configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Per-second tick during phases. The phase chime stays on.
    #[serde(default = "default_true")]
    pub tick: bool,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Show the numeric per-second countdown next to the animation.
    #[serde(default = "default_true")]
    pub timer: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/breathe/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_language() -> String {
    "en".into()
}
fn default_true() -> bool {
    true
}
fn default_fps() -> u32 {
    30
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            timer: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            sound: SoundConfig::default(),
            display: DisplayConfig::default(),
        }
    }
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
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as bool"),
                        })?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: format!("cannot parse '{value}' as number"),
                        })?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: key.to_string(),
                            message: "key names a section, not a value".to_string(),
                        })
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from disk, writing the defaults first when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the config
    /// cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path();
        let failed = |e: String| ConfigError::SaveFailed {
            path: path.clone(),
            message: e,
        };
        std::fs::create_dir_all(config_dir()).map_err(|e| failed(e.to_string()))?;
        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| failed(e.to_string()))?;
        Ok(())
    }

    /// Frame rate clamped to the range the frame loop accepts.
    pub fn fps(&self) -> u32 {
        self.display.fps.clamp(MIN_FPS, MAX_FPS)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the key's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }
}

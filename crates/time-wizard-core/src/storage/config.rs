//! TOML-based application configuration.
//!
//! Stores:
//! - Work and rest durations (seconds) and whether the tick cue plays
//! - The external sound player and the cue sound files
//!
//! Configuration is stored at `<data dir>/config.toml`. The schema is typed
//! and checked once at load time; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::audio::{CommandPlayer, Cue};
use crate::error::ConfigError;
use crate::timer::TimerConfig;

/// Pomodoro timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSection {
    /// Work period in seconds.
    #[serde(default = "default_work_time")]
    pub work_time: u64,
    /// Rest period in seconds.
    #[serde(default = "default_rest_time")]
    pub rest_time: u64,
    #[serde(default = "default_true")]
    pub play_tick: bool,
}

/// External sound player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_player")]
    pub player: String,
    /// Arguments placed before the sound file path.
    #[serde(default = "default_player_args")]
    pub player_args: Vec<String>,
    /// Defaults to `tick.ogg` in the data directory.
    #[serde(default)]
    pub tick_file: Option<String>,
    /// Defaults to `alarm.ogg` in the data directory.
    #[serde(default)]
    pub alarm_file: Option<String>,
    /// Defaults to `switch.ogg` in the data directory.
    #[serde(default)]
    pub switch_file: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerSection,
    #[serde(default)]
    pub sound: SoundConfig,
}

// Default functions
fn default_work_time() -> u64 {
    25 * 60
}
fn default_rest_time() -> u64 {
    5 * 60
}
fn default_true() -> bool {
    true
}
fn default_player() -> String {
    "canberra-gtk-play".into()
}
fn default_player_args() -> Vec<String> {
    vec!["--file".into()]
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            work_time: default_work_time(),
            rest_time: default_rest_time(),
            play_tick: true,
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
            player_args: default_player_args(),
            tick_file: None,
            alarm_file: None,
            switch_file: None,
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
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

    /// Default location, `<data dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::DataDir(e.to_string()))
    }

    /// Load from the default location, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is unusable, the file cannot
    /// be parsed, or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, secs) in [
            ("timer.work_time", self.timer.work_time),
            ("timer.rest_time", self.timer.rest_time),
        ] {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: "must be at least one second".into(),
                });
            }
        }
        if self.sound.player.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "sound.player".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(())
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

    /// Set a value by dot-separated key, keeping the field's type.
    ///
    /// Does not persist; call [`Config::save`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            work_duration: self.timer.work_time,
            rest_duration: self.timer.rest_time,
            tick_enabled: self.timer.play_tick,
        }
    }

    /// Sound file for `cue`, falling back to `<dir>/<cue>.ogg`.
    pub fn sound_file(&self, cue: Cue, dir: &Path) -> PathBuf {
        let (configured, fallback) = match cue {
            Cue::Tick => (&self.sound.tick_file, "tick.ogg"),
            Cue::Alarm => (&self.sound.alarm_file, "alarm.ogg"),
            Cue::Switch => (&self.sound.switch_file, "switch.ogg"),
        };
        configured
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.join(fallback))
    }

    pub fn cue_player(&self, dir: &Path) -> CommandPlayer {
        CommandPlayer::new(
            self.sound.player.clone(),
            self.sound.player_args.clone(),
            self.sound_file(Cue::Tick, dir),
            self.sound_file(Cue::Alarm, dir),
            self.sound_file(Cue::Switch, dir),
        )
    }
}

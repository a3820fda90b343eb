//! services/journey/src/config.rs
//!
//! Defines the host's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use healing_journey_core::Language;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Every delay the session control loop schedules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Hero screen to consultation.
    pub consultation_open: Duration,
    /// Dwell in the analyzing stage before the form shows.
    pub analyzing_dwell: Duration,
    /// Delay before the first transition whisper.
    pub whisper_lead: Duration,
    /// Gap between transition whispers.
    pub whisper_interval: Duration,
    /// Extra time after the last whisper slot before the results open.
    pub transition_tail: Duration,
    pub auto_advance: Duration,
    /// Bounds of the random delay between the page-turn cue and the chirp.
    pub cue_jitter_min: Duration,
    pub cue_jitter_max: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            consultation_open: Duration::from_millis(1500),
            analyzing_dwell: Duration::from_millis(1500),
            whisper_lead: Duration::from_millis(500),
            whisper_interval: Duration::from_millis(1300),
            transition_tail: Duration::from_millis(900),
            auto_advance: Duration::from_millis(6000),
            cue_jitter_min: Duration::from_millis(150),
            cue_jitter_max: Duration::from_millis(650),
        }
    }
}

impl Timings {
    /// Offset of whisper `index` from the start of the transition.
    pub fn whisper_offset(&self, index: u32) -> Duration {
        self.whisper_lead + self.whisper_interval * index
    }

    /// Full length of the transition for `whisper_count` whispers: one
    /// interval per whisper plus the tail.
    pub fn transition_total(&self, whisper_count: u32) -> Duration {
        self.whisper_interval * whisper_count + self.transition_tail
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub language: Language,
    pub log_level: Level,
    pub ambient_audio: bool,
    pub timings: Timings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::En,
            log_level: Level::INFO,
            ambient_audio: true,
            timings: Timings::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Session Settings ---
        let language = match std::env::var("JOURNEY_LANGUAGE") {
            Ok(value) => value.parse::<Language>().map_err(|e| {
                ConfigError::InvalidValue("JOURNEY_LANGUAGE".to_string(), e.to_string())
            })?,
            Err(_) => Language::En,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let ambient_audio = match std::env::var("AMBIENT_AUDIO")
            .unwrap_or_else(|_| "on".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "on" | "true" | "1" => true,
            "off" | "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "AMBIENT_AUDIO".to_string(),
                    format!("'{}' is not one of on/off", other),
                ))
            }
        };

        // --- Timing Overrides ---
        let defaults = Timings::default();
        let timings = Timings {
            consultation_open: env_millis("CONSULTATION_OPEN_MS", defaults.consultation_open)?,
            analyzing_dwell: env_millis("ANALYZING_DWELL_MS", defaults.analyzing_dwell)?,
            whisper_lead: env_millis("WHISPER_LEAD_MS", defaults.whisper_lead)?,
            whisper_interval: env_millis("WHISPER_INTERVAL_MS", defaults.whisper_interval)?,
            transition_tail: env_millis("TRANSITION_TAIL_MS", defaults.transition_tail)?,
            auto_advance: env_millis("AUTO_ADVANCE_MS", defaults.auto_advance)?,
            cue_jitter_min: env_millis("CUE_JITTER_MIN_MS", defaults.cue_jitter_min)?,
            cue_jitter_max: env_millis("CUE_JITTER_MAX_MS", defaults.cue_jitter_max)?,
        };
        if timings.cue_jitter_min > timings.cue_jitter_max {
            return Err(ConfigError::InvalidValue(
                "CUE_JITTER_MIN_MS".to_string(),
                "must not exceed CUE_JITTER_MAX_MS".to_string(),
            ));
        }

        Ok(Self {
            language,
            log_level,
            ambient_audio,
            timings,
        })
    }
}

fn env_millis(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transition_matches_the_whisper_schedule() {
        let timings = Timings::default();
        assert_eq!(timings.whisper_offset(0), Duration::from_millis(500));
        assert_eq!(timings.whisper_offset(2), Duration::from_millis(3100));
        assert_eq!(timings.transition_total(3), Duration::from_millis(4800));
    }

    #[test]
    fn default_config_is_english_with_audio() {
        let config = Config::default();
        assert_eq!(config.language, Language::En);
        assert!(config.ambient_audio);
        assert_eq!(config.log_level, Level::INFO);
    }
}

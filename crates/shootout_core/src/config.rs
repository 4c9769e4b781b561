//! Match configuration.
//!
//! Everything here is fixed before kick-off. Sources, applied in order:
//! built-in defaults, the JSON file named by `PK_CONFIG_PATH`, then the
//! individual `PK_*` overrides.
//!
//! ```rust
//! use shootout_core::config::MatchConfig;
//! use shootout_core::models::DifficultyLevel;
//!
//! let config = MatchConfig::with_difficulty(DifficultyLevel::Hard);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::engine::geometry::{FlightTiming, ShotGeometry};
use crate::error::ConfigError;
use crate::models::{DifficultyLevel, DifficultyProfile};

pub const CONFIG_PATH_ENV: &str = "PK_CONFIG_PATH";
pub const DIFFICULTY_ENV: &str = "PK_DIFFICULTY";
pub const POWER_METER_ENV: &str = "PK_POWER_METER";

/// Animation pacing, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Flight time of an uncharged shot (default: 1.0)
    pub flight_base_secs: f32,
    /// Floor for fully charged shots (default: 0.6)
    pub min_flight_secs: f32,
    /// How long the GOAL/SAVED banner stays up before the next kick (default: 2.0)
    pub result_hold_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { flight_base_secs: 1.0, min_flight_secs: 0.6, result_hold_secs: 2.0 }
    }
}

impl TimingConfig {
    /// No hold and a near-instant flight, for headless runs and tests.
    pub fn instant() -> Self {
        Self { flight_base_secs: 0.01, min_flight_secs: 0.01, result_hold_secs: 0.0 }
    }

    pub fn flight_timing(&self) -> FlightTiming {
        FlightTiming { base_secs: self.flight_base_secs, min_secs: self.min_flight_secs }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub difficulty: DifficultyLevel,
    /// Enhanced rules with the charge meter. Off gives the classic game.
    pub power_enabled: bool,
    /// Seconds for one 0→1 sweep of the meter (default: 1.5)
    pub charge_duration_secs: f32,
    pub timing: TimingConfig,
    pub geometry: ShotGeometry,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            difficulty: DifficultyLevel::Normal,
            power_enabled: true,
            charge_duration_secs: 1.5,
            timing: TimingConfig::default(),
            geometry: ShotGeometry::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_difficulty(difficulty: DifficultyLevel) -> Self {
        Self { difficulty, ..Self::default() }
    }

    /// Classic rules: no power meter.
    pub fn classic(difficulty: DifficultyLevel) -> Self {
        Self { difficulty, power_enabled: false, ..Self::default() }
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Defaults, then `PK_CONFIG_PATH`, then `PK_DIFFICULTY` / `PK_POWER_METER`.
    ///
    /// Unset or blank variables are skipped. A set variable with a bad value is
    /// an error, never a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env_value(CONFIG_PATH_ENV) {
            Some(path) => Self::from_path(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(
            env_value(DIFFICULTY_ENV).as_deref(),
            env_value(POWER_METER_ENV).as_deref(),
        )?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(
        &mut self,
        difficulty: Option<&str>,
        power_meter: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = difficulty {
            self.difficulty = value.parse()?;
        }
        if let Some(value) = power_meter {
            self.power_enabled = parse_flag(value).ok_or_else(|| ConfigError::InvalidEnv {
                var: POWER_METER_ENV,
                value: value.to_string(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile().validate()?;
        for (field, value) in [
            ("charge_duration_secs", self.charge_duration_secs),
            ("timing.flight_base_secs", self.timing.flight_base_secs),
            ("timing.min_flight_secs", self.timing.min_flight_secs),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }
        let hold = self.timing.result_hold_secs;
        if !(hold.is_finite() && hold >= 0.0) {
            return Err(ConfigError::InvalidDuration {
                field: "timing.result_hold_secs",
                value: hold,
            });
        }
        Ok(())
    }
}

fn env_value(var: &str) -> Option<String> {
    let value = env::var(var).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

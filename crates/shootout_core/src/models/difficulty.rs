//! Difficulty presets.
//!
//! A preset is picked once before kick-off and never changes during a match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] =
        [DifficultyLevel::Easy, DifficultyLevel::Normal, DifficultyLevel::Hard];

    pub fn profile(self) -> DifficultyProfile {
        match self {
            // CPU almost never reads your shot, you almost always read the CPU.
            DifficultyLevel::Easy => DifficultyProfile {
                level: self,
                cpu_guess_accuracy: 0.10,
                player_guess_accuracy: 0.90,
            },
            DifficultyLevel::Normal => DifficultyProfile {
                level: self,
                cpu_guess_accuracy: 0.40,
                player_guess_accuracy: 0.40,
            },
            DifficultyLevel::Hard => DifficultyProfile {
                level: self,
                cpu_guess_accuracy: 0.60,
                player_guess_accuracy: 0.60,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Normal => "normal",
            DifficultyLevel::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "normal" => Ok(DifficultyLevel::Normal),
            "hard" => Ok(DifficultyLevel::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Guess-accuracy probabilities for one preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub level: DifficultyLevel,
    /// Chance the CPU keeper dives the same way the human shoots.
    pub cpu_guess_accuracy: f32,
    /// Chance the CPU shooter aims where the human keeper dives.
    ///
    /// Shown to the player but not consulted when resolving CPU kicks: the
    /// CPU aim is pre-committed uniformly before the dive is known.
    pub player_guess_accuracy: f32,
}

impl DifficultyProfile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("cpu_guess_accuracy", self.cpu_guess_accuracy),
            ("player_guess_accuracy", self.player_guess_accuracy),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        Ok(())
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        DifficultyLevel::default().profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for level in DifficultyLevel::ALL {
            assert!(level.profile().validate().is_ok(), "{level} preset out of range");
        }
    }

    #[test]
    fn test_preset_values() {
        let hard = DifficultyLevel::Hard.profile();
        assert!((hard.cpu_guess_accuracy - 0.60).abs() < f32::EPSILON);
        let easy = DifficultyLevel::Easy.profile();
        assert!(easy.cpu_guess_accuracy < easy.player_guess_accuracy);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Hard ".parse::<DifficultyLevel>().unwrap(), DifficultyLevel::Hard);
        assert_eq!("EASY".parse::<DifficultyLevel>().unwrap(), DifficultyLevel::Easy);
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let err = "legendary".parse::<DifficultyLevel>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDifficulty(name) if name == "legendary"));
    }

    #[test]
    fn test_out_of_range_profile_rejected() {
        let profile = DifficultyProfile { cpu_guess_accuracy: 1.2, ..Default::default() };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::InvalidProbability { field: "cpu_guess_accuracy", .. })
        ));
    }
}

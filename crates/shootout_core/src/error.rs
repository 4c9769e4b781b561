use thiserror::Error;

use crate::engine::shootout_state::Phase;
use crate::models::Side;

/// Rejected engine calls. The state is untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShootoutError {
    #[error("Match is over, no further actions accepted")]
    MatchOver,

    #[error("Action '{action}' is not valid in phase {phase:?}")]
    InvalidPhase { action: &'static str, phase: Phase },

    #[error("Shooter mismatch: expected {expected:?}, found {found:?}")]
    ShooterMismatch { expected: Side, found: Side },

    #[error("Shot direction already committed for this kick")]
    ShotAlreadyCommitted,

    #[error("Power meter is disabled for this match")]
    PowerMeterDisabled,

    #[error("A kick is still in flight")]
    KickInFlight,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Invalid probability for {field}: {value} (expected 0.0..=1.0)")]
    InvalidProbability { field: &'static str, value: f32 },

    #[error("Invalid duration for {field}: {value}s (expected > 0)")]
    InvalidDuration { field: &'static str, value: f32 },

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Whether falling back to `MatchConfig::default()` is reasonable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConfigError::Io(_) => true,
            ConfigError::Parse(_) => false,
            ConfigError::UnknownDifficulty(_) => false,
            ConfigError::InvalidProbability { .. } => false,
            ConfigError::InvalidDuration { .. } => false,
            ConfigError::InvalidEnv { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShootoutError>;

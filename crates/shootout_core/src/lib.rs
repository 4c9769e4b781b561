//! # shootout_core - Penalty Shootout Rules Engine
//!
//! Two-sided penalty shootout between a human and the CPU:
//! - Turn/score state machine with early stop and sudden death
//! - Kick resolution from direction, keeper dive, charge and difficulty
//! - Cyclic power meter locked once per shot
//! - Deterministic given a seed (or a scripted random source)
//!
//! Rendering, audio and file formats live outside this crate; they drive the
//! [`ShootoutEngine`] through its input calls and read [`ShootoutSnapshot`]s.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use config::{MatchConfig, TimingConfig};
pub use engine::{
    MatchEvent, OutcomeResolver, Phase, PowerCharge, RandomSource, RngSource, ShootoutEngine,
    ShootoutSnapshot, ShootoutState,
};
pub use error::{ConfigError, Result, ShootoutError};
pub use models::{
    DifficultyLevel, DifficultyProfile, Direction, KickOutcome, KickRecord, MatchRecord, Side,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod geometry;
pub mod match_engine;
pub mod outcome;
pub mod power_charge;
pub mod rng;
pub mod shootout_state;

pub use geometry::{BallFlight, GoalFrame, Point, ShotGeometry};
pub use match_engine::{BallSnapshot, MatchEvent, ShootoutEngine, ShootoutSnapshot};
pub use outcome::{CpuShotContext, KickResolution, OutcomeResolver, PlayerShotContext};
pub use power_charge::PowerCharge;
pub use rng::{RandomSource, RngSource, ScriptedSource};
pub use shootout_state::{Phase, ShootoutState, MAX_KICKS_PER_SIDE};

pub mod difficulty;
pub mod direction;
pub mod kick;
pub mod match_record;

pub use difficulty::{DifficultyLevel, DifficultyProfile};
pub use direction::{Direction, Side};
pub use kick::{KickOutcome, KickRecord, TrackerSlot};
pub use match_record::{KickAccuracy, MatchRecord};

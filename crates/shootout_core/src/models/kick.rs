use serde::{Deserialize, Serialize};

use super::direction::{Direction, Side};

/// How a single kick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KickOutcome {
    Goal,
    Saved,
    /// Left the goal frame.
    Wide,
}

impl KickOutcome {
    pub fn is_goal(self) -> bool {
        matches!(self, KickOutcome::Goal)
    }
}

/// Completed kick log entry. Appended once, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickRecord {
    pub shooter: Side,
    pub direction: Direction,
    pub outcome: KickOutcome,
}

impl KickRecord {
    pub fn scored(&self) -> bool {
        self.outcome.is_goal()
    }
}

/// One slot on the scoreboard kick tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerSlot {
    Scored,
    Missed,
    Pending,
}

impl From<&KickRecord> for TrackerSlot {
    fn from(record: &KickRecord) -> Self {
        if record.scored() {
            TrackerSlot::Scored
        } else {
            TrackerSlot::Missed
        }
    }
}

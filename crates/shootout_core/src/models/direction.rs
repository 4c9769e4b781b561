use serde::{Deserialize, Serialize};
use std::fmt;

/// Shot / dive direction, from the kicker's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Center,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Center, Direction::Right];

    /// The two directions that are not `self`, in declaration order.
    pub fn others(self) -> [Direction; 2] {
        match self {
            Direction::Left => [Direction::Center, Direction::Right],
            Direction::Center => [Direction::Left, Direction::Right],
            Direction::Right => [Direction::Left, Direction::Center],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Center => "center",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side of the shootout a kick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human.
    Player,
    /// The automated opponent.
    Cpu,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        }
    }
}

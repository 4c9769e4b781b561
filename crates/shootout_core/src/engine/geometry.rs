//! Goal frame and ball-flight model.
//!
//! Coordinates are screen units with y growing downward. The defaults match
//! the 800x600 pitch view: a 200x100 goal frame centred on x = 400.

use serde::{Deserialize, Serialize};

use crate::models::Direction;

/// Share of the base flight time removed at full charge.
pub const FLIGHT_TIME_POWER_REDUCTION: f32 = 0.4;
/// Share of the base arc height removed at full charge.
pub const ARC_POWER_REDUCTION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inner edges of the posts and crossbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalFrame {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl GoalFrame {
    /// Strictly inside; a ball on the post line is out.
    pub fn contains(&self, p: Point) -> bool {
        self.left < p.x && p.x < self.right && self.top < p.y && p.y < self.bottom
    }
}

impl Default for GoalFrame {
    fn default() -> Self {
        Self { left: 300.0, right: 500.0, top: 150.0, bottom: 250.0 }
    }
}

/// Fixed aim point per direction plus the kick spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotGeometry {
    pub frame: GoalFrame,
    pub kick_spot: Point,
    pub left_target: Point,
    pub center_target: Point,
    pub right_target: Point,
    /// Peak height of the arc for an uncharged shot.
    pub base_arc_height: f32,
}

impl Default for ShotGeometry {
    fn default() -> Self {
        let frame = GoalFrame::default();
        let aim_y = frame.top + 50.0;
        Self {
            frame,
            kick_spot: Point::new(400.0, 500.0),
            left_target: Point::new(frame.left + 30.0, aim_y),
            center_target: Point::new((frame.left + frame.right) / 2.0, aim_y),
            right_target: Point::new(frame.right - 30.0, aim_y),
            base_arc_height: 100.0,
        }
    }
}

impl ShotGeometry {
    pub fn target(&self, direction: Direction) -> Point {
        match direction {
            Direction::Left => self.left_target,
            Direction::Center => self.center_target,
            Direction::Right => self.right_target,
        }
    }

    /// Whether a shot at `direction` lands inside the frame.
    pub fn lands_in_frame(&self, direction: Direction) -> bool {
        self.frame.contains(self.target(direction))
    }

    /// Build the flight for a shot. `power` is the locked charge, or 0 with the
    /// power meter off.
    pub fn flight(&self, direction: Direction, power: f32, timing: &FlightTiming) -> BallFlight {
        let power = power.clamp(0.0, 1.0);
        let duration = (timing.base_secs * (1.0 - FLIGHT_TIME_POWER_REDUCTION * power))
            .max(timing.min_secs);
        BallFlight {
            start: self.kick_spot,
            target: self.target(direction),
            arc_height: self.base_arc_height * (1.0 - ARC_POWER_REDUCTION * power),
            duration_secs: duration,
        }
    }
}

/// Flight-time bounds taken from `TimingConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTiming {
    pub base_secs: f32,
    pub min_secs: f32,
}

/// Parabolic ball path. Presentation only; it never changes the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallFlight {
    pub start: Point,
    pub target: Point,
    pub arc_height: f32,
    pub duration_secs: f32,
}

impl BallFlight {
    /// Ball position at `progress` in [0, 1].
    pub fn position_at(&self, progress: f32) -> Point {
        let t = progress.clamp(0.0, 1.0);
        let x = self.start.x + (self.target.x - self.start.x) * t;
        let y = self.start.y + (self.target.y - self.start.y) * t
            - self.arc_height * (t * std::f32::consts::PI).sin();
        Point::new(x, y)
    }

    pub fn landing_point(&self) -> Point {
        self.target
    }
}

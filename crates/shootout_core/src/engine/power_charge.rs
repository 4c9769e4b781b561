//! Power meter: a repeating 0→1 ramp that the shooter freezes with one input.

use serde::{Deserialize, Serialize};

/// Cyclic shot-strength charge for the kick in progress.
///
/// `fill_level` is always `(elapsed mod duration) / duration`, so it stays in
/// `[0, 1)` no matter how long the meter runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerCharge {
    charge_duration: f32,
    accumulated: f32,
    fill_level: f32,
    locked_power: Option<f32>,
}

impl PowerCharge {
    /// `charge_duration` must be positive; `MatchConfig::validate` guarantees it.
    pub fn new(charge_duration: f32) -> Self {
        Self { charge_duration, accumulated: 0.0, fill_level: 0.0, locked_power: None }
    }

    pub fn fill_level(&self) -> f32 {
        self.fill_level
    }

    /// The frozen charge, `None` until `lock` is called for this shot.
    pub fn locked_power(&self) -> Option<f32> {
        self.locked_power
    }

    pub fn is_locked(&self) -> bool {
        self.locked_power.is_some()
    }

    pub fn charge_duration(&self) -> f32 {
        self.charge_duration
    }

    /// Advance the ramp. No-op once locked or for non-positive `elapsed`.
    pub fn advance(&mut self, elapsed_secs: f32) {
        if self.is_locked() || elapsed_secs <= 0.0 || !elapsed_secs.is_finite() {
            return;
        }
        // Keep the accumulator bounded so long holds don't lose precision.
        self.accumulated = (self.accumulated + elapsed_secs).rem_euclid(self.charge_duration);
        let fill = self.accumulated / self.charge_duration;
        self.fill_level = if fill >= 1.0 { 0.0 } else { fill };
    }

    /// Freeze the current fill level. Later calls keep the first value.
    pub fn lock(&mut self) -> f32 {
        *self.locked_power.get_or_insert(self.fill_level)
    }

    /// Start a fresh charge for the next shot.
    pub fn reset(&mut self) {
        *self = Self::new(self.charge_duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_elapsed_is_idempotent() {
        let mut charge = PowerCharge::new(1.5);
        charge.advance(0.3);
        let before = charge.fill_level();
        charge.advance(0.0);
        charge.advance(0.0);
        assert_eq!(charge.fill_level(), before);
    }

    #[test]
    fn test_full_cycle_returns_to_zero() {
        let mut charge = PowerCharge::new(2.0);
        charge.advance(2.0);
        assert_eq!(charge.fill_level(), 0.0);
    }

    #[test]
    fn test_ramp_is_linear_and_wraps() {
        let mut charge = PowerCharge::new(2.0);
        charge.advance(0.5);
        assert!((charge.fill_level() - 0.25).abs() < 1e-6);
        charge.advance(2.0);
        assert!((charge.fill_level() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_lock_freezes_value() {
        let mut charge = PowerCharge::new(1.0);
        charge.advance(0.75);
        let locked = charge.lock();
        charge.advance(0.1);
        assert_eq!(charge.fill_level(), locked);
        assert_eq!(charge.lock(), locked);
        assert_eq!(charge.locked_power(), Some(locked));
    }

    #[test]
    fn test_reset_clears_lock() {
        let mut charge = PowerCharge::new(1.0);
        charge.advance(0.4);
        charge.lock();
        charge.reset();
        assert_eq!(charge.locked_power(), None);
        assert_eq!(charge.fill_level(), 0.0);
        assert_eq!(charge.charge_duration(), 1.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Fill level stays inside [0, 1) for any sequence of frame deltas.
            #[test]
            fn prop_fill_level_in_range(steps in prop::collection::vec(0.0f32..0.5, 0..200)) {
                let mut charge = PowerCharge::new(1.5);
                for dt in steps {
                    charge.advance(dt);
                    prop_assert!(charge.fill_level() >= 0.0 && charge.fill_level() < 1.0);
                }
            }

            /// Within one cycle the ramp never goes down.
            #[test]
            fn prop_monotonic_within_cycle(steps in prop::collection::vec(0.001f32..0.01, 1..100)) {
                let mut charge = PowerCharge::new(2.0);
                let mut last = charge.fill_level();
                for dt in steps {
                    charge.advance(dt);
                    prop_assert!(charge.fill_level() >= last);
                    last = charge.fill_level();
                }
            }
        }
    }
}

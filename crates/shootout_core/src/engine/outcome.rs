//! Kick resolution (pure functions).
//!
//! Sampling (dive, aim, save roll) is separated from resolution so the
//! resolution step takes plain values and can be tested without any RNG.

use tracing::debug;

use super::rng::RandomSource;
use crate::models::{DifficultyProfile, Direction, KickOutcome};

/// Charge at 1.0 halves the keeper's save chance.
pub const POWER_SAVE_REDUCTION: f32 = 0.5;

/// Human shoots, CPU keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerShotContext {
    pub direction: Direction,
    pub cpu_dive: Direction,
    /// `None` when the power meter is off.
    pub locked_power: Option<f32>,
    pub cpu_guess_accuracy: f32,
    pub in_frame: bool,
}

/// CPU shoots, human keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuShotContext {
    pub direction: Direction,
    pub player_dive: Direction,
    pub in_frame: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickResolution {
    pub outcome: KickOutcome,
    /// Save threshold the roll was compared against, if a roll was used.
    pub save_chance: Option<f32>,
}

pub struct OutcomeResolver;

impl OutcomeResolver {
    /// CPU keeper picks a dive when the human commits a direction.
    ///
    /// Matches the shot with probability `cpu_guess_accuracy`, otherwise one of
    /// the two other directions uniformly.
    pub fn sample_cpu_dive<R: RandomSource + ?Sized>(
        shot: Direction,
        profile: &DifficultyProfile,
        rng: &mut R,
    ) -> Direction {
        if rng.next_unit() < profile.cpu_guess_accuracy {
            shot
        } else {
            let wrong = shot.others();
            wrong[rng.pick_index(wrong.len())]
        }
    }

    /// CPU shooter aim, uniform over all three directions and fixed before
    /// the human dive is accepted.
    pub fn sample_cpu_aim<R: RandomSource + ?Sized>(rng: &mut R) -> Direction {
        Direction::ALL[rng.pick_index(Direction::ALL.len())]
    }

    /// `cpu_guess_accuracy * (1 - power * 0.5)`.
    pub fn final_save_chance(cpu_guess_accuracy: f32, locked_power: f32) -> f32 {
        cpu_guess_accuracy * (1.0 - locked_power.clamp(0.0, 1.0) * POWER_SAVE_REDUCTION)
    }

    /// Resolve a human shot against a pre-sampled dive and save roll.
    ///
    /// Out of frame is always WIDE. With the power meter on, a save needs both
    /// the right dive and `save_roll < final_save_chance`. With it off, the
    /// right dive alone saves and `save_roll` is ignored.
    pub fn resolve_player_shot(ctx: &PlayerShotContext, save_roll: f32) -> KickResolution {
        if !ctx.in_frame {
            return KickResolution { outcome: KickOutcome::Wide, save_chance: None };
        }

        let dove_right_way = ctx.cpu_dive == ctx.direction;
        let resolution = match ctx.locked_power {
            Some(power) => {
                let chance = Self::final_save_chance(ctx.cpu_guess_accuracy, power);
                let outcome = if save_roll < chance && dove_right_way {
                    KickOutcome::Saved
                } else {
                    KickOutcome::Goal
                };
                KickResolution { outcome, save_chance: Some(chance) }
            }
            None => KickResolution {
                outcome: if dove_right_way { KickOutcome::Saved } else { KickOutcome::Goal },
                save_chance: None,
            },
        };

        debug!(
            direction = %ctx.direction,
            dive = %ctx.cpu_dive,
            power = ?ctx.locked_power,
            save_chance = ?resolution.save_chance,
            save_roll,
            outcome = ?resolution.outcome,
            "player kick resolved"
        );
        resolution
    }

    /// Resolve a CPU shot: saved exactly when the human dives the same way.
    pub fn resolve_cpu_shot(ctx: &CpuShotContext) -> KickResolution {
        let outcome = if !ctx.in_frame {
            KickOutcome::Wide
        } else if ctx.player_dive == ctx.direction {
            KickOutcome::Saved
        } else {
            KickOutcome::Goal
        };

        debug!(
            direction = %ctx.direction,
            dive = %ctx.player_dive,
            outcome = ?outcome,
            "cpu kick resolved"
        );
        KickResolution { outcome, save_chance: None }
    }
}

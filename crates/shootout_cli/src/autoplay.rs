//! Random input driver for headless matches.
//!
//! Plays the human side the way a player would: pick a direction, hold the
//! meter for a while, release, dive somewhere. One input at most per frame.

use anyhow::{bail, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shootout_core::{Direction, MatchRecord, Phase, RandomSource, ShootoutEngine};
use tracing::debug;

/// 60 FPS.
pub const FRAME_SECS: f32 = 1.0 / 60.0;

/// Frames before a stuck match is abandoned.
const MAX_FRAMES: u32 = 1_000_000;

pub struct AutoPlayer {
    rng: ChaCha8Rng,
    charge_target: Option<f32>,
}

impl AutoPlayer {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), charge_target: None }
    }

    fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }

    /// Drive `engine` until MATCH_OVER and return the finalized record.
    pub fn play<R: RandomSource>(&mut self, engine: &mut ShootoutEngine<R>) -> Result<MatchRecord> {
        let mut frames = 0u32;
        while !engine.is_over() {
            if frames >= MAX_FRAMES {
                bail!("match did not finish after {MAX_FRAMES} frames");
            }
            if !engine.is_kick_in_flight() {
                self.act(engine)?;
            }
            engine.tick(FRAME_SECS)?;
            frames += 1;
        }
        debug!(frames, "match finished");
        Ok(engine.finalize()?)
    }

    fn act<R: RandomSource>(&mut self, engine: &mut ShootoutEngine<R>) -> Result<()> {
        match engine.phase() {
            Phase::PlayerShoot => {
                let snap = engine.snapshot();
                if !snap.charging {
                    let direction = self.random_direction();
                    engine.choose_direction(direction)?;
                    self.charge_target = Some(self.rng.gen_range(0.0..0.95));
                } else if self.charge_target.is_some_and(|target| snap.fill_level >= target) {
                    self.charge_target = None;
                    engine.lock_power()?;
                }
            }
            Phase::PlayerSave => {
                let dive = self.random_direction();
                engine.choose_dive(dive)?;
            }
            Phase::CpuShoot | Phase::MatchOver => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shootout_core::{DifficultyLevel, MatchConfig, TimingConfig};

    #[test]
    fn test_plays_power_match_to_completion() {
        let mut engine = ShootoutEngine::seeded(MatchConfig::default(), 5).unwrap();
        let record = AutoPlayer::seeded(5).play(&mut engine).unwrap();
        assert!(record.winner.is_some());
        assert!(!record.forfeited);
        assert!(record.player_kicks >= 3);
        assert!(record.cpu_kicks + 1 >= record.player_kicks);
    }

    #[test]
    fn test_classic_match_is_reproducible() {
        let config = MatchConfig {
            timing: TimingConfig::instant(),
            ..MatchConfig::classic(DifficultyLevel::Easy)
        };
        let run = || {
            let mut engine = ShootoutEngine::seeded(config.clone(), 77).unwrap();
            AutoPlayer::seeded(78).play(&mut engine).unwrap()
        };
        assert_eq!(run(), run());
    }
}

//! Frame-driven shootout driver.
//!
//! Owns the [`ShootoutState`] plus the transient per-kick state (charge meter,
//! pre-committed CPU aim, ball in flight). Inputs arrive as typed calls or as
//! [`MatchEvent`]s; each either applies fully or returns an error and leaves
//! the engine untouched.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::geometry::{BallFlight, Point};
use super::outcome::{CpuShotContext, KickResolution, OutcomeResolver, PlayerShotContext};
use super::power_charge::PowerCharge;
use super::rng::{RandomSource, RngSource};
use super::shootout_state::{Phase, ShootoutState};
use crate::config::MatchConfig;
use crate::error::{ConfigError, Result, ShootoutError};
use crate::models::{
    DifficultyProfile, Direction, KickOutcome, KickRecord, MatchRecord, Side, TrackerSlot,
};

/// Input-layer events, one per frame action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MatchEvent {
    ChooseDirection(Direction),
    LockPower,
    ChooseDive(Direction),
    /// Frame delta in seconds.
    Tick(f32),
    Forfeit(String),
}

/// Human shot between direction pick and power lock.
#[derive(Debug, Clone, Copy)]
struct ShotInProgress {
    direction: Direction,
    cpu_dive: Direction,
}

#[derive(Debug, Clone, Copy)]
struct KickInFlight {
    shooter: Side,
    direction: Direction,
    keeper_dive: Direction,
    locked_power: Option<f32>,
    flight: BallFlight,
    elapsed: f32,
    resolution: Option<KickResolution>,
    hold_elapsed: f32,
}

impl KickInFlight {
    fn progress(&self) -> f32 {
        if self.flight.duration_secs <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.flight.duration_secs).min(1.0)
    }
}

/// Ball state for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallSnapshot {
    pub shooter: Side,
    pub position: Point,
    pub progress: f32,
    /// Visible once the ball is struck.
    pub keeper_dive: Direction,
}

/// Read-only view handed to the presentation layer.
///
/// The pre-committed CPU aim is deliberately absent until the ball is struck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShootoutSnapshot {
    pub phase: Phase,
    pub player_score: u32,
    pub cpu_score: u32,
    pub player_kicks: u32,
    pub cpu_kicks: u32,
    pub player_results: Vec<KickRecord>,
    pub cpu_results: Vec<KickRecord>,
    pub player_tracker: Vec<TrackerSlot>,
    pub cpu_tracker: Vec<TrackerSlot>,
    pub sudden_death: bool,
    pub power_enabled: bool,
    pub charging: bool,
    pub fill_level: f32,
    /// Charge of the human shot in flight, cleared once the kick is recorded.
    pub locked_power: Option<f32>,
    pub committed_direction: Option<Direction>,
    pub last_outcome: Option<KickOutcome>,
    pub difficulty: DifficultyProfile,
    pub forfeit_reason: Option<String>,
    pub winner: Option<Side>,
    pub ball: Option<BallSnapshot>,
}

pub struct ShootoutEngine<R = RngSource<ChaCha8Rng>> {
    config: MatchConfig,
    profile: DifficultyProfile,
    state: ShootoutState,
    rng: R,
    charge: PowerCharge,
    shot: Option<ShotInProgress>,
    cpu_aim: Option<Direction>,
    in_flight: Option<KickInFlight>,
    last_outcome: Option<KickOutcome>,
}

impl ShootoutEngine {
    /// Engine with a seeded ChaCha8 source; same seed and inputs, same match.
    pub fn seeded(config: MatchConfig, seed: u64) -> std::result::Result<Self, ConfigError> {
        Self::new(config, RngSource::seeded(seed))
    }
}

impl<R: RandomSource> ShootoutEngine<R> {
    pub fn new(config: MatchConfig, rng: R) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let profile = config.profile();
        info!(
            difficulty = %config.difficulty,
            power_enabled = config.power_enabled,
            "shootout engine created"
        );
        Ok(Self {
            charge: PowerCharge::new(config.charge_duration_secs),
            config,
            profile,
            state: ShootoutState::new(),
            rng,
            shot: None,
            cpu_aim: None,
            in_flight: None,
            last_outcome: None,
        })
    }

    pub fn state(&self) -> &ShootoutState {
        &self.state
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn is_kick_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_outcome(&self) -> Option<KickOutcome> {
        self.last_outcome
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: MatchEvent) -> Result<()> {
        let result = match &event {
            MatchEvent::ChooseDirection(direction) => self.choose_direction(*direction),
            MatchEvent::LockPower => self.lock_power().map(|_| ()),
            MatchEvent::ChooseDive(direction) => self.choose_dive(*direction),
            MatchEvent::Tick(dt) => self.tick(*dt),
            MatchEvent::Forfeit(reason) => self.forfeit(reason.clone()),
        };
        if let Err(err) = &result {
            warn!(?event, phase = ?self.state.phase(), %err, "input rejected");
        }
        result
    }

    fn ensure_accepting_input(&self, action: &'static str, phase: Phase) -> Result<()> {
        if self.state.is_over() {
            return Err(ShootoutError::MatchOver);
        }
        if self.in_flight.is_some() {
            return Err(ShootoutError::KickInFlight);
        }
        if self.state.phase() != phase {
            return Err(ShootoutError::InvalidPhase { action, phase: self.state.phase() });
        }
        Ok(())
    }

    /// Human picks a shot direction. The CPU keeper's dive is sampled now.
    ///
    /// With the power meter on this starts charging; otherwise the ball is
    /// struck immediately.
    pub fn choose_direction(&mut self, direction: Direction) -> Result<()> {
        self.ensure_accepting_input("choose_direction", Phase::PlayerShoot)?;
        if self.shot.is_some() {
            return Err(ShootoutError::ShotAlreadyCommitted);
        }

        let cpu_dive = OutcomeResolver::sample_cpu_dive(direction, &self.profile, &mut self.rng);
        debug!(%direction, "shot direction committed");

        if self.config.power_enabled {
            self.charge.reset();
            self.shot = Some(ShotInProgress { direction, cpu_dive });
        } else {
            self.launch(Side::Player, direction, cpu_dive, None);
        }
        Ok(())
    }

    /// Freeze the meter and strike the ball. Returns the locked power.
    pub fn lock_power(&mut self) -> Result<f32> {
        if self.state.is_over() {
            return Err(ShootoutError::MatchOver);
        }
        if !self.config.power_enabled {
            return Err(ShootoutError::PowerMeterDisabled);
        }
        self.ensure_accepting_input("lock_power", Phase::PlayerShoot)?;
        let shot = self.shot.take().ok_or(ShootoutError::InvalidPhase {
            action: "lock_power",
            phase: self.state.phase(),
        })?;

        let power = self.charge.lock();
        debug!(power, "power locked");
        self.launch(Side::Player, shot.direction, shot.cpu_dive, Some(power));
        Ok(power)
    }

    /// Human keeper dives against the already committed CPU aim.
    pub fn choose_dive(&mut self, dive: Direction) -> Result<()> {
        self.ensure_accepting_input("choose_dive", Phase::PlayerSave)?;
        let aim = self.cpu_aim.take().ok_or(ShootoutError::InvalidPhase {
            action: "choose_dive",
            phase: self.state.phase(),
        })?;
        debug!(%dive, "dive committed");
        self.launch(Side::Cpu, aim, dive, None);
        Ok(())
    }

    /// Quit mid-match. Any charge or ball in flight is discarded.
    pub fn forfeit(&mut self, reason: impl Into<String>) -> Result<()> {
        self.state.forfeit(reason)?;
        self.charge.reset();
        self.shot = None;
        self.cpu_aim = None;
        self.in_flight = None;
        Ok(())
    }

    /// Advance one frame: CPU setup, charge meter, ball flight, result hold.
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        if self.state.is_over() {
            return Ok(());
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.state.phase() == Phase::CpuShoot && self.in_flight.is_none() {
            let aim = OutcomeResolver::sample_cpu_aim(&mut self.rng);
            self.cpu_aim = Some(aim);
            self.state.begin_save()?;
            debug!("cpu aim committed");
        }

        if self.shot.is_some() {
            self.charge.advance(dt);
        }

        if self.in_flight.is_some() {
            self.advance_flight(dt)?;
        }
        Ok(())
    }

    fn launch(
        &mut self,
        shooter: Side,
        direction: Direction,
        keeper_dive: Direction,
        locked_power: Option<f32>,
    ) {
        let flight = self.config.geometry.flight(
            direction,
            locked_power.unwrap_or(0.0),
            &self.config.timing.flight_timing(),
        );
        self.in_flight = Some(KickInFlight {
            shooter,
            direction,
            keeper_dive,
            locked_power,
            flight,
            elapsed: 0.0,
            resolution: None,
            hold_elapsed: 0.0,
        });
    }

    fn advance_flight(&mut self, dt: f32) -> Result<()> {
        let Some(mut kick) = self.in_flight else {
            return Ok(());
        };

        let resolution = match kick.resolution {
            Some(resolution) => {
                kick.hold_elapsed += dt;
                resolution
            }
            None => {
                kick.elapsed += dt;
                if kick.elapsed < kick.flight.duration_secs {
                    self.in_flight = Some(kick);
                    return Ok(());
                }
                kick.hold_elapsed = kick.elapsed - kick.flight.duration_secs;
                kick.elapsed = kick.flight.duration_secs;
                let resolution = self.resolve(&kick);
                kick.resolution = Some(resolution);
                self.last_outcome = Some(resolution.outcome);
                resolution
            }
        };

        if kick.hold_elapsed < self.config.timing.result_hold_secs {
            self.in_flight = Some(kick);
            return Ok(());
        }

        self.in_flight = None;
        self.state.record_kick(kick.shooter, kick.direction, resolution.outcome)?;
        Ok(())
    }

    fn resolve(&mut self, kick: &KickInFlight) -> KickResolution {
        let in_frame = self.config.geometry.frame.contains(kick.flight.landing_point());
        match kick.shooter {
            Side::Player => {
                let ctx = PlayerShotContext {
                    direction: kick.direction,
                    cpu_dive: kick.keeper_dive,
                    locked_power: kick.locked_power,
                    cpu_guess_accuracy: self.profile.cpu_guess_accuracy,
                    in_frame,
                };
                let save_roll = match ctx.locked_power {
                    Some(_) if in_frame => self.rng.next_unit(),
                    _ => 1.0,
                };
                OutcomeResolver::resolve_player_shot(&ctx, save_roll)
            }
            Side::Cpu => OutcomeResolver::resolve_cpu_shot(&CpuShotContext {
                direction: kick.direction,
                player_dive: kick.keeper_dive,
                in_frame,
            }),
        }
    }

    pub fn snapshot(&self) -> ShootoutSnapshot {
        let state = &self.state;
        ShootoutSnapshot {
            phase: state.phase(),
            player_score: state.player_score(),
            cpu_score: state.cpu_score(),
            player_kicks: state.player_kicks(),
            cpu_kicks: state.cpu_kicks(),
            player_results: state.player_results().to_vec(),
            cpu_results: state.cpu_results().to_vec(),
            player_tracker: state.tracker(Side::Player),
            cpu_tracker: state.tracker(Side::Cpu),
            sudden_death: state.sudden_death(),
            power_enabled: self.config.power_enabled,
            charging: self.shot.is_some(),
            fill_level: if self.shot.is_some() { self.charge.fill_level() } else { 0.0 },
            locked_power: self.in_flight.and_then(|k| k.locked_power),
            committed_direction: self.shot.map(|s| s.direction).or_else(|| {
                self.in_flight.filter(|k| k.shooter == Side::Player).map(|k| k.direction)
            }),
            last_outcome: self.last_outcome,
            difficulty: self.profile,
            forfeit_reason: state.forfeit_reason().map(str::to_string),
            winner: state.winner(),
            ball: self.in_flight.map(|k| BallSnapshot {
                shooter: k.shooter,
                position: k.flight.position_at(k.progress()),
                progress: k.progress(),
                keeper_dive: k.keeper_dive,
            }),
        }
    }

    /// Match-history entry; only valid once the match is over.
    pub fn finalize(&self) -> Result<MatchRecord> {
        self.state.finalize(self.config.difficulty)
    }

    /// New match, same configuration and random stream.
    pub fn reset(&mut self) {
        self.state = ShootoutState::new();
        self.charge.reset();
        self.shot = None;
        self.cpu_aim = None;
        self.in_flight = None;
        self.last_outcome = None;
        info!("shootout reset");
    }
}

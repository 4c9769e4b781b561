//! Shootout turn / score / termination state machine.
//!
//! Flow: PlayerShoot → CpuShoot → PlayerSave → PlayerShoot → … with
//! MatchOver as the only terminal phase. Five kicks each in regulation, then
//! sudden-death rounds of one kick per side until a round ends untied.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ShootoutError};
use crate::models::{
    DifficultyLevel, Direction, KickAccuracy, KickOutcome, KickRecord, MatchRecord, Side,
    TrackerSlot,
};

/// Regulation kicks per side.
pub const MAX_KICKS_PER_SIDE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the human to pick a direction (and lock power).
    PlayerShoot,
    /// CPU is about to commit its aim.
    CpuShoot,
    /// CPU aim is fixed; waiting for the human dive.
    PlayerSave,
    MatchOver,
}

impl Phase {
    /// Who is on the spot in this phase.
    pub fn shooter(self) -> Option<Side> {
        match self {
            Phase::PlayerShoot => Some(Side::Player),
            Phase::CpuShoot | Phase::PlayerSave => Some(Side::Cpu),
            Phase::MatchOver => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::MatchOver)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootoutState {
    player_score: u32,
    cpu_score: u32,
    player_kicks: u32,
    cpu_kicks: u32,
    max_kicks_per_side: u32,
    sudden_death: bool,
    phase: Phase,
    player_results: Vec<KickRecord>,
    cpu_results: Vec<KickRecord>,
    forfeit_reason: Option<String>,
}

impl Default for ShootoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShootoutState {
    pub fn new() -> Self {
        Self {
            player_score: 0,
            cpu_score: 0,
            player_kicks: 0,
            cpu_kicks: 0,
            max_kicks_per_side: MAX_KICKS_PER_SIDE,
            sudden_death: false,
            phase: Phase::PlayerShoot,
            player_results: Vec::new(),
            cpu_results: Vec::new(),
            forfeit_reason: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn cpu_score(&self) -> u32 {
        self.cpu_score
    }

    pub fn player_kicks(&self) -> u32 {
        self.player_kicks
    }

    pub fn cpu_kicks(&self) -> u32 {
        self.cpu_kicks
    }

    pub fn max_kicks_per_side(&self) -> u32 {
        self.max_kicks_per_side
    }

    pub fn sudden_death(&self) -> bool {
        self.sudden_death
    }

    pub fn player_results(&self) -> &[KickRecord] {
        &self.player_results
    }

    pub fn cpu_results(&self) -> &[KickRecord] {
        &self.cpu_results
    }

    pub fn forfeit_reason(&self) -> Option<&str> {
        self.forfeit_reason.as_deref()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn results(&self, side: Side) -> &[KickRecord] {
        match side {
            Side::Player => &self.player_results,
            Side::Cpu => &self.cpu_results,
        }
    }

    /// Record a completed kick and advance the phase.
    ///
    /// `shooter` must be the side on the spot for the current phase. A CPU
    /// kick is only accepted in PlayerSave, once its aim is committed.
    pub fn record_kick(
        &mut self,
        shooter: Side,
        direction: Direction,
        outcome: KickOutcome,
    ) -> Result<Phase> {
        let expected = match self.phase {
            Phase::PlayerShoot => Side::Player,
            Phase::PlayerSave => Side::Cpu,
            Phase::CpuShoot => {
                return Err(ShootoutError::InvalidPhase { action: "record_kick", phase: self.phase })
            }
            Phase::MatchOver => return Err(ShootoutError::MatchOver),
        };
        if shooter != expected {
            return Err(ShootoutError::ShooterMismatch { expected, found: shooter });
        }

        let record = KickRecord { shooter, direction, outcome };
        let scored = record.scored();
        match shooter {
            Side::Player => {
                self.player_results.push(record);
                self.player_kicks += 1;
                if scored {
                    self.player_score += 1;
                }
            }
            Side::Cpu => {
                self.cpu_results.push(record);
                self.cpu_kicks += 1;
                if scored {
                    self.cpu_score += 1;
                }
            }
        }

        self.phase = self.next_phase_after(shooter);
        Ok(self.phase)
    }

    fn next_phase_after(&mut self, shooter: Side) -> Phase {
        if !self.sudden_death && self.insurmountable_lead() {
            info!(
                player = self.player_score,
                cpu = self.cpu_score,
                player_kicks = self.player_kicks,
                cpu_kicks = self.cpu_kicks,
                "shootout decided early"
            );
            return Phase::MatchOver;
        }

        let round_complete = self.player_kicks == self.cpu_kicks;
        if round_complete && self.player_kicks >= self.max_kicks_per_side {
            if self.player_score != self.cpu_score {
                info!(player = self.player_score, cpu = self.cpu_score, "shootout over");
                return Phase::MatchOver;
            }
            if !self.sudden_death {
                info!(score = self.player_score, "level after regulation, sudden death");
                self.sudden_death = true;
            }
        }

        match shooter {
            Side::Player => Phase::CpuShoot,
            Side::Cpu => Phase::PlayerShoot,
        }
    }

    /// Trailing side cannot catch up with its remaining regulation kicks.
    fn insurmountable_lead(&self) -> bool {
        let lead = self.player_score as i64 - self.cpu_score as i64;
        let trailing_kicks = if lead > 0 { self.cpu_kicks } else { self.player_kicks };
        let remaining = self.max_kicks_per_side.saturating_sub(trailing_kicks) as i64;
        lead.abs() > remaining
    }

    /// CPU aim is committed; hand over to the human keeper.
    pub fn begin_save(&mut self) -> Result<()> {
        match self.phase {
            Phase::CpuShoot => {
                self.phase = Phase::PlayerSave;
                Ok(())
            }
            Phase::MatchOver => Err(ShootoutError::MatchOver),
            phase => Err(ShootoutError::InvalidPhase { action: "begin_save", phase }),
        }
    }

    /// End the match immediately. No kick is recorded for the abandoned round.
    pub fn forfeit(&mut self, reason: impl Into<String>) -> Result<()> {
        if self.is_over() {
            return Err(ShootoutError::MatchOver);
        }
        let reason = reason.into();
        info!(%reason, phase = ?self.phase, "match forfeited");
        self.forfeit_reason = Some(reason);
        self.phase = Phase::MatchOver;
        Ok(())
    }

    /// `None` until the match is over. A forfeit always goes to the CPU.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_over() {
            return None;
        }
        if self.forfeit_reason.is_some() {
            return Some(Side::Cpu);
        }
        match self.player_score.cmp(&self.cpu_score) {
            std::cmp::Ordering::Greater => Some(Side::Player),
            std::cmp::Ordering::Less => Some(Side::Cpu),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Scoreboard row: one slot per regulation kick, extended through sudden death.
    pub fn tracker(&self, side: Side) -> Vec<TrackerSlot> {
        let results = self.results(side);
        let width = results.len().max(self.max_kicks_per_side as usize);
        let mut slots: Vec<TrackerSlot> = results.iter().map(TrackerSlot::from).collect();
        slots.resize(width, TrackerSlot::Pending);
        slots
    }

    /// History entry for a finished match.
    pub fn finalize(&self, difficulty: DifficultyLevel) -> Result<MatchRecord> {
        if !self.is_over() {
            return Err(ShootoutError::InvalidPhase { action: "finalize", phase: self.phase });
        }
        Ok(MatchRecord {
            difficulty,
            player_score: self.player_score,
            cpu_score: self.cpu_score,
            player_kicks: self.player_kicks,
            cpu_kicks: self.cpu_kicks,
            sudden_death: self.sudden_death,
            forfeited: self.forfeit_reason.is_some(),
            forfeit_reason: self.forfeit_reason.clone(),
            winner: self.winner(),
            per_kick_accuracy: KickAccuracy::from_results(&self.player_results, &self.cpu_results),
        })
    }
}

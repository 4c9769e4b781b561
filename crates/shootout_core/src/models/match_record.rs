//! Finalized match summary handed to the persistence layer.

use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyLevel;
use super::direction::Side;
use super::kick::KickRecord;

/// Share of kicks converted, per side. `0.0` for a side that never kicked.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KickAccuracy {
    pub player: f32,
    pub cpu: f32,
}

impl KickAccuracy {
    pub fn from_results(player_results: &[KickRecord], cpu_results: &[KickRecord]) -> Self {
        Self {
            player: conversion_rate(player_results),
            cpu: conversion_rate(cpu_results),
        }
    }
}

fn conversion_rate(results: &[KickRecord]) -> f32 {
    if results.is_empty() {
        return 0.0;
    }
    let scored = results.iter().filter(|r| r.scored()).count();
    scored as f32 / results.len() as f32
}

/// Match-history entry, built once the shootout reaches MATCH_OVER.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub difficulty: DifficultyLevel,
    pub player_score: u32,
    pub cpu_score: u32,
    pub player_kicks: u32,
    pub cpu_kicks: u32,
    pub sudden_death: bool,
    pub forfeited: bool,
    #[serde(default)]
    pub forfeit_reason: Option<String>,
    pub winner: Option<Side>,
    pub per_kick_accuracy: KickAccuracy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, KickOutcome};

    fn kick(outcome: KickOutcome) -> KickRecord {
        KickRecord { shooter: Side::Player, direction: Direction::Left, outcome }
    }

    #[test]
    fn test_accuracy_counts_only_goals() {
        let player = [
            kick(KickOutcome::Goal),
            kick(KickOutcome::Wide),
            kick(KickOutcome::Saved),
            kick(KickOutcome::Goal),
        ];
        let acc = KickAccuracy::from_results(&player, &[]);
        assert!((acc.player - 0.5).abs() < f32::EPSILON);
        assert_eq!(acc.cpu, 0.0);
    }
}

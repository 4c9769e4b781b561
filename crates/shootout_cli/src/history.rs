//! Match history log: one JSON object per line, appended after each match.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shootout_core::{MatchRecord, Side};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub seed: u64,
    pub record: MatchRecord,
}

impl HistoryEntry {
    pub fn new(seed: u64, record: MatchRecord) -> Self {
        Self { id: Uuid::new_v4(), recorded_at: Utc::now(), seed, record }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistorySummary {
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub forfeits: usize,
    pub sudden_deaths: usize,
}

impl HistorySummary {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            let record = &entry.record;
            acc.matches += 1;
            match record.winner {
                Some(Side::Player) => acc.wins += 1,
                Some(Side::Cpu) => acc.losses += 1,
                None => {}
            }
            acc.forfeits += usize::from(record.forfeited);
            acc.sudden_deaths += usize::from(record.sudden_death);
            acc
        })
    }

    pub fn win_rate(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.wins as f64 / self.matches as f64
    }
}

pub struct MatchHistory {
    path: PathBuf,
}

impl MatchHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &HistoryEntry) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        let line = serde_json::to_string(entry)?;
        writeln!(file, "{line}")?;
        info!(id = %entry.id, path = %self.path.display(), "match recorded");
        Ok(())
    }

    /// All entries in file order. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).with_context(|| {
                    format!("{}:{}: bad history entry", self.path.display(), idx + 1)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shootout_core::models::KickAccuracy;
    use shootout_core::DifficultyLevel;

    fn record(winner: Side, forfeited: bool) -> MatchRecord {
        MatchRecord {
            difficulty: DifficultyLevel::Normal,
            player_score: 4,
            cpu_score: 3,
            player_kicks: 5,
            cpu_kicks: 5,
            sudden_death: false,
            forfeited,
            forfeit_reason: forfeited.then(|| "You forfeited the match!".to_string()),
            winner: Some(winner),
            per_kick_accuracy: KickAccuracy { player: 0.8, cpu: 0.6 },
        }
    }

    #[test]
    fn test_append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let history = MatchHistory::new(dir.path().join("logs/history.jsonl"));
        assert!(history.load().unwrap().is_empty());

        let first = HistoryEntry::new(1, record(Side::Player, false));
        let second = HistoryEntry::new(2, record(Side::Cpu, true));
        history.append(&first).unwrap();
        history.append(&second).unwrap();

        let entries = history.load().unwrap();
        assert_eq!(entries, vec![first, second]);
    }

    #[test]
    fn test_corrupt_line_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let history = MatchHistory::new(&path);
        history.append(&HistoryEntry::new(1, record(Side::Player, false))).unwrap();
        fs::write(&path, format!("{}not json\n", fs::read_to_string(&path).unwrap())).unwrap();

        let err = history.load().unwrap_err();
        assert!(format!("{err}").contains(":2:"));
    }

    #[test]
    fn test_summary_counts() {
        let entries = vec![
            HistoryEntry::new(1, record(Side::Player, false)),
            HistoryEntry::new(2, record(Side::Cpu, true)),
            HistoryEntry::new(3, record(Side::Cpu, false)),
        ];
        let summary = HistorySummary::from_entries(&entries);
        assert_eq!(summary.matches, 3);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.forfeits, 1);
        assert!((summary.win_rate() - 1.0 / 3.0).abs() < 1e-9);
    }
}

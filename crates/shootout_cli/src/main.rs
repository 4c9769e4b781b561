//! Shootout CLI
//!
//! Headless penalty shootouts against the CPU, with an optional JSON-lines
//! match history.

mod autoplay;
mod history;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shootout_core::{DifficultyLevel, MatchConfig, ShootoutEngine, Side, TimingConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoplay::AutoPlayer;
use history::{HistoryEntry, HistorySummary, MatchHistory};

#[derive(Parser)]
#[command(name = "shootout", version = shootout_core::VERSION)]
#[command(about = "Play penalty shootouts against the CPU", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Auto-play matches with random human inputs
    Simulate {
        /// easy, normal or hard (overrides PK_DIFFICULTY)
        #[arg(long)]
        difficulty: Option<DifficultyLevel>,

        /// Base seed; match i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        /// Classic rules without the power meter
        #[arg(long, default_value = "false")]
        classic: bool,

        /// Skip ball flight and result hold
        #[arg(long, default_value = "false")]
        instant: bool,

        /// Number of matches
        #[arg(long, default_value_t = 1)]
        matches: u32,

        /// Append each finished match to this JSON-lines file
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Summarize a match history file
    History {
        #[arg(long)]
        path: PathBuf,
    },

    /// List difficulty presets
    Difficulties,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { difficulty, seed, classic, instant, matches, history } => {
            let mut config = MatchConfig::from_env().context("loading match config")?;
            if let Some(level) = difficulty {
                config.difficulty = level;
            }
            if classic {
                config.power_enabled = false;
            }
            if instant {
                config.timing = TimingConfig::instant();
            }
            let seed = seed.unwrap_or_else(rand::random);
            let history = history.map(MatchHistory::new);
            simulate(&config, seed, matches, history.as_ref())?;
        }

        Commands::History { path } => {
            let history = MatchHistory::new(path);
            let entries = history.load()?;
            print_summary(&HistorySummary::from_entries(&entries));
        }

        Commands::Difficulties => {
            for level in DifficultyLevel::ALL {
                let profile = level.profile();
                println!(
                    "{:<8} cpu keeper reads shot {:>3.0}%   you read cpu shot {:>3.0}%",
                    level.as_str(),
                    profile.cpu_guess_accuracy * 100.0,
                    profile.player_guess_accuracy * 100.0
                );
            }
        }
    }

    Ok(())
}

fn simulate(
    config: &MatchConfig,
    seed: u64,
    matches: u32,
    history: Option<&MatchHistory>,
) -> Result<()> {
    info!(
        difficulty = %config.difficulty,
        power_enabled = config.power_enabled,
        seed,
        matches,
        "simulating"
    );

    let mut entries = Vec::with_capacity(matches as usize);
    for i in 0..matches {
        let match_seed = seed.wrapping_add(u64::from(i));
        let mut engine = ShootoutEngine::seeded(config.clone(), match_seed)?;
        let record = AutoPlayer::seeded(match_seed.rotate_left(32)).play(&mut engine)?;

        let result = match record.winner {
            Some(Side::Player) => "WIN ",
            Some(Side::Cpu) => "LOSS",
            None => "----",
        };
        println!(
            "#{:<3} seed {:<20} {}  {}-{}{}",
            i + 1,
            match_seed,
            result,
            record.player_score,
            record.cpu_score,
            if record.sudden_death { "  (sudden death)" } else { "" }
        );

        let entry = HistoryEntry::new(match_seed, record);
        if let Some(history) = history {
            history.append(&entry)?;
        }
        entries.push(entry);
    }

    if matches > 1 {
        print_summary(&HistorySummary::from_entries(&entries));
    }
    if let Some(history) = history {
        println!("\nHistory saved to: {}", history.path().display());
    }
    Ok(())
}

fn print_summary(summary: &HistorySummary) {
    println!("\nMatches:       {}", summary.matches);
    println!("Wins:          {}", summary.wins);
    println!("Losses:        {}", summary.losses);
    println!("Win rate:      {:.1}%", summary.win_rate() * 100.0);
    println!("Sudden death:  {}", summary.sudden_deaths);
    println!("Forfeits:      {}", summary.forfeits);
}

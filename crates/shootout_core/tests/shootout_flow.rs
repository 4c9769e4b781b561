use shootout_core::engine::ScriptedSource;
use shootout_core::{
    DifficultyLevel, Direction, KickOutcome, MatchConfig, MatchEvent, Phase, ShootoutEngine,
    ShootoutError, Side, TimingConfig,
};

const FRAME: f32 = 1.0 / 60.0;

fn classic_instant() -> MatchConfig {
    MatchConfig {
        timing: TimingConfig::instant(),
        ..MatchConfig::classic(DifficultyLevel::Normal)
    }
}

/// Rolls for one round under classic rules with the CPU always aiming left.
///
/// Human goal: dive roll misses (0.99) then picks the first wrong side (0.0).
/// Human miss: dive roll hits (0.0). CPU aim: 0.0 → left.
fn round_rolls(player_scores: bool) -> Vec<f32> {
    let mut rolls = if player_scores { vec![0.99, 0.0] } else { vec![0.0] };
    rolls.push(0.0);
    rolls
}

fn play_round<R: shootout_core::RandomSource>(
    engine: &mut ShootoutEngine<R>,
    cpu_scores: bool,
) {
    engine.handle(MatchEvent::ChooseDirection(Direction::Center)).unwrap();
    engine.handle(MatchEvent::Tick(1.0)).unwrap();
    if engine.is_over() {
        return;
    }
    assert_eq!(engine.phase(), Phase::CpuShoot);
    engine.handle(MatchEvent::Tick(FRAME)).unwrap();
    assert_eq!(engine.phase(), Phase::PlayerSave);
    let dive = if cpu_scores { Direction::Right } else { Direction::Left };
    engine.handle(MatchEvent::ChooseDive(dive)).unwrap();
    engine.handle(MatchEvent::Tick(1.0)).unwrap();
}

#[test]
fn sudden_death_decided_after_both_kick() {
    let mut rolls = Vec::new();
    for _ in 0..6 {
        rolls.extend(round_rolls(true));
    }
    let source = ScriptedSource::new(rolls);
    let mut engine = ShootoutEngine::new(classic_instant(), source).unwrap();

    for _ in 0..5 {
        play_round(&mut engine, true);
    }
    let snap = engine.snapshot();
    assert!(snap.sudden_death);
    assert_eq!((snap.player_score, snap.cpu_score), (5, 5));
    assert_eq!(snap.phase, Phase::PlayerShoot);

    play_round(&mut engine, false);
    assert!(engine.is_over());
    let record = engine.finalize().unwrap();
    assert_eq!((record.player_score, record.cpu_score), (6, 5));
    assert_eq!((record.player_kicks, record.cpu_kicks), (6, 6));
    assert!(record.sudden_death);
    assert_eq!(record.winner, Some(Side::Player));
}

#[test]
fn early_stop_ends_regulation() {
    let mut rolls = Vec::new();
    for _ in 0..3 {
        rolls.extend(round_rolls(true));
    }
    let mut engine = ShootoutEngine::new(classic_instant(), ScriptedSource::new(rolls)).unwrap();
    for _ in 0..3 {
        play_round(&mut engine, false);
    }
    assert!(engine.is_over());
    assert_eq!(engine.state().player_score(), 3);
    assert_eq!(engine.state().cpu_kicks(), 3);
    assert!(engine.state().cpu_results().iter().all(|k| k.outcome == KickOutcome::Saved));

    // Terminal phase absorbs every input.
    for event in [
        MatchEvent::ChooseDirection(Direction::Left),
        MatchEvent::LockPower,
        MatchEvent::ChooseDive(Direction::Left),
        MatchEvent::Forfeit("late".into()),
    ] {
        assert_eq!(engine.handle(event), Err(ShootoutError::MatchOver));
    }
    assert_eq!(engine.phase(), Phase::MatchOver);
}

#[test]
fn seeded_matches_replay_identically() {
    fn run(seed: u64) -> (Vec<KickOutcome>, Vec<KickOutcome>) {
        let config = MatchConfig {
            timing: TimingConfig::instant(),
            ..MatchConfig::with_difficulty(DifficultyLevel::Hard)
        };
        let mut engine = ShootoutEngine::seeded(config, seed).unwrap();
        let mut turn = 0usize;
        while !engine.is_over() && turn < 200 {
            let dir = Direction::ALL[turn % 3];
            match engine.phase() {
                Phase::PlayerShoot => {
                    engine.choose_direction(dir).unwrap();
                    for _ in 0..(turn % 50) {
                        engine.tick(FRAME).unwrap();
                    }
                    engine.lock_power().unwrap();
                    engine.tick(1.0).unwrap();
                }
                Phase::CpuShoot => engine.tick(FRAME).unwrap(),
                Phase::PlayerSave => {
                    engine.choose_dive(dir).unwrap();
                    engine.tick(1.0).unwrap();
                }
                Phase::MatchOver => break,
            }
            turn += 1;
        }
        assert!(engine.is_over(), "match did not finish");
        let state = engine.state();
        assert_eq!(state.player_kicks() as usize, state.player_results().len());
        assert_eq!(state.cpu_kicks() as usize, state.cpu_results().len());
        (
            state.player_results().iter().map(|k| k.outcome).collect(),
            state.cpu_results().iter().map(|k| k.outcome).collect(),
        )
    }

    assert_eq!(run(2024), run(2024));
}

#[test]
fn forfeit_mid_charge_records_nothing() {
    let config = MatchConfig {
        timing: TimingConfig::instant(),
        ..MatchConfig::default()
    };
    let mut engine = ShootoutEngine::seeded(config, 9).unwrap();
    engine.handle(MatchEvent::ChooseDirection(Direction::Left)).unwrap();
    engine.handle(MatchEvent::Tick(0.4)).unwrap();
    assert!(engine.snapshot().charging);

    engine.handle(MatchEvent::Forfeit("You forfeited the match!".into())).unwrap();
    let snap = engine.snapshot();
    assert_eq!(snap.phase, Phase::MatchOver);
    assert!(!snap.charging);
    assert_eq!(snap.player_kicks, 0);
    assert_eq!(snap.forfeit_reason.as_deref(), Some("You forfeited the match!"));

    let record = engine.finalize().unwrap();
    assert!(record.forfeited);
    assert_eq!(record.player_kicks, 0);
}

#[test]
fn events_deserialize_from_input_layer_json() {
    let events: Vec<MatchEvent> = serde_json::from_str(
        r#"[
            {"type": "choose_direction", "value": "left"},
            {"type": "tick", "value": 0.25},
            {"type": "lock_power"},
            {"type": "choose_dive", "value": "right"},
            {"type": "forfeit", "value": "quit"}
        ]"#,
    )
    .unwrap();
    assert_eq!(events[0], MatchEvent::ChooseDirection(Direction::Left));
    assert_eq!(events[2], MatchEvent::LockPower);
    assert_eq!(events[4], MatchEvent::Forfeit("quit".to_string()));
}

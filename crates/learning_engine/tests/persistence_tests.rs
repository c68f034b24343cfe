use learning_engine::{Engine, EngineConfig, GameResult, LearningConfig, LearningStore, PositionId};
use shakmaty::Color;
use std::fs;

fn play(
    store: &mut LearningStore,
    prefix: &str,
    plies: usize,
    result: GameResult,
) -> Vec<PositionId> {
    let positions: Vec<PositionId> = (0..plies)
        .map(|i| PositionId::new(format!("{prefix}-{i}")))
        .collect();
    for id in &positions {
        store.record_ply(id.clone());
    }
    store.end_game(result);
    positions
}

#[test]
fn test_save_and_reload_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learning_white.json");

    let mut store = LearningStore::open(Color::White, LearningConfig::default(), &path);
    let white_wins = GameResult::Decisive {
        winner: Color::White,
    };
    let black_wins = GameResult::Decisive {
        winner: Color::Black,
    };
    let mut seen = Vec::new();
    seen.extend(play(&mut store, "a", 6, white_wins));
    seen.extend(play(&mut store, "b", 4, GameResult::Draw));
    seen.extend(play(&mut store, "a", 3, black_wins));
    assert_eq!(store.save().unwrap(), Some(path.clone()));

    let reloaded = LearningStore::open(Color::White, LearningConfig::default(), &path);
    for id in &seen {
        assert_eq!(reloaded.value_of(id), store.value_of(id), "value of {id}");
    }
    assert_eq!(reloaded.epsilon(), store.epsilon());

    let (before, after) = (store.stats(), reloaded.stats());
    assert_eq!(after.games_played, 3);
    assert_eq!((after.wins, after.draws, after.losses), (1, 1, 1));
    assert_eq!(after.positions_learned, before.positions_learned);
    assert_eq!(after.last_updated, before.last_updated);
    assert_eq!(
        reloaded.history().collect::<Vec<_>>(),
        store.history().collect::<Vec<_>>()
    );
}

#[test]
fn test_corrupt_store_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learning_black.json");
    fs::write(&path, "{ \"position_values\": [1, 2").unwrap();

    let mut store = LearningStore::open(Color::Black, LearningConfig::default(), &path);
    assert_eq!(store.games_played(), 0);
    assert_eq!(store.positions_learned(), 0);
    assert_eq!(store.epsilon(), 0.35);

    play(&mut store, "fresh", 2, GameResult::Draw);
    store.save().unwrap();
    let reloaded = LearningStore::open(Color::Black, LearningConfig::default(), &path);
    assert_eq!(reloaded.games_played(), 1);
}

#[test]
fn test_missing_store_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let store = LearningStore::open(
        Color::White,
        LearningConfig::default(),
        dir.path().join("nested").join("learning_white.json"),
    );
    assert_eq!(store.games_played(), 0);
    assert_eq!(store.stats().win_rate(), 0.0);
}

#[test]
fn test_load_keeps_most_recent_positions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learning_white.json");
    let values: Vec<String> = (0..10).map(|i| format!(r#""p{i}": {i}.0"#)).collect();
    fs::write(
        &path,
        format!(r#"{{ "position_values": {{ {} }} }}"#, values.join(", ")),
    )
    .unwrap();

    let config = LearningConfig {
        max_positions: 4,
        ..LearningConfig::default()
    };
    let store = LearningStore::open(Color::White, config, &path);

    assert_eq!(store.positions_learned(), 4);
    for i in 0..6 {
        assert_eq!(store.learned_value(&PositionId::new(format!("p{i}"))), None);
    }
    for i in 6..10 {
        assert_eq!(
            store.learned_value(&PositionId::new(format!("p{i}"))),
            Some(f64::from(i))
        );
    }
}

#[test]
fn test_out_of_range_values_are_clamped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learning_white.json");
    fs::write(
        &path,
        r#"{ "position_values": { "hot": 5000.0, "cold": -7000.0, "": 3.0 } }"#,
    )
    .unwrap();

    let store = LearningStore::open(Color::White, LearningConfig::default(), &path);
    assert_eq!(store.value_of(&PositionId::from("hot")), 1000.0);
    assert_eq!(store.value_of(&PositionId::from("cold")), -1000.0);
    assert_eq!(store.positions_learned(), 2);
}

#[test]
fn test_compressed_store_through_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learning_white.json.zst");
    let config = EngineConfig {
        seed: Some(3),
        ..EngineConfig::default()
    };

    let mut engine = Engine::open(Color::White, config.clone(), &path).unwrap();
    let start = learning_engine::rules::start_position();
    engine.record_ply(&start);
    engine.end_game(GameResult::Decisive {
        winner: Color::White,
    });
    assert_eq!(engine.shutdown().unwrap(), Some(path.clone()));

    let engine = Engine::open(Color::White, config, &path).unwrap();
    let id = learning_engine::rules::position_id(&start);
    assert!((engine.store().value_of(&id) - 150.0).abs() < 1e-9);
    assert_eq!(engine.stats().games_played, 1);
}

#[test]
fn test_history_on_disk_respects_capacity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learning_white.json");
    let config = LearningConfig {
        history_capacity: 2,
        ..LearningConfig::default()
    };

    let mut store = LearningStore::open(Color::White, config.clone(), &path);
    for game in 0..5 {
        play(&mut store, &format!("game{game}"), 2, GameResult::Draw);
    }
    store.save().unwrap();

    let snapshot: learning_engine::learning::LearningSnapshot =
        serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(snapshot.move_history.len(), 2);
    assert_eq!(snapshot.move_history[1].positions[0].as_str(), "game4-0");
    assert_eq!(snapshot.move_history[1].outcome, "1/2-1/2");
}

//! Learning Engine Benchmarks
//!
//! Performance benchmarks for evaluation, search and learning updates using
//! Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use learning_engine::evaluation::{evaluate, evaluate_static};
use learning_engine::rules::{self, position_id, start_position};
use learning_engine::search::{search, TranspositionTable};
use learning_engine::{GameResult, LearningConfig, LearningStore, PositionId};
use shakmaty::Color;

const MIDDLEGAME: &str = "r1bq1rk1/pp2bppp/2n1pn2/2pp4/3P4/2PBPN2/PP1N1PPP/R2QK2R w KQ - 2 8";

fn bench_position_id(c: &mut Criterion) {
    let pos = start_position();
    c.bench_function("position_id_starting", |b| {
        b.iter(|| black_box(position_id(&pos)))
    });
}

fn bench_evaluate_static(c: &mut Criterion) {
    let pos = start_position();
    c.bench_function("evaluate_static_starting", |b| {
        b.iter(|| black_box(evaluate_static(&pos)))
    });
}

fn bench_evaluate_with_store(c: &mut Criterion) {
    let pos = start_position();
    let mut store = LearningStore::new(Color::White, LearningConfig::default());
    store.record_ply(position_id(&pos));
    store.end_game(GameResult::Decisive {
        winner: Color::White,
    });

    c.bench_function("evaluate_blended_starting", |b| {
        b.iter(|| black_box(evaluate(&pos, &store)))
    });
}

fn bench_search_depth_3(c: &mut Criterion) {
    let pos = rules::from_fen(MIDDLEGAME).expect("valid benchmark FEN");
    let store = LearningStore::new(Color::White, LearningConfig::default());

    c.bench_function("search_depth_3_middlegame", |b| {
        b.iter(|| {
            let mut tt = TranspositionTable::new(400_000);
            black_box(search(&pos, 3, true, &store, &mut tt).map(|r| r.score))
        })
    });
}

fn bench_end_game_backprop(c: &mut Criterion) {
    let positions: Vec<PositionId> = (0..120)
        .map(|i| PositionId::new(format!("bench-{i}")))
        .collect();

    c.bench_function("end_game_120_plies", |b| {
        b.iter(|| {
            let mut store = LearningStore::new(Color::White, LearningConfig::default());
            for id in &positions {
                store.record_ply(id.clone());
            }
            black_box(store.end_game(GameResult::Draw).plies)
        })
    });
}

criterion_group!(
    benches,
    bench_position_id,
    bench_evaluate_static,
    bench_evaluate_with_store,
    bench_search_depth_3,
    bench_end_game_backprop,
);
criterion_main!(benches);

//! Performance benchmarks for rating calculations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use riddle_rating::config::RatingConfig;
use riddle_rating::rating::{AttemptProcessor, InMemoryEntityStore, PerformanceScorer};
use riddle_rating::{Attempt, Inactivity, RatingEngine, RatingState};
use std::sync::Arc;

fn bench_score(c: &mut Criterion) {
    let scorer = PerformanceScorer::default();

    c.bench_function("hshs_score", |b| {
        b.iter(|| {
            black_box(scorer.score(
                black_box(600.0),
                black_box(-1.5),
                black_box(1.5),
                black_box(1800.0),
                true,
            ))
        })
    });
}

fn bench_calculate_elo(c: &mut Criterion) {
    let engine = RatingEngine::new(RatingConfig::default()).unwrap();
    let attempt = Attempt::new(420.0, 1200.0, true);

    c.bench_function("calculate_elo_single_attempt", |b| {
        b.iter(|| {
            let mut player = RatingState::new(10.0, 0.6);
            let mut puzzle = RatingState::new(11.0, 0.3);
            black_box(engine.calculate_elo(
                &mut player,
                &mut puzzle,
                &attempt,
                Inactivity::new(2.0, 0.5),
            ))
        })
    });

    c.bench_function("calculate_elo_100_attempt_session", |b| {
        b.iter(|| {
            let mut player = RatingState::new(10.0, 1.0);
            let mut puzzle = RatingState::new(10.0, 1.0);
            for i in 0..100 {
                let attempt = Attempt::new((i * 11 % 1200) as f64, 1200.0, i % 3 != 0);
                let _ = engine.calculate_elo(
                    &mut player,
                    &mut puzzle,
                    &attempt,
                    Inactivity::default(),
                );
            }
            black_box(player)
        })
    });
}

fn bench_processor(c: &mut Criterion) {
    let store = Arc::new(InMemoryEntityStore::new());
    let engine = Arc::new(RatingEngine::new(RatingConfig::simulation()).unwrap());
    let processor = AttemptProcessor::new(store, engine);
    let attempt = Attempt::new(300.0, 1200.0, true);
    let player = "bench_player".to_string();
    let puzzles: Vec<String> = (0..16).map(|i| format!("puzzle_{}", i)).collect();

    c.bench_function("processor_store_round_trip", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % puzzles.len();
            black_box(processor.process(&player, &puzzles[i], &attempt))
        })
    });
}

criterion_group!(benches, bench_score, bench_calculate_elo, bench_processor);
criterion_main!(benches);

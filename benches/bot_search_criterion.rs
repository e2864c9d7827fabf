use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pawprint_chess::game_state::board::Position;
use pawprint_chess::game_state::chess_types::Side;
use pawprint_chess::move_generation::legal_move_apply::apply_move;
use pawprint_chess::search::alpha_beta::{search_best_move, SearchConfig};
use pawprint_chess::search::board_scoring::MaterialPositionalScorer;
use pawprint_chess::utils::algebraic::algebraic_to_square;

fn italian_opening() -> Position {
    let moves = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4")];
    moves.iter().fold(Position::new_game(), |position, (from, to)| {
        let from = algebraic_to_square(from).expect("valid square");
        let to = algebraic_to_square(to).expect("valid square");
        apply_move(&position, from, to).position
    })
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("bot_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(6));
    group.sample_size(10);

    let cases = [
        ("startpos", Position::new_game(), Side::Dogs),
        ("italian", italian_opening(), Side::Cats),
    ];

    for (name, position, side) in cases {
        for depth in 1..=3u8 {
            let config = SearchConfig {
                max_depth: depth,
                time_budget: Duration::from_secs(30),
                deep_move_limit: Some(12),
            };
            group.bench_with_input(
                BenchmarkId::new(name, format!("d{depth}")),
                &config,
                |b, config| {
                    b.iter(|| {
                        let result = search_best_move(
                            black_box(&position),
                            side,
                            &MaterialPositionalScorer,
                            *config,
                        );
                        black_box(result.best_move)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);

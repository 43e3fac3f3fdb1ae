use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use plum_xiangqi::game_state::board::Board;
use plum_xiangqi::game_state::xiangqi_types::Color;
use plum_xiangqi::move_generation::legal_move_generator::{
    LegalMoveGenerator, PseudoLegalMoveGenerator,
};
use plum_xiangqi::move_generation::perft::perft;

const STANDARD_DEPTH_1_NODES: usize = 44;

fn max_depth() -> u8 {
    match std::env::var("PLUM_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => 3,
        _ => 2,
    }
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_standard_start");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let mut board = Board::standard().expect("standard setup should build");

    // Correctness guard before benchmarking.
    let first = perft(&LegalMoveGenerator, &mut board, Color::Red, 1).expect("perft should run");
    assert_eq!(first.nodes, STANDARD_DEPTH_1_NODES);

    for depth in 1..=max_depth() {
        group.bench_with_input(BenchmarkId::new("legal", depth), &depth, |b, &depth| {
            b.iter(|| {
                let counts = perft(&LegalMoveGenerator, &mut board, Color::Red, black_box(depth))
                    .expect("perft benchmark run should succeed");
                black_box(counts.nodes)
            });
        });
        group.bench_with_input(BenchmarkId::new("pseudo", depth), &depth, |b, &depth| {
            b.iter(|| {
                let counts =
                    perft(&PseudoLegalMoveGenerator, &mut board, Color::Red, black_box(depth))
                        .expect("perft benchmark run should succeed");
                black_box(counts.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);

use std::sync::atomic::AtomicBool;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chess_core::game_repr::Position;
use chess_core::search::{engine, SearchConfig, SearchTables};

fn bench_search_depth_4_single_threaded(c: &mut Criterion) {
    let position = Position::starting_position();
    let config = SearchConfig { max_depth: 4, threads: 1, ..SearchConfig::default() };
    c.bench_function("search depth 4, 1 thread", |b| {
        b.iter(|| {
            let tables = SearchTables::new(&config);
            let stop = AtomicBool::new(false);
            black_box(engine::execute(&position, &config, &tables, &stop, None))
        })
    });
}

fn bench_search_depth_4_parallel(c: &mut Criterion) {
    let position = Position::starting_position();
    let config = SearchConfig { max_depth: 4, ..SearchConfig::default() };
    c.bench_function("search depth 4, all threads", |b| {
        b.iter(|| {
            let tables = SearchTables::new(&config);
            let stop = AtomicBool::new(false);
            black_box(engine::execute(&position, &config, &tables, &stop, None))
        })
    });
}

fn bench_quiescence_from_kiwipete(c: &mut Criterion) {
    let position = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    let config = SearchConfig { max_depth: 3, threads: 1, ..SearchConfig::default() };
    c.bench_function("search depth 3 on kiwipete", |b| {
        b.iter(|| {
            let tables = SearchTables::new(&config);
            let stop = AtomicBool::new(false);
            black_box(engine::execute(&position, &config, &tables, &stop, None))
        })
    });
}

criterion_group!(
    benches,
    bench_search_depth_4_single_threaded,
    bench_search_depth_4_parallel,
    bench_quiescence_from_kiwipete
);
criterion_main!(benches);

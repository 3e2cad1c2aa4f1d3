use criterion::{criterion_group, criterion_main, Criterion};
use rookery::board::Board;
use rookery::fen;
use rookery::perft;

fn perft_bench(c: &mut Criterion) {
    // The positions are taken from the chess programming wiki
    // https://www.chessprogramming.org/Perft_Results
    let board = Board::starting_position();
    c.bench_function("perft initial 3", |b| b.iter(|| perft(&board, 3)));
    let board = fen::parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    c.bench_function("perft kiwipete 2", |b| b.iter(|| perft(&board, 2)));
    let board = fen::parse("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10").unwrap();
    c.bench_function("perft alternative 2", |b| b.iter(|| perft(&board, 2)));
}

fn submit_bench(c: &mut Criterion) {
    c.bench_function("submit four moves", |b| {
        b.iter(|| {
            let mut game = rookery::new_game(None).unwrap();
            for m in ["e2 e4", "e7 e5", "g1 f3", "b8 c6"] {
                game.submit_str(m).unwrap();
            }
            game
        })
    });
}

criterion_group!(benches, perft_bench, submit_bench);
criterion_main!(benches);

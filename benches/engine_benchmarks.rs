//! Benchmarks for chess engine performance.

use std::sync::Arc;

use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
};

use chess_core::board::attack_tables::{
    active_strategy, bishop_attacks, classic::Classic, hyperbola::Hyperbola,
    kindergarten::Kindergarten, pext::Pext, queen_attacks, rook_attacks, SliderAttacks,
};
use chess_core::board::{search, Bitboard, MoveList, Position, SearchConfig, Square};
use chess_core::sync::StopFlag;
use chess_core::tt::TranspositionTable;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    // Starting position
    let startpos = Position::startpos();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| startpos.perft(black_box(depth)))
        });
    }

    // Complex middlegame position (Kiwipete)
    let kiwipete: Position = KIWIPETE.parse().unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| kiwipete.perft(black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    for (name, fen) in [
        ("startpos", chess_core::board::START_FEN),
        ("middlegame", MIDDLEGAME),
        ("kiwipete", KIWIPETE),
    ] {
        let pos: Position = fen.parse().unwrap();
        group.bench_function(BenchmarkId::new("pseudo_legal", name), |b| {
            b.iter(|| {
                let mut list = MoveList::new();
                black_box(&pos).collect_all(&mut list);
                black_box(list.len())
            })
        });
        group.bench_function(BenchmarkId::new("legal", name), |b| {
            b.iter(|| black_box(black_box(&pos).legal_moves()))
        });
    }

    group.finish();
}

/// Occupancies from real positions, so blockers look like game positions.
fn sample_occupancies() -> Vec<Bitboard> {
    [chess_core::board::START_FEN, MIDDLEGAME, KIWIPETE]
        .iter()
        .map(|fen| fen.parse::<Position>().unwrap().occupied())
        .collect()
}

fn bench_attacks(c: &mut Criterion) {
    let mut group = c.benchmark_group("attacks");
    let occupancies = sample_occupancies();

    group.bench_function(BenchmarkId::new("active", active_strategy()), |b| {
        b.iter(|| {
            let mut acc = Bitboard::EMPTY;
            for &occ in &occupancies {
                for sq in Square::all() {
                    acc ^= rook_attacks(sq, occ) ^ bishop_attacks(sq, occ);
                    acc ^= queen_attacks(sq, occ);
                }
            }
            black_box(acc)
        })
    });

    fn strategy<S: SliderAttacks>(
        group: &mut BenchmarkGroup<'_, WallTime>,
        occupancies: &[Bitboard],
    ) {
        group.bench_function(BenchmarkId::new("strategy", S::NAME), |b| {
            b.iter(|| {
                let mut acc = 0u64;
                for occ in occupancies {
                    for sq in 0..64 {
                        acc ^= S::rook(sq, occ.0) ^ S::bishop(sq, occ.0);
                    }
                }
                black_box(acc)
            })
        });
    }
    strategy::<Hyperbola>(&mut group, &occupancies);
    strategy::<Classic>(&mut group, &occupancies);
    strategy::<Kindergarten>(&mut group, &occupancies);
    strategy::<Pext>(&mut group, &occupancies);

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10); // Fewer samples for slower benchmarks

    let stop = StopFlag::new();

    // Starting position search
    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let tt = Arc::new(TranspositionTable::new(16));
                search(&Position::startpos(), &tt, SearchConfig::depth(depth), &stop)
            })
        });
    }

    // Open game with pieces developed
    let tactical: Position = MIDDLEGAME.parse().unwrap();
    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("middlegame", depth), &depth, |b, &depth| {
            b.iter(|| {
                let tt = Arc::new(TranspositionTable::new(16));
                search(&tactical, &tt, SearchConfig::depth(depth), &stop)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_perft,
    bench_movegen,
    bench_attacks,
    bench_search
);
criterion_main!(benches);

//! Lazy SMP search tests.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chess_core::board::search::mate_distance;
use chess_core::board::{search, Position, SearchConfig};
use chess_core::sync::StopFlag;
use chess_core::tt::TranspositionTable;
use parking_lot::Mutex;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn parallel_search_returns_legal_move() {
    let pos: Position = KIWIPETE.parse().unwrap();
    let tt = Arc::new(TranspositionTable::new(16));
    let result = search(&pos, &tt, SearchConfig::depth(5).with_threads(4), &StopFlag::new());

    let best = result.best_move.expect("a move");
    assert!(pos.legal_moves().contains(best));
    assert!(result.depth >= 5);
    assert!(result.nodes > 0);
    assert_eq!(result.pv.first().copied(), Some(best));
}

#[test]
fn parallel_search_finds_mate() {
    let pos: Position = "k7/8/2K5/8/8/8/8/7R w - - 0 1".parse().unwrap();
    let tt = Arc::new(TranspositionTable::new(16));
    let result = search(&pos, &tt, SearchConfig::depth(6).with_threads(3), &StopFlag::new());
    assert_eq!(mate_distance(result.score), Some(3));
}

#[test]
fn only_the_main_worker_reports() {
    let depths = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&depths);
    let config = SearchConfig::depth(4)
        .with_threads(4)
        .with_info_callback(Arc::new(move |info| sink.lock().push(info.depth)));

    let tt = Arc::new(TranspositionTable::new(16));
    search(&Position::startpos(), &tt, config, &StopFlag::new());
    assert_eq!(*depths.lock(), vec![1, 2, 3, 4]);
}

#[test]
fn external_stop_ends_all_workers() {
    let pos: Position = KIWIPETE.parse().unwrap();
    let tt = Arc::new(TranspositionTable::new(16));
    let stop = StopFlag::new();

    let stopper = {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            stop.stop();
        })
    };

    let start = Instant::now();
    let result = search(&pos, &tt, SearchConfig::default().with_threads(4), &stop);
    stopper.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(10));
    let best = result.best_move.expect("best-so-far move");
    assert!(pos.legal_moves().contains(best));
}

#[test]
fn time_limit_applies_to_helpers() {
    let tt = Arc::new(TranspositionTable::new(16));
    let start = Instant::now();
    let result = search(
        &Position::startpos(),
        &tt,
        SearchConfig::time(100).with_threads(3),
        &StopFlag::new(),
    );
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(result.best_move.is_some());
}

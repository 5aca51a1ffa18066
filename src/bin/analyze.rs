//! Search a single position and stream per-depth info lines.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use chess_core::board::{search, Position, SearchConfig, DEFAULT_TT_MB, START_FEN};
use chess_core::sync::StopFlag;
use chess_core::tt::TranspositionTable;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Maximum iteration depth
    #[arg(short, long)]
    depth: Option<u32>,

    /// Time budget in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Node budget per worker
    #[arg(long)]
    nodes: Option<u64>,

    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Transposition table size in MB
    #[arg(long, default_value_t = DEFAULT_TT_MB)]
    hash: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let pos: Position = match args.fen.parse() {
        Ok(pos) => pos,
        Err(err) => {
            eprintln!("invalid FEN '{}': {err}", args.fen);
            return ExitCode::FAILURE;
        }
    };

    // Without any limit, stop after a sensible depth
    let depth = match (args.depth, args.movetime, args.nodes) {
        (None, None, None) => Some(8),
        (depth, _, _) => depth,
    };
    let config = SearchConfig {
        max_depth: depth,
        ..SearchConfig::default()
    }
    .with_time(args.movetime.unwrap_or(0))
    .with_nodes(args.nodes.unwrap_or(0))
    .with_threads(args.threads)
    .with_info_callback(Arc::new(|info| {
        let score = match info.mate_in {
            Some(moves) => format!("mate {moves}"),
            None => format!("cp {}", info.score),
        };
        println!(
            "info depth {} score {} nodes {} nps {} hashfull {} time {} pv {}",
            info.depth, score, info.nodes, info.nps, info.hashfull, info.time_ms, info.pv
        );
    }));

    let tt = Arc::new(TranspositionTable::new(args.hash));
    log::info!("analyzing {} with {:?}", pos.to_fen(), config);
    let result = search(&pos, &tt, config, &StopFlag::new());

    match (result.best_move, result.ponder_move) {
        (Some(best), Some(ponder)) => println!("bestmove {best} ponder {ponder}"),
        (Some(best), None) => println!("bestmove {best}"),
        (None, _) => println!("bestmove (none)"),
    }
    ExitCode::SUCCESS
}

//! Perft driver for checking move generation against reference counts.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use chess_core::board::{Position, START_FEN};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to count from
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    #[arg(short, long, default_value_t = 4)]
    depth: usize,

    /// Print the node count below every root move
    #[arg(long)]
    divide: bool,
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
    log::debug!("perft({}) of {}", args.depth, pos.to_fen());

    let start = Instant::now();
    let nodes = if args.divide {
        let split = pos.divide(args.depth);
        for (mv, count) in &split {
            println!("{mv}: {count}");
        }
        split.iter().map(|(_, count)| count).sum()
    } else {
        pos.perft(args.depth)
    };
    let elapsed = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        elapsed.as_millis(),
        nodes as f64 / elapsed.as_micros().max(1) as f64
    );
    ExitCode::SUCCESS
}

//! Chess board representation and search.
//!
//! Positions are small `Copy` snapshots over bitboards. Applying a move
//! writes a new snapshot and leaves the parent untouched, which is what the
//! per-ply stack of the search relies on.
//!
//! # Example
//! ```
//! use chess_core::board::Position;
//!
//! let pos = Position::startpos();
//! let moves = pos.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod apply;
pub mod attack_tables;
mod error;
pub mod eval;
mod fen;
mod movegen;
mod position;
pub mod search;
mod see;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use error::{FenError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use position::Position;
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveKind, MoveList, MoveListIntoIter,
    Piece, Square, MAX_MOVES, MAX_PLY, MOVE_BITS,
};

pub use eval::{Accumulator, Evaluator, PieceSquareEvaluator, MAX_PHASE};

// Public API - search functions and configuration
pub use search::{
    format_pv, repetition_window, search, search_with, IterativeSearch, SearchConfig,
    SearchInfoCallback, SearchIterationInfo, SearchParams, SearchResult, DEFAULT_TT_MB,
    MAX_DEPTH,
};

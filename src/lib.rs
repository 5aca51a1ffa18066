pub mod board;
mod perft;
pub mod sync;
pub mod tt;
mod zobrist;

pub use board::{Color, Move, Piece, Position, Square};
pub use sync::StopFlag;
pub use tt::TranspositionTable;

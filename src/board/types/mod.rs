//! Core chess types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - compact board square representation (u8)
//! - `Bitboard` - 64-bit board representation
//! - `Move`, `MoveKind` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveKind, MoveList, MoveListIntoIter, MAX_MOVES, MAX_PLY, MOVE_BITS};
pub use piece::{Color, Piece};
pub use square::Square;

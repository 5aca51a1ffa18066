//! Position-level test suites.
//!
//! - `perft.rs` - move generator node counts against reference values
//! - `apply.rs` - copy-on-apply move execution per move kind
//! - `movegen.rs` - staging, castling and en passant rules
//! - `fen.rs` - notation errors
//! - `draw.rs` - fifty-move and repetition draws inside the search
//! - `proptest.rs` - random-game invariants

mod apply;
mod fen;

use super::Position;

/// Parse a FEN that the test knows to be valid.
pub(super) fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("bad test FEN {fen}: {e}"))
}

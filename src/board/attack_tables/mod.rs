//! Attack tables for move generation.
//!
//! Leaper attacks come from precomputed tables. Slider attacks go through the
//! [`SliderAttacks`] trait, and the implementation is picked at compile time
//! by cargo feature: `pext`, then `kindergarten`, then `classic`, otherwise
//! Hyperbola Quintessence. Every strategy is always compiled so they can be
//! checked against each other.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for board coordinates
#![allow(clippy::inline_always)] // Performance-critical hot path functions

pub mod classic;
pub mod hyperbola;
pub mod kindergarten;
pub mod pext;
mod tables;

use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use super::types::{Bitboard, Color, Piece, Square};

/// A sliding-attack strategy over raw square indices and occupancy masks.
///
/// The returned set includes the first blocker in each direction, whatever
/// its color.
pub trait SliderAttacks {
    /// Short name used in logs and benchmarks.
    const NAME: &'static str;

    fn bishop(square: usize, occupancy: u64) -> u64;

    fn rook(square: usize, occupancy: u64) -> u64;

    #[inline(always)]
    fn queen(square: usize, occupancy: u64) -> u64 {
        Self::bishop(square, occupancy) | Self::rook(square, occupancy)
    }
}

#[cfg(feature = "pext")]
pub type ActiveSliders = pext::Pext;

#[cfg(all(feature = "kindergarten", not(feature = "pext")))]
pub type ActiveSliders = kindergarten::Kindergarten;

#[cfg(all(
    feature = "classic",
    not(any(feature = "pext", feature = "kindergarten"))
))]
pub type ActiveSliders = classic::Classic;

#[cfg(not(any(feature = "pext", feature = "kindergarten", feature = "classic")))]
pub type ActiveSliders = hyperbola::Hyperbola;

/// Name of the slider strategy this build uses.
#[must_use]
pub fn active_strategy() -> &'static str {
    ActiveSliders::NAME
}

#[inline(always)]
#[must_use]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(ActiveSliders::bishop(square.index(), occupancy.0))
}

#[inline(always)]
#[must_use]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(ActiveSliders::rook(square.index(), occupancy.0))
}

#[inline(always)]
#[must_use]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(ActiveSliders::queen(square.index(), occupancy.0))
}

#[inline(always)]
#[must_use]
pub fn knight_attacks(square: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[square.index()])
}

#[inline(always)]
#[must_use]
pub fn king_attacks(square: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[square.index()])
}

/// Squares a pawn of `color` on `square` attacks.
#[inline(always)]
#[must_use]
pub fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][square.index()])
}

/// Attack set of a non-pawn piece on `square` given the board occupancy.
/// Pawns need a color, so they yield an empty set here.
#[inline]
#[must_use]
pub fn piece_attacks(piece: Piece, square: Square, occupancy: Bitboard) -> Bitboard {
    match piece {
        Piece::Pawn => Bitboard::EMPTY,
        Piece::Knight => knight_attacks(square),
        Piece::Bishop => bishop_attacks(square, occupancy),
        Piece::Rook => rook_attacks(square, occupancy),
        Piece::Queen => queen_attacks(square, occupancy),
        Piece::King => king_attacks(square),
    }
}

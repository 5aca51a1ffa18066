//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;
use super::square::Square;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Get the raw bitmask value (for Zobrist hashing)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Rights that survive a move touching `from` and `to`.
    ///
    /// Moving a king or rook off its home square, or capturing on a rook's
    /// home square, clears the matching rights.
    #[inline]
    #[must_use]
    pub const fn after_move(self, from: Square, to: Square) -> Self {
        CastlingRights(self.0 & keep_mask(from) & keep_mask(to))
    }

    /// Get the bit for a specific castling right
    #[inline]
    pub(crate) const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

const fn keep_mask(sq: Square) -> u8 {
    match sq.index() {
        0 => !CASTLE_WHITE_Q,
        4 => !(CASTLE_WHITE_K | CASTLE_WHITE_Q),
        7 => !CASTLE_WHITE_K,
        56 => !CASTLE_BLACK_Q,
        60 => !(CASTLE_BLACK_K | CASTLE_BLACK_Q),
        63 => !CASTLE_BLACK_K,
        _ => ALL_CASTLING_RIGHTS,
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_move_clears_both_rights() {
        let rights = CastlingRights::all().after_move(Square::E1, Square::E1.offset(8));
        assert!(!rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn test_rook_capture_clears_opponent_right() {
        let rights = CastlingRights::all().after_move(Square::B1, Square::H8);
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
        assert_eq!(rights.to_string(), "KQq");
    }

    #[test]
    fn test_display() {
        assert_eq!(CastlingRights::none().to_string(), "-");
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        let mut rights = CastlingRights::none();
        rights.set(Color::Black, false);
        assert_eq!(rights.to_string(), "q");
    }
}

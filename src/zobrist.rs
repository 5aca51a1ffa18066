//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table and repetition detection.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // pieces[color][piece][square]
    pieces: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    // One key per castling-rights state, so a rights change is a single xor pair
    castling: [u64; 16],
    // Only the file of the en passant target matters
    en_passant: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Use a fixed seed for reproducibility
        let mut pieces = [[[0; 64]; 6]; 2];
        for color in &mut pieces {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let black_to_move = rng.gen();
        let mut castling = [0; 16];
        // No rights hashes to zero so positions without castling need no term
        for key in castling.iter_mut().skip(1) {
            *key = rng.gen();
        }
        let mut en_passant = [0; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(color: Color, piece: Piece, sq: Square) -> u64 {
    ZOBRIST.pieces[color.index()][piece.index()][sq.index()]
}

#[inline]
pub(crate) fn side_key() -> u64 {
    ZOBRIST.black_to_move
}

#[inline]
pub(crate) fn castling_key(rights: CastlingRights) -> u64 {
    ZOBRIST.castling[rights.as_u8() as usize]
}

#[inline]
pub(crate) fn en_passant_key(sq: Square) -> u64 {
    ZOBRIST.en_passant[sq.file()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in Square::all() {
                    assert!(seen.insert(piece_key(color, piece, sq)));
                }
            }
        }
        assert!(seen.insert(side_key()));
    }

    #[test]
    fn test_keys_are_reproducible() {
        let fresh = ZobristKeys::new();
        assert_eq!(fresh.black_to_move, side_key());
        assert_eq!(castling_key(CastlingRights::none()), 0);
        assert_ne!(castling_key(CastlingRights::all()), 0);
    }
}

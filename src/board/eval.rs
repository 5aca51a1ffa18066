//! Evaluation seam.
//!
//! The search scores positions through the [`Evaluator`] trait. An evaluator
//! supplies per-piece contributions, which [`Position`] keeps summed in an
//! [`Accumulator`] and updates on every applied move. The final score tapers
//! the middlegame and endgame sums by game phase and is relative to the side
//! to move.
//!
//! [`PieceSquareEvaluator`] is the built-in material plus piece-square
//! evaluator using PeSTO values.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::position::Position;
use super::types::{Color, Piece, Square};

/// Phase of a full board: N=1, B=1, R=2, Q=4 for both sides.
pub const MAX_PHASE: i32 = 24;

const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];
const MATERIAL_MG: [i32; 6] = [82, 337, 365, 477, 1025, 0];
const MATERIAL_EG: [i32; 6] = [94, 281, 297, 512, 936, 0];

/// Running evaluation terms, white-relative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Accumulator {
    pub mg: i32,
    pub eg: i32,
    pub phase: i32,
}

impl Accumulator {
    pub const ZERO: Accumulator = Accumulator {
        mg: 0,
        eg: 0,
        phase: 0,
    };

    #[must_use]
    pub const fn new(mg: i32, eg: i32, phase: i32) -> Self {
        Accumulator { mg, eg, phase }
    }

    /// Blend middlegame and endgame terms by phase. White-relative.
    #[inline]
    #[must_use]
    pub fn taper(self) -> i32 {
        let phase = self.phase.clamp(0, MAX_PHASE);
        (self.mg * phase + self.eg * (MAX_PHASE - phase)) / MAX_PHASE
    }
}

impl Add for Accumulator {
    type Output = Accumulator;
    #[inline]
    fn add(self, rhs: Accumulator) -> Accumulator {
        Accumulator::new(self.mg + rhs.mg, self.eg + rhs.eg, self.phase + rhs.phase)
    }
}

impl Sub for Accumulator {
    type Output = Accumulator;
    #[inline]
    fn sub(self, rhs: Accumulator) -> Accumulator {
        Accumulator::new(self.mg - rhs.mg, self.eg - rhs.eg, self.phase - rhs.phase)
    }
}

impl AddAssign for Accumulator {
    #[inline]
    fn add_assign(&mut self, rhs: Accumulator) {
        *self = *self + rhs;
    }
}

impl SubAssign for Accumulator {
    #[inline]
    fn sub_assign(&mut self, rhs: Accumulator) {
        *self = *self - rhs;
    }
}

impl Neg for Accumulator {
    type Output = Accumulator;
    #[inline]
    fn neg(self) -> Accumulator {
        Accumulator::new(-self.mg, -self.eg, -self.phase)
    }
}

/// Scores positions for the search.
///
/// Implementors only provide [`Evaluator::piece_square`]; the contribution
/// must depend on nothing but its arguments so it can be added and removed
/// incrementally as pieces move.
pub trait Evaluator: Send + Sync {
    /// Contribution of one piece on one square, white-relative.
    fn piece_square(&self, color: Color, piece: Piece, sq: Square) -> Accumulator;

    /// Sum of all piece contributions, computed from scratch.
    fn accumulate(&self, position: &Position) -> Accumulator {
        let mut acc = Accumulator::ZERO;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in position.pieces_of(color, piece) {
                    acc += self.piece_square(color, piece, sq);
                }
            }
        }
        acc
    }

    /// Score relative to the side to move, from the position's accumulator.
    #[inline]
    fn score(&self, position: &Position) -> i32 {
        position.accumulator().taper() * position.side_to_move().sign()
    }
}

/// Material plus piece-square tables, tapered between middlegame and endgame.
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceSquareEvaluator;

/// Combined material and table values, `[color][piece][square]`.
static TERMS: Lazy<[[[Accumulator; 64]; 6]; 2]> = Lazy::new(|| {
    let mut terms = [[[Accumulator::ZERO; 64]; 6]; 2];
    for color in Color::BOTH {
        for piece in Piece::ALL {
            let p = piece.index();
            for sq in 0..64 {
                // Tables are laid out a1 first from white's side
                let idx = match color {
                    Color::White => sq,
                    Color::Black => sq ^ 56,
                };
                let sign = color.sign();
                terms[color.index()][p][sq] = Accumulator::new(
                    sign * (MATERIAL_MG[p] + PST_MG[p][idx]),
                    sign * (MATERIAL_EG[p] + PST_EG[p][idx]),
                    PHASE_WEIGHTS[p],
                );
            }
        }
    }
    terms
});

impl Evaluator for PieceSquareEvaluator {
    #[inline]
    fn piece_square(&self, color: Color, piece: Piece, sq: Square) -> Accumulator {
        TERMS[color.index()][piece.index()][sq.index()]
    }
}

static PST_MG: [[i32; 64]; 6] = [
    [
        0, 0, 0, 0, 0, 0, 0, 0, -35, -1, -20, -23, -15, 24, 38, -22, -26, -4, -4, -10, 3,
        3, 33, -12, -27, -2, -5, 12, 17, 6, 10, -25, -14, 13, 6, 21, 23, 12, 17, -23, -6,
        7, 26, 31, 65, 56, 25, -20, 98, 134, 61, 95, 68, 126, 34, -11, 0, 0, 0, 0, 0, 0, 0,
        0,
    ],
    [
        -105, -21, -58, -33, -17, -28, -19, -23, -29, -53, -12, -3, -1, 18, -14, -19, -23,
        -9, 12, 10, 19, 17, 25, -16, -13, 4, 16, 13, 28, 19, 21, -8, -9, 17, 19, 53, 37,
        69, 18, 22, -47, 60, 37, 65, 84, 129, 73, 44, -73, -41, 72, 36, 23, 62, 7, -17,
        -167, -89, -34, -49, 61, -97, -15, -107,
    ],
    [
        -33, -3, -14, -21, -13, -12, -39, -21, 4, 15, 16, 0, 7, 21, 33, 1, 0, 15, 15, 15,
        14, 27, 18, 10, -6, 13, 13, 26, 34, 12, 10, 4, -4, 5, 19, 50, 37, 37, 7, -2, -16,
        37, 43, 40, 35, 50, 37, -2, -26, 16, -18, -13, 30, 59, 18, -47, -29, 4, -82, -37,
        -25, -42, 7, -8,
    ],
    [
        -19, -13, 1, 17, 16, 7, -37, -26, -44, -16, -20, -9, -1, 11, -6, -71, -45, -25,
        -16, -17, 3, 0, -5, -33, -36, -26, -12, -1, 9, -7, 6, -23, -24, -11, 7, 26, 24, 35,
        -8, -20, -5, 19, 26, 36, 17, 45, 61, 16, 27, 32, 58, 62, 80, 67, 26, 44, 32, 42,
        32, 51, 63, 9, 31, 43,
    ],
    [
        -1, -18, -9, 10, -15, -25, -31, -50, -35, -8, 11, 2, 8, 15, -3, 1, -14, 2, -11, -2,
        -5, 2, 14, 5, -9, -26, -9, -10, -2, -4, 3, -3, -27, -27, -16, -16, -1, 17, -2, 1,
        -13, -17, 7, 8, 29, 56, 47, 57, -24, -39, -5, 1, -16, 57, 28, 54, -28, 0, 29, 12,
        59, 44, 43, 45,
    ],
    [
        -15, 36, 12, -54, 8, -28, 34, 14, 1, 7, -8, -64, -43, -16, 9, 8, -14, -14, -22,
        -46, -44, -30, -15, -27, -49, -1, -27, -39, -46, -44, -33, -51, -17, -20, -12, -27,
        -30, -25, -14, -36, -9, 24, 2, -16, -20, 6, 22, -22, 29, -1, -20, -7, -8, -4, -38,
        -29, -65, 23, 16, -15, -56, -34, 2, 13,
    ],
];

static PST_EG: [[i32; 64]; 6] = [
    [
        0, 0, 0, 0, 0, 0, 0, 0, 13, 8, 8, 10, 13, 0, 2, -7, 4, 7, -6, 1, 0, -5, -1, -8, 13,
        9, -3, -7, -7, -8, 3, -1, 32, 24, 13, 5, -2, 4, 17, 17, 94, 100, 85, 67, 56, 53,
        82, 84, 178, 173, 158, 134, 147, 132, 165, 187, 0, 0, 0, 0, 0, 0, 0, 0,
    ],
    [
        -29, -51, -23, -15, -22, -18, -50, -64, -42, -20, -10, -5, -2, -20, -23, -44, -23,
        -3, -1, 15, 10, -3, -20, -22, -18, -6, 16, 25, 16, 17, 4, -18, -17, 3, 22, 22, 22,
        11, 8, -18, -24, -20, 10, 9, -1, -9, -19, -41, -25, -8, -25, -2, -9, -25, -24, -52,
        -58, -38, -13, -28, -31, -27, -63, -99,
    ],
    [
        -23, -9, -23, -5, -9, -16, -5, -17, -14, -18, -7, -1, 4, -9, -15, -27, -12, -3, 8,
        10, 13, 3, -7, -15, -6, 3, 13, 19, 7, 10, -3, -9, -3, 9, 12, 9, 14, 10, 3, 2, 2,
        -8, 0, -1, -2, 6, 0, 4, -8, -4, 7, -12, -3, -13, -4, -14, -14, -21, -11, -8, -7,
        -9, -17, -24,
    ],
    [
        -9, 2, 3, -1, -5, -13, 4, -20, -6, -6, 0, 2, -9, -9, -11, -3, -4, 0, -5, -1, -7,
        -12, -8, -16, 3, 5, 8, 4, -5, -6, -8, -11, 4, 3, 13, 1, 2, 1, -1, 2, 7, 7, 7, 5, 4,
        -3, -5, -3, 11, 13, 13, 11, -3, 3, 8, 3, 13, 10, 18, 15, 12, 12, 8, 5,
    ],
    [
        -33, -28, -22, -43, -5, -32, -20, -41, -22, -23, -30, -16, -16, -23, -36, -32, -16,
        -27, 15, 6, 9, 17, 10, 5, -18, 28, 19, 47, 31, 34, 39, 23, 3, 22, 24, 45, 57, 40,
        57, 36, -20, 6, 9, 49, 47, 35, 19, 9, -17, 20, 32, 41, 58, 25, 30, 0, -9, 22, 22,
        27, 27, 19, 10, 20,
    ],
    [
        -53, -34, -21, -11, -28, -14, -24, -43, -27, -11, 4, 13, 14, 4, -5, -17, -19, -3,
        11, 21, 23, 16, 7, -9, -18, -4, 21, 24, 27, 23, 9, -11, -8, 22, 24, 27, 26, 33, 26,
        3, 10, 17, 23, 15, 20, 45, 44, 13, -12, 17, 14, 17, 17, 38, 23, 11, -74, -35, -18,
        -18, -11, 15, 4, -17,
    ],
];

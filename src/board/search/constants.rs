//! Score constants and mate arithmetic.
//!
//! A checkmate found `ply` half-moves below the root scores
//! `-(MATE_SCORE - ply)` for the mated side, so shorter mates are preferred
//! and the distance can be decoded from the score alone.

use crate::board::types::MAX_PLY;

// ============================================================================
// SCORE BOUNDS
// ============================================================================

/// Score of being checkmated at the root.
pub const MATE_SCORE: i32 = 30000;

/// Scores with absolute value above this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Lowest score a search window may take.
pub const MIN_ALPHA: i32 = -MATE_SCORE;

/// Highest score a search window may take.
pub const MAX_BETA: i32 = MATE_SCORE;

// ============================================================================
// MATE HELPERS
// ============================================================================

/// Score for the side to move being checkmated `ply` half-moves from the root.
#[inline]
#[must_use]
pub const fn checkmate(ply: usize) -> i32 {
    ply as i32 - MATE_SCORE
}

/// Does `score` announce a forced mate (for either side)?
#[inline]
#[must_use]
pub const fn is_mate(score: i32) -> bool {
    score.abs() > MATE_THRESHOLD
}

/// Plies until mate, if `score` is a mate score.
#[must_use]
pub fn mate_distance(score: i32) -> Option<i32> {
    is_mate(score).then(|| MATE_SCORE - score.abs())
}

/// Mate distance in full moves, signed: positive when the side to move mates.
#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    mate_distance(score).map(|plies| score.signum() * ((plies + 1) / 2))
}

/// Shift a mate score between root-relative and node-relative form.
///
/// Pass `ply` to store a score in the table and `-ply` to read it back.
#[inline]
#[must_use]
pub fn adjust_mate_distance(score: i32, ply: i32) -> i32 {
    if is_mate(score) {
        score + score.signum() * ply
    } else {
        score
    }
}

//! Error types for position construction and notation parsing.

use thiserror::Error;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    #[error("FEN must have at least 4 fields, found {found}")]
    TooFewParts { found: usize },
    /// Invalid piece character in placement field
    #[error("invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// Placement field does not describe exactly 8 ranks
    #[error("FEN placement must have 8 ranks, found {found}")]
    InvalidRankCount { found: usize },
    /// A rank describes more or fewer than 8 files
    #[error("rank {rank} describes {files} files, expected 8")]
    BadFileCount { rank: usize, files: usize },
    /// Invalid side to move (must be 'w' or 'b')
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    /// Invalid castling character
    #[error("invalid castling character '{char}' in FEN")]
    InvalidCastling { char: char },
    /// A castling right whose king or rook is not on its home square
    #[error("castling right '{right}' needs king and rook on their home squares")]
    CastlingPiecesMissing { right: char },
    /// Invalid en passant square
    #[error("invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Halfmove clock or fullmove number is not a number
    #[error("invalid move counter '{found}'")]
    InvalidCounter { found: String },
    /// A side does not have exactly one king
    #[error("{color} must have exactly one king, found {found}")]
    KingCount { color: &'static str, found: u32 },
    /// A pawn stands on the first or last rank
    #[error("pawn on back rank square {square}")]
    PawnOnBackRank { square: String },
    /// The side that just moved is still in check
    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Error type for UCI move parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    #[error("move must be 4-5 characters, found {len}")]
    InvalidLength { len: usize },
    /// Invalid square notation in move
    #[error("invalid square notation in '{notation}'")]
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    #[error("invalid promotion piece '{char}'")]
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    #[error("illegal move '{notation}'")]
    IllegalMove { notation: String },
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    #[error("rank {rank} out of bounds (must be 0-7)")]
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    #[error("file {file} out of bounds (must be 0-7)")]
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}

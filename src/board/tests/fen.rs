//! FEN parsing failures.

use super::position;
use crate::board::{Color, FenError, Position};

fn err(fen: &str) -> FenError {
    match Position::from_fen(fen) {
        Ok(pos) => panic!("{fen} parsed as {pos:?}"),
        Err(e) => e,
    }
}

#[test]
fn test_too_few_fields() {
    assert_eq!(err("8/8/8/8/8/8/8/8 w"), FenError::TooFewParts { found: 2 });
    assert_eq!(err(""), FenError::TooFewParts { found: 0 });
}

#[test]
fn test_bad_placement() {
    assert_eq!(
        err("4k3/8/8/8/8/8/4K3 w - - 0 1"),
        FenError::InvalidRankCount { found: 7 }
    );
    assert_eq!(
        err("4k3/8/8/8/8/8/8/4K3x w - - 0 1"),
        FenError::InvalidPiece { char: 'x' }
    );
    assert!(matches!(
        err("4k3/8/8/8/8/8/8/4K4 w - - 0 1"),
        FenError::BadFileCount { rank: 1, .. }
    ));
    assert!(matches!(
        err("4k3/8/8/8/8/8/8/4K2 w - - 0 1"),
        FenError::BadFileCount { rank: 1, files: 7 }
    ));
}

#[test]
fn test_king_count() {
    assert_eq!(
        err("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        FenError::KingCount { color: "black", found: 0 }
    );
    assert_eq!(
        err("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
        FenError::KingCount { color: "white", found: 2 }
    );
}

#[test]
fn test_bad_fields() {
    assert!(matches!(
        err("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
        FenError::InvalidSideToMove { .. }
    ));
    assert_eq!(
        err("4k3/8/8/8/8/8/8/4K3 w KX - 0 1"),
        FenError::InvalidCastling { char: 'X' }
    );
    assert!(matches!(
        err("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
        FenError::InvalidEnPassant { .. }
    ));
    assert!(matches!(
        err("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
        FenError::InvalidCounter { .. }
    ));
}

#[test]
fn test_en_passant_needs_the_pushed_pawn() {
    // No black pawn on e5 to capture
    assert!(matches!(
        err("4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1"),
        FenError::InvalidEnPassant { .. }
    ));
    // The pawn could not have crossed an occupied e7
    assert!(matches!(
        err("4k3/4n3/8/3Pp3/8/8/8/4K3 w - e6 0 1"),
        FenError::InvalidEnPassant { .. }
    ));
    // Target square occupied
    assert!(matches!(
        err("4k3/8/4n3/3Pp3/8/8/8/4K3 w - e6 0 1"),
        FenError::InvalidEnPassant { .. }
    ));
    // A white pawn on e5 is not the one that just moved
    assert!(matches!(
        err("4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1"),
        FenError::InvalidEnPassant { .. }
    ));
    assert!(matches!(
        err("4k3/8/8/8/3p4/8/8/4K3 b - e3 0 1"),
        FenError::InvalidEnPassant { .. }
    ));

    let pos = position("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1");
    let child = pos.apply_uci("d5e6").unwrap();
    assert_eq!(child.to_fen(), "4k3/8/4P3/8/8/8/8/4K3 b - - 0 1");
}

#[test]
fn test_castling_needs_home_pieces() {
    assert_eq!(
        err("4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1"),
        FenError::CastlingPiecesMissing { right: 'K' }
    );
    // King off its home square
    assert_eq!(
        err("r3k2r/8/8/8/8/8/8/R2K3R w Q - 0 1"),
        FenError::CastlingPiecesMissing { right: 'Q' }
    );
    // Rook of the wrong colour on h8
    assert_eq!(
        err("r3k2R/8/8/8/8/8/8/4K3 b k - 0 1"),
        FenError::CastlingPiecesMissing { right: 'k' }
    );
    assert_eq!(
        err("1r2k2r/8/8/8/8/8/8/4K3 b kq - 0 1"),
        FenError::CastlingPiecesMissing { right: 'q' }
    );

    let with = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(with.castling_rights().has(Color::Black, false));
}

#[test]
fn test_impossible_positions() {
    assert!(matches!(
        err("4k3/8/8/8/8/8/8/P3K3 w - - 0 1"),
        FenError::PawnOnBackRank { .. }
    ));
    // White is in check with black to move
    assert_eq!(
        err("4k3/8/8/8/8/8/8/4K2r b - - 0 1"),
        FenError::OpponentInCheck
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        FenError::InvalidCastling { char: 'X' }.to_string(),
        "invalid castling character 'X' in FEN"
    );
    assert_eq!(
        FenError::KingCount { color: "white", found: 2 }.to_string(),
        "white must have exactly one king, found 2"
    );
    assert_eq!(
        FenError::CastlingPiecesMissing { right: 'q' }.to_string(),
        "castling right 'q' needs king and rook on their home squares"
    );
}

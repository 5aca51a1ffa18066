//! Copy-on-apply move execution, one test per move kind.

use super::position;
use crate::board::eval::{Evaluator, PieceSquareEvaluator};
use crate::board::{Color, MoveKind, Piece, Position, Square};

/// Incremental state must match a rebuild from notation.
fn assert_consistent(pos: &Position) {
    let rebuilt = position(&pos.to_fen());
    assert_eq!(*pos, rebuilt, "incremental state diverged for {}", pos.to_fen());
    assert_eq!(pos.hash(), pos.compute_hash());
    assert_eq!(pos.accumulator(), PieceSquareEvaluator.accumulate(pos));
}

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_en_passant_removes_the_passed_pawn() {
    let pos = position("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let mv = pos.parse_move("e5f6").unwrap();
    assert_eq!(mv.kind(), MoveKind::EnPassant);
    assert_eq!(mv.captured(), Some(Piece::Pawn));

    let child = pos.apply(mv).unwrap();
    assert_eq!(child.piece_at(sq("f6")), Some((Color::White, Piece::Pawn)));
    assert_eq!(child.piece_at(sq("f5")), None);
    assert_eq!(child.piece_at(sq("e5")), None);
    assert_eq!(child.piece_at(sq("d5")), Some((Color::Black, Piece::Pawn)));
    assert_eq!(child.halfmove_clock(), 0);
    assert_consistent(&child);
}

#[test]
fn test_en_passant_discovering_check_is_illegal() {
    // Capturing would empty the fifth rank between the rook and the king
    let pos = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    let mv = pos.parse_move("e5d6");
    assert!(mv.is_err());
    assert!(pos.legal_moves().iter().all(|m| m.kind() != MoveKind::EnPassant));
}

#[test]
fn test_promotion_with_capture() {
    let pos = position("1r2k3/P7/8/8/8/8/8/4K3 w - - 3 40");
    let child = pos.apply_uci("a7b8q").unwrap();
    assert_eq!(child.piece_at(sq("b8")), Some((Color::White, Piece::Queen)));
    assert_eq!(child.pieces_of(Color::White, Piece::Pawn).popcount(), 0);
    assert_eq!(child.color_bb(Color::Black).popcount(), 1);
    assert!(child.in_check());
    assert_consistent(&child);

    let under = pos.apply_uci("a7a8n").unwrap();
    assert_eq!(under.piece_at(sq("a8")), Some((Color::White, Piece::Knight)));
    assert_consistent(&under);
}

#[test]
fn test_capturing_a_rook_removes_its_castling_right() {
    let pos = position("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1");
    let child = pos.apply_uci("g2a8").unwrap();
    assert_eq!(child.castling_rights().to_string(), "KQk");
    assert_consistent(&child);
}

#[test]
fn test_king_move_drops_both_rights() {
    let pos = position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let child = pos.apply_uci("e8d8").unwrap();
    assert_eq!(child.castling_rights().to_string(), "KQ");
    assert_consistent(&child);
}

#[test]
fn test_black_castles_long() {
    let pos = position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let child = pos.apply_uci("e8c8").unwrap();
    assert_eq!(child.piece_at(sq("c8")), Some((Color::Black, Piece::King)));
    assert_eq!(child.piece_at(sq("d8")), Some((Color::Black, Piece::Rook)));
    assert_eq!(child.piece_at(sq("a8")), None);
    assert_eq!(child.fullmove_number(), 2);
    assert_consistent(&child);
}

#[test]
fn test_every_move_of_kiwipete_is_consistent() {
    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    for mv in pos.legal_moves() {
        let child = pos.apply(mv).unwrap();
        assert_consistent(&child);
        for reply in child.legal_moves() {
            assert_consistent(&child.apply(reply).unwrap());
        }
    }
}

#[test]
fn test_null_move_keeps_pieces() {
    let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let null = pos.null_move();
    assert_eq!(null.occupied(), pos.occupied());
    assert_eq!(null.side_to_move(), Color::Black);
    assert_eq!(null.accumulator(), pos.accumulator());
    assert_eq!(null.hash(), null.compute_hash());
}

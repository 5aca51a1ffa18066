//! Staged pseudo-legal move generation.
//!
//! Moves are appended to a caller-owned [`MoveList`] in the stages the
//! search consumes them: captures (plus queen promotions), then killer
//! candidates that are playable here, then the remaining quiets. Legality is
//! only decided by [`Position::apply_into`].

mod kings;
mod pawns;
mod pieces;

use super::attack_tables::{pawn_attacks, piece_attacks};
use super::eval::PieceSquareEvaluator;
use super::position::Position;
use super::types::{Color, Move, MoveKind, MoveList, Piece};

/// True for the moves [`Position::collect_quiets`] produces.
#[inline]
fn is_quiet_kind(mv: Move) -> bool {
    !mv.is_capture() && mv.kind() != MoveKind::PromoteQueen
}

impl Position {
    /// Append captures, en passant, and queen push-promotions.
    pub fn collect_captures(&self, list: &mut MoveList) {
        self.collect_pawn_tactical(list);
        self.collect_piece_moves(self.color_bb(!self.side_to_move), list);
    }

    /// Append quiet moves: pushes, under-promotions, piece moves and castling.
    pub fn collect_quiets(&self, list: &mut MoveList) {
        self.collect_pawn_quiets(list);
        self.collect_piece_moves(!self.occupied(), list);
        self.collect_castling(list);
    }

    /// Append every pseudo-legal move.
    pub fn collect_all(&self, list: &mut MoveList) {
        self.collect_captures(list);
        self.collect_quiets(list);
    }

    /// Append the quiet moves from `candidates` that are pseudo-legal here.
    pub fn collect_playable_quiets(&self, list: &mut MoveList, candidates: &[Move]) {
        for &mv in candidates {
            if is_quiet_kind(mv) && self.is_pseudo_legal(mv) && !list.contains(mv) {
                list.push(mv);
            }
        }
    }

    /// Could `mv` have been generated in this position?
    ///
    /// Used to vet moves that come from elsewhere (the transposition table,
    /// killer slots) before they are applied.
    #[must_use]
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        if mv.is_null() || mv.color() != us {
            return false;
        }
        let from = mv.from();
        let to = mv.to();
        if self.piece_at(from) != Some((us, mv.piece())) {
            return false;
        }

        match mv.kind() {
            MoveKind::CastleShort | MoveKind::CastleLong => {
                let mut castles = MoveList::new();
                self.collect_castling(&mut castles);
                return castles.contains(mv);
            }
            MoveKind::EnPassant => {
                return mv.piece() == Piece::Pawn
                    && mv.captured() == Some(Piece::Pawn)
                    && self.en_passant.contains(to)
                    && pawn_attacks(us, from).contains(to);
            }
            _ => {}
        }

        // The recorded capture must match what stands on the target.
        match (self.piece_at(to), mv.captured()) {
            (None, None) => {}
            (Some((color, piece)), Some(captured))
                if color != us && piece == captured && piece != Piece::King => {}
            _ => return false,
        }

        let occ = self.occupied();
        if mv.piece() == Piece::Pawn {
            if pawns::promotion_rank(us).contains(to) != mv.promotion().is_some() {
                return false;
            }
            if mv.is_capture() {
                return pawn_attacks(us, from).contains(to);
            }
            let one = from.offset(us.forward());
            if to == one {
                return true;
            }
            let start = match us {
                Color::White => 1,
                Color::Black => 6,
            };
            return from.rank() == start && !occ.contains(one) && to == one.offset(us.forward());
        }

        mv.promotion().is_none() && piece_attacks(mv.piece(), from, occ).contains(to)
    }

    /// All legal moves in generation order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut pseudo = MoveList::new();
        self.collect_all(&mut pseudo);
        let mut legal = MoveList::new();
        let mut child = *self;
        for &mv in &pseudo {
            if self.apply_into(mv, &PieceSquareEvaluator, &mut child) {
                legal.push(mv);
            }
        }
        legal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use std::str::FromStr;

    #[test]
    fn test_startpos_stages() {
        let pos = Position::startpos();
        let mut list = MoveList::new();
        pos.collect_captures(&mut list);
        assert!(list.is_empty());
        pos.collect_quiets(&mut list);
        assert_eq!(list.len(), 20);
    }

    #[test]
    fn test_promotion_split_between_stages() {
        let pos = Position::from_str("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut captures = MoveList::new();
        pos.collect_captures(&mut captures);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures.as_slice()[0].promotion(), Some(Piece::Queen));

        let mut quiets = MoveList::new();
        pos.collect_quiets(&mut quiets);
        let promos = quiets.iter().filter(|m| m.promotion().is_some()).count();
        assert_eq!(promos, 3);
    }

    #[test]
    fn test_capture_promotions_are_tactical() {
        let pos = Position::from_str("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut captures = MoveList::new();
        pos.collect_captures(&mut captures);
        // four capture-promotions on b8 plus the queen push on a8
        assert_eq!(captures.len(), 5);
        assert!(captures
            .iter()
            .filter(|m| m.to() == Square::B8)
            .all(|m| m.captured() == Some(Piece::Rook)));
    }

    #[test]
    fn test_pseudo_legal_rejects_foreign_moves() {
        let pos = Position::startpos();
        let e2e4 = pos.parse_move("e2e4").unwrap();
        assert!(pos.is_pseudo_legal(e2e4));
        let after = pos.apply(e2e4).unwrap();
        // Same move, wrong side to move
        assert!(!after.is_pseudo_legal(e2e4));
        // Blocked slider
        let rook = Move::normal(Square::A1, Square::from_index(16), Color::White, Piece::Rook, None);
        assert!(!pos.is_pseudo_legal(rook));
        // Claimed capture on an empty square
        let fake = Move::normal(
            Square::from_index(12),
            Square::from_index(21),
            Color::White,
            Piece::Pawn,
            Some(Piece::Knight),
        );
        assert!(!pos.is_pseudo_legal(fake));
        assert!(!pos.is_pseudo_legal(Move::NULL));
    }

    #[test]
    fn test_every_generated_move_is_pseudo_legal() {
        let pos = Position::from_str(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let mut list = MoveList::new();
        pos.collect_all(&mut list);
        assert_eq!(pos.legal_moves().len(), 48);
        for &mv in &list {
            assert!(pos.is_pseudo_legal(mv), "{mv} should be pseudo-legal");
        }
    }

    #[test]
    fn test_playable_quiets_filter() {
        let pos = Position::startpos();
        let g1f3 = pos.parse_move("g1f3").unwrap();
        let bogus = Move::normal(Square::G1, Square::from_index(12), Color::White, Piece::Knight, None);
        let mut list = MoveList::new();
        pos.collect_playable_quiets(&mut list, &[g1f3, bogus, Move::NULL, g1f3]);
        assert_eq!(list.as_slice(), &[g1f3]);
    }

    #[test]
    fn test_castling_through_check_is_not_generated() {
        // Black rook on f8 covers f1
        let pos = Position::from_str("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let legal = pos.legal_moves();
        assert!(legal.iter().all(|m| m.kind() != MoveKind::CastleShort));
        assert!(legal.iter().any(|m| m.kind() == MoveKind::CastleLong));
    }
}

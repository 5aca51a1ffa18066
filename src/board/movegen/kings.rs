use super::super::position::Position;
use super::super::types::{Color, Move, MoveKind, MoveList, Piece, Square};

impl Position {
    /// Castling moves. The king may not start, pass through or land on an
    /// attacked square, and every square between king and rook must be empty.
    pub(super) fn collect_castling(&self, list: &mut MoveList) {
        let us = self.side_to_move;
        let them = !us;
        let base = match us {
            Color::White => 0,
            Color::Black => 56,
        };
        let sq = |offset: usize| Square::from_index(base + offset);
        let king_from = sq(4);
        if !self.pieces_of(us, Piece::King).contains(king_from) {
            return;
        }
        let occ = self.occupied();
        let rooks = self.pieces_of(us, Piece::Rook);

        if self.castling.has(us, true)
            && rooks.contains(sq(7))
            && !occ.contains(sq(5))
            && !occ.contains(sq(6))
            && !self.is_attacked_by(king_from, them)
            && !self.is_attacked_by(sq(5), them)
            && !self.is_attacked_by(sq(6), them)
        {
            list.push(Move::new(
                king_from,
                sq(6),
                MoveKind::CastleShort,
                us,
                Piece::King,
                None,
            ));
        }

        if self.castling.has(us, false)
            && rooks.contains(sq(0))
            && !occ.contains(sq(1))
            && !occ.contains(sq(2))
            && !occ.contains(sq(3))
            && !self.is_attacked_by(king_from, them)
            && !self.is_attacked_by(sq(3), them)
            && !self.is_attacked_by(sq(2), them)
        {
            list.push(Move::new(
                king_from,
                sq(2),
                MoveKind::CastleLong,
                us,
                Piece::King,
                None,
            ));
        }
    }
}

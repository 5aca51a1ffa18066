use super::super::attack_tables::piece_attacks;
use super::super::position::Position;
use super::super::types::{Bitboard, Move, MoveList, Piece};

const OFFICERS: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

impl Position {
    /// Knight, slider and king moves landing on `targets`.
    pub(super) fn collect_piece_moves(&self, targets: Bitboard, list: &mut MoveList) {
        let us = self.side_to_move;
        let occ = self.occupied();
        for piece in OFFICERS.into_iter().chain(std::iter::once(Piece::King)) {
            for from in self.pieces_of(us, piece) {
                for to in piece_attacks(piece, from, occ) & targets {
                    list.push(Move::normal(from, to, us, piece, self.piece_type_at(to)));
                }
            }
        }
    }
}

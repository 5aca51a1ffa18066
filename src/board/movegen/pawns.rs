use super::super::attack_tables::pawn_attacks;
use super::super::position::Position;
use super::super::types::{Bitboard, Color, Move, MoveKind, MoveList, Piece};

const CAPTURE_PROMOTIONS: [MoveKind; 4] = [
    MoveKind::PromoteQueen,
    MoveKind::PromoteRook,
    MoveKind::PromoteBishop,
    MoveKind::PromoteKnight,
];

const UNDER_PROMOTIONS: [MoveKind; 3] = [
    MoveKind::PromoteKnight,
    MoveKind::PromoteRook,
    MoveKind::PromoteBishop,
];

#[inline]
pub(super) fn promotion_rank(color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    }
}

#[inline]
fn start_rank(color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard::RANK_2,
        Color::Black => Bitboard::RANK_7,
    }
}

impl Position {
    /// Pawn captures (with all four promotions), en passant, and pushes that
    /// promote to a queen.
    pub(super) fn collect_pawn_tactical(&self, list: &mut MoveList) {
        let us = self.side_to_move;
        let enemies = self.color_bb(!us);
        let occ = self.occupied();
        let last_rank = promotion_rank(us);

        for from in self.pieces_of(us, Piece::Pawn) {
            let attacks = pawn_attacks(us, from);
            for to in attacks & enemies {
                let captured = self.piece_type_at(to);
                if last_rank.contains(to) {
                    for kind in CAPTURE_PROMOTIONS {
                        list.push(Move::new(from, to, kind, us, Piece::Pawn, captured));
                    }
                } else {
                    list.push(Move::normal(from, to, us, Piece::Pawn, captured));
                }
            }

            if !(attacks & self.en_passant).is_empty() {
                let to = self.en_passant.lsb();
                list.push(Move::new(
                    from,
                    to,
                    MoveKind::EnPassant,
                    us,
                    Piece::Pawn,
                    Some(Piece::Pawn),
                ));
            }

            let push = from.offset(us.forward());
            if last_rank.contains(push) && !occ.contains(push) {
                list.push(Move::new(
                    from,
                    push,
                    MoveKind::PromoteQueen,
                    us,
                    Piece::Pawn,
                    None,
                ));
            }
        }
    }

    /// Quiet pawn pushes, including under-promotions.
    pub(super) fn collect_pawn_quiets(&self, list: &mut MoveList) {
        let us = self.side_to_move;
        let occ = self.occupied();
        let last_rank = promotion_rank(us);
        let double_rank = start_rank(us);

        for from in self.pieces_of(us, Piece::Pawn) {
            let one = from.offset(us.forward());
            if occ.contains(one) {
                continue;
            }
            if last_rank.contains(one) {
                for kind in UNDER_PROMOTIONS {
                    list.push(Move::new(from, one, kind, us, Piece::Pawn, None));
                }
                continue;
            }
            list.push(Move::normal(from, one, us, Piece::Pawn, None));
            if double_rank.contains(from) {
                let two = one.offset(us.forward());
                if !occ.contains(two) {
                    list.push(Move::normal(from, two, us, Piece::Pawn, None));
                }
            }
        }
    }
}

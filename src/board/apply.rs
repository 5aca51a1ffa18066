//! Copy-on-apply move execution.
//!
//! Applying a move never touches the parent. The child is written into a
//! caller-provided slot, updating piece sets, castling rights, en passant,
//! Zobrist hash and evaluation accumulator in one pass.

use super::attack_tables::pawn_attacks;
use super::eval::{Evaluator, PieceSquareEvaluator};
use super::position::Position;
use super::types::{Bitboard, Color, Move, MoveKind, Piece, Square};
use crate::zobrist::{castling_key, en_passant_key, piece_key, side_key};

impl Position {
    /// Apply a pseudo-legal move using the built-in evaluator.
    ///
    /// Returns `None` if the move leaves the mover's king attacked.
    #[must_use]
    pub fn apply(&self, mv: Move) -> Option<Position> {
        self.apply_with(mv, &PieceSquareEvaluator)
    }

    /// Apply a pseudo-legal move, updating the accumulator with `eval`.
    #[must_use]
    pub fn apply_with<E: Evaluator + ?Sized>(&self, mv: Move, eval: &E) -> Option<Position> {
        let mut child = *self;
        if self.apply_into(mv, eval, &mut child) {
            Some(child)
        } else {
            None
        }
    }

    /// Write the result of `mv` into `child`. Returns false if the move is
    /// illegal; `child` then holds garbage and must not be used.
    #[inline]
    pub fn apply_into<E: Evaluator + ?Sized>(
        &self,
        mv: Move,
        eval: &E,
        child: &mut Position,
    ) -> bool {
        *child = *self;
        child.play(mv, eval);
        let us = self.side_to_move;
        !child.is_attacked_by(child.king_square(us), !us)
    }

    /// Pass the turn. Only valid when the side to move is not in check.
    #[must_use]
    pub fn null_move(&self) -> Position {
        let mut child = *self;
        child.clear_en_passant();
        child.halfmove_clock = child.halfmove_clock.saturating_add(1);
        child.side_to_move = !child.side_to_move;
        child.hash ^= side_key();
        child
    }

    #[inline]
    fn add<E: Evaluator + ?Sized>(&mut self, color: Color, piece: Piece, sq: Square, eval: &E) {
        self.toggle(color, piece, sq);
        self.hash ^= piece_key(color, piece, sq);
        self.accumulator += eval.piece_square(color, piece, sq);
    }

    #[inline]
    fn remove<E: Evaluator + ?Sized>(&mut self, color: Color, piece: Piece, sq: Square, eval: &E) {
        self.toggle(color, piece, sq);
        self.hash ^= piece_key(color, piece, sq);
        self.accumulator -= eval.piece_square(color, piece, sq);
    }

    #[inline]
    fn relocate<E: Evaluator + ?Sized>(
        &mut self,
        color: Color,
        piece: Piece,
        from: Square,
        to: Square,
        eval: &E,
    ) {
        self.remove(color, piece, from, eval);
        self.add(color, piece, to, eval);
    }

    #[inline]
    fn clear_en_passant(&mut self) {
        if let Some(ep) = self.en_passant_square() {
            self.hash ^= en_passant_key(ep);
            self.en_passant = Bitboard::EMPTY;
        }
    }

    fn play<E: Evaluator + ?Sized>(&mut self, mv: Move, eval: &E) {
        let us = self.side_to_move;
        let them = !us;
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        self.clear_en_passant();

        match mv.kind() {
            MoveKind::EnPassant => {
                self.remove(them, Piece::Pawn, to.offset(-us.forward()), eval);
                self.relocate(us, Piece::Pawn, from, to, eval);
            }
            MoveKind::CastleShort => {
                self.relocate(us, Piece::King, from, to, eval);
                self.relocate(us, Piece::Rook, to.offset(1), to.offset(-1), eval);
            }
            MoveKind::CastleLong => {
                self.relocate(us, Piece::King, from, to, eval);
                self.relocate(us, Piece::Rook, to.offset(-2), to.offset(1), eval);
            }
            _ => {
                if let Some(captured) = mv.captured() {
                    self.remove(them, captured, to, eval);
                }
                match mv.promotion() {
                    Some(promoted) => {
                        self.remove(us, Piece::Pawn, from, eval);
                        self.add(us, promoted, to, eval);
                    }
                    None => self.relocate(us, piece, from, to, eval),
                }
            }
        }

        let rights = self.castling.after_move(from, to);
        if rights != self.castling {
            self.hash ^= castling_key(self.castling) ^ castling_key(rights);
            self.castling = rights;
        }

        if piece == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        // Only record a double push target when an enemy pawn could take it
        if piece == Piece::Pawn && (from.index() ^ to.index()) == 16 {
            let target = Square::from_index((from.index() + to.index()) / 2);
            if !(pawn_attacks(us, target) & self.pieces_of(them, Piece::Pawn)).is_empty() {
                self.en_passant = Bitboard::from_square(target);
                self.hash ^= en_passant_key(target);
            }
        }

        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = them;
        self.hash ^= side_key();
    }
}

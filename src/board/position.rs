//! Position snapshot.
//!
//! A [`Position`] is a small `Copy` value. Moves are applied by copying the
//! parent into a child slot and mutating the child (see `apply.rs`), so a
//! search keeps one position per ply and never undoes a move.

use std::fmt;

use super::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use super::eval::{Accumulator, Evaluator, PieceSquareEvaluator};
use super::types::{Bitboard, CastlingRights, Color, Piece, Square};
use crate::zobrist::{castling_key, en_passant_key, piece_key, side_key};

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub(crate) colors: [Bitboard; 2],
    pub(crate) pieces: [Bitboard; 6],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    /// At most one bit, set only when a pawn of the side to move can capture there
    pub(crate) en_passant: Bitboard,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) hash: u64,
    pub(crate) accumulator: Accumulator,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    pub(crate) fn empty() -> Self {
        Position {
            colors: [Bitboard::EMPTY; 2],
            pieces: [Bitboard::EMPTY; 6],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: Bitboard::EMPTY,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            accumulator: Accumulator::ZERO,
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn startpos() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.into_iter().enumerate() {
            pos.toggle(Color::White, piece, Square::from_index(file));
            pos.toggle(Color::White, Piece::Pawn, Square::from_index(8 + file));
            pos.toggle(Color::Black, Piece::Pawn, Square::from_index(48 + file));
            pos.toggle(Color::Black, piece, Square::from_index(56 + file));
        }
        pos.castling = CastlingRights::all();
        pos.refresh(&PieceSquareEvaluator);
        pos
    }

    /// Flip one piece bit without touching hash or accumulator.
    #[inline]
    pub(crate) fn toggle(&mut self, color: Color, piece: Piece, sq: Square) {
        let bb = Bitboard::from_square(sq);
        self.colors[color.index()] ^= bb;
        self.pieces[piece.index()] ^= bb;
    }

    /// Recompute hash and accumulator from the piece sets.
    pub(crate) fn refresh<E: Evaluator + ?Sized>(&mut self, eval: &E) {
        self.hash = self.compute_hash();
        self.accumulator = eval.accumulate(self);
    }

    /// Rebuild the accumulator for a different evaluator.
    pub fn refresh_accumulator<E: Evaluator + ?Sized>(&mut self, eval: &E) {
        self.accumulator = eval.accumulate(self);
    }

    /// Zobrist hash from scratch. Matches the incrementally maintained [`Position::hash`].
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces_of(color, piece) {
                    hash ^= piece_key(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= side_key();
        }
        hash ^= castling_key(self.castling);
        if let Some(ep) = self.en_passant_square() {
            hash ^= en_passant_key(ep);
        }
        hash
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        if self.en_passant.is_empty() {
            None
        } else {
            Some(self.en_passant.lsb())
        }
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    #[must_use]
    pub fn accumulator(&self) -> Accumulator {
        self.accumulator
    }

    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline]
    #[must_use]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    #[must_use]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    #[inline]
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.colors[color.index()] & self.pieces[piece.index()]
    }

    /// Piece type on `sq`, ignoring color.
    #[inline]
    #[must_use]
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        if !self.occupied().contains(sq) {
            return None;
        }
        Piece::ALL
            .into_iter()
            .find(|p| self.pieces[p.index()].contains(sq))
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let piece = self.piece_type_at(sq)?;
        let color = if self.colors[0].contains(sq) {
            Color::White
        } else {
            Color::Black
        };
        Some((color, piece))
    }

    /// Square of `color`'s king. Every live position has exactly one.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.pieces_of(color, Piece::King).lsb()
    }

    /// Pieces of both colors attacking `sq` given `occupancy`.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let diagonal = self.piece_bb(Piece::Bishop) | self.piece_bb(Piece::Queen);
        let straight = self.piece_bb(Piece::Rook) | self.piece_bb(Piece::Queen);
        (pawn_attacks(Color::Black, sq) & self.pieces_of(Color::White, Piece::Pawn))
            | (pawn_attacks(Color::White, sq) & self.pieces_of(Color::Black, Piece::Pawn))
            | (knight_attacks(sq) & self.piece_bb(Piece::Knight))
            | (king_attacks(sq) & self.piece_bb(Piece::King))
            | (bishop_attacks(sq, occupancy) & diagonal)
            | (rook_attacks(sq, occupancy) & straight)
    }

    /// True if any piece of `by` attacks `sq`.
    #[must_use]
    pub fn is_attacked_by(&self, sq: Square, by: Color) -> bool {
        let them = self.colors[by.index()];
        let occ = self.occupied();
        if !(pawn_attacks(!by, sq) & self.pieces[Piece::Pawn.index()] & them).is_empty() {
            return true;
        }
        if !(knight_attacks(sq) & self.pieces[Piece::Knight.index()] & them).is_empty() {
            return true;
        }
        if !(king_attacks(sq) & self.pieces[Piece::King.index()] & them).is_empty() {
            return true;
        }
        let queens = self.pieces[Piece::Queen.index()];
        let diagonal = (self.pieces[Piece::Bishop.index()] | queens) & them;
        if !(bishop_attacks(sq, occ) & diagonal).is_empty() {
            return true;
        }
        let straight = (self.pieces[Piece::Rook.index()] | queens) & them;
        !(rook_attacks(sq, occ) & straight).is_empty()
    }

    /// Is the side to move in check?
    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_attacked_by(self.king_square(us), !us)
    }

    /// The side to move has nothing but king and pawns.
    #[inline]
    #[must_use]
    pub fn is_endgame(&self) -> bool {
        let own = self.colors[self.side_to_move.index()];
        own == own & (self.piece_bb(Piece::King) | self.piece_bb(Piece::Pawn))
    }
}

impl fmt::Display for Position {
    /// Board diagram, rank 8 first, followed by the FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                let c = match self.piece_at(sq) {
                    Some((color, piece)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}

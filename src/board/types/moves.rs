//! Move types and move list.

use std::fmt;
use std::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece};
use super::square::Square;

/// How a move mutates the position beyond relocating the moving piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Normal = 0,
    EnPassant = 1,
    CastleShort = 2,
    CastleLong = 3,
    PromoteKnight = 4,
    PromoteBishop = 5,
    PromoteRook = 6,
    PromoteQueen = 7,
}

impl MoveKind {
    const ALL: [MoveKind; 8] = [
        MoveKind::Normal,
        MoveKind::EnPassant,
        MoveKind::CastleShort,
        MoveKind::CastleLong,
        MoveKind::PromoteKnight,
        MoveKind::PromoteBishop,
        MoveKind::PromoteRook,
        MoveKind::PromoteQueen,
    ];

    /// Promotion kind for the given piece. Only N, B, R and Q are valid targets.
    #[inline]
    #[must_use]
    pub const fn promotion(piece: Piece) -> Option<MoveKind> {
        match piece {
            Piece::Knight => Some(MoveKind::PromoteKnight),
            Piece::Bishop => Some(MoveKind::PromoteBishop),
            Piece::Rook => Some(MoveKind::PromoteRook),
            Piece::Queen => Some(MoveKind::PromoteQueen),
            Piece::Pawn | Piece::King => None,
        }
    }
}

// Field layout inside the packed u32.
const TO_SHIFT: u32 = 6;
const KIND_SHIFT: u32 = 12;
const PIECE_SHIFT: u32 = 15;
const COLOR_SHIFT: u32 = 18;
const CAPTURE_SHIFT: u32 = 19;

/// Number of meaningful bits in [`Move::bits`].
pub const MOVE_BITS: u32 = 22;

/// Compact move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: [`MoveKind`]
/// - bits 15-17: moving piece
/// - bit 18:     moving color (1 = black)
/// - bits 19-21: captured piece + 1 (0 = no capture)
///
/// Equality is bitwise, so two moves are equal only if every field matches.
/// The all-zero value is the null move (a1a1), which never occurs in play.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    pub const NULL: Move = Move(0);

    /// Create a move from all of its fields.
    #[inline]
    #[must_use]
    pub const fn new(
        from: Square,
        to: Square,
        kind: MoveKind,
        color: Color,
        piece: Piece,
        captured: Option<Piece>,
    ) -> Self {
        let captured_bits = match captured {
            Some(p) => p as u32 + 1,
            None => 0,
        };
        Move(
            from.index() as u32
                | (to.index() as u32) << TO_SHIFT
                | (kind as u32) << KIND_SHIFT
                | (piece as u32) << PIECE_SHIFT
                | (color as u32) << COLOR_SHIFT
                | captured_bits << CAPTURE_SHIFT,
        )
    }

    /// Create a normal (non-special) move
    #[inline]
    #[must_use]
    pub const fn normal(
        from: Square,
        to: Square,
        color: Color,
        piece: Piece,
        captured: Option<Piece>,
    ) -> Self {
        Move::new(from, to, MoveKind::Normal, color, piece, captured)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & 0x3F) as usize)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & 0x3F) as usize)
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        MoveKind::ALL[((self.0 >> KIND_SHIFT) & 0x7) as usize]
    }

    /// The piece that moves (a pawn for promotions)
    #[inline]
    #[must_use]
    pub const fn piece(self) -> Piece {
        match Piece::from_index(((self.0 >> PIECE_SHIFT) & 0x7) as usize) {
            Some(p) => p,
            None => Piece::Pawn,
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        if (self.0 >> COLOR_SHIFT) & 1 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// The captured piece, if any. En passant captures report a pawn.
    #[inline]
    #[must_use]
    pub const fn captured(self) -> Option<Piece> {
        let bits = ((self.0 >> CAPTURE_SHIFT) & 0x7) as usize;
        if bits == 0 {
            None
        } else {
            Piece::from_index(bits - 1)
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURE_SHIFT) & 0x7 != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.kind(), MoveKind::EnPassant)
    }

    /// Returns true if this move is castling (either side)
    #[inline]
    #[must_use]
    pub const fn is_castling(self) -> bool {
        matches!(self.kind(), MoveKind::CastleShort | MoveKind::CastleLong)
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<Piece> {
        match self.kind() {
            MoveKind::PromoteKnight => Some(Piece::Knight),
            MoveKind::PromoteBishop => Some(Piece::Bishop),
            MoveKind::PromoteRook => Some(Piece::Rook),
            MoveKind::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Returns true if this move is tactical (capture or promotion)
    #[inline]
    #[must_use]
    pub const fn is_tactical(self) -> bool {
        self.is_capture() || self.promotion().is_some()
    }

    /// Most-valuable-victim / least-valuable-attacker ordering key.
    ///
    /// `6 * victim - attacker` with pieces ranked Pawn=1 .. King=6. A promotion
    /// counts the promoted piece as an extra victim.
    #[inline]
    #[must_use]
    pub const fn mvv_lva_score(self) -> i32 {
        let victim = match self.captured() {
            Some(p) => p.order(),
            None => 0,
        };
        let promoted = match self.promotion() {
            Some(p) => p.order(),
            None => 0,
        };
        6 * (victim + promoted) - self.piece().order()
    }

    /// Raw packed value (for hashing/storage). Fits in [`MOVE_BITS`] bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Rebuild from [`Move::bits`]. Bits above [`MOVE_BITS`] are discarded.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Move(bits & ((1 << MOVE_BITS) - 1))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "Move(null)");
        }
        write!(
            f,
            "Move({} {}{}{}",
            self.piece().to_fen_char(self.color()),
            self.from(),
            self.to(),
            self.promotion().map_or(String::new(), |p| p.to_string())
        )?;
        if let Some(captured) = self.captured() {
            write!(f, " x{}", captured.to_char())?;
        }
        match self.kind() {
            MoveKind::EnPassant => write!(f, " ep")?,
            MoveKind::CastleShort => write!(f, " O-O")?,
            MoveKind::CastleLong => write!(f, " O-O-O")?,
            _ => {}
        }
        write!(f, ")")
    }
}

/// UCI long algebraic notation, e.g. `e2e4`, `e7e8q`; the null move prints as `0000`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Upper bound on pseudo-legal moves in any reachable position (218) rounded up.
pub const MAX_MOVES: usize = 256;
/// Maximum search ply; frames, killers and the PV buffer are sized by it.
pub const MAX_PLY: usize = 128;

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "move list overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Drop every move at or after `len`.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Remove the move at `idx`, replacing it with the last one.
    #[inline]
    pub fn swap_remove(&mut self, idx: usize) -> Move {
        debug_assert!(idx < self.len);
        let mv = self.moves[idx];
        self.len -= 1;
        self.moves[idx] = self.moves[self.len];
        mv
    }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.list.get(self.idx)?;
        self.idx += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.as_slice()[idx]
    }
}

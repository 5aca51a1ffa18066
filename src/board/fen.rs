use std::str::FromStr;

use super::attack_tables::pawn_attacks;
use super::error::{FenError, MoveParseError};
use super::eval::PieceSquareEvaluator;
use super::position::Position;
use super::types::{Bitboard, CastlingRights, Color, Move, Piece, Square};

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The halfmove clock and fullmove number are optional and default to 0
    /// and 1. Castling rights need the king and rook on their home squares,
    /// and an en passant square needs the pawn that just double-pushed. The
    /// square is kept only if a pawn of the side to move can actually capture
    /// there, so equal positions hash equally.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut pos = Position::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRankCount { found: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenError::InvalidPiece { char: c });
                    }
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(file, rank).ok_or(FenError::BadFileCount {
                    rank: rank + 1,
                    files: file + 1,
                })?;
                if piece == Piece::Pawn && (rank == 0 || rank == 7) {
                    return Err(FenError::PawnOnBackRank {
                        square: sq.to_string(),
                    });
                }
                pos.toggle(color, piece, sq);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadFileCount {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            let found = pos.pieces_of(color, Piece::King).popcount();
            if found != 1 {
                return Err(FenError::KingCount { color: name, found });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => castling.set(Color::White, true),
                    'Q' => castling.set(Color::White, false),
                    'k' => castling.set(Color::Black, true),
                    'q' => castling.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }
        for (color, kingside, right, king, rook) in [
            (Color::White, true, 'K', Square::E1, Square::H1),
            (Color::White, false, 'Q', Square::E1, Square::A1),
            (Color::Black, true, 'k', Square::E8, Square::H8),
            (Color::Black, false, 'q', Square::E8, Square::A8),
        ] {
            if castling.has(color, kingside)
                && (pos.piece_at(king) != Some((color, Piece::King))
                    || pos.piece_at(rook) != Some((color, Piece::Rook)))
            {
                return Err(FenError::CastlingPiecesMissing { right });
            }
        }
        pos.castling = castling;

        if parts[3] != "-" {
            let invalid = || FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            };
            let sq: Square = parts[3].parse().map_err(|_| invalid())?;
            let expected_rank = match pos.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq.rank() != expected_rank {
                return Err(invalid());
            }
            // The enemy pawn sits past the target, both squares it crossed are empty
            let us = pos.side_to_move;
            let pushed = sq.offset(-us.forward());
            let origin = sq.offset(us.forward());
            if !pos.pieces_of(!us, Piece::Pawn).contains(pushed)
                || pos.occupied().contains(sq)
                || pos.occupied().contains(origin)
            {
                return Err(invalid());
            }
            if !(pawn_attacks(!us, sq) & pos.pieces_of(us, Piece::Pawn)).is_empty() {
                pos.en_passant = Bitboard::from_square(sq);
            }
        }

        if let Some(field) = parts.get(4) {
            pos.halfmove_clock = field.parse().map_err(|_| FenError::InvalidCounter {
                found: field.to_string(),
            })?;
        }
        if let Some(field) = parts.get(5) {
            pos.fullmove_number = field.parse().map_err(|_| FenError::InvalidCounter {
                found: field.to_string(),
            })?;
        }

        let them = !pos.side_to_move;
        if pos.is_attacked_by(pos.king_square(them), pos.side_to_move) {
            return Err(FenError::OpponentInCheck);
        }

        pos.refresh(&PieceSquareEvaluator);
        Ok(pos)
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let ep = self
            .en_passant_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            self.side_to_move,
            self.castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found, or an error describing why parsing failed.
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Position;
    ///
    /// let pos = Position::startpos();
    /// let mv = pos.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        if !uci.is_ascii() || uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: uci.to_string(),
        };
        let from: Square = uci[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = uci[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match uci[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        self.legal_moves()
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse a UCI move and apply it in one call.
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Position;
    ///
    /// let pos = Position::startpos()
    ///     .apply_uci("e2e4")
    ///     .and_then(|p| p.apply_uci("e7e5"))
    ///     .unwrap();
    /// assert_eq!(pos.fullmove_number(), 2);
    /// ```
    pub fn apply_uci(&self, uci: &str) -> Result<Position, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.apply(mv).ok_or_else(|| MoveParseError::IllegalMove {
            notation: uci.to_string(),
        })
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_matches_fen() {
        let parsed = Position::from_fen(START_FEN).unwrap();
        assert_eq!(parsed, Position::startpos());
        assert_eq!(parsed.to_fen(), START_FEN);
    }

    #[test]
    fn test_fen_roundtrip() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "4k3/8/8/8/8/8/8/4K3 b - - 42 99",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn test_uncapturable_en_passant_is_dropped() {
        let pos = Position::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2",
        );
        // e6 would need a white pawn on d5 or f5
        let pos = pos.unwrap();
        assert_eq!(pos.en_passant_square(), None);
        assert!(pos.to_fen().contains(" - 0 2"));
    }

    #[test]
    fn test_optional_counters() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn test_parse_move_errors() {
        let pos = Position::startpos();
        assert_eq!(
            pos.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert!(matches!(
            pos.parse_move("z2e4"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert_eq!(
            pos.parse_move("e2e4k"),
            Err(MoveParseError::InvalidPromotion { char: 'k' })
        );
        assert!(matches!(
            pos.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_parse_promotion() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = pos.parse_move("a7a8n").unwrap();
        assert_eq!(mv.promotion(), Some(Piece::Knight));
        assert_eq!(mv.to_string(), "a7a8n");
        assert!(pos.parse_move("a7a8").is_err());
    }
}

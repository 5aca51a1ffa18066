//! Static Exchange Evaluation (SEE).
//!
//! Evaluates the capture sequence on a move's target square, cheapest
//! attacker first, to decide whether a move wins, loses or trades material.

use super::attack_tables::{bishop_attacks, rook_attacks};
use super::position::Position;
use super::types::{Bitboard, Color, Move, Piece};

// Exchanges on one square cannot exceed the number of pieces on the board.
const MAX_EXCHANGES: usize = 32;

impl Position {
    /// Material balance of the exchange started by `mv`, from the mover's side.
    ///
    /// Quiet moves are treated as a capture of nothing, so a piece stepping
    /// onto a square the opponent wins scores negative. Castling scores 0.
    #[must_use]
    pub fn see(&self, mv: Move) -> i32 {
        if mv.is_castling() {
            return 0;
        }
        let to = mv.to();
        let mut occupancy = self.occupied();
        let mut gain = [0i32; MAX_EXCHANGES];

        gain[0] = mv.captured().map_or(0, Piece::value);
        let mut current = mv.piece();
        if let Some(promoted) = mv.promotion() {
            gain[0] += promoted.value() - Piece::Pawn.value();
            current = promoted;
        }
        if mv.is_en_passant() {
            occupancy ^= Bitboard::from_square(to.offset(-mv.color().forward()));
        }

        let diagonal = self.piece_bb(Piece::Bishop) | self.piece_bb(Piece::Queen);
        let straight = self.piece_bb(Piece::Rook) | self.piece_bb(Piece::Queen);
        let mut attackers = self.attackers_to(to, occupancy);
        let mut from_bb = Bitboard::from_square(mv.from());
        let mut side = mv.color();
        let mut depth = 0;

        loop {
            // Lift the last capturer and reveal any slider behind it
            occupancy ^= from_bb;
            attackers &= !from_bb;
            attackers |= ((bishop_attacks(to, occupancy) & diagonal)
                | (rook_attacks(to, occupancy) & straight))
                & occupancy;

            side = !side;
            let side_attackers = attackers & self.color_bb(side);
            if side_attackers.is_empty() {
                break;
            }
            depth += 1;
            if depth >= MAX_EXCHANGES {
                break;
            }

            let (piece, bb) = self.least_valuable_attacker(side_attackers, side);
            gain[depth] = current.value() - gain[depth - 1];

            // Neither side gains by continuing
            if (-gain[depth - 1]).max(gain[depth]) < 0 {
                break;
            }
            // A king may only capture onto an undefended square
            if piece == Piece::King && !(attackers & self.color_bb(!side) & !bb).is_empty() {
                depth -= 1;
                break;
            }

            current = piece;
            from_bb = bb;
        }

        while depth > 0 {
            depth -= 1;
            gain[depth] = -(-gain[depth]).max(gain[depth + 1]);
        }
        gain[0]
    }

    /// Does `mv` lose material?
    ///
    /// Capturing something at least as valuable as the mover is never bad;
    /// otherwise the exchange is evaluated.
    #[must_use]
    pub fn is_bad_exchange(&self, mv: Move) -> bool {
        let victim = mv.captured().map_or(0, Piece::order);
        if victim >= mv.piece().order() {
            return false;
        }
        self.see(mv) < 0
    }

    fn least_valuable_attacker(&self, attackers: Bitboard, color: Color) -> (Piece, Bitboard) {
        for piece in Piece::ALL {
            let candidates = attackers & self.pieces_of(color, piece);
            if !candidates.is_empty() {
                return (piece, Bitboard::from_square(candidates.lsb()));
            }
        }
        (Piece::King, Bitboard::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn see_of(fen: &str, uci: &str) -> i32 {
        let pos: Position = fen.parse().expect("valid fen");
        let mv = pos.parse_move(uci).expect("legal move");
        pos.see(mv)
    }

    #[test]
    fn test_see_simple_capture() {
        assert_eq!(see_of("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", "e4d5"), 100);
    }

    #[test]
    fn test_see_pawn_trade() {
        // Pawn takes pawn, pawn recaptures
        assert_eq!(see_of("4k3/8/2p5/3p4/4P3/8/8/4K3 w - - 0 1", "e4d5"), 0);
    }

    #[test]
    fn test_see_knight_takes_defended_pawn() {
        assert_eq!(see_of("4k3/8/2p5/3p4/8/4N3/8/4K3 w - - 0 1", "e3d5"), -200);
    }

    #[test]
    fn test_see_with_xray() {
        // Doubled rooks win the d8 rook even though a rook recaptures once
        assert_eq!(see_of("3r3k/3r4/8/8/8/8/3R4/3RK3 w - - 0 1", "d2d7"), 500);
    }

    #[test]
    fn test_see_quiet_move_onto_attacked_square() {
        // Queen steps onto a square covered by a pawn
        assert_eq!(see_of("4k3/8/2p5/8/8/8/8/3QK3 w - - 0 1", "d1d5"), -900);
        assert_eq!(see_of("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", "d1d5"), 0);
    }

    #[test]
    fn test_is_bad_exchange() {
        let pos: Position = "4k3/8/2p5/3p4/8/4N3/8/4K3 w - - 0 1".parse().unwrap();
        assert!(pos.is_bad_exchange(pos.parse_move("e3d5").unwrap()));
        // Pawn takes knight is never bad
        let pos: Position = "4k3/8/2p5/3n4/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        assert!(!pos.is_bad_exchange(pos.parse_move("e4d5").unwrap()));
    }

    #[test]
    fn test_see_en_passant() {
        assert_eq!(
            see_of("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", "e5d6"),
            100
        );
    }
}

//! Move-path enumeration for validating the generator.

use crate::board::eval::PieceSquareEvaluator;
use crate::board::{Move, MoveList, Position};

impl Position {
    /// Number of legal move sequences of length `depth`.
    ///
    /// # Example
    /// ```
    /// use chess_core::board::Position;
    ///
    /// assert_eq!(Position::startpos().perft(2), 400);
    /// ```
    #[must_use]
    pub fn perft(&self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let mut moves = MoveList::new();
        self.collect_all(&mut moves);
        let mut child = *self;
        let mut nodes = 0;
        for &mv in &moves {
            if !self.apply_into(mv, &PieceSquareEvaluator, &mut child) {
                continue;
            }
            nodes += if depth == 1 { 1 } else { child.perft(depth - 1) };
        }
        nodes
    }

    /// Perft split by root move, in generation order.
    #[must_use]
    pub fn divide(&self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        self.legal_moves()
            .into_iter()
            .filter_map(|mv| self.apply(mv).map(|child| (mv, child.perft(depth - 1))))
            .collect()
    }
}

//! Quiet move ordering: killer slots and a history table.

use crate::board::types::{Move, MAX_PLY};

/// Quiets that caused a cutoff, two per ply, most recent first.
#[derive(Clone, Debug)]
pub struct Killers {
    slots: Vec<[Move; 2]>,
}

impl Default for Killers {
    fn default() -> Self {
        Self::new()
    }
}

impl Killers {
    #[must_use]
    pub fn new() -> Self {
        Killers {
            slots: vec![[Move::NULL; 2]; 1],
        }
    }

    /// Make room for plies up to `depth`, keeping what earlier iterations
    /// found.
    pub fn expand(&mut self, depth: usize) {
        let len = (depth + 1).min(MAX_PLY);
        if self.slots.len() < len {
            self.slots.resize(len, [Move::NULL; 2]);
        }
    }

    /// Killers of `ply`, possibly null.
    #[must_use]
    pub fn get(&self, ply: usize) -> [Move; 2] {
        self.slots.get(ply).copied().unwrap_or([Move::NULL; 2])
    }

    /// Remember `mv` at `ply`. The two slots never hold the same move.
    pub fn add(&mut self, ply: usize, mv: Move) {
        if ply >= self.slots.len() {
            self.expand(ply);
        }
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot[0] != mv {
            slot[1] = slot[0];
            slot[0] = mv;
        }
    }

    #[must_use]
    pub fn contains(&self, ply: usize, mv: Move) -> bool {
        self.get(ply).contains(&mv)
    }

    pub fn clear(&mut self) {
        self.slots.fill([Move::NULL; 2]);
    }
}

const PIECE_SLOTS: usize = 12;

fn piece_slot(mv: Move) -> usize {
    mv.color().index() * 6 + mv.piece().index()
}

/// Relative success rate of quiet moves per (piece, destination).
///
/// Every played move adds `depth²` to its "played" counter; moves that
/// raise alpha also add to their "good" counter. A move's value is its own
/// good/played ratio divided by the table-wide ratio, so 1.0 is average.
#[derive(Clone, Debug)]
pub struct History {
    positive: [[u64; 64]; PIECE_SLOTS],
    played: [[u64; 64]; PIECE_SLOTS],
    total_positive: u64,
    total_played: u64,
    halving_threshold: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(u64::MAX)
    }
}

impl History {
    #[must_use]
    pub fn new(halving_threshold: u64) -> Self {
        History {
            positive: [[0; 64]; PIECE_SLOTS],
            played: [[0; 64]; PIECE_SLOTS],
            total_positive: 0,
            total_played: 0,
            halving_threshold,
        }
    }

    fn increment(depth: i32) -> u64 {
        let depth = depth.max(0) as u64;
        depth * depth
    }

    /// Record that `mv` was searched with `depth` plies remaining.
    pub fn played(&mut self, depth: i32, mv: Move) {
        let inc = Self::increment(depth);
        self.total_played += inc;
        self.played[piece_slot(mv)][mv.to().index()] += inc;
        if self.total_played > self.halving_threshold {
            self.halve();
        }
    }

    /// Record that `mv` raised alpha with `depth` plies remaining.
    pub fn good(&mut self, depth: i32, mv: Move) {
        let inc = Self::increment(depth);
        self.total_positive += inc;
        self.positive[piece_slot(mv)][mv.to().index()] += inc;
    }

    #[must_use]
    pub fn value(&self, mv: Move) -> f32 {
        let slot = piece_slot(mv);
        let sq = mv.to().index();
        let good = self.positive[slot][sq] as f32;
        let played = self.played[slot][sq] as f32;
        self.total_played as f32 * good / (played * self.total_positive as f32 + 1.0)
    }

    /// Halve every counter, keeping the ratios.
    pub fn halve(&mut self) {
        for row in self.positive.iter_mut().chain(self.played.iter_mut()) {
            for entry in row.iter_mut() {
                *entry /= 2;
            }
        }
        self.total_positive /= 2;
        self.total_played /= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Piece, Square};

    fn quiet(from: Square, to: Square) -> Move {
        Move::normal(from, to, Color::White, Piece::Knight, None)
    }

    #[test]
    fn test_killers_shift_and_dedupe() {
        let a = quiet(Square::G1, Square::from_index(21));
        let b = quiet(Square::B1, Square::from_index(18));
        let mut killers = Killers::new();
        killers.expand(4);
        killers.add(2, a);
        killers.add(2, a);
        assert_eq!(killers.get(2), [a, Move::NULL]);
        killers.add(2, b);
        assert_eq!(killers.get(2), [b, a]);
        assert!(killers.contains(2, a));
        assert!(!killers.contains(3, a));
        killers.clear();
        assert_eq!(killers.get(2), [Move::NULL; 2]);
    }

    #[test]
    fn test_killers_out_of_range_ply() {
        let killers = Killers::new();
        assert_eq!(killers.get(MAX_PLY + 5), [Move::NULL; 2]);
    }

    #[test]
    fn test_history_prefers_successful_moves() {
        let good = quiet(Square::G1, Square::from_index(21));
        let bad = quiet(Square::B1, Square::from_index(16));
        let mut history = History::default();
        for _ in 0..4 {
            history.played(3, good);
            history.played(3, bad);
        }
        history.good(3, good);
        assert!(history.value(good) > history.value(bad));
        assert_eq!(history.value(bad), 0.0);
    }

    #[test]
    fn test_halving_keeps_ratio() {
        let mv = quiet(Square::G1, Square::from_index(21));
        let mut history = History::new(1000);
        history.played(4, mv);
        history.good(4, mv);
        let before = history.value(mv);
        history.halve();
        let after = history.value(mv);
        assert!((before - after).abs() < 0.1);
    }
}

//! Triangular principal variation buffer.
//!
//! Row `ply` starts at `D·ply − (ply² − ply)/2` for an iteration of depth
//! `D` and is `D − ply` moves long. A row is the best line found so far
//! from that ply; a null move ends it early.

use crate::board::types::{Move, MAX_PLY};

#[derive(Clone, Debug)]
pub struct PrincipalVariation {
    buffer: Vec<Move>,
    depth: usize,
}

impl Default for PrincipalVariation {
    fn default() -> Self {
        Self::new()
    }
}

impl PrincipalVariation {
    #[must_use]
    pub fn new() -> Self {
        let d = MAX_PLY + 1;
        PrincipalVariation {
            buffer: vec![Move::NULL; (d * d + d) / 2],
            depth: 0,
        }
    }

    /// Switch the row layout to an iteration of `depth`.
    pub fn set_depth(&mut self, depth: usize) {
        debug_assert!(depth <= MAX_PLY);
        self.depth = depth;
    }

    #[inline]
    fn index(&self, ply: usize) -> usize {
        self.depth * ply - (ply * ply - ply) / 2
    }

    /// `mv` raised alpha at `ply`: it heads the row, followed by the child
    /// row (at most `remaining - 1` moves).
    pub fn extend(&mut self, ply: usize, remaining: usize, mv: Move) {
        let index = self.index(ply);
        let stride = self.depth.saturating_sub(ply);
        if stride == 0 {
            return;
        }
        let remaining = remaining.min(stride);
        let from = index + stride - 1;
        self.buffer[index] = mv;
        for i in 1..remaining {
            self.buffer[index + i] = self.buffer[from + i];
        }
        for i in remaining.max(1)..stride {
            self.buffer[index + i] = Move::NULL;
        }
    }

    /// Forget the row of `ply`.
    #[inline]
    pub fn truncate(&mut self, ply: usize) {
        if ply < self.depth {
            let index = self.index(ply);
            self.buffer[index] = Move::NULL;
        }
    }

    /// Root row up to the first null move.
    #[must_use]
    pub fn line(&self) -> Vec<Move> {
        self.buffer[..self.depth]
            .iter()
            .take_while(|mv| !mv.is_null())
            .copied()
            .collect()
    }
}

//! Transposition table for caching search results.
//!
//! Entries live in pairs: a hash maps to slot `hash & mask` and its `^ 1`
//! sibling. When neither slot already holds the position, the older and
//! shallower of the two is replaced.
//!
//! This implementation uses lockless hashing for thread-safe access
//! in multi-threaded (Lazy SMP) search. Entries are stored as atomic
//! u64 pairs using XOR verification to detect torn reads.

use std::mem;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use crate::board::search::constants::adjust_mate_distance;
use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    // Never 0, so a packed entry is never all zero bits.
    fn to_bits(self) -> u64 {
        match self {
            BoundType::LowerBound => 1,
            BoundType::UpperBound => 2,
            BoundType::Exact => 3,
        }
    }

    fn from_bits(v: u64) -> Self {
        match v & 0x3 {
            1 => BoundType::LowerBound,
            2 => BoundType::UpperBound,
            _ => BoundType::Exact,
        }
    }
}

/// Unpacked TT entry for reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    /// Node-relative score: mate scores count plies from this position.
    pub score: i16,
    pub bound_type: BoundType,
    pub best_move: Move,
    pub generation: u8,
}

impl TTEntry {
    pub fn depth(&self) -> i32 {
        i32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        i32::from(self.score)
    }

    pub fn bound_type(&self) -> BoundType {
        self.bound_type
    }

    pub fn best_move(&self) -> Option<Move> {
        (!self.best_move.is_null()).then_some(self.best_move)
    }
}

/// Result of [`TranspositionTable::probe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTProbe {
    /// A score that may be returned directly, if the entry was deep enough
    /// and its bound settles the window.
    pub score: Option<i32>,
    /// Stored best move, even when the depth was insufficient.
    pub best_move: Move,
}

impl TTProbe {
    const MISS: TTProbe = TTProbe {
        score: None,
        best_move: Move::NULL,
    };
}

/// Packed entry format (fits in 64 bits):
/// - bits 0-23:  move (0 = no move)
/// - bits 24-25: bound
/// - bits 32-39: depth (u8)
/// - bits 40-47: generation (u8)
/// - bits 48-63: score (i16 as u16)
fn pack_entry(entry: &TTEntry) -> u64 {
    u64::from(entry.best_move.bits())
        | (entry.bound_type.to_bits() << 24)
        | (u64::from(entry.depth) << 32)
        | (u64::from(entry.generation) << 40)
        | (u64::from(entry.score as u16) << 48)
}

fn unpack_entry(data: u64) -> TTEntry {
    TTEntry {
        best_move: Move::from_bits((data & 0xFF_FFFF) as u32),
        bound_type: BoundType::from_bits(data >> 24),
        depth: ((data >> 32) & 0xFF) as u8,
        generation: ((data >> 40) & 0xFF) as u8,
        score: (data >> 48) as u16 as i16,
    }
}

/// A single TT slot using lockless hashing.
///
/// Uses the XOR technique: stores (key ^ data) and data separately.
/// On read, we verify by checking if (stored_key ^ data) equals the probe key.
/// This detects torn reads from concurrent writes.
#[repr(C)]
struct TTSlot {
    /// Stores: hash_key ^ packed_data
    key_xor: AtomicU64,
    /// Stores: packed_data
    data: AtomicU64,
}

impl TTSlot {
    fn new() -> Self {
        TTSlot {
            key_xor: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }

    fn store(&self, hash: u64, packed: u64) {
        // Data first, so a matching key_xor implies the data is in place
        self.data.store(packed, Ordering::Relaxed);
        self.key_xor.store(hash ^ packed, Ordering::Relaxed);
    }

    fn probe(&self, hash: u64) -> Option<TTEntry> {
        let key_xor = self.key_xor.load(Ordering::Relaxed);
        let data = self.data.load(Ordering::Relaxed);

        if key_xor ^ data == hash && data != 0 {
            Some(unpack_entry(data))
        } else {
            None
        }
    }

    fn is_empty(&self) -> bool {
        self.data.load(Ordering::Relaxed) == 0
    }

    /// Eviction priority: higher means a better candidate for replacement.
    fn staleness(&self, generation: u8) -> i32 {
        let data = self.data.load(Ordering::Relaxed);
        if data == 0 {
            return i32::MAX;
        }
        let entry = unpack_entry(data);
        i32::from(generation.wrapping_sub(entry.generation)) - entry.depth()
    }

    fn clear(&self) {
        self.key_xor.store(0, Ordering::Relaxed);
        self.data.store(0, Ordering::Relaxed);
    }
}

/// Thread-safe transposition table using lockless hashing.
///
/// Multiple threads can read and write concurrently without locks.
/// Torn reads are detected via XOR verification and discarded.
pub struct TranspositionTable {
    slots: Vec<TTSlot>,
    mask: usize,
    generation: AtomicU8,
}

impl TranspositionTable {
    /// Smallest table: one slot pair.
    const MIN_SLOTS: usize = 2;

    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        Self::with_bytes(size_mb.saturating_mul(1024 * 1024))
    }

    /// Create a table holding the largest power-of-two slot count that
    /// fits in `bytes`.
    #[must_use]
    pub fn with_bytes(bytes: usize) -> Self {
        let count = Self::slot_count(bytes);
        let mut slots = Vec::with_capacity(count);
        slots.resize_with(count, TTSlot::new);
        TranspositionTable {
            slots,
            mask: count - 1,
            generation: AtomicU8::new(0),
        }
    }

    fn slot_count(bytes: usize) -> usize {
        let fit = bytes / mem::size_of::<TTSlot>();
        if fit < Self::MIN_SLOTS {
            Self::MIN_SLOTS
        } else {
            // Largest power of two not above `fit`
            1 << (usize::BITS - 1 - fit.leading_zeros())
        }
    }

    /// Rebuild the table for a new byte budget. All entries are discarded.
    pub fn resize(&mut self, bytes: usize) {
        *self = Self::with_bytes(bytes);
        log::info!(
            "transposition table resized: {} entries ({} bytes)",
            self.slots.len(),
            self.size_bytes()
        );
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Memory held by the slots.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.slots.len() * mem::size_of::<TTSlot>()
    }

    /// Age every stored entry by one search.
    pub fn new_search(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    fn current_generation(&self) -> u8 {
        self.generation.load(Ordering::Relaxed)
    }

    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Find the slot holding `hash`, if either of its pair does.
    fn find(&self, hash: u64) -> Option<(&TTSlot, TTEntry)> {
        let index = self.index(hash);
        [index, index ^ 1].into_iter().find_map(|i| {
            let slot = &self.slots[i];
            slot.probe(hash).map(|entry| (slot, entry))
        })
    }

    /// Raw lookup without window logic. Mate scores stay node-relative.
    #[must_use]
    pub fn entry(&self, hash: u64) -> Option<TTEntry> {
        self.find(hash).map(|(_, entry)| entry)
    }

    /// Stored best move for `hash`.
    #[must_use]
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.entry(hash).and_then(|entry| entry.best_move())
    }

    /// Look up `hash` for a node `ply` deep that needs `depth` remaining plies
    /// inside the window `(alpha, beta)`.
    pub fn probe(&self, hash: u64, depth: i32, ply: usize, alpha: i32, beta: i32) -> TTProbe {
        let Some((slot, mut entry)) = self.find(hash) else {
            return TTProbe::MISS;
        };

        // A hit counts as fresh
        let generation = self.current_generation();
        if entry.generation != generation {
            entry.generation = generation;
            slot.store(hash, pack_entry(&entry));
        }

        let mut probe = TTProbe {
            score: None,
            best_move: entry.best_move,
        };
        if entry.depth() < depth {
            return probe;
        }

        let score = adjust_mate_distance(entry.score(), -(ply as i32));
        probe.score = match entry.bound_type {
            BoundType::Exact => Some(score),
            BoundType::UpperBound if score <= alpha => Some(score),
            BoundType::LowerBound if score >= beta => Some(score),
            _ => None,
        };
        probe
    }

    /// Store a search result.
    ///
    /// Scores at or above `beta` are stored as a lower bound of `beta`, at
    /// or below `alpha` as an upper bound of `alpha`, otherwise exactly. A
    /// null `best_move` keeps the move already known for the same position.
    #[allow(clippy::too_many_arguments)]
    pub fn store(
        &self,
        hash: u64,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
        score: i32,
        best_move: Move,
    ) {
        let generation = self.current_generation();
        let index = self.index(hash);
        let (slot, previous) = match self.find(hash) {
            Some((slot, entry)) => (slot, Some(entry)),
            None => {
                let (a, b) = (&self.slots[index], &self.slots[index ^ 1]);
                if a.staleness(generation) > b.staleness(generation) {
                    (a, None)
                } else {
                    (b, None)
                }
            }
        };

        let best_move = match previous {
            Some(entry) if best_move.is_null() => entry.best_move,
            _ => best_move,
        };
        let (bound_type, value) = if score >= beta {
            (BoundType::LowerBound, beta)
        } else if score <= alpha {
            (BoundType::UpperBound, alpha)
        } else {
            (BoundType::Exact, score)
        };
        let value = adjust_mate_distance(value, ply as i32);

        let entry = TTEntry {
            depth: depth.clamp(0, i32::from(u8::MAX)) as u8,
            score: value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16,
            bound_type,
            best_move,
            generation,
        };
        slot.store(hash, pack_entry(&entry));
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull(&self) -> u32 {
        // Sample the first 1000 slots for efficiency
        let sample_size = self.slots.len().min(1000);
        let occupied = self
            .slots
            .iter()
            .take(sample_size)
            .filter(|slot| !slot.is_empty())
            .count();
        ((occupied as u64 * 1000) / sample_size as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.clear();
        }
        self.generation.store(0, Ordering::Relaxed);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(crate::board::search::DEFAULT_TT_MB)
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("capacity", &self.capacity())
            .field("generation", &self.current_generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::search::constants::{checkmate, mate_distance};
    use crate::board::{Color, Piece, Square};

    fn some_move() -> Move {
        Move::normal(Square::G1, Square::from_index(21), Color::White, Piece::Knight, None)
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let cases = [
            TTEntry {
                depth: 10,
                score: 500,
                bound_type: BoundType::Exact,
                best_move: some_move(),
                generation: 5,
            },
            TTEntry {
                depth: 255,
                score: -32000,
                bound_type: BoundType::LowerBound,
                best_move: Move::NULL,
                generation: 255,
            },
            TTEntry {
                depth: 0,
                score: 0,
                bound_type: BoundType::UpperBound,
                best_move: some_move(),
                generation: 0,
            },
        ];
        for entry in cases {
            assert_eq!(unpack_entry(pack_entry(&entry)), entry);
            assert_ne!(pack_entry(&entry), 0);
        }
    }

    #[test]
    fn test_size_is_power_of_two() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.capacity(), 1 << 16);
        let tt = TranspositionTable::with_bytes(100 * 16 + 3);
        assert_eq!(tt.capacity(), 64);
        let tt = TranspositionTable::with_bytes(0);
        assert_eq!(tt.capacity(), 2);
    }

    #[test]
    fn test_store_and_probe_exact() {
        let tt = TranspositionTable::new(1);
        let hash = 0x1234_5678_9ABC_DEF0;
        tt.store(hash, 10, 0, -100, 100, 42, some_move());

        let hit = tt.probe(hash, 8, 0, -100, 100);
        assert_eq!(hit.score, Some(42));
        assert_eq!(hit.best_move, some_move());
    }

    #[test]
    fn test_shallow_entry_still_gives_move() {
        let tt = TranspositionTable::new(1);
        let hash = 77;
        tt.store(hash, 2, 0, -100, 100, 42, some_move());
        let hit = tt.probe(hash, 6, 0, -100, 100);
        assert_eq!(hit.score, None);
        assert_eq!(hit.best_move, some_move());
    }

    #[test]
    fn test_bounds_are_clamped_to_window() {
        let tt = TranspositionTable::new(1);
        tt.store(1, 4, 0, -50, 50, 300, some_move());
        let entry = tt.entry(1).unwrap();
        assert_eq!(entry.bound_type, BoundType::LowerBound);
        assert_eq!(entry.score(), 50);
        // Lower bound only settles a window it exceeds
        assert_eq!(tt.probe(1, 4, 0, -50, 50).score, Some(50));
        assert_eq!(tt.probe(1, 4, 0, 0, 100).score, None);

        tt.store(2, 4, 0, -50, 50, -300, Move::NULL);
        let entry = tt.entry(2).unwrap();
        assert_eq!(entry.bound_type, BoundType::UpperBound);
        assert_eq!(tt.probe(2, 4, 0, -50, 50).score, Some(-50));
        assert_eq!(tt.probe(2, 4, 0, -100, 0).score, None);
    }

    #[test]
    fn test_null_move_keeps_known_best_move() {
        let tt = TranspositionTable::new(1);
        tt.store(9, 3, 0, -10, 10, 0, some_move());
        tt.store(9, 5, 0, -10, 10, -20, Move::NULL);
        assert_eq!(tt.best_move(9), Some(some_move()));
        assert_eq!(tt.entry(9).unwrap().depth, 5);
    }

    #[test]
    fn test_mate_scores_are_node_relative() {
        let tt = TranspositionTable::new(1);
        // Mate found 7 plies from the root, stored at a node 3 plies deep
        let score = -checkmate(7);
        tt.store(5, 6, 3, -30000, 30000, score, some_move());
        assert_eq!(mate_distance(tt.entry(5).unwrap().score()), Some(4));
        // Reached again 1 ply from the root
        let hit = tt.probe(5, 6, 1, -30000, 30000);
        assert_eq!(hit.score.and_then(mate_distance), Some(5));
    }

    #[test]
    fn test_pair_replacement_keeps_deeper_entry() {
        let tt = TranspositionTable::with_bytes(2 * 16);
        // All three hashes share the single slot pair
        tt.store(0x10, 9, 0, -10, 10, 0, some_move());
        tt.store(0x20, 1, 0, -10, 10, 0, some_move());
        tt.store(0x30, 2, 0, -10, 10, 0, some_move());
        assert!(tt.entry(0x10).is_some());
        assert!(tt.entry(0x20).is_none());
        assert!(tt.entry(0x30).is_some());
    }

    #[test]
    fn test_old_entries_are_evicted_first() {
        let tt = TranspositionTable::with_bytes(2 * 16);
        tt.store(0x10, 4, 0, -10, 10, 0, some_move());
        for _ in 0..10 {
            tt.new_search();
        }
        tt.store(0x20, 4, 0, -10, 10, 0, some_move());
        tt.store(0x30, 4, 0, -10, 10, 0, some_move());
        assert!(tt.entry(0x10).is_none());
        assert!(tt.entry(0x20).is_some());
    }

    #[test]
    fn test_no_false_positives() {
        let tt = TranspositionTable::new(1);
        tt.store(0x1234_5678_9ABC_DEF0, 10, 0, -1, 1, 0, Move::NULL);
        assert!(tt.entry(0xFEDC_BA98_7654_3210).is_none());
    }

    #[test]
    fn test_clear_and_hashfull() {
        let tt = TranspositionTable::with_bytes(64 * 16);
        assert_eq!(tt.hashfull(), 0);
        for hash in 0..32u64 {
            tt.store(hash, 1, 0, -1, 1, 0, Move::NULL);
        }
        assert_eq!(tt.hashfull(), 500);
        tt.clear();
        assert_eq!(tt.hashfull(), 0);
    }

    #[test]
    fn test_resize_discards_entries() {
        let mut tt = TranspositionTable::new(1);
        tt.store(3, 1, 0, -1, 1, 0, some_move());
        tt.resize(4096);
        assert_eq!(tt.capacity(), 256);
        assert!(tt.entry(3).is_none());
    }
}

//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Principal variation search with null move pruning and LMR
//! - Quiescence search with stand-pat and SEE pruning
//! - Staged move ordering (TT move, MVV-LVA captures, killers, history)
//! - Shared lockless transposition table
//! - Lazy SMP parallel search support

pub mod constants;
mod iterative;
mod killswitch;
mod ordering;
mod params;
mod pv;
pub mod smp;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

use super::eval::{Evaluator, PieceSquareEvaluator};
use super::{Move, Position};
pub use constants::{checkmate, is_mate, mate_distance, mate_in, MATE_SCORE};
pub use iterative::{repetition_window, IterativeSearch, MAX_DEPTH};
pub use killswitch::{KillSwitch, KillSwitchFn};
pub use ordering::{History, Killers};
pub use params::SearchParams;
pub use pv::PrincipalVariation;

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 64;

/// Result of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found, `None` only when the root has no legal move
    pub best_move: Option<Move>,
    /// The expected opponent reply (for pondering)
    pub ponder_move: Option<Move>,
    /// Score relative to the side to move
    pub score: i32,
    /// Deepest completed iteration
    pub depth: u32,
    /// Nodes visited, summed over all workers
    pub nodes: u64,
    pub pv: Vec<Move>,
    pub time_ms: u64,
}

// ============================================================================
// UNIFIED SEARCH API
// ============================================================================

/// Configuration for a search operation.
#[derive(Clone, Default)]
pub struct SearchConfig {
    /// Maximum depth to search (None = until stopped, capped at [`MAX_DEPTH`])
    pub max_depth: Option<u32>,
    /// Time limit in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Node limit per worker (0 = unlimited)
    pub node_limit: u64,
    /// Worker threads (0 and 1 both mean a single thread)
    pub threads: usize,
    /// Hashes of earlier game positions, see [`repetition_window`]
    pub history: Vec<u64>,
    pub params: SearchParams,
    /// Optional callback for iteration info
    pub info_callback: Option<SearchInfoCallback>,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("max_depth", &self.max_depth)
            .field("time_limit_ms", &self.time_limit_ms)
            .field("node_limit", &self.node_limit)
            .field("threads", &self.threads)
            .field("history", &self.history.len())
            .field("params", &self.params)
            .field("info_callback", &self.info_callback.is_some())
            .finish()
    }
}

impl SearchConfig {
    /// Create a depth-limited search config
    #[must_use]
    pub fn depth(max_depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Create a time-limited search config
    #[must_use]
    pub fn time(time_limit_ms: u64) -> Self {
        SearchConfig {
            time_limit_ms,
            ..Default::default()
        }
    }

    /// Set node limit
    #[must_use]
    pub fn with_nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Set time limit
    #[must_use]
    pub fn with_time(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Prior game positions for repetition detection.
    #[must_use]
    pub fn with_history(mut self, history: Vec<u64>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Attach a callback for iteration info reporting.
    #[must_use]
    pub fn with_info_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }

    fn target_depth(&self) -> usize {
        self.max_depth
            .map_or(MAX_DEPTH, |d| (d as usize).clamp(1, MAX_DEPTH))
    }

    fn deadline(&self, start: Instant) -> Option<Instant> {
        (self.time_limit_ms > 0).then(|| start + Duration::from_millis(self.time_limit_ms))
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone)]
pub struct SearchIterationInfo {
    pub depth: u32,
    pub nodes: u64,
    pub nps: u64,
    pub time_ms: u64,
    pub score: i32,
    /// Full moves to mate, negative when the side to move is mated
    pub mate_in: Option<i32>,
    pub pv: String,
    /// Transposition table occupancy in per mille
    pub hashfull: u32,
}

impl SearchIterationInfo {
    fn new(
        depth: usize,
        nodes: u64,
        score: i32,
        pv: &[Move],
        start: Instant,
        tt: &TranspositionTable,
    ) -> Self {
        let time_ms = start.elapsed().as_millis() as u64;
        let nps = if time_ms > 0 { nodes * 1000 / time_ms } else { 0 };
        SearchIterationInfo {
            depth: depth as u32,
            nodes,
            nps,
            time_ms,
            score,
            mate_in: mate_in(score),
            pv: format_pv(pv),
            hashfull: tt.hashfull(),
        }
    }
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

/// Space-separated UCI moves.
#[must_use]
pub fn format_pv(pv: &[Move]) -> String {
    pv.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Search `root` with the standard evaluation.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use chess_core::board::{search, Position, SearchConfig};
/// use chess_core::sync::StopFlag;
/// use chess_core::tt::TranspositionTable;
///
/// let pos: Position = "6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1".parse().unwrap();
/// let tt = Arc::new(TranspositionTable::new(1));
/// let result = search(&pos, &tt, SearchConfig::depth(3), &StopFlag::new());
/// assert_eq!(result.best_move.unwrap().to_string(), "e1e8");
/// ```
#[allow(clippy::needless_pass_by_value)] // Config is intentionally consumed
pub fn search(
    root: &Position,
    tt: &Arc<TranspositionTable>,
    config: SearchConfig,
    stop: &StopFlag,
) -> SearchResult {
    search_with(root, PieceSquareEvaluator, tt, config, stop)
}

/// Search `root` with a custom evaluator.
#[allow(clippy::needless_pass_by_value)]
pub fn search_with<E>(
    root: &Position,
    eval: E,
    tt: &Arc<TranspositionTable>,
    config: SearchConfig,
    stop: &StopFlag,
) -> SearchResult
where
    E: Evaluator + Clone + 'static,
{
    tt.new_search();
    if config.threads > 1 {
        return smp::smp_search(root, eval, tt, &config, stop);
    }

    let start = Instant::now();
    let mut search =
        IterativeSearch::with_evaluator(root, eval, Arc::clone(tt), config.history.clone())
            .with_params(config.params.clone())
            .with_node_limit(config.node_limit)
            .with_kill_switch(stop.kill_switch(config.deadline(start)));

    let target = config.target_depth();
    while search.depth() < target {
        search.search_deeper();
        if search.aborted() {
            break;
        }
        report_iteration(&search, start, tt, config.info_callback.as_ref());
    }

    finish(&search, search.nodes(), start)
}

pub(crate) fn report_iteration<E: Evaluator>(
    search: &IterativeSearch<E>,
    start: Instant,
    tt: &TranspositionTable,
    callback: Option<&SearchInfoCallback>,
) {
    let info = SearchIterationInfo::new(
        search.completed_depth(),
        search.nodes(),
        search.score(),
        search.principal_variation(),
        start,
        tt,
    );
    log::debug!(
        "depth {} score {} nodes {} time {}ms pv {}",
        info.depth,
        info.score,
        info.nodes,
        info.time_ms,
        info.pv
    );
    if let Some(cb) = callback {
        cb(&info);
    }
}

pub(crate) fn finish<E: Evaluator>(
    search: &IterativeSearch<E>,
    nodes: u64,
    start: Instant,
) -> SearchResult {
    let pv = search.principal_variation().to_vec();
    SearchResult {
        best_move: search.best_move(),
        ponder_move: pv.get(1).copied(),
        score: search.score(),
        depth: search.completed_depth() as u32,
        nodes,
        pv,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::depth(5)
            .with_nodes(1000)
            .with_threads(2)
            .with_time(50)
            .with_history(vec![1, 2]);
        assert_eq!(config.max_depth, Some(5));
        assert_eq!(config.node_limit, 1000);
        assert_eq!(config.threads, 2);
        assert_eq!(config.time_limit_ms, 50);
        assert_eq!(config.history, vec![1, 2]);
        assert_eq!(config.target_depth(), 5);
        assert_eq!(SearchConfig::default().target_depth(), MAX_DEPTH);
    }

    #[test]
    fn test_info_callback_per_depth() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let config = SearchConfig::depth(4).with_info_callback(Arc::new(move |info| {
            sink.lock().push(info.depth);
        }));
        let tt = Arc::new(TranspositionTable::new(1));
        let result = search(&Position::startpos(), &tt, config, &StopFlag::new());
        assert_eq!(*seen.lock(), vec![1, 2, 3, 4]);
        assert_eq!(result.depth, 4);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_stopped_flag_still_returns_a_move() {
        let tt = Arc::new(TranspositionTable::new(1));
        let result = search(
            &Position::startpos(),
            &tt,
            SearchConfig::default(),
            &StopFlag::stopped(),
        );
        assert_eq!(result.depth, 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_format_pv() {
        let pos = Position::startpos();
        let e4 = pos.parse_move("e2e4").unwrap();
        let e5 = pos.apply(e4).unwrap().parse_move("e7e5").unwrap();
        assert_eq!(format_pv(&[e4, e5]), "e2e4 e7e5");
        assert_eq!(format_pv(&[]), "");
    }
}

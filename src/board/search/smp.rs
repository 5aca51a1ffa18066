//! Lazy SMP (Symmetric `MultiProcessing`) parallel search.
//!
//! Implements parallel search where multiple threads search the same position
//! independently with different depth schedules. All threads share a common
//! transposition table, which provides natural coordination.
//!
//! - Each worker owns its ply stack, killers and history
//! - Helper threads searching one ply deeper populate the TT for the main thread
//! - The deepest completed iteration wins, the main worker breaking ties

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use parking_lot::Mutex;

use crate::board::eval::Evaluator;
use crate::board::{Move, Position};
use crate::sync::StopFlag;
use crate::tt::TranspositionTable;

use super::{
    finish, report_iteration, IterativeSearch, KillSwitchFn, SearchConfig, SearchResult, MAX_DEPTH,
};

/// Result from a single worker thread
#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

impl WorkerResult {
    /// Should `self` replace `current` as the reported result?
    fn beats(&self, current: &WorkerResult) -> bool {
        self.depth > current.depth
            || (self.depth == current.depth && self.worker_id < current.worker_id)
    }
}

/// Depth offset for a worker thread.
///
/// Worker 0 (main) searches the target depth; odd helpers go one ply deeper
/// to fill the TT ahead of it, even helpers search the target depth with
/// their own move ordering.
fn worker_depth_offset(worker_id: usize) -> usize {
    worker_id % 2
}

/// Search thread stack size (32 MB to handle deep recursion)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Everything a worker thread needs, cloned per thread.
struct WorkerContext<E> {
    worker_id: usize,
    root: Position,
    eval: E,
    tt: Arc<TranspositionTable>,
    config: SearchConfig,
    stop: StopFlag,
    deadline: Option<Instant>,
    start: Instant,
    best: Arc<Mutex<Option<WorkerResult>>>,
    total_nodes: Arc<AtomicU64>,
}

/// Run parallel search using Lazy SMP.
///
/// Worker 0 runs on the calling thread; `config.threads - 1` helpers are
/// spawned and stopped as soon as worker 0 is done. Only worker 0 reports
/// iteration info.
pub fn smp_search<E>(
    root: &Position,
    eval: E,
    tt: &Arc<TranspositionTable>,
    config: &SearchConfig,
    stop: &StopFlag,
) -> SearchResult
where
    E: Evaluator + Clone + 'static,
{
    let num_threads = config.threads.max(1);
    let start = Instant::now();
    let deadline = config.deadline(start);
    let best = Arc::new(Mutex::new(None));
    let total_nodes = Arc::new(AtomicU64::new(0));

    // Helpers also stop when the main worker finishes
    let helper_stop = StopFlag::new();
    let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(num_threads - 1);

    for worker_id in 1..num_threads {
        let ctx = WorkerContext {
            worker_id,
            root: *root,
            eval: eval.clone(),
            tt: Arc::clone(tt),
            config: config.clone(),
            stop: helper_stop.clone(),
            deadline,
            start,
            best: Arc::clone(&best),
            total_nodes: Arc::clone(&total_nodes),
        };
        let external = stop.clone();
        let spawned = thread::Builder::new()
            .name(format!("search-{worker_id}"))
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                run_worker(ctx, Some(external));
            });
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(err) => log::warn!("failed to spawn search worker {worker_id}: {err}"),
        }
    }

    let main = WorkerContext {
        worker_id: 0,
        root: *root,
        eval,
        tt: Arc::clone(tt),
        config: config.clone(),
        stop: stop.clone(),
        deadline,
        start,
        best: Arc::clone(&best),
        total_nodes: Arc::clone(&total_nodes),
    };
    let main_search = run_worker(main, None);
    helper_stop.stop();

    for handle in handles {
        if handle.join().is_err() {
            log::warn!("search worker panicked");
        }
    }

    let nodes = total_nodes.load(Ordering::Relaxed);
    let mut result = finish(&main_search, nodes, start);
    if let Some(chosen) = best.lock().take() {
        if chosen.worker_id != 0 {
            log::debug!(
                "using worker {} result at depth {}",
                chosen.worker_id,
                chosen.depth
            );
        }
        result.best_move = chosen.best_move.or(result.best_move);
        result.ponder_move = chosen.pv.get(1).copied();
        result.score = chosen.score;
        result.depth = chosen.depth;
        result.pv = chosen.pv;
    }
    result
}

/// Run one worker to its target depth and offer its result.
#[allow(clippy::needless_pass_by_value)]
fn run_worker<E>(ctx: WorkerContext<E>, external: Option<StopFlag>) -> IterativeSearch<E>
where
    E: Evaluator + Clone + 'static,
{
    let WorkerContext {
        worker_id,
        root,
        eval,
        tt,
        config,
        stop,
        deadline,
        start,
        best,
        total_nodes,
    } = ctx;
    log::debug!("worker {worker_id} started");

    let own = stop.kill_switch(deadline);
    let check: KillSwitchFn = match external {
        Some(external) => {
            let mut own = own;
            Box::new(move || external.is_stopped() || own())
        }
        None => own,
    };

    let target = (config.target_depth() + worker_depth_offset(worker_id)).min(MAX_DEPTH);
    let mut search =
        IterativeSearch::with_evaluator(&root, eval, Arc::clone(&tt), config.history.clone())
            .with_params(config.params.clone())
            .with_node_limit(config.node_limit)
            .with_kill_switch(check);

    while search.depth() < target {
        search.search_deeper();
        if search.aborted() {
            break;
        }
        if worker_id == 0 {
            report_iteration(&search, start, &tt, config.info_callback.as_ref());
        }
    }

    total_nodes.fetch_add(search.nodes(), Ordering::Relaxed);
    let result = WorkerResult {
        worker_id,
        best_move: search.best_move(),
        pv: search.principal_variation().to_vec(),
        score: search.score(),
        depth: search.completed_depth() as u32,
        nodes: search.nodes(),
    };
    log::debug!(
        "worker {worker_id} finished: depth {} nodes {}",
        result.depth,
        result.nodes
    );

    if result.depth > 0 {
        let mut slot = best.lock();
        let replace = slot.as_ref().map_or(true, |current| result.beats(current));
        if replace {
            *slot = Some(result);
        }
    }
    search
}

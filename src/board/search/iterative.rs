//! Iterative deepening principal variation search.
//!
//! One [`IterativeSearch`] owns a ply-indexed stack of positions and move
//! lists. Each call to [`IterativeSearch::search_deeper`] runs one more
//! iteration inside an aspiration window around the previous score.

use std::sync::Arc;

use super::constants::{checkmate, is_mate, MAX_BETA, MIN_ALPHA};
use super::killswitch::{KillSwitch, KillSwitchFn};
use super::ordering::{History, Killers};
use super::params::SearchParams;
use super::pv::PrincipalVariation;
use crate::board::eval::{Evaluator, PieceSquareEvaluator};
use crate::board::position::Position;
use crate::board::types::{Move, MoveList, MAX_PLY};
use crate::tt::TranspositionTable;

/// Deepest iteration the ply stack supports.
pub const MAX_DEPTH: usize = MAX_PLY - 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    New,
    Captures,
    Killers,
    SortedQuiets,
    Quiets,
}

/// Progress through one node's staged move list.
struct PlayState {
    stage: Stage,
    next: usize,
    played: u32,
    tt_move: Move,
}

/// Move the highest MVV-LVA capture to the front. Later entries win ties.
fn pick_best_capture(moves: &mut [Move]) {
    let mut best = 0;
    let mut best_score = i32::MIN;
    for (i, mv) in moves.iter().enumerate() {
        let score = mv.mvv_lva_score();
        if score >= best_score {
            best = i;
            best_score = score;
        }
    }
    moves.swap(0, best);
}

/// Build the repetition window for a game: hashes of `positions` (oldest
/// first, ending with the position to search) since the last move that
/// reset the halfmove clock.
#[must_use]
pub fn repetition_window<'a, I>(positions: I) -> Vec<u64>
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut hashes = Vec::new();
    for pos in positions {
        if pos.halfmove_clock() == 0 {
            hashes.clear();
        }
        hashes.push(pos.hash());
    }
    hashes
}

/// Single-threaded iterative search over one root position.
pub struct IterativeSearch<E: Evaluator = PieceSquareEvaluator> {
    positions: Vec<Position>,
    moves: Vec<MoveList>,
    root_moves: Vec<Move>,
    pv: PrincipalVariation,
    best_line: Vec<Move>,
    history: History,
    killers: Killers,
    legacy: Vec<u64>,
    params: SearchParams,
    tt: Arc<TranspositionTable>,
    eval: E,
    kill_switch: KillSwitch,
    max_nodes: u64,
    nodes: u64,
    depth: usize,
    completed_depth: usize,
    score: i32,
    aborted: bool,
}

impl IterativeSearch<PieceSquareEvaluator> {
    /// Search `root` with the standard evaluation. `legacy` holds the
    /// hashes of earlier game positions (see [`repetition_window`]).
    #[must_use]
    pub fn new(root: &Position, tt: Arc<TranspositionTable>, legacy: Vec<u64>) -> Self {
        Self::with_evaluator(root, PieceSquareEvaluator, tt, legacy)
    }
}

impl<E: Evaluator> IterativeSearch<E> {
    #[must_use]
    pub fn with_evaluator(
        root: &Position,
        eval: E,
        tt: Arc<TranspositionTable>,
        legacy: Vec<u64>,
    ) -> Self {
        let mut root = *root;
        root.refresh_accumulator(&eval);

        let mut root_list = MoveList::new();
        root.collect_all(&mut root_list);

        let params = SearchParams::default();
        IterativeSearch {
            positions: vec![root; MAX_PLY],
            moves: vec![MoveList::new(); MAX_PLY],
            root_moves: root_list.as_slice().to_vec(),
            pv: PrincipalVariation::new(),
            best_line: Vec::new(),
            history: History::new(params.history_halving_threshold),
            killers: Killers::new(),
            legacy,
            kill_switch: KillSwitch::never(),
            params,
            tt,
            eval,
            max_nodes: u64::MAX,
            nodes: 0,
            depth: 0,
            completed_depth: 0,
            score: 0,
            aborted: false,
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.history = History::new(params.history_halving_threshold);
        self.params = params;
        self
    }

    /// Stop after roughly `max_nodes` nodes. 0 means no limit.
    #[must_use]
    pub fn with_node_limit(mut self, max_nodes: u64) -> Self {
        self.max_nodes = if max_nodes == 0 { u64::MAX } else { max_nodes };
        self
    }

    #[must_use]
    pub fn with_kill_switch(mut self, check: KillSwitchFn) -> Self {
        self.kill_switch = KillSwitch::new(Some(check), self.params.kill_switch_interval);
        self
    }

    /// Iteration currently (or last) searched.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest iteration that finished without an abort.
    #[must_use]
    pub fn completed_depth(&self) -> usize {
        self.completed_depth
    }

    /// Score of the last completed iteration, relative to the side to move.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[must_use]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Principal variation of the last completed iteration.
    #[must_use]
    pub fn principal_variation(&self) -> &[Move] {
        &self.best_line
    }

    /// Head of the principal variation, or the first legal root move when no
    /// iteration has completed.
    #[must_use]
    pub fn best_move(&self) -> Option<Move> {
        self.best_line.first().copied().or_else(|| {
            let root = &self.positions[0];
            self.root_moves
                .iter()
                .copied()
                .find(|&mv| root.apply_with(mv, &self.eval).is_some())
        })
    }

    /// Iterate until `max_depth` is completed or the search is aborted.
    pub fn search(&mut self, max_depth: usize) {
        while self.depth < max_depth.min(MAX_DEPTH) && !self.aborted {
            self.search_deeper();
        }
    }

    /// Run one more iteration.
    pub fn search_deeper(&mut self) {
        if self.depth >= MAX_DEPTH {
            return;
        }
        self.depth += 1;
        self.pv.set_depth(self.depth);
        self.killers.expand(self.depth);
        self.kill_switch.rearm();

        let score = self.evaluate_root(self.depth);
        if !self.aborted {
            self.score = score;
            self.completed_depth = self.depth;
            self.best_line = self.pv.line();
        }
    }

    #[inline]
    fn forced_cut(&mut self, ply: usize) -> bool {
        ply >= MAX_PLY - 1 || self.nodes >= self.max_nodes || self.kill_switch.get()
    }

    #[inline]
    fn static_eval(&self, ply: usize) -> i32 {
        self.eval.score(&self.positions[ply])
    }

    /// Apply `mv` to the position at `ply`, writing the child to `ply + 1`.
    #[inline]
    fn play_move(&mut self, ply: usize, mv: Move) -> bool {
        let (parents, children) = self.positions.split_at_mut(ply + 1);
        parents[ply].apply_into(mv, &self.eval, &mut children[0])
    }

    /// After a mate was found, the first plies are searched without null
    /// moves so the shortest mate (or an escape) is not pruned away.
    fn allow_null_move(&self, ply: usize) -> bool {
        !is_mate(self.score) || ply > self.depth / 4
    }

    fn is_repetition(&self, ply: usize) -> bool {
        let hash = self.positions[ply].hash();
        let mut i = ply as isize - 4;
        while i >= 0 {
            let pos = &self.positions[i as usize];
            if pos.hash() == hash {
                return true;
            }
            // Nothing before an irreversible move can repeat
            if pos.halfmove_clock() <= 1 {
                return false;
            }
            i -= 2;
        }
        let mut i = self.legacy.len() as isize - 1 - (ply & 1) as isize;
        while i >= 0 {
            if self.legacy[i as usize] == hash {
                return true;
            }
            i -= 2;
        }
        false
    }

    fn evaluate_root(&mut self, depth: usize) -> i32 {
        let mut eval = self.score;
        let mut window = self.params.aspiration_window;
        loop {
            let alpha = eval - window;
            let beta = eval + window;
            eval = self.evaluate_root_window(depth, alpha, beta);
            if (eval > alpha && eval < beta) || self.aborted {
                return eval;
            }
            log::trace!("depth {depth}: score {eval} outside ({alpha}, {beta}), widening");
            window = window.saturating_mul(2);
        }
    }

    fn evaluate_root_window(&mut self, depth: usize, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let in_check = self.positions[0].in_check();
        let remaining = depth as i32;

        for i in 0..self.root_moves.len() {
            let mv = self.root_moves[i];
            if !self.play_move(0, mv) {
                continue;
            }

            // Later moves are expected to fail low: prove it cheaply first
            if depth >= 2 && i > 0 {
                let reduction = if mv.is_capture() || in_check || self.positions[1].in_check() {
                    0
                } else {
                    self.params.root_reduction
                };
                if self.evaluate_next(0, remaining - reduction, alpha, alpha + 1) <= alpha {
                    continue;
                }
            }

            let score = self.evaluate_next(0, remaining, alpha, beta);
            if self.aborted {
                break;
            }
            if score > alpha {
                alpha = score;
                self.pv.extend(0, depth, mv);
                self.root_moves[..=i].rotate_right(1);
            }
        }

        if alpha <= MIN_ALPHA {
            return if in_check { checkmate(0) } else { 0 };
        }
        alpha
    }

    #[inline]
    fn evaluate_next(&mut self, ply: usize, remaining: i32, alpha: i32, beta: i32) -> i32 {
        -self.evaluate_tt(ply + 1, remaining - 1, -beta, -alpha)
    }

    fn evaluate_tt(&mut self, ply: usize, remaining: i32, alpha: i32, beta: i32) -> i32 {
        if self.aborted {
            return self.static_eval(ply);
        }
        if remaining <= 0 {
            return self.evaluate_quiet(ply, alpha, beta);
        }

        self.pv.truncate(ply);

        if self.positions[ply].halfmove_clock() > 99 {
            return 0;
        }
        if self.is_repetition(ply) {
            return 0;
        }

        // No line from here ends sooner than being mated now or mating next move
        let alpha = alpha.max(checkmate(ply));
        let beta = beta.min(-checkmate(ply + 1)).min(MAX_BETA);
        if alpha >= beta {
            return alpha;
        }

        let hash = self.positions[ply].hash();
        let probe = self.tt.probe(hash, remaining, ply, alpha, beta);
        if let Some(score) = probe.score {
            return score;
        }

        let mut best_move = probe.best_move;
        let score = self.evaluate(ply, remaining, alpha, beta, &mut best_move);
        if !self.aborted {
            self.tt
                .store(hash, remaining, ply, alpha, beta, score, best_move);
        }
        score
    }

    /// Next legal move of the node at `ply`, generating stages lazily.
    fn play(&mut self, ply: usize, state: &mut PlayState) -> Option<Move> {
        let current = self.positions[ply];
        loop {
            if state.next == self.moves[ply].len() {
                match state.stage {
                    Stage::New => {
                        current.collect_captures(&mut self.moves[ply]);
                        state.stage = Stage::Captures;
                    }
                    Stage::Captures => {
                        let killers = self.killers.get(ply);
                        current.collect_playable_quiets(&mut self.moves[ply], &killers);
                        state.stage = Stage::Killers;
                    }
                    Stage::Killers => {
                        current.collect_quiets(&mut self.moves[ply]);
                        self.strip_killers(ply, state.next);
                        state.stage = Stage::SortedQuiets;
                    }
                    Stage::SortedQuiets | Stage::Quiets => return None,
                }
                continue;
            }

            match state.stage {
                Stage::Captures => {
                    pick_best_capture(&mut self.moves[ply].as_mut_slice()[state.next..]);
                }
                Stage::SortedQuiets => {
                    let value = self.pick_best_history(ply, state.next);
                    if f64::from(value) < f64::from(state.played).sqrt() {
                        state.stage = Stage::Quiets;
                    }
                }
                _ => {}
            }

            let mv = self.moves[ply][state.next];
            state.next += 1;
            if state.stage != Stage::New && mv == state.tt_move {
                continue;
            }
            if self.play_move(ply, mv) {
                state.played += 1;
                return Some(mv);
            }
        }
    }

    fn strip_killers(&mut self, ply: usize, first: usize) {
        let killers = self.killers.get(ply);
        let list = &mut self.moves[ply];
        let mut i = first;
        while i < list.len() {
            if killers.contains(&list[i]) {
                list.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Move the quiet with the best history value to `first` and return
    /// that value. Earlier entries win ties.
    fn pick_best_history(&mut self, ply: usize, first: usize) -> f32 {
        let list = &mut self.moves[ply];
        let mut best = first;
        let mut best_value = self.history.value(list[first]);
        for i in first + 1..list.len() {
            let value = self.history.value(list[i]);
            if value > best_value {
                best = i;
                best_value = value;
            }
        }
        list.swap(first, best);
        best_value
    }

    fn evaluate(
        &mut self,
        ply: usize,
        remaining: i32,
        mut alpha: i32,
        beta: i32,
        best_move: &mut Move,
    ) -> i32 {
        self.nodes += 1;

        let current = self.positions[ply];
        let in_check = current.in_check();
        let eval = self.static_eval(ply);

        // If passing still fails high, a real move would too
        if !in_check && eval > beta && !current.is_endgame() && self.allow_null_move(ply) {
            self.positions[ply + 1] = current.null_move();
            let reduced = remaining - self.params.null_move_reduction;
            if self.evaluate_next(ply, reduced, beta - 1, beta) >= beta {
                return beta;
            }
        }

        let mut state = PlayState {
            stage: Stage::New,
            next: 0,
            played: 0,
            tt_move: Move::NULL,
        };
        self.moves[ply].clear();
        if !best_move.is_null() && current.is_pseudo_legal(*best_move) {
            self.moves[ply].push(*best_move);
            state.tt_move = *best_move;
        }

        while let Some(mv) = self.play(ply, &mut state) {
            let null_window = alpha == beta - 1;
            if !in_check
                && state.stage == Stage::Quiets
                && remaining <= self.params.late_quiet_skip_depth
                && null_window
            {
                return alpha;
            }

            self.history.played(remaining, mv);

            if remaining > 1 && state.played > 1 {
                let mut reduction = 0;
                if !in_check && state.stage >= Stage::Quiets && !self.positions[ply + 1].in_check()
                {
                    reduction += self.params.lmr_quiet_reduction;
                }
                if !in_check && current.is_bad_exchange(mv) {
                    reduction += self.params.lmr_see_reduction;
                }
                if self.evaluate_next(ply, remaining - reduction, alpha, alpha + 1) <= alpha {
                    continue;
                }
            }

            let score = self.evaluate_next(ply, remaining, alpha, beta);
            if score <= alpha {
                continue;
            }

            alpha = score;
            *best_move = mv;
            self.pv.extend(ply, remaining as usize, mv);

            if state.stage >= Stage::Killers {
                self.history.good(remaining, mv);
                self.killers.add(ply, mv);
            }

            if score >= beta {
                return beta;
            }
        }

        if state.played == 0 {
            return if in_check { checkmate(ply) } else { 0 };
        }
        alpha
    }

    /// Quiescence: captures only, or every move while in check.
    fn evaluate_quiet(&mut self, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;

        let current = self.positions[ply];
        let in_check = current.in_check();
        if !in_check {
            let stand_pat = self.static_eval(ply);
            if stand_pat >= beta {
                return beta;
            }
            alpha = alpha.max(stand_pat);
        }

        self.aborted |= self.forced_cut(ply);
        if self.aborted {
            return self.static_eval(ply);
        }

        let mut played = false;
        self.moves[ply].clear();
        current.collect_captures(&mut self.moves[ply]);
        let mut i = 0;
        while i < self.moves[ply].len() {
            pick_best_capture(&mut self.moves[ply].as_mut_slice()[i..]);
            let mv = self.moves[ply][i];
            i += 1;

            if !in_check && current.is_bad_exchange(mv) {
                continue;
            }
            if self.play_move(ply, mv) {
                played = true;
                let score = -self.evaluate_quiet(ply + 1, -beta, -alpha);
                if score >= beta {
                    return beta;
                }
                alpha = alpha.max(score);
            }
        }

        if !in_check {
            return alpha;
        }

        let first = self.moves[ply].len();
        current.collect_quiets(&mut self.moves[ply]);
        for i in first..self.moves[ply].len() {
            let mv = self.moves[ply][i];
            if self.play_move(ply, mv) {
                played = true;
                let score = -self.evaluate_quiet(ply + 1, -beta, -alpha);
                if score >= beta {
                    return beta;
                }
                alpha = alpha.max(score);
            }
        }

        if played {
            alpha
        } else {
            checkmate(ply)
        }
    }
}

/// Tunable constants of the iterative search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    /// Half-width of the first aspiration window around the previous score.
    pub aspiration_window: i32,
    pub null_move_reduction: i32,
    /// Extra reduction for late quiet moves that do not give check.
    pub lmr_quiet_reduction: i32,
    /// Extra reduction for moves that lose material by exchange.
    pub lmr_see_reduction: i32,
    /// Reduction of the null-window probe for quiet late root moves.
    pub root_reduction: i32,
    /// Null-window nodes this shallow stop once only unsorted quiets remain.
    pub late_quiet_skip_depth: i32,
    /// Nodes between two polls of the kill-switch.
    pub kill_switch_interval: u32,
    /// History counters are halved once the played total exceeds this.
    pub history_halving_threshold: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            aspiration_window: 40,
            null_move_reduction: 4,
            lmr_quiet_reduction: 2,
            lmr_see_reduction: 2,
            root_reduction: 2,
            late_quiet_skip_depth: 2,
            kill_switch_interval: 50,
            history_halving_threshold: 1 << 40,
        }
    }
}

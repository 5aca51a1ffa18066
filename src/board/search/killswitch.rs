//! Cooperative search abort.

/// A "stop now?" predicate supplied by the caller.
pub type KillSwitchFn = Box<dyn FnMut() -> bool + Send>;

/// Polls a [`KillSwitchFn`] every `interval` queries and latches the first
/// `true` it sees.
pub struct KillSwitch {
    check: Option<KillSwitchFn>,
    interval: u32,
    queries: u32,
    aborted: bool,
}

impl KillSwitch {
    #[must_use]
    pub fn new(check: Option<KillSwitchFn>, interval: u32) -> Self {
        let mut switch = KillSwitch {
            check,
            interval: interval.max(1),
            queries: 0,
            aborted: false,
        };
        switch.rearm();
        switch
    }

    /// A switch that never fires.
    #[must_use]
    pub fn never() -> Self {
        Self::new(None, 1)
    }

    /// Forget a previous abort and poll once right away.
    pub fn rearm(&mut self) {
        self.queries = 0;
        self.aborted = self.check.as_mut().is_some_and(|check| check());
    }

    /// Has the switch fired? Cheap except on every `interval`-th call.
    #[inline]
    pub fn get(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        self.queries += 1;
        if self.queries >= self.interval {
            self.queries = 0;
            if let Some(check) = self.check.as_mut() {
                self.aborted = check();
            }
        }
        self.aborted
    }
}

impl Default for KillSwitch {
    fn default() -> Self {
        Self::never()
    }
}

impl std::fmt::Debug for KillSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KillSwitch")
            .field("armed", &self.check.is_some())
            .field("interval", &self.interval)
            .field("aborted", &self.aborted)
            .finish()
    }
}

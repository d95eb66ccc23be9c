use crate::util::RunMode;

/// A stepping run together with the graph generation it was computed against.
pub(crate) struct ActiveRun<R> {
    pub run: R,
    pub mode: RunMode,
    /// Generation counter at the time the run was started.
    pub generation: u64,
}

impl<R> ActiveRun<R> {
    pub fn new(run: R, mode: RunMode, generation: u64) -> Self {
        Self {
            run,
            mode,
            generation,
        }
    }

    pub fn is_stale(&self, current: u64) -> bool {
        self.generation < current
    }
}

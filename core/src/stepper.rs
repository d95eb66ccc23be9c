//! Replay cursor over a recorded step sequence.
//!
//! Every step carries an owned snapshot of the algorithm state at the moment
//! it was recorded. Applying a step means making that snapshot the visible
//! state, so stepping to the end and jumping to the end land on the same value.

/// A recorded step that carries a full state snapshot.
pub trait Step {
    type State;

    fn state(&self) -> &Self::State;
}

/// Pull-based cursor: `next_step` applies exactly one step.
#[derive(Debug, Clone)]
pub struct Stepper<S: Step> {
    initial: S::State,
    steps: Vec<S>,
    applied: usize,
}

impl<S: Step> Stepper<S> {
    pub fn new(initial: S::State, steps: Vec<S>) -> Self {
        Self {
            initial,
            steps,
            applied: 0,
        }
    }

    /// Apply the next step. Returns None once the sequence is exhausted.
    pub fn next_step(&mut self) -> Option<&S> {
        let step = self.steps.get(self.applied)?;
        self.applied += 1;
        Some(step)
    }

    /// The most recently applied step.
    pub fn last_step(&self) -> Option<&S> {
        self.applied.checked_sub(1).map(|i| &self.steps[i])
    }

    /// Visible state: the last applied snapshot, or the initial state before any step.
    pub fn current_state(&self) -> &S::State {
        self.last_step().map(Step::state).unwrap_or(&self.initial)
    }

    pub fn initial_state(&self) -> &S::State {
        &self.initial
    }

    /// Apply every remaining step and return the terminal state.
    pub fn finish(&mut self) -> &S::State {
        self.applied = self.steps.len();
        self.current_state()
    }

    /// Rewind to the initial state.
    pub fn reset(&mut self) {
        self.applied = 0;
    }

    /// Number of steps applied so far.
    pub fn position(&self) -> usize {
        self.applied
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.applied == self.steps.len()
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }
}

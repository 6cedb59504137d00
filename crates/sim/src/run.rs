//! Single-chain runs: stop rules, outcomes and the step loop.

use clotho_chain::{ChainError, DrawSource, StateId, TransitionModel};

/// Stopping rule for a single chain run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopRule<S: StateId> {
    /// Stop after exactly `steps` sampled transitions.
    FixedHorizon {
        /// Number of transitions to sample.
        steps: usize,
    },
    /// Stop the instant the chain samples `terminal`; give up after
    /// `max_steps` transitions.
    Absorb {
        /// The absorbing state that ends the run.
        terminal: S,
        /// Step ceiling guarding against chains that never absorb.
        max_steps: usize,
    },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A fixed-horizon run completed its full horizon.
    Completed {
        /// Transitions sampled.
        steps: usize,
    },
    /// An absorption run reached the terminal state.
    Absorbed {
        /// Transitions sampled, terminal arrival included.
        steps: usize,
    },
    /// An absorption run hit the step ceiling before absorbing.
    ///
    /// A distinguished outcome, not an error: batches count it separately
    /// and exclude it from step statistics.
    DidNotConverge {
        /// The ceiling that was hit.
        max_steps: usize,
    },
}

impl RunOutcome {
    /// Steps taken by a successful run; `None` for a non-converged run.
    pub fn steps(&self) -> Option<usize> {
        match *self {
            RunOutcome::Completed { steps } | RunOutcome::Absorbed { steps } => Some(steps),
            RunOutcome::DidNotConverge { .. } => None,
        }
    }

    /// True if the run hit its step ceiling.
    pub fn did_not_converge(&self) -> bool {
        matches!(self, RunOutcome::DidNotConverge { .. })
    }
}

/// Snapshot of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord<S: StateId> {
    outcome: RunOutcome,
    trajectory: Option<Vec<S>>,
}

impl<S: StateId> RunRecord<S> {
    /// How the run ended.
    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    /// Visited states in order, if recording was enabled. The initial state
    /// is not included; entry `i` is the state after transition `i + 1`.
    pub fn trajectory(&self) -> Option<&[S]> {
        self.trajectory.as_deref()
    }
}

/// A chain instance mid-run.
///
/// Created at an initial state and mutated exactly once per sampled
/// transition.
#[derive(Debug)]
pub struct Chain<'m, S: StateId> {
    model: &'m TransitionModel<S>,
    current: S,
    steps: usize,
    trajectory: Option<Vec<S>>,
}

impl<'m, S: StateId> Chain<'m, S> {
    /// Creates a chain at `initial`; `record` enables the trajectory log.
    pub fn new(model: &'m TransitionModel<S>, initial: S, record: bool) -> Self {
        Self {
            model,
            current: initial,
            steps: 0,
            trajectory: record.then(Vec::new),
        }
    }

    /// Current state.
    pub fn current(&self) -> S {
        self.current
    }

    /// Sampled transitions taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Advances the chain by one sampled transition and returns the new
    /// state.
    ///
    /// # Errors
    ///
    /// Fails with [`ChainError::UnknownState`] if the current state has no
    /// row; the error is fatal to the run and never retried.
    pub fn advance(&mut self, source: &mut impl DrawSource) -> Result<S, ChainError> {
        let dist = self.model.distribution_for(self.current)?;
        let next = dist.sample(source.next_draw());
        self.current = next;
        self.steps += 1;
        if let Some(log) = self.trajectory.as_mut() {
            log.push(next);
        }
        Ok(next)
    }

    fn into_record(self, outcome: RunOutcome) -> RunRecord<S> {
        RunRecord {
            outcome,
            trajectory: self.trajectory,
        }
    }
}

/// Runs one chain from `initial` to completion under `rule`.
///
/// Fixed-horizon runs sample exactly the configured number of transitions
/// and end [`RunOutcome::Completed`]. Absorption runs end
/// [`RunOutcome::Absorbed`] the instant the terminal state is sampled, or
/// [`RunOutcome::DidNotConverge`] once `max_steps` transitions have been
/// taken without absorbing.
///
/// # Errors
///
/// Propagates [`ChainError`] from the model; a run is never retried.
pub fn run_chain<S: StateId>(
    model: &TransitionModel<S>,
    initial: S,
    rule: StopRule<S>,
    record_trajectory: bool,
    source: &mut impl DrawSource,
) -> Result<RunRecord<S>, ChainError> {
    let mut chain = Chain::new(model, initial, record_trajectory);
    match rule {
        StopRule::FixedHorizon { steps } => {
            for _ in 0..steps {
                chain.advance(source)?;
            }
            Ok(chain.into_record(RunOutcome::Completed { steps }))
        }
        StopRule::Absorb { terminal, max_steps } => {
            while chain.steps() < max_steps {
                if chain.advance(source)? == terminal {
                    let steps = chain.steps();
                    return Ok(chain.into_record(RunOutcome::Absorbed { steps }));
                }
            }
            Ok(chain.into_record(RunOutcome::DidNotConverge { max_steps }))
        }
    }
}

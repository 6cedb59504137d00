//! Batch execution of independent runs and on-demand aggregation.

use std::collections::BTreeMap;

use tracing::{debug, info};

use clotho_chain::{ChainError, DrawSource, StateId, TransitionModel};

use crate::run::{run_chain, RunOutcome, RunRecord, StopRule};

/// Configuration for a batch of independent runs.
#[derive(Debug, Clone, Copy)]
pub struct BatchConfig<S: StateId> {
    initial: S,
    rule: StopRule<S>,
    n_runs: usize,
    record_trajectories: bool,
}

impl<S: StateId> BatchConfig<S> {
    /// Creates a batch configuration. Trajectory recording defaults to off;
    /// absorption batches over long boards rarely want per-step history.
    pub fn new(initial: S, rule: StopRule<S>, n_runs: usize) -> Self {
        Self {
            initial,
            rule,
            n_runs,
            record_trajectories: false,
        }
    }

    /// Enables or disables per-run trajectory recording.
    pub fn with_trajectories(mut self, record: bool) -> Self {
        self.record_trajectories = record;
        self
    }

    /// Returns the initial state of every run.
    pub fn initial(&self) -> S {
        self.initial
    }

    /// Returns the stopping rule.
    pub fn rule(&self) -> StopRule<S> {
        self.rule
    }

    /// Returns the number of runs.
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    /// Returns whether trajectories are recorded.
    pub fn record_trajectories(&self) -> bool {
        self.record_trajectories
    }
}

/// Outcomes of a completed batch.
///
/// Owns one record per run in execution order. Summaries are computed on
/// demand and never mutate the records; non-converged runs are counted but
/// excluded from step statistics.
#[derive(Debug, Clone)]
pub struct BatchResult<S: StateId> {
    records: Vec<RunRecord<S>>,
}

impl<S: StateId> BatchResult<S> {
    /// Per-run records in execution order.
    pub fn records(&self) -> &[RunRecord<S>] {
        &self.records
    }

    /// Total number of runs.
    pub fn n_runs(&self) -> usize {
        self.records.len()
    }

    /// Number of runs that hit the step ceiling.
    pub fn n_failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome().did_not_converge())
            .count()
    }

    /// Step counts of successful runs, in execution order.
    pub fn success_steps(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.outcome().steps())
            .map(|s| s as f64)
            .collect()
    }

    /// Mean steps over successful runs; `None` if every run failed.
    pub fn mean_steps(&self) -> Option<f64> {
        let steps = self.success_steps();
        (!steps.is_empty()).then(|| clotho_stats::mean(&steps))
    }

    /// Sample variance of steps over successful runs; `None` if every run
    /// failed.
    pub fn variance_steps(&self) -> Option<f64> {
        let steps = self.success_steps();
        (!steps.is_empty()).then(|| clotho_stats::variance(&steps))
    }

    /// Sample standard deviation of steps over successful runs; `None` if
    /// every run failed.
    pub fn sd_steps(&self) -> Option<f64> {
        let steps = self.success_steps();
        (!steps.is_empty()).then(|| clotho_stats::sd(&steps))
    }

    /// Visit counts per state across all recorded trajectories.
    ///
    /// Empty unless trajectory recording was enabled on the batch.
    pub fn state_frequencies(&self) -> BTreeMap<S, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            if let Some(trajectory) = record.trajectory() {
                for &state in trajectory {
                    *counts.entry(state).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

/// Executes `config.n_runs()` independent runs of one model.
///
/// Runs share nothing but the read-only model; they consume one sequence of
/// uniforms from `source` in order, so a seeded source reproduces the whole
/// batch. Model errors abort the batch immediately; step-ceiling failures
/// are recorded per run and never escalate.
///
/// # Errors
///
/// Propagates the first [`ChainError`] raised by any run.
pub fn run_batch<S: StateId>(
    model: &TransitionModel<S>,
    config: &BatchConfig<S>,
    source: &mut impl DrawSource,
) -> Result<BatchResult<S>, ChainError> {
    let mut records = Vec::with_capacity(config.n_runs());
    for run_idx in 0..config.n_runs() {
        let record = run_chain(
            model,
            config.initial(),
            config.rule(),
            config.record_trajectories(),
            source,
        )?;
        if let RunOutcome::DidNotConverge { max_steps } = record.outcome() {
            debug!(run = run_idx, max_steps, "run hit step ceiling");
        }
        records.push(record);
    }

    let result = BatchResult { records };
    info!(
        n_runs = result.n_runs(),
        n_failed = result.n_failed(),
        "batch complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clotho_chain::{Distribution, ScriptedDraws};

    /// Coin-flip walk: stay on 0 with a draw below 0.5, absorb into 1
    /// otherwise.
    fn coin_model() -> TransitionModel<u8> {
        TransitionModel::from_rows([
            (0u8, Distribution::from_pairs([(0, 0.5), (1, 0.5)])),
            (1, Distribution::from_pairs([(1, 1.0)])),
        ])
        .unwrap()
    }

    /// Draws that absorb the coin model in exactly `steps` transitions.
    fn absorbing_draws(steps: usize) -> Vec<f64> {
        let mut draws = vec![0.1; steps - 1];
        draws.push(0.9);
        draws
    }

    #[test]
    fn batch_mean_excludes_non_converged() {
        let model = coin_model();
        let max_steps = 50;

        // Five runs: successes of 10, 20 and 30 steps interleaved with two
        // runs that never absorb within the ceiling.
        let mut draws = Vec::new();
        draws.extend(absorbing_draws(10));
        draws.extend(vec![0.1; max_steps]); // run 2: ceiling
        draws.extend(absorbing_draws(20));
        draws.extend(vec![0.1; max_steps]); // run 4: ceiling
        draws.extend(absorbing_draws(30));
        let mut source = ScriptedDraws::new(draws);

        let rule = StopRule::Absorb {
            terminal: 1,
            max_steps,
        };
        let config = BatchConfig::new(0, rule, 5);
        let result = run_batch(&model, &config, &mut source).unwrap();

        assert_eq!(result.n_runs(), 5);
        assert_eq!(result.n_failed(), 2);
        assert_eq!(result.success_steps(), vec![10.0, 20.0, 30.0]);
        assert_relative_eq!(result.mean_steps().unwrap(), 20.0, epsilon = 1e-12);
        assert_relative_eq!(result.variance_steps().unwrap(), 100.0, epsilon = 1e-12);
        assert_relative_eq!(result.sd_steps().unwrap(), 10.0, epsilon = 1e-12);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn batch_all_failed_has_no_mean() {
        let model = coin_model();
        let mut source = ScriptedDraws::new(vec![0.1; 6]);
        let rule = StopRule::Absorb {
            terminal: 1,
            max_steps: 3,
        };
        let config = BatchConfig::new(0, rule, 2);
        let result = run_batch(&model, &config, &mut source).unwrap();

        assert_eq!(result.n_failed(), 2);
        assert_eq!(result.mean_steps(), None);
        assert_eq!(result.variance_steps(), None);
        assert_eq!(result.sd_steps(), None);
    }

    #[test]
    fn batch_records_in_execution_order() {
        let model = coin_model();
        let mut draws = Vec::new();
        draws.extend(absorbing_draws(3));
        draws.extend(absorbing_draws(1));
        draws.extend(absorbing_draws(2));
        let mut source = ScriptedDraws::new(draws);

        let rule = StopRule::Absorb {
            terminal: 1,
            max_steps: 100,
        };
        let config = BatchConfig::new(0, rule, 3);
        let result = run_batch(&model, &config, &mut source).unwrap();
        assert_eq!(result.success_steps(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn state_frequencies_require_recording() {
        let model = coin_model();
        let rule = StopRule::Absorb {
            terminal: 1,
            max_steps: 100,
        };

        // Without recording: empty.
        let mut source = ScriptedDraws::new(absorbing_draws(2));
        let config = BatchConfig::new(0, rule, 1);
        let result = run_batch(&model, &config, &mut source).unwrap();
        assert!(result.state_frequencies().is_empty());

        // With recording: one stay on 0 plus the absorbing arrival on 1.
        let mut source = ScriptedDraws::new(absorbing_draws(2));
        let config = BatchConfig::new(0, rule, 1).with_trajectories(true);
        let result = run_batch(&model, &config, &mut source).unwrap();
        let freqs = result.state_frequencies();
        assert_eq!(freqs.get(&0), Some(&1));
        assert_eq!(freqs.get(&1), Some(&1));
    }

    #[test]
    fn batch_zero_runs_is_empty() {
        let model = coin_model();
        let mut source = ScriptedDraws::new(vec![]);
        let config = BatchConfig::new(0, StopRule::FixedHorizon { steps: 5 }, 0);
        let result = run_batch(&model, &config, &mut source).unwrap();
        assert_eq!(result.n_runs(), 0);
        assert_eq!(result.mean_steps(), None);
    }
}

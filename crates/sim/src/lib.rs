//! Single-chain simulation and batch aggregation.
//!
//! A chain run advances one sampled transition at a time until its
//! [`StopRule`] triggers: either a fixed horizon of steps or absorption into
//! a designated terminal state (with a step ceiling guarding against models
//! that never absorb). A [batch](run_batch) executes many independent runs
//! over one read-only model and aggregates step statistics, counting
//! non-converged runs separately so they never bias a mean.
//!
//! # Quick start
//!
//! ```rust
//! use clotho_chain::{Distribution, ScriptedDraws, TransitionModel};
//! use clotho_sim::{run_chain, RunOutcome, StopRule};
//!
//! let model = TransitionModel::from_rows([
//!     (0u32, Distribution::from_pairs([(0, 0.5), (1, 0.5)])),
//!     (1, Distribution::from_pairs([(1, 1.0)])),
//! ])?;
//!
//! let rule = StopRule::Absorb { terminal: 1, max_steps: 100 };
//! let mut draws = ScriptedDraws::new(vec![0.2, 0.9]);
//! let record = run_chain(&model, 0, rule, false, &mut draws)?;
//! assert_eq!(record.outcome(), RunOutcome::Absorbed { steps: 2 });
//! # Ok::<(), clotho_chain::ChainError>(())
//! ```

pub mod batch;
pub mod run;

pub use batch::{run_batch, BatchConfig, BatchResult};
pub use run::{run_chain, Chain, RunOutcome, RunRecord, StopRule};

//! Finite discrete-time Markov chains: state spaces, transition models and
//! sampling.
//!
//! A [`TransitionModel`] maps every state of a finite space to a
//! [`Distribution`] over next states. Models are built either from explicit
//! per-state rows or derived from a [`BoardConfig`] (die faces, snake/ladder
//! redirects, overshoot policy). Sampling is cumulative-probability inversion
//! over an externally supplied uniform draw, so every probabilistic decision
//! is replayable.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │   construct   │────▶│   validate     │────▶│     sample       │
//!  │  (rows/board) │     │  (row mass ~1) │     │  (CDF inversion) │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use clotho_chain::{Distribution, TransitionModel};
//!
//! let model = TransitionModel::from_rows([
//!     (0u32, Distribution::from_pairs([(0, 0.5), (1, 0.5)])),
//!     (1, Distribution::from_pairs([(1, 1.0)])),
//! ])?;
//!
//! let next = model.distribution_for(0)?.sample(0.7);
//! assert_eq!(next, 1);
//! # Ok::<(), clotho_chain::ChainError>(())
//! ```

pub mod board;
pub mod distribution;
pub mod draw;
pub mod error;
pub mod model;
pub mod state;

pub use board::{BoardConfig, Overshoot};
pub use distribution::{Distribution, MASS_EPSILON};
pub use draw::{DrawSource, ScriptedDraws};
pub use error::ChainError;
pub use model::TransitionModel;
pub use state::StateId;

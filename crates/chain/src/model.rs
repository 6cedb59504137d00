//! Transition models over finite state spaces.

use std::collections::BTreeMap;

use crate::distribution::{Distribution, MASS_EPSILON};
use crate::error::ChainError;
use crate::state::StateId;

/// Maps each state of a finite chain to a distribution over next states.
///
/// The state space is exactly the set of states with a row. Rows are
/// validated when the model is built and immutable afterwards, so a model
/// holds no interior mutability and can be shared freely across concurrent
/// runs.
#[derive(Debug, Clone)]
pub struct TransitionModel<S: StateId> {
    rows: BTreeMap<S, Distribution<S>>,
}

impl<S: StateId> TransitionModel<S> {
    /// Builds a model from explicit per-state rows.
    ///
    /// Every row is validated up front: masses must be finite and
    /// non-negative and sum to 1.0 within [`MASS_EPSILON`], so no simulation
    /// can start from a malformed model.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidDistribution`] or
    /// [`ChainError::InvalidProbability`] naming the offending state.
    pub fn from_rows(
        rows: impl IntoIterator<Item = (S, Distribution<S>)>,
    ) -> Result<Self, ChainError> {
        let mut map = BTreeMap::new();
        for (state, dist) in rows {
            dist.validate(state)?;
            map.insert(state, dist);
        }
        Ok(Self { rows: map })
    }

    /// Returns the distribution over next states for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnknownState`] if `state` has no row. A missing
    /// row means the state is outside the declared space; it is never
    /// treated as implicitly absorbing.
    pub fn distribution_for(&self, state: S) -> Result<&Distribution<S>, ChainError> {
        self.rows.get(&state).ok_or_else(|| ChainError::UnknownState {
            state: format!("{state:?}"),
        })
    }

    /// Number of states in the space.
    pub fn n_states(&self) -> usize {
        self.rows.len()
    }

    /// True if `state` has a row.
    pub fn contains(&self, state: S) -> bool {
        self.rows.contains_key(&state)
    }

    /// Iterates `(state, distribution)` rows in state order.
    pub fn rows(&self) -> impl Iterator<Item = (S, &Distribution<S>)> {
        self.rows.iter().map(|(&s, d)| (s, d))
    }

    /// True if `state` is absorbing: its self-transition carries all the
    /// row's mass.
    pub fn is_absorbing(&self, state: S) -> bool {
        match self.rows.get(&state) {
            Some(dist) => (dist.mass_for(state) - 1.0).abs() <= MASS_EPSILON,
            None => false,
        }
    }
}

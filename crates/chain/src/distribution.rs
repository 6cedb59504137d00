//! Probability distributions over next states.

use crate::error::ChainError;
use crate::state::StateId;

/// Numerical tolerance for validating that probability mass sums to 1.
pub const MASS_EPSILON: f64 = 1e-9;

/// A probability distribution over destination states.
///
/// Entries are kept in registration order; adding mass for a destination that
/// is already present accumulates onto the existing entry. Sampling walks the
/// entries in that same order, so a distribution's behaviour is a pure
/// function of how it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<S: StateId> {
    entries: Vec<(S, f64)>,
}

impl<S: StateId> Distribution<S> {
    /// Creates an empty distribution.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a distribution from `(destination, probability)` pairs.
    ///
    /// Repeated destinations accumulate their mass.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let mut dist = Self::new();
        for (dest, mass) in pairs {
            dist.add_mass(dest, mass);
        }
        dist
    }

    /// Adds probability mass for a destination.
    ///
    /// A destination that is already present keeps its position and gains
    /// the extra mass; a new destination is appended.
    pub fn add_mass(&mut self, dest: S, mass: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(d, _)| *d == dest) {
            entry.1 += mass;
        } else {
            self.entries.push((dest, mass));
        }
    }

    /// Probability of transitioning to `dest`, 0.0 if absent.
    pub fn mass_for(&self, dest: S) -> f64 {
        self.entries
            .iter()
            .find(|(d, _)| *d == dest)
            .map_or(0.0, |(_, p)| *p)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[(S, f64)] {
        &self.entries
    }

    /// Number of destinations with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no destination has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total probability mass across all entries.
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Validates this distribution as the outgoing row of `source`.
    ///
    /// Every mass must be finite and non-negative, and the total must be
    /// within [`MASS_EPSILON`] of 1.0. An empty row fails the sum check:
    /// a state without outgoing mass is not enumerable, never implicitly
    /// absorbing.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidProbability`] or
    /// [`ChainError::InvalidDistribution`] naming `source`.
    pub fn validate(&self, source: S) -> Result<(), ChainError> {
        for &(dest, mass) in &self.entries {
            if !mass.is_finite() || mass < 0.0 {
                return Err(ChainError::InvalidProbability {
                    state: format!("{source:?}"),
                    dest: format!("{dest:?}"),
                    value: mass,
                });
            }
        }
        let sum = self.total_mass();
        if (sum - 1.0).abs() > MASS_EPSILON {
            return Err(ChainError::InvalidDistribution {
                state: format!("{source:?}"),
                sum,
            });
        }
        Ok(())
    }

    /// Samples a destination by cumulative-probability inversion.
    ///
    /// Walks the entries in registration order, accumulating mass, and
    /// returns the first destination whose cumulative mass strictly exceeds
    /// `draw`. Accumulating many small masses can leave the final cumulative
    /// sum just below 1.0; in that case the last destination is returned so
    /// a draw near 1.0 never fails.
    ///
    /// # Panics
    ///
    /// Panics if the distribution is empty. Rows of a validated model are
    /// never empty.
    pub fn sample(&self, draw: f64) -> S {
        assert!(
            !self.entries.is_empty(),
            "cannot sample an empty distribution"
        );
        let mut cumulative = 0.0;
        for &(dest, mass) in &self.entries {
            cumulative += mass;
            if cumulative > draw {
                return dest;
            }
        }
        // Rounding shortfall: fall back to the last destination.
        self.entries[self.entries.len() - 1].0
    }
}

impl<S: StateId> Default for Distribution<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_pairs_preserves_order() {
        let dist = Distribution::from_pairs([(3u32, 0.2), (1, 0.5), (2, 0.3)]);
        let dests: Vec<u32> = dist.entries().iter().map(|&(d, _)| d).collect();
        assert_eq!(dests, vec![3, 1, 2]);
    }

    #[test]
    fn add_mass_accumulates() {
        let mut dist = Distribution::new();
        dist.add_mass(5u32, 0.25);
        dist.add_mass(7, 0.5);
        dist.add_mass(5, 0.25);
        assert_eq!(dist.len(), 2);
        assert_relative_eq!(dist.mass_for(5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist.mass_for(7), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn mass_for_absent_is_zero() {
        let dist = Distribution::from_pairs([(1u32, 1.0)]);
        assert_eq!(dist.mass_for(2), 0.0);
    }

    #[test]
    fn total_mass_sums_entries() {
        let dist = Distribution::from_pairs([(0u32, 0.1), (1, 0.2), (2, 0.7)]);
        assert_relative_eq!(dist.total_mass(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn validate_ok() {
        let dist = Distribution::from_pairs([(0u32, 0.5), (1, 0.5)]);
        assert!(dist.validate(0).is_ok());
    }

    #[test]
    fn validate_bad_sum() {
        let dist = Distribution::from_pairs([(0u32, 0.5), (1, 0.6)]);
        let err = dist.validate(9).unwrap_err();
        match err {
            ChainError::InvalidDistribution { state, sum } => {
                assert_eq!(state, "9");
                assert_relative_eq!(sum, 1.1, epsilon = 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn validate_empty_fails() {
        let dist: Distribution<u32> = Distribution::new();
        assert!(matches!(
            dist.validate(4),
            Err(ChainError::InvalidDistribution { .. })
        ));
    }

    #[test]
    fn validate_negative_mass() {
        let dist = Distribution::from_pairs([(0u32, -0.2), (1, 1.2)]);
        assert!(matches!(
            dist.validate(0),
            Err(ChainError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn validate_nan_mass() {
        let dist = Distribution::from_pairs([(0u32, f64::NAN), (1, 1.0)]);
        assert!(matches!(
            dist.validate(0),
            Err(ChainError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn sample_selects_by_cumulative_mass() {
        let dist = Distribution::from_pairs([(0u32, 0.8), (1, 0.15), (2, 0.05)]);
        assert_eq!(dist.sample(0.0), 0);
        assert_eq!(dist.sample(0.79), 0);
        assert_eq!(dist.sample(0.8), 1);
        assert_eq!(dist.sample(0.94), 1);
        assert_eq!(dist.sample(0.96), 2);
    }

    #[test]
    fn sample_is_pure() {
        let dist = Distribution::from_pairs([(0u32, 0.3), (1, 0.3), (2, 0.4)]);
        let draws = [0.0, 0.29, 0.3, 0.59, 0.6, 0.99];
        let first: Vec<u32> = draws.iter().map(|&d| dist.sample(d)).collect();
        let second: Vec<u32> = draws.iter().map(|&d| dist.sample(d)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn sample_skips_zero_mass_head() {
        let dist = Distribution::from_pairs([(0u32, 0.0), (1, 1.0)]);
        assert_eq!(dist.sample(0.0), 1);
    }

    #[test]
    fn sample_shortfall_returns_last() {
        // Total mass 0.99999999 < draw: the walk exhausts every entry and
        // must fall back to the last destination instead of failing.
        let dist = Distribution::from_pairs([(0u32, 0.3), (1, 0.3), (2, 0.39999999)]);
        assert_eq!(dist.sample(0.999999999), 2);
    }

    #[test]
    #[should_panic(expected = "cannot sample an empty distribution")]
    fn sample_empty_panics() {
        let dist: Distribution<u32> = Distribution::new();
        dist.sample(0.5);
    }
}

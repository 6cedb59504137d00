//! Derived transition models for board-style chains.
//!
//! A board chain walks squares `0..=size` with a fair die; landing on a
//! redirect square (snake or ladder) moves the piece once, and the square
//! `size` is the absorbing terminal. The transition model is derived from
//! those rules rather than authored row by row.

use std::collections::BTreeMap;

use tracing::debug;

use crate::distribution::Distribution;
use crate::error::ChainError;
use crate::model::TransitionModel;

/// Policy resolving a candidate position beyond the terminal square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overshoot {
    /// The move is forfeited; the piece stays on its current square.
    Stay,
    /// The piece reflects off the terminal square by the excess.
    Bounce,
}

impl Overshoot {
    /// Maps `candidate` back into `0..=terminal` for a move starting at
    /// `from`. In-range candidates pass through unchanged.
    fn resolve(self, from: u32, candidate: u32, terminal: u32) -> u32 {
        if candidate <= terminal {
            return candidate;
        }
        match self {
            Overshoot::Stay => from,
            Overshoot::Bounce => terminal - (candidate - terminal),
        }
    }
}

/// Configuration for deriving a board-game transition model.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use clotho_chain::{BoardConfig, Overshoot};
///
/// let config = BoardConfig::new()
///     .with_size(100)
///     .with_redirect(16, 6)
///     .with_redirect(1, 38)
///     .with_overshoot(Overshoot::Stay);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BoardConfig {
    size: u32,
    die_faces: u32,
    redirects: BTreeMap<u32, u32>,
    overshoot: Overshoot,
}

impl BoardConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `size = 100`, `die_faces = 6`, no redirects, overshoot
    /// policy [`Overshoot::Stay`].
    pub fn new() -> Self {
        Self {
            size: 100,
            die_faces: 6,
            redirects: BTreeMap::new(),
            overshoot: Overshoot::Stay,
        }
    }

    /// Sets the board size (the index of the terminal square).
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Sets the number of equally likely die faces.
    pub fn with_die_faces(mut self, faces: u32) -> Self {
        self.die_faces = faces;
        self
    }

    /// Adds a redirect (snake or ladder) from one square to another.
    pub fn with_redirect(mut self, from: u32, to: u32) -> Self {
        self.redirects.insert(from, to);
        self
    }

    /// Adds many redirects at once.
    pub fn with_redirects(mut self, redirects: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.redirects.extend(redirects);
        self
    }

    /// Sets the overshoot policy.
    pub fn with_overshoot(mut self, policy: Overshoot) -> Self {
        self.overshoot = policy;
        self
    }

    // --- Accessors ---

    /// Returns the board size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of die faces.
    pub fn die_faces(&self) -> u32 {
        self.die_faces
    }

    /// Returns the redirect map.
    pub fn redirects(&self) -> &BTreeMap<u32, u32> {
        &self.redirects
    }

    /// Returns the overshoot policy.
    pub fn overshoot(&self) -> Overshoot {
        self.overshoot
    }

    /// Validates this configuration.
    ///
    /// Checks that the board and die are non-empty, that a bouncing die
    /// cannot reflect past square 0, and that every redirect maps a
    /// non-terminal square in `1..size` to a different square in
    /// `0..=size`.
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.size == 0 {
            return Err(ChainError::InvalidBoard {
                reason: "size must be at least 1".to_string(),
            });
        }
        if self.die_faces == 0 {
            return Err(ChainError::InvalidBoard {
                reason: "die must have at least one face".to_string(),
            });
        }
        if self.overshoot == Overshoot::Bounce && self.die_faces > self.size {
            return Err(ChainError::InvalidBoard {
                reason: format!(
                    "a {}-face die can bounce past square 0 on a board of size {}",
                    self.die_faces, self.size
                ),
            });
        }
        for (&from, &to) in &self.redirects {
            if from == 0 || from >= self.size {
                return Err(ChainError::InvalidRedirect {
                    from,
                    to,
                    reason: format!("source must be a non-terminal square in 1..{}", self.size),
                });
            }
            if to > self.size {
                return Err(ChainError::InvalidRedirect {
                    from,
                    to,
                    reason: "target beyond the terminal square".to_string(),
                });
            }
            if from == to {
                return Err(ChainError::InvalidRedirect {
                    from,
                    to,
                    reason: "source and target are the same square".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Derives the transition model for this board.
    ///
    /// For every non-terminal square, each die face lands with mass
    /// `1 / die_faces`: the candidate square is resolved through the
    /// overshoot policy, then through at most one redirect lookup (redirects
    /// never chain within a step), and the mass accumulates on the landing
    /// square. The terminal row is forced absorbing. Rows are re-validated
    /// when the model is assembled even though the construction sums to 1
    /// by design.
    ///
    /// # Errors
    ///
    /// Returns the first [`validate`](Self::validate) failure, or a row
    /// validation error from [`TransitionModel::from_rows`].
    pub fn build(&self) -> Result<TransitionModel<u32>, ChainError> {
        self.validate()?;

        let mass = 1.0 / f64::from(self.die_faces);
        let mut rows = Vec::with_capacity(self.size as usize + 1);
        for from in 0..self.size {
            let mut dist = Distribution::new();
            for face in 1..=self.die_faces {
                let candidate = self.overshoot.resolve(from, from + face, self.size);
                // Exactly one redirect lookup per die outcome.
                let landed = self.redirects.get(&candidate).copied().unwrap_or(candidate);
                dist.add_mass(landed, mass);
            }
            rows.push((from, dist));
        }
        rows.push((self.size, Distribution::from_pairs([(self.size, 1.0)])));

        debug!(
            size = self.size,
            die_faces = self.die_faces,
            n_redirects = self.redirects.len(),
            "derived board model"
        );
        TransitionModel::from_rows(rows)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

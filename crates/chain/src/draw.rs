//! Sources of uniform draws in `[0, 1)`.

/// A source of uniform random draws in `[0, 1)`.
///
/// The sampler never generates randomness internally; every probabilistic
/// decision consumes exactly one draw from a source owned by the caller.
/// Any [`rand::Rng`] is a source, so production code threads a seeded
/// [`StdRng`](rand::rngs::StdRng) through; tests use [`ScriptedDraws`] to
/// replay a fixed sequence.
pub trait DrawSource {
    /// Returns the next uniform draw in `[0, 1)`.
    fn next_draw(&mut self) -> f64;
}

impl<R: rand::Rng> DrawSource for R {
    fn next_draw(&mut self) -> f64 {
        self.random()
    }
}

/// Replays a fixed sequence of draws.
///
/// A test instrument: scripting the draws makes every sampled transition
/// deterministic, so scenarios assert exact trajectories and step counts.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    next: usize,
}

impl ScriptedDraws {
    /// Creates a source that yields `draws` in order.
    ///
    /// # Panics
    ///
    /// Panics if any draw is outside `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> Self {
        for &d in &draws {
            assert!((0.0..1.0).contains(&d), "scripted draw {d} outside [0, 1)");
        }
        Self { draws, next: 0 }
    }

    /// Number of draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len() - self.next
    }
}

impl DrawSource for ScriptedDraws {
    /// # Panics
    ///
    /// Panics when the script is exhausted. Recycling draws silently would
    /// mask an under-provisioned script.
    fn next_draw(&mut self) -> f64 {
        let Some(&draw) = self.draws.get(self.next) else {
            panic!("scripted draws exhausted after {} draws", self.next);
        };
        self.next += 1;
        draw
    }
}

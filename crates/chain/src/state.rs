//! State identifiers for finite chains.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier for a state in a finite chain.
///
/// Implemented for every `Copy` type that is hashable, totally ordered and
/// debug-printable; board positions (`u32`) and small fieldless enums both
/// qualify. The state space itself is whatever set of identifiers a
/// [`TransitionModel`](crate::TransitionModel) has rows for, and it is fixed
/// for the lifetime of the model.
pub trait StateId: Copy + Eq + Hash + Ord + Debug {}

impl<T: Copy + Eq + Hash + Ord + Debug> StateId for T {}

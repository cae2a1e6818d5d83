//! Classical (equiprobable) probability model over a finite set of outcomes.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Capability required from outcome values: set membership needs value
/// equality and hashing, and events keep their own copies of outcomes.
pub trait Outcome: Eq + Hash + Clone {}

impl<T: Eq + Hash + Clone> Outcome for T {}

/// A finite sample space in which every outcome is equally likely.
///
/// A `ProbabilityModel` is a handle: cloning it yields another handle to the
/// *same* sample space, and events compare models by identity rather than by
/// their outcome sets. Use [`ProbabilityModel::fork`] to obtain a distinct
/// space with the same outcomes.
pub struct ProbabilityModel<T> {
    outcomes: Rc<RefCell<HashSet<T>>>,
}

impl<T: Outcome> ProbabilityModel<T> {
    pub fn new<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            outcomes: Rc::new(RefCell::new(outcomes.into_iter().collect())),
        }
    }

    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Snapshot of the current outcome set.
    pub fn outcomes(&self) -> HashSet<T> {
        self.outcomes.borrow().clone()
    }

    /// Outcomes in ascending order, for stable display.
    pub fn sorted_outcomes(&self) -> Vec<T>
    where
        T: Ord,
    {
        let mut ordered: Vec<T> = self.outcomes.borrow().iter().cloned().collect();
        ordered.sort();
        ordered
    }

    /// Returns `true` when the outcome was not already part of the space.
    pub fn add_outcome(&self, outcome: T) -> bool {
        self.outcomes.borrow_mut().insert(outcome)
    }

    /// Returns `true` when the outcome was part of the space.
    pub fn remove_outcome(&self, outcome: &T) -> bool {
        self.outcomes.borrow_mut().remove(outcome)
    }

    pub fn count_outcomes(&self) -> usize {
        self.outcomes.borrow().len()
    }

    pub fn contains(&self, outcome: &T) -> bool {
        self.outcomes.borrow().contains(outcome)
    }

    /// Probability of a single outcome: `1/n` when present, `0.0` otherwise.
    pub fn probability(&self, outcome: &T) -> f64 {
        let outcomes = self.outcomes.borrow();
        if outcomes.is_empty() || !outcomes.contains(outcome) {
            return 0.0;
        }
        1.0 / outcomes.len() as f64
    }

    /// Probability of a sequence of outcomes: the number of entries present
    /// in the space divided by its cardinality.
    ///
    /// The sequence is not deduplicated; an outcome listed twice counts twice.
    pub fn probability_of<'a, I>(&self, candidates: I) -> f64
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let outcomes = self.outcomes.borrow();
        if outcomes.is_empty() {
            return 0.0;
        }
        let favorable = candidates
            .into_iter()
            .filter(|candidate| outcomes.contains(*candidate))
            .count();
        favorable as f64 / outcomes.len() as f64
    }

    /// Identity comparison: `true` only for handles to the same space.
    pub fn same_space(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.outcomes, &other.outcomes)
    }

    /// Creates a new, distinct space holding a copy of the current outcomes.
    pub fn fork(&self) -> Self {
        Self::new(self.outcomes.borrow().iter().cloned())
    }

    pub(crate) fn with_outcomes<R>(&self, f: impl FnOnce(&HashSet<T>) -> R) -> R {
        f(&self.outcomes.borrow())
    }
}

impl<T> Clone for ProbabilityModel<T> {
    fn clone(&self) -> Self {
        Self {
            outcomes: Rc::clone(&self.outcomes),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ProbabilityModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbabilityModel")
            .field("outcomes", &self.outcomes.borrow())
            .finish()
    }
}

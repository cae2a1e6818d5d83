//! Events over a classical probability model and their set algebra.

use std::collections::HashSet;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not, Sub};

use tracing::{debug, trace};

use crate::combinations::Combinations;
use crate::error::EventError;
use crate::model::{Outcome, ProbabilityModel};

/// Absolute tolerance used whenever two probabilities are compared for equality.
pub const INDEPENDENCE_TOLERANCE: f64 = 1e-9;

fn probabilities_match(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < INDEPENDENCE_TOLERANCE
}

/// A subset of the outcomes of one particular [`ProbabilityModel`].
///
/// The favorable outcomes are filtered against the model when the event is
/// built; later changes to the model are not reflected in existing events.
#[derive(Clone)]
pub struct Event<T> {
    model: ProbabilityModel<T>,
    outcomes: HashSet<T>,
}

impl<T: Outcome> Event<T> {
    /// Builds an event from candidate outcomes, keeping only those present in `model`.
    pub fn new<I>(model: &ProbabilityModel<T>, favorable: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut dropped = 0usize;
        let outcomes: HashSet<T> = model.with_outcomes(|space| {
            favorable
                .into_iter()
                .filter(|candidate| {
                    let present = space.contains(candidate);
                    if !present {
                        dropped += 1;
                    }
                    present
                })
                .collect()
        });
        if dropped > 0 {
            trace!(
                target: "probspace_core::event",
                dropped,
                kept = outcomes.len(),
                "discarded candidates outside the sample space"
            );
        }
        Self {
            model: model.clone(),
            outcomes,
        }
    }

    /// The impossible event.
    pub fn empty(model: &ProbabilityModel<T>) -> Self {
        Self::new(model, std::iter::empty())
    }

    /// The certain event: every outcome of the model.
    pub fn certain(model: &ProbabilityModel<T>) -> Self {
        Self::new(model, model.outcomes())
    }

    pub fn model(&self) -> &ProbabilityModel<T> {
        &self.model
    }

    pub fn probability(&self) -> f64 {
        self.model.probability_of(&self.outcomes)
    }

    pub fn favorable_outcomes(&self) -> &HashSet<T> {
        &self.outcomes
    }

    pub fn is_favorable(&self, outcome: &T) -> bool {
        self.outcomes.contains(outcome)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of events the model admits: `2^n` for `n` elementary outcomes.
    ///
    /// Saturates at `u128::MAX` for models with 128 or more outcomes.
    pub fn events_count(&self) -> u128 {
        u32::try_from(self.model.count_outcomes())
            .ok()
            .and_then(|n| 1u128.checked_shl(n))
            .unwrap_or(u128::MAX)
    }

    pub fn complement(&self) -> Self {
        let rest: Vec<T> = self.model.with_outcomes(|space| {
            space
                .iter()
                .filter(|outcome| !self.outcomes.contains(*outcome))
                .cloned()
                .collect()
        });
        Self::new(&self.model, rest)
    }

    pub fn union(&self, other: &Self) -> Result<Self, EventError> {
        self.ensure_same_model(other)?;
        Ok(Self::new(
            &self.model,
            self.outcomes.union(&other.outcomes).cloned(),
        ))
    }

    pub fn intersection(&self, other: &Self) -> Result<Self, EventError> {
        self.ensure_same_model(other)?;
        Ok(Self::new(
            &self.model,
            self.outcomes.intersection(&other.outcomes).cloned(),
        ))
    }

    /// Outcomes of `self` that are not in `other` (`A \ B`).
    pub fn difference(&self, other: &Self) -> Result<Self, EventError> {
        self.ensure_same_model(other)?;
        Ok(Self::new(
            &self.model,
            self.outcomes.difference(&other.outcomes).cloned(),
        ))
    }

    pub fn symmetric_difference(&self, other: &Self) -> Result<Self, EventError> {
        self.ensure_same_model(other)?;
        Ok(Self::new(
            &self.model,
            self.outcomes.symmetric_difference(&other.outcomes).cloned(),
        ))
    }

    pub fn is_subset_of(&self, other: &Self) -> Result<bool, EventError> {
        self.ensure_same_model(other)?;
        Ok(self.outcomes.is_subset(&other.outcomes))
    }

    /// `P(self | condition)`; `0.0` whenever the joint probability is zero,
    /// which covers an impossible condition.
    pub fn conditional_probability(&self, condition: &Self) -> Result<f64, EventError> {
        let joint = self.intersection(condition)?.probability();
        if joint == 0.0 {
            return Ok(0.0);
        }
        Ok(joint / condition.probability())
    }

    /// Pairwise independence: `P(A ∩ B) == P(A) · P(B)` within [`INDEPENDENCE_TOLERANCE`].
    pub fn is_independent(&self, other: &Self) -> Result<bool, EventError> {
        let joint = self.intersection(other)?.probability();
        Ok(probabilities_match(
            joint,
            self.probability() * other.probability(),
        ))
    }

    pub fn are_mutually_exclusive(a: &Self, b: &Self) -> Result<bool, EventError> {
        Ok(a.intersection(b)?.is_empty())
    }

    /// Joint event of a collection, `None` when the collection is empty.
    pub fn intersect_all(events: &[Self]) -> Result<Option<Self>, EventError> {
        let Some((first, rest)) = events.split_first() else {
            return Ok(None);
        };
        rest.iter()
            .try_fold(first.clone(), |joint, event| joint.intersection(event))
            .map(Some)
    }

    /// Checks that the product rule holds for every pair of events.
    pub fn check_pairwise_independent(events: &[Self]) -> Result<bool, EventError> {
        Self::ensure_shared_model(events)?;
        Ok(Self::product_rule_holds(events, 2..=2))
    }

    /// Checks full joint independence: the product rule must hold for every
    /// subset of two or more events, not only for pairs.
    ///
    /// Enumerates all `2^n - n - 1` subsets, so it is meant for small collections.
    pub fn check_mutually_independent(events: &[Self]) -> Result<bool, EventError> {
        Self::ensure_shared_model(events)?;
        Ok(Self::product_rule_holds(events, 2..=events.len()))
    }

    fn product_rule_holds(events: &[Self], sizes: std::ops::RangeInclusive<usize>) -> bool {
        let Some(first) = events.first() else {
            return true;
        };
        let model = &first.model;
        let probabilities: Vec<f64> = events.iter().map(Event::probability).collect();

        for size in sizes {
            for combination in Combinations::new(events.len(), size) {
                let joint = model.probability_of(&joint_outcomes(events, &combination));
                let product: f64 = combination.iter().map(|&i| probabilities[i]).product();
                if !probabilities_match(joint, product) {
                    debug!(
                        target: "probspace_core::event",
                        ?combination,
                        joint,
                        product,
                        "product rule violated"
                    );
                    return false;
                }
            }
        }
        true
    }

    fn ensure_shared_model(events: &[Self]) -> Result<(), EventError> {
        if let Some((first, rest)) = events.split_first() {
            for event in rest {
                first.ensure_same_model(event)?;
            }
        }
        Ok(())
    }

    fn ensure_same_model(&self, other: &Self) -> Result<(), EventError> {
        if self.model.same_space(&other.model) {
            Ok(())
        } else {
            Err(EventError::DifferentModels)
        }
    }
}

fn joint_outcomes<T: Outcome>(events: &[Event<T>], combination: &[usize]) -> HashSet<T> {
    let Some((&head, tail)) = combination.split_first() else {
        return HashSet::new();
    };
    let mut joint = events[head].outcomes.clone();
    for &index in tail {
        joint.retain(|outcome| events[index].outcomes.contains(outcome));
    }
    joint
}

impl<T: Outcome> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event(|A|={}, P={:.2}%)",
            self.outcomes.len(),
            self.probability() * 100.0
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("outcomes", &self.outcomes)
            .finish_non_exhaustive()
    }
}

impl<T: Outcome> Not for &Event<T> {
    type Output = Event<T>;

    fn not(self) -> Event<T> {
        self.complement()
    }
}

impl<T: Outcome> BitOr for &Event<T> {
    type Output = Result<Event<T>, EventError>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<T: Outcome> BitAnd for &Event<T> {
    type Output = Result<Event<T>, EventError>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<T: Outcome> Sub for &Event<T> {
    type Output = Result<Event<T>, EventError>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

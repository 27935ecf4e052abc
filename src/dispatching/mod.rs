//! Fixture dispatching: date, slot and field allocation.
//!
//! The [`Dispatcher`] walks an ordered fixture stream and a rotating list
//! of weekday [`Rule`](crate::models::Rule)s, assigning each real fixture
//! the next free (date, slot, field) cell while keeping any team from
//! playing twice on one date.
//!
//! Slot and field choice is governed by a [`BalancePolicy`]: either the
//! earliest/first free resource, or the one the two teams have used least
//! so far (random tie-break).
//!
//! # Usage
//!
//! ```
//! use u_fixture::dispatching::{BalancePolicy, Selection};
//!
//! let policy = BalancePolicy::new(Selection::Balanced, Selection::InOrder);
//! assert_eq!(policy.slots, Selection::Balanced);
//! ```

mod availability;
mod engine;

pub use availability::{AvailabilityGrid, FieldSet};
pub use engine::{DispatchOutcome, Dispatcher};

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::FixtureId;

/// Address of a fixture across the whole schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixtureRef {
    /// Division index.
    pub division: usize,
    /// Fixture index within the division.
    pub fixture: FixtureId,
}

impl FixtureRef {
    /// Creates a fixture reference.
    pub fn new(division: usize, fixture: FixtureId) -> Self {
        Self { division, fixture }
    }
}

/// How one resource (slot or field) is picked among free candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// First candidate in the given order.
    InOrder,
    /// Least combined usage by the two teams; ties broken at random.
    #[default]
    Balanced,
}

impl Selection {
    /// Builds a selection from a "balance" flag.
    pub fn balanced_if(flag: bool) -> Self {
        if flag {
            Selection::Balanced
        } else {
            Selection::InOrder
        }
    }

    /// Picks one of `candidates`.
    ///
    /// `cost` is only consulted in [`Selection::Balanced`] mode.
    /// Returns `None` for an empty candidate list.
    pub fn pick<R, F>(&self, candidates: &[usize], cost: F, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
        F: Fn(usize) -> u32,
    {
        match self {
            Selection::InOrder => candidates.first().copied(),
            Selection::Balanced => {
                let best = candidates.iter().map(|&c| cost(c)).min()?;
                let tied: Vec<usize> = candidates
                    .iter()
                    .copied()
                    .filter(|&c| cost(c) == best)
                    .collect();
                tied.choose(rng).copied()
            }
        }
    }
}

/// Slot and field selection policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalancePolicy {
    /// Slot selection.
    pub slots: Selection,
    /// Field selection.
    pub fields: Selection,
}

impl BalancePolicy {
    /// Creates a policy.
    pub fn new(slots: Selection, fields: Selection) -> Self {
        Self { slots, fields }
    }

    /// Earliest slot, first field: fully deterministic.
    pub fn in_order() -> Self {
        Self::new(Selection::InOrder, Selection::InOrder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_in_order_takes_first() {
        let mut rng = SmallRng::seed_from_u64(0);
        let pick = Selection::InOrder.pick(&[2, 0, 1], |_| 0, &mut rng);
        assert_eq!(pick, Some(2));
    }

    #[test]
    fn test_balanced_takes_minimum() {
        let mut rng = SmallRng::seed_from_u64(0);
        let costs = [5, 1, 3];
        let pick = Selection::Balanced.pick(&[0, 1, 2], |c| costs[c], &mut rng);
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn test_balanced_random_tie_break() {
        let mut rng = SmallRng::seed_from_u64(3);
        let costs = [0, 4, 0, 0];
        let picks: HashSet<_> = (0..100)
            .filter_map(|_| Selection::Balanced.pick(&[0, 1, 2, 3], |c| costs[c], &mut rng))
            .collect();
        assert!(!picks.contains(&1));
        assert_eq!(picks.len(), 3);
    }

    #[test]
    fn test_empty_candidates() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(Selection::InOrder.pick(&[], |_| 0, &mut rng), None);
        assert_eq!(Selection::Balanced.pick(&[], |_| 0, &mut rng), None);
    }

    #[test]
    fn test_balanced_if() {
        assert_eq!(Selection::balanced_if(true), Selection::Balanced);
        assert_eq!(Selection::balanced_if(false), Selection::InOrder);
        assert_eq!(BalancePolicy::in_order().fields, Selection::InOrder);
    }
}

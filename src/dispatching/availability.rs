//! Per-date resource availability.
//!
//! The grid mirrors the active rule: one [`FieldSet`] per slot, each
//! holding the rule's field indices that are still free on the current
//! date. Removal is O(1), the "all exhausted" check is O(slots).

use crate::models::Rule;

/// Fixed-size set over a rule's field indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    free: Vec<bool>,
    remaining: usize,
}

impl FieldSet {
    /// A set containing `0..len`.
    pub fn full(len: usize) -> Self {
        Self {
            free: vec![true; len],
            remaining: len,
        }
    }

    /// Whether field `index` is still free.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.free.get(index).copied().unwrap_or(false)
    }

    /// Marks field `index` as used. Returns `false` if it was not free.
    pub fn remove(&mut self, index: usize) -> bool {
        match self.free.get_mut(index) {
            Some(slot) if *slot => {
                *slot = false;
                self.remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Number of free fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Whether no field is free.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Free field indices, in rule order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.free
            .iter()
            .enumerate()
            .filter_map(|(i, &free)| free.then_some(i))
    }
}

/// Slot × field availability for the active rule on the current date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityGrid {
    slots: Vec<FieldSet>,
}

impl AvailabilityGrid {
    /// A fully free grid for `rule`.
    pub fn for_rule(rule: &Rule) -> Self {
        let fields = rule.fields().len();
        Self {
            slots: (0..rule.slots().len())
                .map(|_| FieldSet::full(fields))
                .collect(),
        }
    }

    /// Free fields of slot `slot`.
    pub fn fields(&self, slot: usize) -> Option<&FieldSet> {
        self.slots.get(slot)
    }

    /// Slot indices with at least one free field, in rule order.
    pub fn open_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, fields)| (!fields.is_empty()).then_some(i))
    }

    /// Consumes one (slot, field) cell. Returns `false` if already taken.
    pub fn take(&mut self, slot: usize, field: usize) -> bool {
        self.slots
            .get_mut(slot)
            .is_some_and(|fields| fields.remove(field))
    }

    /// Whether every slot is out of fields.
    pub fn is_exhausted(&self) -> bool {
        self.slots.iter().all(FieldSet::is_empty)
    }

    /// Free cells left.
    pub fn remaining(&self) -> usize {
        self.slots.iter().map(FieldSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_set() {
        let mut s = FieldSet::full(3);
        assert_eq!(s.len(), 3);
        assert!(s.remove(1));
        assert!(!s.remove(1));
        assert!(!s.remove(9));
        assert!(!s.contains(1));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 2]);
        s.remove(0);
        s.remove(2);
        assert!(s.is_empty());
    }

    #[test]
    fn test_grid_exhaustion() {
        let rule = Rule::new(3, ["7:00 PM", "9:00 PM"], ["A", "B"]).unwrap();
        let mut grid = AvailabilityGrid::for_rule(&rule);
        assert_eq!(grid.remaining(), 4);
        assert_eq!(grid.open_slots().collect::<Vec<_>>(), vec![0, 1]);

        assert!(grid.take(0, 0));
        assert!(grid.take(0, 1));
        assert_eq!(grid.open_slots().collect::<Vec<_>>(), vec![1]);
        assert!(!grid.is_exhausted());

        assert!(grid.take(1, 1));
        assert!(grid.take(1, 0));
        assert!(grid.is_exhausted());
        assert!(!grid.take(1, 0));
    }
}

//! Team (competitor) model.
//!
//! A team is identified by its position in the owning division's arena
//! (`TeamId`) and carries the cumulative slot/field usage counters that
//! the dispatcher uses for balancing.
//!
//! The bye sentinel is an ordinary `Team` with `is_bye = true`. Pairing a
//! real team with it means that team sits out the round.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved name of the synthetic bye team.
pub const BYE_TEAM_NAME: &str = "bye";

/// Index of a team inside its division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub usize);

/// A competitor, or the bye sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    /// Position in the division arena.
    pub id: TeamId,
    /// Unique name within the division.
    pub name: String,
    /// Whether this is the bye sentinel.
    pub is_bye: bool,
    /// Games played per time slot.
    slot_usage: BTreeMap<NaiveTime, u32>,
    /// Games played per field.
    field_usage: BTreeMap<String, u32>,
}

impl Team {
    /// Creates a real team.
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_bye: false,
            slot_usage: BTreeMap::new(),
            field_usage: BTreeMap::new(),
        }
    }

    /// Creates the bye sentinel.
    pub fn bye(id: TeamId) -> Self {
        Self {
            is_bye: true,
            ..Self::new(id, BYE_TEAM_NAME)
        }
    }

    /// Number of games this team has been dispatched at `slot`.
    #[inline]
    pub fn slot_usage(&self, slot: NaiveTime) -> u32 {
        self.slot_usage.get(&slot).copied().unwrap_or(0)
    }

    /// Number of games this team has been dispatched on `field`.
    #[inline]
    pub fn field_usage(&self, field: &str) -> u32 {
        self.field_usage.get(field).copied().unwrap_or(0)
    }

    /// All non-zero slot counters, chronologically.
    pub fn slot_usages(&self) -> impl Iterator<Item = (NaiveTime, u32)> + '_ {
        self.slot_usage.iter().map(|(&slot, &n)| (slot, n))
    }

    /// All non-zero field counters, by field name.
    pub fn field_usages(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.field_usage.iter().map(|(field, &n)| (field.as_str(), n))
    }

    /// Total number of dispatched games.
    pub fn games_played(&self) -> u32 {
        self.slot_usage.values().sum()
    }

    /// Records one dispatched game at `slot` on `field`.
    pub(crate) fn record_usage(&mut self, slot: NaiveTime, field: &str) {
        *self.slot_usage.entry(slot).or_insert(0) += 1;
        *self.field_usage.entry(field.to_string()).or_insert(0) += 1;
    }

    /// Forgets every recorded game.
    pub(crate) fn clear_usage(&mut self) {
        self.slot_usage.clear();
        self.field_usage.clear();
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

//! Fixture (matchup) model.
//!
//! A fixture is created unassigned by the pairing generator and receives
//! exactly one [`Assignment`] (date × slot × field) from the dispatcher.
//! Fixtures against the bye sentinel are never assigned.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::TeamId;

/// Index of a fixture inside its division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FixtureId(pub usize);

/// Where and when a fixture is played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Calendar date.
    pub date: NaiveDate,
    /// Time slot.
    pub slot: NaiveTime,
    /// Field identifier.
    pub field: String,
}

/// One matchup between two teams of the same division.
#[derive(Debug, Clone, Serialize)]
pub struct Fixture {
    /// Position in the division's fixture arena.
    pub id: FixtureId,
    /// Index of the owning division in the schedule.
    pub division: usize,
    /// Zero-based round index within the division.
    pub round: usize,
    /// Listed first (home side under the orientation policy).
    pub team_a: TeamId,
    /// Listed second.
    pub team_b: TeamId,
    /// Whether one side is the bye sentinel.
    pub is_bye: bool,
    assignment: Option<Assignment>,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(date: NaiveDate, slot: NaiveTime, field: impl Into<String>) -> Self {
        Self {
            date,
            slot,
            field: field.into(),
        }
    }
}

impl Fixture {
    /// Creates an unassigned fixture.
    pub fn new(
        id: FixtureId,
        division: usize,
        round: usize,
        team_a: TeamId,
        team_b: TeamId,
        is_bye: bool,
    ) -> Self {
        Self {
            id,
            division,
            round,
            team_a,
            team_b,
            is_bye,
            assignment: None,
        }
    }

    /// Whether `team` plays in this fixture.
    #[inline]
    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == team
    }

    /// Whether this fixture pairs `a` and `b`, in either orientation.
    pub fn is_between(&self, a: TeamId, b: TeamId) -> bool {
        (self.team_a == a && self.team_b == b) || (self.team_a == b && self.team_b == a)
    }

    /// The other side of the fixture, if `team` plays in it.
    pub fn opponent(&self, team: TeamId) -> Option<TeamId> {
        if self.team_a == team {
            Some(self.team_b)
        } else if self.team_b == team {
            Some(self.team_a)
        } else {
            None
        }
    }

    /// Date/slot/field, once dispatched.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Whether the fixture has been dispatched.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assignment.is_some()
    }

    /// Assigned date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.assignment.as_ref().map(|a| a.date)
    }

    /// Assigned slot.
    pub fn slot(&self) -> Option<NaiveTime> {
        self.assignment.as_ref().map(|a| a.slot)
    }

    /// Assigned field.
    pub fn field(&self) -> Option<&str> {
        self.assignment.as_ref().map(|a| a.field.as_str())
    }

    /// Writes the assignment. Only the dispatcher calls this, once per fixture.
    pub(crate) fn assign(&mut self, assignment: Assignment) {
        debug_assert!(self.assignment.is_none(), "fixture dispatched twice");
        debug_assert!(!self.is_bye, "bye fixtures are never dispatched");
        self.assignment = Some(assignment);
    }
}

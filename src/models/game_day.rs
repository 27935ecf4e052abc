//! Game days: dispatched fixtures grouped by calendar date.
//!
//! These are the records handed to rendering layers. Each [`Game`] is a
//! resolved, self-contained view of one dispatched fixture (names instead
//! of arena indices).

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::FixtureId;

/// A dispatched fixture, resolved to names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Owning division index.
    pub division: usize,
    /// Owning division name.
    pub division_name: String,
    /// Source fixture within the division.
    pub fixture: FixtureId,
    /// First team.
    pub team_a: String,
    /// Second team.
    pub team_b: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Time slot.
    pub slot: NaiveTime,
    /// Field identifier.
    pub field: String,
}

/// All games played on one date, in dispatch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Games on that date.
    pub games: Vec<Game>,
}

impl Game {
    /// Whether the named team plays in this game.
    pub fn involves(&self, team: &str) -> bool {
        self.team_a == team || self.team_b == team
    }
}

impl GameDay {
    /// Creates an empty game day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            games: Vec::new(),
        }
    }

    /// Number of games.
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Games at a given slot.
    pub fn games_at(&self, slot: NaiveTime) -> Vec<&Game> {
        self.games.iter().filter(|g| g.slot == slot).collect()
    }

    /// Games in (slot, field) order, as a printed sheet would list them.
    pub fn sorted_games(&self) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.games.iter().collect();
        games.sort_by(|a, b| a.slot.cmp(&b.slot).then_with(|| a.field.cmp(&b.field)));
        games
    }
}

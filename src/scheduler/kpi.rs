//! Fairness metrics for a dispatched schedule.
//!
//! Measures how evenly each team's games spread over the time slots and
//! fields the rules offer.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Slot spread | max − min games of one team across all rule slots |
//! | Field spread | max − min games of one team across all rule fields |
//! | Max spread | Largest spread of any single team |
//! | Avg spread | Mean spread over all real teams |
//! | Games per day | Dispatched games / game days |

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::BTreeSet;

use super::Schedule;

/// Usage extremes of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamFairness {
    /// Division index.
    pub division: usize,
    /// Team name.
    pub team: String,
    /// Dispatched games.
    pub games: u32,
    /// Fewest games in any rule slot.
    pub min_slot_usage: u32,
    /// Most games in any rule slot.
    pub max_slot_usage: u32,
    /// Fewest games on any rule field.
    pub min_field_usage: u32,
    /// Most games on any rule field.
    pub max_field_usage: u32,
}

impl TeamFairness {
    /// max − min slot usage.
    pub fn slot_spread(&self) -> u32 {
        self.max_slot_usage - self.min_slot_usage
    }

    /// max − min field usage.
    pub fn field_spread(&self) -> u32 {
        self.max_field_usage - self.min_field_usage
    }
}

/// Schedule fairness indicators.
#[derive(Debug, Clone, Serialize)]
pub struct FairnessKpi {
    /// Per real team, division by division.
    pub teams: Vec<TeamFairness>,
    /// Largest slot spread of any team.
    pub max_slot_spread: u32,
    /// Largest field spread of any team.
    pub max_field_spread: u32,
    /// Mean slot spread.
    pub avg_slot_spread: f64,
    /// Mean field spread.
    pub avg_field_spread: f64,
    /// Dispatched games per game day.
    pub games_per_day: f64,
}

impl FairnessKpi {
    /// Computes fairness indicators from a generated schedule.
    ///
    /// Slots and fields are the union over all rules, so a slot a team
    /// never played counts as zero usage.
    pub fn calculate(schedule: &Schedule) -> Self {
        let slots: BTreeSet<NaiveTime> = schedule
            .rules()
            .iter()
            .flat_map(|r| r.slots().iter().copied())
            .collect();
        let fields: BTreeSet<&str> = schedule
            .rules()
            .iter()
            .flat_map(|r| r.fields().iter().map(String::as_str))
            .collect();

        let mut teams = Vec::new();
        for division in schedule.divisions() {
            for team in division.real_teams() {
                let slot_counts: Vec<u32> = slots.iter().map(|&s| team.slot_usage(s)).collect();
                let field_counts: Vec<u32> = fields.iter().map(|f| team.field_usage(f)).collect();
                teams.push(TeamFairness {
                    division: division.index,
                    team: team.name.clone(),
                    games: team.games_played(),
                    min_slot_usage: slot_counts.iter().copied().min().unwrap_or(0),
                    max_slot_usage: slot_counts.iter().copied().max().unwrap_or(0),
                    min_field_usage: field_counts.iter().copied().min().unwrap_or(0),
                    max_field_usage: field_counts.iter().copied().max().unwrap_or(0),
                });
            }
        }

        let max_slot_spread = teams.iter().map(TeamFairness::slot_spread).max().unwrap_or(0);
        let max_field_spread = teams.iter().map(TeamFairness::field_spread).max().unwrap_or(0);
        let (avg_slot_spread, avg_field_spread) = if teams.is_empty() {
            (0.0, 0.0)
        } else {
            let n = teams.len() as f64;
            (
                teams.iter().map(|t| t.slot_spread() as f64).sum::<f64>() / n,
                teams.iter().map(|t| t.field_spread() as f64).sum::<f64>() / n,
            )
        };

        let days = schedule.game_days().len();
        let games_per_day = if days == 0 {
            0.0
        } else {
            schedule.dispatched_count() as f64 / days as f64
        };

        Self {
            teams,
            max_slot_spread,
            max_field_spread,
            avg_slot_spread,
            avg_field_spread,
            games_per_day,
        }
    }

    /// Whether no team's slot or field spread exceeds `tolerance`.
    pub fn is_balanced_within(&self, tolerance: u32) -> bool {
        self.max_slot_spread <= tolerance && self.max_field_spread <= tolerance
    }

    /// Indicators of one team.
    pub fn team(&self, division: usize, name: &str) -> Option<&TeamFairness> {
        self.teams
            .iter()
            .find(|t| t.division == division && t.team == name)
    }
}

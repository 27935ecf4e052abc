//! Schedule configuration.
//!
//! [`ScheduleOptions`] carries every scalar knob; [`Roster`] the team
//! input; [`ScheduleConfig`] bundles both with the rule list so an outer
//! layer can deserialize one document and call
//! [`ScheduleConfig::generate`].

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Grouping, Schedule};
use crate::dispatching::{BalancePolicy, Selection};
use crate::error::{Result, ScheduleError};
use crate::models::{GameCalendar, Rule};
use crate::pairing::{Orientation, PairingOptions};

/// Scalar scheduling options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleOptions {
    /// Full round-robin passes per division (≥ 1).
    pub cycles: usize,
    /// Shuffle each roster once before pairing.
    pub shuffle: bool,
    /// Balance time slots across teams.
    pub balance_slots: bool,
    /// Balance fields across teams.
    pub balance_fields: bool,
    /// How division fixtures are interleaved before dispatch.
    pub grouping: Grouping,
    /// Per-division round cap. `None` = unlimited.
    #[serde(alias = "max_games")]
    pub max_rounds: Option<usize>,
    /// Home/away orientation policy.
    pub orientation: Orientation,
    /// First possible game date.
    pub start_date: NaiveDate,
    /// Last possible game date; later fixtures stay undated.
    pub end_date: Option<NaiveDate>,
    /// Extra game dates, regardless of weekday.
    pub include_dates: BTreeSet<NaiveDate>,
    /// Dates that never host games.
    pub exclude_dates: BTreeSet<NaiveDate>,
    /// RNG seed for shuffling and tie-breaks. `None` = OS entropy.
    pub seed: Option<u64>,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            cycles: 1,
            shuffle: true,
            balance_slots: true,
            balance_fields: true,
            grouping: Grouping::Grouped,
            max_rounds: None,
            orientation: Orientation::CycleParity,
            start_date: Local::now().date_naive(),
            end_date: None,
            include_dates: BTreeSet::new(),
            exclude_dates: BTreeSet::new(),
            seed: None,
        }
    }
}

impl ScheduleOptions {
    /// Default options starting on `start_date`.
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            ..Self::default()
        }
    }

    /// Sets the number of cycles.
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles = cycles;
        self
    }

    /// Enables or disables roster shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Enables or disables slot and field balancing.
    pub fn with_balancing(mut self, slots: bool, fields: bool) -> Self {
        self.balance_slots = slots;
        self.balance_fields = fields;
        self
    }

    /// Sets the interleaving policy.
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Caps the number of rounds per division.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Sets the orientation policy.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the last possible game date.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Forces extra game dates.
    pub fn with_include_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.include_dates.extend(dates);
        self
    }

    /// Blocks dates.
    pub fn with_exclude_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.exclude_dates.extend(dates);
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks scalar constraints.
    pub fn validate(&self) -> Result<()> {
        if self.cycles == 0 {
            return Err(ScheduleError::InvalidCycles);
        }
        Ok(())
    }

    /// Pairing parameters for each division.
    pub fn pairing(&self) -> PairingOptions {
        PairingOptions {
            cycles: self.cycles,
            max_rounds: self.max_rounds,
            shuffle: self.shuffle,
            orientation: self.orientation,
        }
    }

    /// Slot/field selection policy for the dispatcher.
    pub fn balance_policy(&self) -> BalancePolicy {
        BalancePolicy::new(
            Selection::balanced_if(self.balance_slots),
            Selection::balanced_if(self.balance_fields),
        )
    }

    /// Date-level calendar.
    pub fn calendar(&self) -> GameCalendar {
        GameCalendar {
            start_date: self.start_date,
            end_date: self.end_date,
            include_dates: self.include_dates.clone(),
            exclude_dates: self.exclude_dates.clone(),
        }
    }
}

/// Team input: one flat list, or one list per division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Roster {
    /// One list per division.
    Divisions(Vec<Vec<String>>),
    /// A single implicit division.
    Flat(Vec<String>),
}

impl Roster {
    /// Team lists, one per division.
    pub fn divisions(&self) -> Vec<&[String]> {
        match self {
            Roster::Divisions(lists) => lists.iter().map(Vec::as_slice).collect(),
            Roster::Flat(list) => vec![list.as_slice()],
        }
    }

    /// Total number of team names across divisions.
    pub fn team_count(&self) -> usize {
        self.divisions().iter().map(|d| d.len()).sum()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::Flat(Vec::new())
    }
}

impl From<Vec<String>> for Roster {
    fn from(teams: Vec<String>) -> Self {
        Roster::Flat(teams)
    }
}

impl From<Vec<&str>> for Roster {
    fn from(teams: Vec<&str>) -> Self {
        Roster::Flat(teams.into_iter().map(String::from).collect())
    }
}

impl From<Vec<Vec<String>>> for Roster {
    fn from(divisions: Vec<Vec<String>>) -> Self {
        Roster::Divisions(divisions)
    }
}

impl From<Vec<Vec<&str>>> for Roster {
    fn from(divisions: Vec<Vec<&str>>) -> Self {
        Roster::Divisions(
            divisions
                .into_iter()
                .map(|d| d.into_iter().map(String::from).collect())
                .collect(),
        )
    }
}

/// A complete, deserializable schedule request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Teams.
    #[serde(default)]
    pub teams: Roster,
    /// Weekly availability rules.
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Scalar options.
    #[serde(flatten)]
    pub options: ScheduleOptions,
}

impl ScheduleConfig {
    /// Generates the schedule this config describes.
    pub fn generate(self) -> Result<Schedule> {
        Schedule::generate(self.teams, self.rules, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let o = ScheduleOptions::default();
        assert_eq!(o.cycles, 1);
        assert!(o.shuffle);
        assert!(o.balance_slots && o.balance_fields);
        assert_eq!(o.grouping, Grouping::Grouped);
        assert_eq!(o.max_rounds, None);
        assert_eq!(o.start_date, Local::now().date_naive());
        assert!(o.exclude_dates.is_empty());
    }

    #[test]
    fn test_builder() {
        let o = ScheduleOptions::starting(date(2016, 2, 24))
            .with_cycles(2)
            .with_shuffle(false)
            .with_balancing(false, true)
            .with_grouping(Grouping::Flattened)
            .with_max_rounds(10)
            .with_end_date(date(2016, 6, 1))
            .with_exclude_dates([date(2016, 3, 2)])
            .with_include_dates([date(2016, 3, 5)])
            .with_seed(7);

        assert_eq!(o.pairing().cycles, 2);
        assert_eq!(o.pairing().max_rounds, Some(10));
        assert_eq!(o.balance_policy().slots, Selection::InOrder);
        assert_eq!(o.balance_policy().fields, Selection::Balanced);
        let cal = o.calendar();
        assert!(cal.exclude_dates.contains(&date(2016, 3, 2)));
        assert!(cal.include_dates.contains(&date(2016, 3, 5)));
        assert_eq!(cal.end_date, Some(date(2016, 6, 1)));
    }

    #[test]
    fn test_zero_cycles_rejected() {
        let o = ScheduleOptions::default().with_cycles(0);
        assert_eq!(o.validate(), Err(ScheduleError::InvalidCycles));
    }

    #[test]
    fn test_roster_shapes() {
        let flat: Roster = serde_json::from_str(r#"["a", "b", "c"]"#).unwrap();
        assert_eq!(flat, Roster::Flat(vec!["a".into(), "b".into(), "c".into()]));
        assert_eq!(flat.divisions().len(), 1);

        let nested: Roster = serde_json::from_str(r#"[["a", "b"], ["c", "d", "e"]]"#).unwrap();
        assert_eq!(nested.divisions().len(), 2);
        assert_eq!(nested.team_count(), 5);
    }

    #[test]
    fn test_config_from_json() {
        let config: ScheduleConfig = serde_json::from_str(
            r#"{
                "teams": ["1", "2", "3", "4"],
                "rules": [{"weekday": 3, "times": ["7:00 PM"], "fields": ["A", "B"]}],
                "cycles": 2,
                "shuffle": false,
                "max_games": 5,
                "grouping": "flattened",
                "start_date": "2016-02-24",
                "exclude_dates": ["2016-03-02"],
                "seed": 1
            }"#,
        )
        .unwrap();

        assert_eq!(config.rules.len(), 1);
        assert_eq!(config.options.cycles, 2);
        assert_eq!(config.options.max_rounds, Some(5));
        assert_eq!(config.options.grouping, Grouping::Flattened);
        assert_eq!(config.options.start_date, date(2016, 2, 24));

        let schedule = config.generate().unwrap();
        assert_eq!(schedule.division(0).map(|d| d.rounds().len()), Some(5));
        assert!(schedule
            .game_days()
            .iter()
            .all(|gd| gd.date != date(2016, 3, 2)));
    }

    #[test]
    fn test_config_rejects_bad_rule() {
        let result: std::result::Result<ScheduleConfig, _> = serde_json::from_str(
            r#"{"teams": ["1", "2"], "rules": [{"weekday": 3, "times": ["noon-ish"]}]}"#,
        );
        assert!(result.is_err());
    }
}

//! The schedule orchestrator.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use super::{interleave, Roster, ScheduleOptions};
use crate::dispatching::{Dispatcher, FixtureRef};
use crate::error::{Result, ScheduleError};
use crate::models::{Game, GameDay, Rule};
use crate::pairing::Division;

/// A generated multi-division schedule.
///
/// Owns its divisions (teams, rounds, fixtures with their assignments)
/// and the dated view of the same games grouped into [`GameDay`]s.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_fixture::models::Rule;
/// use u_fixture::scheduler::{Schedule, ScheduleOptions};
///
/// let rules = vec![Rule::new(3, ["7:00 PM"], ["A", "B"]).unwrap()];
/// let start = NaiveDate::from_ymd_opt(2016, 2, 24).unwrap();
/// let options = ScheduleOptions::starting(start).with_seed(42);
///
/// let schedule = Schedule::generate(vec!["1", "2", "3", "4"], rules, options).unwrap();
/// assert_eq!(schedule.game_days().len(), 3);
/// assert!(schedule.is_round_robin(0));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    divisions: Vec<Division>,
    rules: Vec<Rule>,
    options: ScheduleOptions,
    game_days: Vec<GameDay>,
    unscheduled: Vec<FixtureRef>,
}

impl Schedule {
    /// Builds divisions, pairs them, dispatches every fixture and groups
    /// the result by date.
    ///
    /// Uses a seeded RNG when [`ScheduleOptions::seed`] is set, OS entropy
    /// otherwise.
    ///
    /// # Errors
    /// - [`ScheduleError::NoTeams`] when no team is supplied.
    /// - [`ScheduleError::NoRules`] when `rules` is empty.
    /// - [`ScheduleError::InvalidCycles`] when `cycles` is zero.
    /// - Division-level errors: too few, duplicate or reserved team names.
    pub fn generate(
        teams: impl Into<Roster>,
        rules: Vec<Rule>,
        options: ScheduleOptions,
    ) -> Result<Self> {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::generate_with_rng(teams, rules, options, &mut rng)
    }

    /// Same as [`Schedule::generate`] with a caller-supplied RNG.
    pub fn generate_with_rng<R: Rng>(
        teams: impl Into<Roster>,
        rules: Vec<Rule>,
        options: ScheduleOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let roster = teams.into();
        if roster.team_count() == 0 {
            return Err(ScheduleError::NoTeams);
        }
        if rules.is_empty() {
            return Err(ScheduleError::NoRules);
        }
        options.validate()?;

        let mut divisions = roster
            .divisions()
            .into_iter()
            .enumerate()
            .map(|(i, names)| Division::new(i, format!("Division {}", i + 1), names))
            .collect::<Result<Vec<_>>>()?;

        let pairing = options.pairing();
        for division in &mut divisions {
            division.generate(&pairing, rng);
        }

        let stream = interleave(&divisions, options.grouping);
        let calendar = options.calendar();
        let unscheduled = {
            let mut dispatcher = Dispatcher::new(&rules, &calendar, options.balance_policy())?;
            dispatcher.dispatch_all(&mut divisions, &stream, rng)
        };

        let game_days = group_by_date(&divisions, &stream);

        info!(
            divisions = divisions.len(),
            fixtures = stream.len(),
            game_days = game_days.len(),
            unscheduled = unscheduled.len(),
            "schedule generated"
        );

        Ok(Self {
            divisions,
            rules,
            options,
            game_days,
            unscheduled,
        })
    }

    /// Divisions in input order.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    /// Division by index.
    pub fn division(&self, index: usize) -> Option<&Division> {
        self.divisions.get(index)
    }

    /// Rules used for dispatch.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Options the schedule was generated with.
    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Game days in chronological order.
    pub fn game_days(&self) -> &[GameDay] {
        &self.game_days
    }

    /// Game day on `date`, if any.
    pub fn game_day(&self, date: NaiveDate) -> Option<&GameDay> {
        self.game_days
            .binary_search_by_key(&date, |gd| gd.date)
            .ok()
            .map(|i| &self.game_days[i])
    }

    /// Every dated game, chronologically.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.game_days.iter().flat_map(|gd| gd.games.iter())
    }

    /// Real fixtures left undated because the end date was reached.
    pub fn unscheduled(&self) -> &[FixtureRef] {
        &self.unscheduled
    }

    /// Fixtures of a full run across divisions, byes included:
    /// Σ (n/2)·(n−1)·cycles, with n the padded size.
    ///
    /// Ignores the round cap; see [`Schedule::generated_fixture_count`]
    /// for what a capped run actually produced.
    pub fn total_fixture_count(&self) -> usize {
        self.divisions
            .iter()
            .map(|d| d.expected_fixture_count(self.options.cycles))
            .sum()
    }

    /// Fixtures actually generated across divisions, byes included.
    /// Equals [`Schedule::total_fixture_count`] unless rounds were capped.
    pub fn generated_fixture_count(&self) -> usize {
        self.divisions.iter().map(|d| d.fixtures().len()).sum()
    }

    /// Fixtures that received a date.
    pub fn dispatched_count(&self) -> usize {
        self.game_days.iter().map(GameDay::game_count).sum()
    }

    /// Whether division `index` forms a complete round robin.
    pub fn is_round_robin(&self, index: usize) -> bool {
        self.divisions
            .get(index)
            .is_some_and(|d| d.is_round_robin(self.options.cycles))
    }

    /// Dated games of team `name` in division `division`.
    pub fn games_for_team(&self, division: usize, name: &str) -> Vec<&Game> {
        self.games()
            .filter(|g| g.division == division && g.involves(name))
            .collect()
    }

    /// First and last game dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.game_days.first()?.date, self.game_days.last()?.date))
    }
}

/// Resolves dispatched fixtures into named games grouped by date.
/// Games within a date keep dispatch order.
fn group_by_date(divisions: &[Division], stream: &[FixtureRef]) -> Vec<GameDay> {
    let mut days: BTreeMap<NaiveDate, GameDay> = BTreeMap::new();
    for r in stream {
        let division = &divisions[r.division];
        let fixture = division.fixture(r.fixture);
        let Some(assignment) = fixture.assignment() else {
            continue;
        };
        let game = Game {
            division: division.index,
            division_name: division.name.clone(),
            fixture: fixture.id,
            team_a: division.team(fixture.team_a).name.clone(),
            team_b: division.team(fixture.team_b).name.clone(),
            date: assignment.date,
            slot: assignment.slot,
            field: assignment.field.clone(),
        };
        days.entry(assignment.date)
            .or_insert_with(|| GameDay::new(assignment.date))
            .games
            .push(game);
    }
    days.into_values().collect()
}

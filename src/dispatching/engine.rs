//! The dispatcher: a stateful cursor over rules and dates.
//!
//! # Algorithm (per real fixture)
//!
//! 1. Pick a slot among slots with a free field (balanced or earliest).
//! 2. Pick a free field in that slot (balanced or rule order).
//! 3. If either team already plays on the current date, move to the next
//!    rule (wrapping), jump to its next qualifying date strictly after the
//!    current one, and pick again on the fresh grid.
//! 4. Commit: write the assignment, bump both teams' usage counters,
//!    consume the cell.
//! 5. If the grid is exhausted, move to the next rule. The date advances
//!    when the rule list wraps or the weekday changes; a following rule
//!    on the same weekday keeps filling the same date.
//!
//! Greedy and order-sensitive: no backtracking, no global optimum.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::{AvailabilityGrid, BalancePolicy, FixtureRef};
use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, GameCalendar, Rule, TeamId};
use crate::pairing::Division;

/// Result of dispatching one fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The fixture received a date, slot and field.
    Assigned(Assignment),
    /// Bye fixture: skipped, nothing consumed.
    Bye,
    /// The fixture already carries an assignment; nothing changed.
    AlreadyAssigned,
    /// The next free date lies past the calendar's end date.
    PastEndDate,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    rule: usize,
    date: NaiveDate,
}

/// What has been booked on one date.
#[derive(Debug, Default)]
struct DayLedger {
    teams: HashSet<(usize, TeamId)>,
    cells: HashSet<(NaiveTime, String)>,
}

/// Assigns dates, slots and fields to fixtures in stream order.
#[derive(Debug)]
pub struct Dispatcher<'a> {
    rules: &'a [Rule],
    calendar: &'a GameCalendar,
    policy: BalancePolicy,
    cursor: Option<Cursor>,
    grid: AvailabilityGrid,
    ledger: HashMap<NaiveDate, DayLedger>,
    dispatched: Vec<FixtureRef>,
    past_end: bool,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher.
    ///
    /// # Errors
    /// [`ScheduleError::NoRules`] if `rules` is empty.
    pub fn new(rules: &'a [Rule], calendar: &'a GameCalendar, policy: BalancePolicy) -> Result<Self> {
        if rules.is_empty() {
            return Err(ScheduleError::NoRules);
        }
        Ok(Self {
            rules,
            calendar,
            policy,
            cursor: None,
            grid: AvailabilityGrid::default(),
            ledger: HashMap::new(),
            dispatched: Vec::new(),
            past_end: false,
        })
    }

    /// Dispatches every fixture of `stream` in order.
    ///
    /// Returns the real fixtures left undated because the end date was
    /// reached.
    pub fn dispatch_all<R: Rng>(
        &mut self,
        divisions: &mut [Division],
        stream: &[FixtureRef],
        rng: &mut R,
    ) -> Vec<FixtureRef> {
        stream
            .iter()
            .filter(|&&fixture| {
                self.dispatch(divisions, fixture, rng) == DispatchOutcome::PastEndDate
            })
            .copied()
            .collect()
    }

    /// Dispatches one fixture.
    pub fn dispatch<R: Rng>(
        &mut self,
        divisions: &mut [Division],
        fixture_ref: FixtureRef,
        rng: &mut R,
    ) -> DispatchOutcome {
        let division = &mut divisions[fixture_ref.division];
        let (team_a, team_b, is_bye, is_assigned) = {
            let f = division.fixture(fixture_ref.fixture);
            (f.team_a, f.team_b, f.is_bye, f.is_assigned())
        };
        if is_bye {
            return DispatchOutcome::Bye;
        }
        if is_assigned {
            return DispatchOutcome::AlreadyAssigned;
        }
        if self.past_end {
            return DispatchOutcome::PastEndDate;
        }

        let started = self.start();
        let mut cell = self.choose_cell(division, team_a, team_b, rng);
        let mut cursor = self.cursor.unwrap_or(started);

        if self.plays_on(cursor.date, division.index, team_a, team_b) {
            self.advance_rule(true);
            cell = self.choose_cell(division, team_a, team_b, rng);
            cursor = self.cursor.unwrap_or(cursor);
        }

        if !self.calendar.is_within_season(cursor.date) {
            warn!(
                date = %cursor.date,
                end_date = ?self.calendar.end_date,
                dispatched = self.dispatched.len(),
                "end date reached, remaining fixtures left undated"
            );
            self.past_end = true;
            return DispatchOutcome::PastEndDate;
        }

        let (slot_idx, field_idx) = cell;
        let rules = self.rules;
        let rule = &rules[cursor.rule];
        let slot = rule.slots()[slot_idx];
        let field = rule.fields()[field_idx].clone();

        let assignment = Assignment::new(cursor.date, slot, field.clone());
        division
            .fixture_mut(fixture_ref.fixture)
            .assign(assignment.clone());
        division.team_mut(team_a).record_usage(slot, &field);
        division.team_mut(team_b).record_usage(slot, &field);
        self.grid.take(slot_idx, field_idx);

        let day = self.ledger.entry(cursor.date).or_default();
        day.teams.insert((division.index, team_a));
        day.teams.insert((division.index, team_b));
        day.cells.insert((slot, field));
        self.dispatched.push(fixture_ref);

        if self.grid.is_exhausted() {
            self.advance_rule(false);
        }

        DispatchOutcome::Assigned(assignment)
    }

    /// Fixtures assigned so far, in dispatch order.
    pub fn dispatched(&self) -> &[FixtureRef] {
        &self.dispatched
    }

    /// Index of the active rule, once started.
    pub fn current_rule(&self) -> Option<usize> {
        self.cursor.map(|c| c.rule)
    }

    /// Candidate date, once started.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.cursor.map(|c| c.date)
    }

    /// Free cells left on the active grid.
    pub fn remaining_capacity(&self) -> usize {
        self.grid.remaining()
    }

    /// Whether the end date has cut dispatch short.
    pub fn is_past_end(&self) -> bool {
        self.past_end
    }

    /// Positions the cursor on the first real fixture.
    ///
    /// Picks the first rule whose weekday is on or after the start date's
    /// weekday (Sunday = 0), else the first rule.
    fn start(&mut self) -> Cursor {
        if let Some(cursor) = self.cursor {
            return cursor;
        }
        let rules = self.rules;
        let start_weekday = self.calendar.start_date.weekday().num_days_from_sunday();
        let rule = rules
            .iter()
            .position(|r| u32::from(r.weekday_number()) >= start_weekday)
            .unwrap_or(0);
        let cursor = Cursor {
            rule,
            date: self.calendar.first_game_date(rules[rule].weekday()),
        };
        self.cursor = Some(cursor);
        self.reset_grid();
        debug!(rule, date = %cursor.date, "dispatch started");
        cursor
    }

    /// Moves to the next rule, wrapping after the last one.
    fn advance_rule(&mut self, new_date: bool) {
        let Some(mut cursor) = self.cursor else {
            return;
        };
        let rules = self.rules;
        let previous = &rules[cursor.rule];
        let next = (cursor.rule + 1) % rules.len();
        let wrapped = next == 0;
        let rule = &rules[next];

        if new_date || wrapped || rule.weekday() != previous.weekday() {
            cursor.date = self.calendar.following_game_date(cursor.date, rule.weekday());
        }
        cursor.rule = next;
        self.cursor = Some(cursor);
        self.reset_grid();
        debug!(rule = next, date = %cursor.date, conflict = new_date, "rule advanced");
    }

    /// Rebuilds the grid for the active rule, minus cells already used on
    /// the current date by an earlier rule.
    fn reset_grid(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        let rules = self.rules;
        let rule = &rules[cursor.rule];
        self.grid = AvailabilityGrid::for_rule(rule);
        if let Some(day) = self.ledger.get(&cursor.date) {
            for (slot, field) in &day.cells {
                if let (Some(s), Some(f)) = (rule.slot_index(*slot), rule.field_index(field)) {
                    self.grid.take(s, f);
                }
            }
        }
    }

    /// Picks (slot index, field index) on the active grid.
    ///
    /// An exhausted grid rolls over to the next rule until a free cell
    /// shows up; every rule has at least one cell.
    fn choose_cell<R: Rng>(
        &mut self,
        division: &Division,
        team_a: TeamId,
        team_b: TeamId,
        rng: &mut R,
    ) -> (usize, usize) {
        loop {
            if let Some(cell) = self.pick_cell(division, team_a, team_b, rng) {
                return cell;
            }
            self.advance_rule(false);
        }
    }

    fn pick_cell<R: Rng>(
        &self,
        division: &Division,
        team_a: TeamId,
        team_b: TeamId,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        let rule = &self.rules[self.cursor?.rule];

        let mut open: Vec<usize> = self.grid.open_slots().collect();
        open.sort_by_key(|&i| rule.slots()[i]);
        let slot_idx = self.policy.slots.pick(
            &open,
            |i| {
                let slot = rule.slots()[i];
                division.slot_usage(team_a, slot) + division.slot_usage(team_b, slot)
            },
            rng,
        )?;

        let free: Vec<usize> = self.grid.fields(slot_idx)?.iter().collect();
        let field_idx = self.policy.fields.pick(
            &free,
            |i| {
                let field = &rule.fields()[i];
                division.field_usage(team_a, field) + division.field_usage(team_b, field)
            },
            rng,
        )?;

        Some((slot_idx, field_idx))
    }

    fn plays_on(&self, date: NaiveDate, division: usize, a: TeamId, b: TeamId) -> bool {
        self.ledger.get(&date).is_some_and(|day| {
            day.teams.contains(&(division, a)) || day.teams.contains(&(division, b))
        })
    }
}

//! Validation of generated schedules.
//!
//! Two layers:
//! - [`is_round_robin`]: pairing completeness of one division.
//! - [`check_schedule`] / [`check_dispatch`]: post-dispatch integrity.
//!   Detects:
//!   - Teams playing twice on one date
//!   - (date, slot, field) cells used twice
//!   - Assignments outside every rule grid, on excluded dates, or outside
//!     the season
//!   - Dispatched bye fixtures
//!   - Real fixtures left undated without being reported as unscheduled

use chrono::{Datelike, NaiveDate, NaiveTime};
use std::collections::{HashMap, HashSet};

use crate::dispatching::FixtureRef;
use crate::models::{GameCalendar, Rule, TeamId};
use crate::pairing::Division;
use crate::scheduler::Schedule;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A team plays more than once on a date.
    DoubleBooking,
    /// Two games share a (date, slot, field) cell.
    CellReused,
    /// The slot/field pair belongs to no rule usable on that date.
    OffGrid,
    /// The date is excluded, or before the start, or after the end date.
    OutOfSeason,
    /// A bye fixture received an assignment.
    ByeDispatched,
    /// A real fixture is undated but not reported as unscheduled.
    Undispatched,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Whether `division` holds a complete `cycles`-fold round robin.
///
/// Requires exactly `cycles · (n − 1)` rounds (n = padded size), every
/// team exactly once per round, and every pair of real teams meeting
/// exactly `cycles` times.
pub fn is_round_robin(division: &Division, cycles: usize) -> bool {
    let n = division.padded_size();
    if division.rounds().len() != cycles * (n - 1) {
        return false;
    }

    for round in division.rounds() {
        let mut seen = HashSet::with_capacity(n);
        for &id in &round.fixtures {
            let f = division.fixture(id);
            if !seen.insert(f.team_a) || !seen.insert(f.team_b) {
                return false;
            }
        }
        if seen.len() != n {
            return false;
        }
    }

    let teams: Vec<_> = division.real_teams().collect();
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            if division.fixtures_between(&a.name, &b.name).len() != cycles {
                return false;
            }
        }
    }
    true
}

/// Checks a generated schedule. See [`check_dispatch`].
pub fn check_schedule(schedule: &Schedule) -> ValidationResult {
    check_dispatch(
        schedule.divisions(),
        schedule.rules(),
        &schedule.options().calendar(),
        schedule.unscheduled(),
    )
}

/// Checks the assignments carried by `divisions`.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn check_dispatch(
    divisions: &[Division],
    rules: &[Rule],
    calendar: &GameCalendar,
    unscheduled: &[FixtureRef],
) -> ValidationResult {
    let mut errors = Vec::new();
    let unscheduled: HashSet<_> = unscheduled.iter().copied().collect();
    let mut bookings: HashMap<(NaiveDate, usize, TeamId), usize> = HashMap::new();
    let mut cells: HashSet<(NaiveDate, NaiveTime, &str)> = HashSet::new();

    for division in divisions {
        for fixture in division.fixtures() {
            let Some(a) = fixture.assignment() else {
                let r = FixtureRef::new(division.index, fixture.id);
                if !fixture.is_bye && !unscheduled.contains(&r) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::Undispatched,
                        format!(
                            "Fixture {} of '{}' has no date and is not reported unscheduled",
                            fixture.id.0, division.name
                        ),
                    ));
                }
                continue;
            };

            if fixture.is_bye {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ByeDispatched,
                    format!(
                        "Bye fixture {} of '{}' was assigned {}",
                        fixture.id.0, division.name, a.date
                    ),
                ));
                continue;
            }

            for team in [fixture.team_a, fixture.team_b] {
                let count = bookings.entry((a.date, division.index, team)).or_default();
                *count += 1;
                if *count == 2 {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooking,
                        format!(
                            "Team '{}' of '{}' plays more than once on {}",
                            division.team(team).name,
                            division.name,
                            a.date
                        ),
                    ));
                }
            }

            if !cells.insert((a.date, a.slot, a.field.as_str())) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CellReused,
                    format!("{} {} on '{}' is used twice", a.date, a.slot, a.field),
                ));
            }

            let included = calendar.include_dates.contains(&a.date);
            let on_grid = rules.iter().any(|rule| {
                (included || rule.weekday() == a.date.weekday())
                    && rule.slot_index(a.slot).is_some()
                    && rule.field_index(&a.field).is_some()
            });
            if !on_grid {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OffGrid,
                    format!(
                        "{} {} on '{}' matches no rule",
                        a.date, a.slot, a.field
                    ),
                ));
            }

            let excluded = !included && calendar.exclude_dates.contains(&a.date);
            if excluded || a.date < calendar.start_date || !calendar.is_within_season(a.date) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OutOfSeason,
                    format!("{} is not a playable date", a.date),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

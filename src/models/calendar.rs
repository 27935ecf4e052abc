//! Game calendar: which dates may host games.
//!
//! The weekly rule pattern decides the candidate weekday; the calendar
//! applies the date-level overrides on top of it.
//!
//! # Precedence
//! A date qualifies for a target weekday iff:
//! - It is in `include_dates` (forced game date, weekday ignored), OR
//! - Its weekday matches AND it is not in `exclude_dates`.
//!
//! Forced inclusion therefore overrides both the weekday and the
//! exclusion list.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Date-level availability for a season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCalendar {
    /// First date that may host a game.
    pub start_date: NaiveDate,
    /// Last date that may host a game. `None` = open-ended.
    pub end_date: Option<NaiveDate>,
    /// Dates forced to be game dates regardless of weekday.
    pub include_dates: BTreeSet<NaiveDate>,
    /// Dates that never host games (holidays, closures).
    pub exclude_dates: BTreeSet<NaiveDate>,
}

impl GameCalendar {
    /// Creates an open-ended calendar starting at `start_date`.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            include_dates: BTreeSet::new(),
            exclude_dates: BTreeSet::new(),
        }
    }

    /// Sets the last allowed game date.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Forces an extra game date.
    pub fn with_included(mut self, date: NaiveDate) -> Self {
        self.include_dates.insert(date);
        self
    }

    /// Blocks a date.
    pub fn with_excluded(mut self, date: NaiveDate) -> Self {
        self.exclude_dates.insert(date);
        self
    }

    /// Whether `date` qualifies as a game date for `weekday`.
    pub fn is_game_date(&self, date: NaiveDate, weekday: Weekday) -> bool {
        if self.include_dates.contains(&date) {
            return true;
        }
        date.weekday() == weekday && !self.exclude_dates.contains(&date)
    }

    /// Whether `date` is on or before the end date (always true if open-ended).
    pub fn is_within_season(&self, date: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| date <= end)
    }

    /// First qualifying date on or after `from` for `weekday`.
    ///
    /// Terminates for any finite exclusion set: every week offers a
    /// new candidate.
    pub fn next_game_date(&self, from: NaiveDate, weekday: Weekday) -> NaiveDate {
        let mut date = from;
        while !self.is_game_date(date, weekday) {
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        date
    }

    /// First qualifying date strictly after `after` for `weekday`.
    pub fn following_game_date(&self, after: NaiveDate, weekday: Weekday) -> NaiveDate {
        match after.succ_opt() {
            Some(next) => self.next_game_date(next, weekday),
            None => after,
        }
    }

    /// First qualifying date for `weekday` on or after the start date.
    pub fn first_game_date(&self, weekday: Weekday) -> NaiveDate {
        self.next_game_date(self.start_date, weekday)
    }
}

//! Error types.
//!
//! Every variant is a configuration failure detected before (or at the
//! very start of) generation. Nothing here is recoverable mid-run.

use thiserror::Error;

/// Configuration and input errors raised while building a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The roster is empty.
    #[error("at least 1 team is required")]
    NoTeams,

    /// The rule list is empty.
    #[error("at least 1 rule is required")]
    NoRules,

    /// A division has fewer than two teams.
    #[error("division '{division}' needs at least 2 teams, got {count}")]
    TooFewTeams { division: String, count: usize },

    /// A team name appears twice in one division.
    #[error("team '{team}' appears more than once in division '{division}'")]
    DuplicateTeam { division: String, team: String },

    /// A caller-supplied team uses the bye sentinel name.
    #[error("'{0}' is a reserved team name")]
    ReservedTeamName(String),

    /// Weekday outside 0 (Sunday) ..= 6 (Saturday).
    #[error("weekday must be between 0 and 6, got {0}")]
    InvalidWeekday(u8),

    /// A time-of-day string could not be parsed.
    #[error("invalid game time '{0}' (expected e.g. 7:00 PM, 11:00 AM, 18:20)")]
    InvalidTime(String),

    /// Cycle count of zero.
    #[error("cycles must be at least 1")]
    InvalidCycles,
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

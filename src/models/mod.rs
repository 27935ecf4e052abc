//! Fixture-scheduling domain models.
//!
//! Provides the core data types for representing a league season:
//! competitors, weekly availability rules, matchups and the dated
//! result.
//!
//! # Domain Mappings
//!
//! | u-fixture | Sports league | Tournament | Debate circuit |
//! |-----------|---------------|------------|----------------|
//! | Team | Club | Player | Debate team |
//! | Rule | Weeknight permit | Session | Room booking |
//! | Fixture | Match | Game | Round pairing |
//! | GameDay | Matchday | Session day | Tournament day |

mod calendar;
mod fixture;
mod game_day;
mod rule;
mod team;

pub use calendar::GameCalendar;
pub use fixture::{Assignment, Fixture, FixtureId};
pub use game_day::{Game, GameDay};
pub use rule::{
    parse_game_time, weekday_from_number, Rule, RuleConfig, DEFAULT_FIELDS, DEFAULT_GAME_TIME,
    DEFAULT_WEEKDAY,
};
pub use team::{Team, TeamId, BYE_TEAM_NAME};

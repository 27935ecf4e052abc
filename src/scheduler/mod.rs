//! Schedule generation.
//!
//! Turns a roster and a rule list into a dated, multi-division schedule:
//!
//! 1. Build one [`Division`](crate::pairing::Division) per team list and
//!    pair each with the circle method.
//! 2. Interleave the divisions' fixtures into one stream ([`Grouping`]).
//! 3. Dispatch the stream through a single
//!    [`Dispatcher`](crate::dispatching::Dispatcher) so divisions share
//!    dates, slots and fields.
//! 4. Group dated games into [`GameDay`](crate::models::GameDay)s.
//!
//! # KPI
//!
//! [`FairnessKpi`] reports how evenly each team's games spread over the
//! rule slots and fields.

mod interleave;
mod kpi;
mod options;
mod schedule;

pub use interleave::{interleave, Grouping};
pub use kpi::{FairnessKpi, TeamFairness};
pub use options::{Roster, ScheduleConfig, ScheduleOptions};
pub use schedule::Schedule;

//! Round-robin fixture generation and calendar dispatching.
//!
//! Pairs every team of a division against every other team with the
//! circle method, then walks a rotating list of weekday availability rules
//! to give each fixture a date, a time slot and a field.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Rule`, `Fixture`, `Assignment`,
//!   `GameDay`, `GameCalendar`
//! - **`pairing`**: Circle-method round generation and `Division`
//! - **`dispatching`**: The stateful `Dispatcher` and slot/field balancing
//! - **`scheduler`**: `Schedule` orchestrator, options and fairness KPIs
//! - **`validation`**: Round-robin completeness and post-dispatch checks
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_fixture::models::Rule;
//! use u_fixture::scheduler::{Schedule, ScheduleOptions};
//!
//! let rules = vec![
//!     Rule::new(3, ["7:00 PM", "8:30 PM"], ["Field #1", "Field #2"]).unwrap(),
//!     Rule::new(6, ["10:00 AM"], ["Field #1"]).unwrap(),
//! ];
//! let options = ScheduleOptions::starting(NaiveDate::from_ymd_opt(2016, 2, 24).unwrap())
//!     .with_cycles(2)
//!     .with_seed(7);
//!
//! let schedule = Schedule::generate(vec!["Lions", "Tigers", "Bears"], rules, options).unwrap();
//! assert!(schedule.is_round_robin(0));
//! assert_eq!(schedule.dispatched_count(), 6);
//! ```
//!
//! # References
//!
//! - Kirkman (1847), "On a Problem in Combinations"
//! - de Werra (1981), "Scheduling in Sports"
//! - Rasmussen & Trick (2008), "Round robin scheduling – a survey"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod pairing;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
pub use models::{Game, GameDay, Rule};
pub use scheduler::{Schedule, ScheduleConfig, ScheduleOptions};

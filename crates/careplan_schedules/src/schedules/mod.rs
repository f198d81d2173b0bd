//! Care schedule recurrence.
//!
//! This module provides:
//! - [`ScheduleSpec`]: The validated schedule definition
//! - [`ScheduleKind`]: Daily, weekly or custom recurrence tag
//! - [`OccurrenceRule`]: The counting contract, with [`DailyRule`] and [`WeeklyRule`] built in
//! - [`CareSchedule`]: A spec bound to its rule, with the query operations
//! - [`ScheduleBuilder`]: Builder pattern for constructing schedules
//! - [`ActivePeriod`]: One day or week of a schedule and whether it is active
//!
//! # Examples
//!
//! ```
//! use careplan_core::types::{Date, DateComponents, TimeOfDay};
//! use careplan_schedules::schedules::CareSchedule;
//!
//! // Every other day, 1st to 10th of January
//! let schedule = CareSchedule::daily_with_skip(
//!     DateComponents::from_ymd(2016, 1, 1).unwrap(),
//!     vec![TimeOfDay::from_hm(8, 0).unwrap()],
//!     1,
//!     Some(DateComponents::from_ymd(2016, 1, 10).unwrap()),
//! )
//! .unwrap();
//!
//! assert_eq!(schedule.number_of_events(Date::from_ymd(2016, 1, 5).unwrap()), 1);
//! assert_eq!(schedule.number_of_events(Date::from_ymd(2016, 1, 6).unwrap()), 0);
//! assert_eq!(schedule.number_of_events(Date::from_ymd(2016, 1, 11).unwrap()), 0);
//! ```

#[cfg(feature = "serde")]
pub mod codec;
mod equality;
mod error;
mod kind;
mod period;
mod rule;
mod schedule;
mod spec;

#[cfg(feature = "serde")]
pub use codec::{CodecError, ScheduleRecord};
pub use error::ScheduleError;
pub use kind::ScheduleKind;
pub use period::{elapsed_periods, is_active, ActivePeriod};
pub use rule::{number_of_events, DailyRule, OccurrenceRule, RecurrenceRule, WeeklyRule};
pub use schedule::{CareSchedule, Occurrences, ScheduleBuilder, DEFAULT_SEARCH_HORIZON_DAYS};
pub use spec::ScheduleSpec;

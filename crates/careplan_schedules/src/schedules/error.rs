//! Schedule construction error types.

use super::kind::ScheduleKind;
use careplan_core::types::Date;
use thiserror::Error;

/// Errors that can occur while constructing a care schedule.
///
/// Construction is all-or-nothing: when one of these is returned no
/// partial schedule exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// End date lies before the start date.
    #[error("End date {end} must not be earlier than start date {start}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The rejected end date.
        end: Date,
    },

    /// Weekly time table does not have one entry per weekday.
    #[error("Weekly schedule needs 7 time lists (Sunday to Saturday), got {got}")]
    InvalidWeekdayTable {
        /// Number of time lists supplied.
        got: usize,
    },

    /// Time table shape does not match the schedule kind.
    #[error("A {kind} schedule needs {expected} time list(s), got {got}")]
    InvalidTimesShape {
        /// The schedule kind.
        kind: ScheduleKind,
        /// Number of time lists the kind requires.
        expected: usize,
        /// Number of time lists supplied.
        got: usize,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Recurrence rule bound to a spec of a different kind.
    #[error("A {got} rule cannot count a {expected} schedule")]
    KindMismatch {
        /// The kind of the schedule definition.
        expected: ScheduleKind,
        /// The kind the rule counts.
        got: ScheduleKind,
    },

    /// An `Other` spec was bound without a custom rule.
    #[error("An other schedule needs a custom occurrence rule")]
    CustomRuleRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_range_message() {
        let err = ScheduleError::InvalidDateRange {
            start: Date::from_ymd(2016, 1, 10).unwrap(),
            end: Date::from_ymd(2016, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "End date 2016-01-01 must not be earlier than start date 2016-01-10"
        );
    }

    #[test]
    fn test_shape_messages() {
        assert_eq!(
            ScheduleError::InvalidWeekdayTable { got: 6 }.to_string(),
            "Weekly schedule needs 7 time lists (Sunday to Saturday), got 6"
        );
        let err = ScheduleError::InvalidTimesShape {
            kind: ScheduleKind::Daily,
            expected: 1,
            got: 2,
        };
        assert_eq!(err.to_string(), "A daily schedule needs 1 time list(s), got 2");
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = ScheduleError::KindMismatch {
            expected: ScheduleKind::Weekly,
            got: ScheduleKind::Daily,
        };
        assert_eq!(err.to_string(), "A daily rule cannot count a weekly schedule");
    }
}

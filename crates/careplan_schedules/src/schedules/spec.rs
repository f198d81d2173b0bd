//! Schedule definition data model.

use super::error::ScheduleError;
use super::kind::ScheduleKind;
use careplan_core::types::{Date, DateComponents, TimeOfDay, UserInfo};

/// The definition of a care schedule.
///
/// Holds the kind tag, the start and optional end of the schedule, the
/// per-period time table, the skip count and caller metadata. Every field
/// is fixed at construction except the end time, which a care plan store
/// may move later through [`ScheduleSpec::set_end_time`].
///
/// # Time table shape
///
/// - Daily: exactly one list, applied to every active day
/// - Weekly: exactly seven lists, Sunday through Saturday
/// - Other: any shape the custom rule understands
///
/// # Examples
///
/// ```
/// use careplan_core::types::{DateComponents, TimeOfDay, UserInfo};
/// use careplan_schedules::schedules::{ScheduleKind, ScheduleSpec};
///
/// let spec = ScheduleSpec::new(
///     ScheduleKind::Daily,
///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
///     None,
///     vec![vec![TimeOfDay::from_hm(8, 0).unwrap()]],
///     0,
///     UserInfo::new(),
/// )
/// .unwrap();
///
/// assert_eq!(spec.kind(), ScheduleKind::Daily);
/// assert!(spec.end_time().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleSpec {
    kind: ScheduleKind,
    start_time: DateComponents,
    end_time: Option<DateComponents>,
    times: Vec<Vec<TimeOfDay>>,
    time_units_to_skip: u32,
    user_info: UserInfo,
}

impl ScheduleSpec {
    /// Creates a validated schedule definition.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidWeekdayTable`] if a weekly table does not have 7 lists
    /// - [`ScheduleError::InvalidTimesShape`] if a daily table does not have 1 list
    /// - [`ScheduleError::InvalidDateRange`] if the end date precedes the start date
    pub fn new(
        kind: ScheduleKind,
        start_time: DateComponents,
        end_time: Option<DateComponents>,
        times: Vec<Vec<TimeOfDay>>,
        time_units_to_skip: u32,
        user_info: UserInfo,
    ) -> Result<Self, ScheduleError> {
        validate_times(kind, &times)?;
        validate_range(start_time, end_time)?;

        Ok(Self {
            kind,
            start_time,
            end_time,
            times,
            time_units_to_skip,
            user_info,
        })
    }

    /// Returns the schedule kind.
    #[inline]
    pub fn kind(&self) -> ScheduleKind {
        self.kind
    }

    /// Returns the start of the schedule.
    #[inline]
    pub fn start_time(&self) -> DateComponents {
        self.start_time
    }

    /// Returns the end of the schedule, if bounded.
    #[inline]
    pub fn end_time(&self) -> Option<DateComponents> {
        self.end_time
    }

    /// Returns the time table.
    #[inline]
    pub fn times(&self) -> &[Vec<TimeOfDay>] {
        &self.times
    }

    /// Returns the number of inactive periods between two active periods.
    #[inline]
    pub fn time_units_to_skip(&self) -> u32 {
        self.time_units_to_skip
    }

    /// Returns the caller metadata.
    #[inline]
    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    /// Moves or clears the end of the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDateRange`] if `end_time` precedes the
    /// start date. The definition is left unchanged in that case.
    pub fn set_end_time(&mut self, end_time: Option<DateComponents>) -> Result<(), ScheduleError> {
        validate_range(self.start_time, end_time)?;
        self.end_time = end_time;
        Ok(())
    }

    /// Returns whether `date` lies within the schedule's span.
    ///
    /// Both ends are inclusive and compared by calendar date only.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::{Date, DateComponents, UserInfo};
    /// use careplan_schedules::schedules::{ScheduleKind, ScheduleSpec};
    ///
    /// let spec = ScheduleSpec::new(
    ///     ScheduleKind::Daily,
    ///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
    ///     Some(DateComponents::from_ymd(2016, 1, 10).unwrap()),
    ///     vec![vec![]],
    ///     0,
    ///     UserInfo::new(),
    /// )
    /// .unwrap();
    ///
    /// assert!(spec.contains_date(Date::from_ymd(2016, 1, 10).unwrap()));
    /// assert!(!spec.contains_date(Date::from_ymd(2016, 1, 11).unwrap()));
    /// assert!(!spec.contains_date(Date::from_ymd(2015, 12, 31).unwrap()));
    /// ```
    pub fn contains_date(&self, date: Date) -> bool {
        if date < self.start_time.date() {
            return false;
        }
        match self.end_time {
            Some(end) => date <= end.date(),
            None => true,
        }
    }
}

fn validate_times(kind: ScheduleKind, times: &[Vec<TimeOfDay>]) -> Result<(), ScheduleError> {
    let got = times.len();
    match kind.expected_time_lists() {
        Some(expected) if got != expected => match kind {
            ScheduleKind::Weekly => Err(ScheduleError::InvalidWeekdayTable { got }),
            _ => Err(ScheduleError::InvalidTimesShape {
                kind,
                expected,
                got,
            }),
        },
        _ => Ok(()),
    }
}

fn validate_range(
    start: DateComponents,
    end: Option<DateComponents>,
) -> Result<(), ScheduleError> {
    match end {
        Some(end) if end.date() < start.date() => Err(ScheduleError::InvalidDateRange {
            start: start.date(),
            end: end.date(),
        }),
        _ => Ok(()),
    }
}

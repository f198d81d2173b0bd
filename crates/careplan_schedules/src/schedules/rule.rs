//! Occurrence counting rules.
//!
//! A rule turns a [`ScheduleSpec`] and a calendar date into a number of
//! events. The daily and weekly rules are built in and dispatched through
//! a `match`; any other recurrence implements [`OccurrenceRule`] and is
//! carried as [`RecurrenceRule::Custom`].

use super::kind::ScheduleKind;
use super::period::{elapsed_periods, is_active};
use super::spec::ScheduleSpec;
use careplan_core::types::{Date, TimeOfDay};
use std::fmt;
use std::sync::Arc;

/// Counting contract shared by every recurrence rule.
///
/// Implementations must be pure functions of the definition and the date, and
/// must compare dates at calendar-date granularity only. A date before the
/// spec's start date or after its end date must yield zero.
///
/// # Examples
///
/// ```
/// use careplan_core::types::{Date, DateComponents, TimeOfDay, UserInfo};
/// use careplan_schedules::schedules::{OccurrenceRule, ScheduleKind, ScheduleSpec};
///
/// /// One event on the first day of every month.
/// #[derive(Debug)]
/// struct MonthStart;
///
/// impl OccurrenceRule for MonthStart {
///     fn number_of_events(&self, spec: &ScheduleSpec, date: Date) -> usize {
///         if spec.contains_date(date) && date.day() == 1 { 1 } else { 0 }
///     }
/// }
///
/// let spec = ScheduleSpec::new(
///     ScheduleKind::Other,
///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
///     None,
///     vec![],
///     0,
///     UserInfo::new(),
/// )
/// .unwrap();
///
/// assert_eq!(MonthStart.number_of_events(&spec, Date::from_ymd(2016, 3, 1).unwrap()), 1);
/// assert_eq!(MonthStart.number_of_events(&spec, Date::from_ymd(2016, 3, 2).unwrap()), 0);
/// ```
pub trait OccurrenceRule: fmt::Debug + Send + Sync {
    /// Returns the number of events on `date`.
    fn number_of_events(&self, spec: &ScheduleSpec, date: Date) -> usize;

    /// Returns the times of the events on `date`.
    ///
    /// Rules whose events are not backed by the time table keep the
    /// default, which reports no times.
    fn event_times<'a>(&self, _spec: &'a ScheduleSpec, _date: Date) -> &'a [TimeOfDay] {
        &[]
    }

    /// Returns the length in days after which the rule's pattern repeats.
    ///
    /// `None` means the rule has no fixed cycle.
    fn cycle_days(&self, _spec: &ScheduleSpec) -> Option<u64> {
        None
    }
}

/// Same times on every active day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyRule;

/// Per-weekday times in every active week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyRule;

impl OccurrenceRule for DailyRule {
    #[inline]
    fn number_of_events(&self, spec: &ScheduleSpec, date: Date) -> usize {
        self.event_times(spec, date).len()
    }

    fn event_times<'a>(&self, spec: &'a ScheduleSpec, date: Date) -> &'a [TimeOfDay] {
        times_in_active_period(spec, date, 1, 0)
    }

    fn cycle_days(&self, spec: &ScheduleSpec) -> Option<u64> {
        Some(u64::from(spec.time_units_to_skip()) + 1)
    }
}

impl OccurrenceRule for WeeklyRule {
    #[inline]
    fn number_of_events(&self, spec: &ScheduleSpec, date: Date) -> usize {
        self.event_times(spec, date).len()
    }

    fn event_times<'a>(&self, spec: &'a ScheduleSpec, date: Date) -> &'a [TimeOfDay] {
        times_in_active_period(spec, date, 7, date.weekday_index())
    }

    fn cycle_days(&self, spec: &ScheduleSpec) -> Option<u64> {
        Some(7 * (u64::from(spec.time_units_to_skip()) + 1))
    }
}

/// Selects `times[list]` if `date` falls in an active period.
fn times_in_active_period(
    spec: &ScheduleSpec,
    date: Date,
    period_days: u32,
    list: usize,
) -> &[TimeOfDay] {
    if !spec.contains_date(date) {
        return &[];
    }
    let active = elapsed_periods(spec.start_time().date(), date, period_days)
        .is_some_and(|elapsed| is_active(elapsed, spec.time_units_to_skip()));
    if !active {
        return &[];
    }
    spec.times().get(list).map(Vec::as_slice).unwrap_or(&[])
}

/// The rule bound to a schedule.
///
/// # Examples
///
/// ```
/// use careplan_schedules::schedules::{RecurrenceRule, ScheduleKind};
///
/// let rule = RecurrenceRule::for_kind(ScheduleKind::Weekly).unwrap();
/// assert_eq!(rule.kind(), ScheduleKind::Weekly);
/// assert!(RecurrenceRule::for_kind(ScheduleKind::Other).is_none());
/// ```
#[derive(Debug, Clone)]
pub enum RecurrenceRule {
    /// Built-in daily counting.
    Daily,
    /// Built-in weekly counting.
    Weekly,
    /// Caller-supplied counting for `Other` schedules.
    Custom(Arc<dyn OccurrenceRule>),
}

impl RecurrenceRule {
    /// Returns the built-in rule for `kind`, or `None` for `Other`.
    pub fn for_kind(kind: ScheduleKind) -> Option<Self> {
        match kind {
            ScheduleKind::Daily => Some(RecurrenceRule::Daily),
            ScheduleKind::Weekly => Some(RecurrenceRule::Weekly),
            ScheduleKind::Other => None,
        }
    }

    /// Wraps a caller-supplied rule.
    pub fn custom<R: OccurrenceRule + 'static>(rule: R) -> Self {
        RecurrenceRule::Custom(Arc::new(rule))
    }

    /// Returns the schedule kind this rule counts.
    #[inline]
    pub fn kind(&self) -> ScheduleKind {
        match self {
            RecurrenceRule::Daily => ScheduleKind::Daily,
            RecurrenceRule::Weekly => ScheduleKind::Weekly,
            RecurrenceRule::Custom(_) => ScheduleKind::Other,
        }
    }

    /// Returns whether this is a caller-supplied rule.
    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, RecurrenceRule::Custom(_))
    }

    /// Returns the number of events on `date`.
    #[inline]
    pub fn number_of_events(&self, spec: &ScheduleSpec, date: Date) -> usize {
        let count = match self {
            RecurrenceRule::Daily => DailyRule.number_of_events(spec, date),
            RecurrenceRule::Weekly => WeeklyRule.number_of_events(spec, date),
            RecurrenceRule::Custom(rule) => rule.number_of_events(spec, date),
        };
        tracing::trace!(kind = %self.kind(), %date, count, "counted events");
        count
    }

    /// Returns the times of the events on `date`.
    pub fn event_times<'a>(&self, spec: &'a ScheduleSpec, date: Date) -> &'a [TimeOfDay] {
        match self {
            RecurrenceRule::Daily => DailyRule.event_times(spec, date),
            RecurrenceRule::Weekly => WeeklyRule.event_times(spec, date),
            RecurrenceRule::Custom(rule) => rule.event_times(spec, date),
        }
    }

    /// Returns the repeat length of the rule in days, if it has one.
    pub fn cycle_days(&self, spec: &ScheduleSpec) -> Option<u64> {
        match self {
            RecurrenceRule::Daily => DailyRule.cycle_days(spec),
            RecurrenceRule::Weekly => WeeklyRule.cycle_days(spec),
            RecurrenceRule::Custom(rule) => rule.cycle_days(spec),
        }
    }
}

/// Counts the events of a spec on `date` with the built-in rule for its kind.
///
/// `Other` specs have no built-in rule and always yield zero here; bind
/// them to an [`OccurrenceRule`] through
/// [`CareSchedule::custom`](super::CareSchedule::custom) instead.
///
/// # Examples
///
/// ```
/// use careplan_core::types::{Date, DateComponents, TimeOfDay, UserInfo};
/// use careplan_schedules::schedules::{number_of_events, ScheduleKind, ScheduleSpec};
///
/// let eight = TimeOfDay::from_hm(8, 0).unwrap();
/// let spec = ScheduleSpec::new(
///     ScheduleKind::Daily,
///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
///     None,
///     vec![vec![eight]],
///     1,
///     UserInfo::new(),
/// )
/// .unwrap();
///
/// assert_eq!(number_of_events(&spec, Date::from_ymd(2016, 1, 3).unwrap()), 1);
/// assert_eq!(number_of_events(&spec, Date::from_ymd(2016, 1, 4).unwrap()), 0);
/// ```
pub fn number_of_events(spec: &ScheduleSpec, date: Date) -> usize {
    match RecurrenceRule::for_kind(spec.kind()) {
        Some(rule) => rule.number_of_events(spec, date),
        None => 0,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::schedules::CareSchedule;
    use careplan_core::types::{DateComponents, UserInfo};
    use proptest::prelude::*;

    fn start_strategy() -> impl Strategy<Value = Date> {
        (0u64..20_000).prop_map(|offset| {
            Date::from_ymd(1990, 1, 1)
                .unwrap()
                .checked_add_days(offset)
                .unwrap()
        })
    }

    fn times_strategy() -> impl Strategy<Value = Vec<TimeOfDay>> {
        prop::collection::vec(
            (0u32..24, 0u32..60).prop_map(|(h, m)| TimeOfDay::from_hm(h, m).unwrap()),
            0..5,
        )
    }

    fn daily(start: Date, times: Vec<TimeOfDay>, skip: u32) -> ScheduleSpec {
        ScheduleSpec::new(
            ScheduleKind::Daily,
            DateComponents::from(start),
            None,
            vec![times],
            skip,
            UserInfo::new(),
        )
        .unwrap()
    }

    fn weekly(start: Date, times: Vec<Vec<TimeOfDay>>, skip: u32) -> ScheduleSpec {
        ScheduleSpec::new(
            ScheduleKind::Weekly,
            DateComponents::from(start),
            None,
            times,
            skip,
            UserInfo::new(),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn test_start_date_always_active(
            start in start_strategy(),
            times in times_strategy(),
            skip in 0u32..30,
        ) {
            let spec = daily(start, times.clone(), skip);
            prop_assert_eq!(number_of_events(&spec, start), times.len());
        }

        #[test]
        fn test_weekly_start_date_always_active(
            start in start_strategy(),
            times in prop::collection::vec(times_strategy(), 7),
            skip in 0u32..30,
        ) {
            let spec = weekly(start, times.clone(), skip);
            prop_assert_eq!(number_of_events(&spec, start), times[start.weekday_index()].len());
        }

        #[test]
        fn test_daily_counts_are_repeatable(
            start in start_strategy(),
            times in times_strategy(),
            skip in 0u32..10,
            offset in 0u64..2000,
        ) {
            let schedule = CareSchedule::from_spec(daily(start, times, skip)).unwrap();
            let date = start.checked_add_days(offset).unwrap();
            let first = schedule.number_of_events(date);
            let scanned = schedule.total_events_between(start, date);
            prop_assert_eq!(schedule.number_of_events(date), first);
            prop_assert_eq!(number_of_events(schedule.spec(), date), first);
            prop_assert_eq!(schedule.total_events_between(start, date), scanned);
        }

        #[test]
        fn test_weekly_counts_are_repeatable(
            start in start_strategy(),
            times in prop::collection::vec(times_strategy(), 7),
            skip in 0u32..5,
            offset in 0u64..2000,
        ) {
            let schedule = CareSchedule::from_spec(weekly(start, times, skip)).unwrap();
            let date = start.checked_add_days(offset).unwrap();
            let first = schedule.number_of_events(date);
            let listed: Vec<(Date, usize)> = schedule.occurrences_between(start, date).collect();
            prop_assert_eq!(schedule.number_of_events(date), first);
            prop_assert_eq!(listed.last().copied(), Some((date, first)));
            prop_assert_eq!(schedule.occurrences_between(start, date).collect::<Vec<_>>(), listed);
        }

        #[test]
        fn test_before_start_is_zero(
            start in start_strategy(),
            times in times_strategy(),
            skip in 0u32..30,
            back in 1u64..1000,
        ) {
            let spec = daily(start, times, skip);
            let before = Date::from(start.into_inner() - chrono::Days::new(back));
            prop_assert_eq!(number_of_events(&spec, before), 0);
        }

        #[test]
        fn test_daily_skip_pattern(
            start in start_strategy(),
            times in times_strategy(),
            skip in 0u32..10,
            offset in 0u64..2000,
        ) {
            let spec = daily(start, times.clone(), skip);
            let date = start.checked_add_days(offset).unwrap();
            let expected = if offset % (u64::from(skip) + 1) == 0 { times.len() } else { 0 };
            prop_assert_eq!(number_of_events(&spec, date), expected);
        }

        #[test]
        fn test_weekly_skip_pattern(
            start in start_strategy(),
            times in prop::collection::vec(times_strategy(), 7),
            skip in 0u32..5,
            offset in 0u64..2000,
        ) {
            let spec = weekly(start, times.clone(), skip);
            let date = start.checked_add_days(offset).unwrap();
            let week = offset / 7;
            let expected = if week % (u64::from(skip) + 1) == 0 {
                times[date.weekday_index()].len()
            } else {
                0
            };
            prop_assert_eq!(number_of_events(&spec, date), expected);
        }

        #[test]
        fn test_after_end_is_zero(
            start in start_strategy(),
            times in times_strategy(),
            length in 0u64..400,
            past in 1u64..400,
        ) {
            let end = start.checked_add_days(length).unwrap();
            let spec = ScheduleSpec::new(
                ScheduleKind::Daily,
                DateComponents::from(start),
                Some(DateComponents::from(end)),
                vec![times],
                0,
                UserInfo::new(),
            )
            .unwrap();
            prop_assert_eq!(number_of_events(&spec, end.checked_add_days(past).unwrap()), 0);
        }
    }
}

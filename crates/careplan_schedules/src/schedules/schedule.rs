//! CareSchedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use super::kind::ScheduleKind;
use super::period::ActivePeriod;
use super::rule::{OccurrenceRule, RecurrenceRule};
use super::spec::ScheduleSpec;
use careplan_core::types::{Date, DateComponents, TimeOfDay, UserInfo};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Search window in days for rules without a fixed cycle (four years).
pub const DEFAULT_SEARCH_HORIZON_DAYS: u64 = 1461;

/// A schedule definition bound to the rule that counts its events.
///
/// # Examples
///
/// ```
/// use careplan_core::types::{Date, DateComponents, TimeOfDay};
/// use careplan_schedules::schedules::CareSchedule;
///
/// let schedule = CareSchedule::daily(
///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
///     vec![TimeOfDay::from_hm(8, 0).unwrap()],
/// )
/// .unwrap();
///
/// assert_eq!(schedule.number_of_events(Date::from_ymd(2016, 1, 5).unwrap()), 1);
/// assert_eq!(schedule.number_of_events(Date::from_ymd(2015, 12, 31).unwrap()), 0);
/// ```
#[derive(Debug, Clone)]
pub struct CareSchedule {
    spec: ScheduleSpec,
    rule: RecurrenceRule,
}

impl CareSchedule {
    /// Creates an unbounded daily schedule with the same times every day.
    ///
    /// # Errors
    ///
    /// A single time list without an end date is always valid, so this
    /// only returns `Ok`.
    pub fn daily(
        start: impl Into<DateComponents>,
        times: Vec<TimeOfDay>,
    ) -> Result<Self, ScheduleError> {
        ScheduleBuilder::new()
            .kind(ScheduleKind::Daily)
            .start(start)
            .daily_times(times)
            .build()
    }

    /// Creates an unbounded weekly schedule from seven per-weekday time
    /// lists, Sunday first.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidWeekdayTable`] if `times_per_weekday`
    /// does not have exactly 7 entries.
    pub fn weekly(
        start: impl Into<DateComponents>,
        times_per_weekday: Vec<Vec<TimeOfDay>>,
    ) -> Result<Self, ScheduleError> {
        ScheduleBuilder::new()
            .kind(ScheduleKind::Weekly)
            .start(start)
            .times(times_per_weekday)
            .build()
    }

    /// Creates a daily schedule active every `days_to_skip + 1` days.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDateRange`] if `end` precedes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::{Date, DateComponents, TimeOfDay};
    /// use careplan_schedules::schedules::CareSchedule;
    ///
    /// let schedule = CareSchedule::daily_with_skip(
    ///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
    ///     vec![TimeOfDay::from_hm(8, 0).unwrap()],
    ///     1,
    ///     Some(DateComponents::from_ymd(2016, 1, 10).unwrap()),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(schedule.number_of_events(Date::from_ymd(2016, 1, 9).unwrap()), 1);
    /// assert_eq!(schedule.number_of_events(Date::from_ymd(2016, 1, 10).unwrap()), 0);
    /// ```
    pub fn daily_with_skip(
        start: impl Into<DateComponents>,
        times: Vec<TimeOfDay>,
        days_to_skip: u32,
        end: Option<DateComponents>,
    ) -> Result<Self, ScheduleError> {
        ScheduleBuilder::new()
            .kind(ScheduleKind::Daily)
            .start(start)
            .end_time(end)
            .daily_times(times)
            .skip(days_to_skip)
            .build()
    }

    /// Creates a weekly schedule active every `weeks_to_skip + 1` weeks.
    ///
    /// Weeks are counted from the start date, so a schedule starting on a
    /// Wednesday has weeks running Wednesday to Tuesday.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::InvalidWeekdayTable`] if `times_per_weekday` does not have 7 entries
    /// - [`ScheduleError::InvalidDateRange`] if `end` precedes `start`
    pub fn weekly_with_skip(
        start: impl Into<DateComponents>,
        times_per_weekday: Vec<Vec<TimeOfDay>>,
        weeks_to_skip: u32,
        end: Option<DateComponents>,
    ) -> Result<Self, ScheduleError> {
        ScheduleBuilder::new()
            .kind(ScheduleKind::Weekly)
            .start(start)
            .end_time(end)
            .times(times_per_weekday)
            .skip(weeks_to_skip)
            .build()
    }

    /// Binds an `Other` spec to a caller-supplied rule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::KindMismatch`] if the definition is not `Other`.
    pub fn custom<R: OccurrenceRule + 'static>(
        spec: ScheduleSpec,
        rule: R,
    ) -> Result<Self, ScheduleError> {
        Self::with_rule(spec, RecurrenceRule::custom(rule))
    }

    /// Binds a spec to the built-in rule for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::CustomRuleRequired`] for `Other` specs.
    pub fn from_spec(spec: ScheduleSpec) -> Result<Self, ScheduleError> {
        match RecurrenceRule::for_kind(spec.kind()) {
            Some(rule) => Ok(bound(spec, rule)),
            None => Err(rejected(ScheduleError::CustomRuleRequired)),
        }
    }

    /// Binds a spec to an explicit rule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::KindMismatch`] if the rule counts a different
    /// kind than the definition declares.
    pub fn with_rule(spec: ScheduleSpec, rule: RecurrenceRule) -> Result<Self, ScheduleError> {
        if rule.kind() != spec.kind() {
            return Err(rejected(ScheduleError::KindMismatch {
                expected: spec.kind(),
                got: rule.kind(),
            }));
        }
        Ok(bound(spec, rule))
    }

    /// Returns the schedule definition.
    #[inline]
    pub fn spec(&self) -> &ScheduleSpec {
        &self.spec
    }

    /// Returns the bound rule.
    #[inline]
    pub fn rule(&self) -> &RecurrenceRule {
        &self.rule
    }

    /// Returns the schedule kind.
    #[inline]
    pub fn kind(&self) -> ScheduleKind {
        self.spec.kind()
    }

    /// Returns the start of the schedule.
    #[inline]
    pub fn start_time(&self) -> DateComponents {
        self.spec.start_time()
    }

    /// Returns the end of the schedule, if bounded.
    #[inline]
    pub fn end_time(&self) -> Option<DateComponents> {
        self.spec.end_time()
    }

    /// Returns the time table.
    #[inline]
    pub fn times(&self) -> &[Vec<TimeOfDay>] {
        self.spec.times()
    }

    /// Returns the skip count.
    #[inline]
    pub fn time_units_to_skip(&self) -> u32 {
        self.spec.time_units_to_skip()
    }

    /// Returns the caller metadata.
    #[inline]
    pub fn user_info(&self) -> &UserInfo {
        self.spec.user_info()
    }

    /// Moves or clears the end of the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDateRange`] if `end_time` precedes the
    /// start date.
    pub fn set_end_time(&mut self, end_time: Option<DateComponents>) -> Result<(), ScheduleError> {
        self.spec.set_end_time(end_time).map_err(rejected)
    }

    /// Returns the number of events on `date`.
    ///
    /// Accepts a [`Date`] or [`DateComponents`]; a time of day is ignored.
    #[inline]
    pub fn number_of_events(&self, date: impl Into<Date>) -> usize {
        self.rule.number_of_events(&self.spec, date.into())
    }

    /// Returns the times of the events on `date`.
    ///
    /// The slice length equals [`CareSchedule::number_of_events`] for the
    /// built-in rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::{Date, DateComponents, TimeOfDay};
    /// use careplan_schedules::schedules::CareSchedule;
    ///
    /// let eight = TimeOfDay::from_hm(8, 0).unwrap();
    /// let schedule = CareSchedule::weekly(
    ///     DateComponents::from_ymd(2016, 1, 3).unwrap(),
    ///     vec![vec![eight], vec![], vec![], vec![], vec![], vec![], vec![]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(schedule.event_times_on(Date::from_ymd(2016, 1, 10).unwrap()), &[eight]);
    /// assert!(schedule.event_times_on(Date::from_ymd(2016, 1, 11).unwrap()).is_empty());
    /// ```
    pub fn event_times_on(&self, date: impl Into<Date>) -> &[TimeOfDay] {
        self.rule.event_times(&self.spec, date.into())
    }

    /// Returns the period containing `date`.
    ///
    /// Returns `None` outside the schedule's span and for `Other` schedules,
    /// whose periods are defined by their rule.
    pub fn period_containing(&self, date: impl Into<Date>) -> Option<ActivePeriod> {
        let date = date.into();
        if !self.spec.contains_date(date) {
            return None;
        }
        let period_days = self.kind().period_days()?;
        ActivePeriod::locate(
            self.spec.start_time().date(),
            date,
            period_days,
            self.spec.time_units_to_skip(),
        )
    }

    /// Iterates over `(date, count)` for every date in `from..=to`.
    ///
    /// The range is clipped to the schedule's span, so dates before the start
    /// or after the end are not visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::{Date, DateComponents, TimeOfDay};
    /// use careplan_schedules::schedules::CareSchedule;
    ///
    /// let schedule = CareSchedule::daily_with_skip(
    ///     DateComponents::from_ymd(2016, 1, 1).unwrap(),
    ///     vec![TimeOfDay::from_hm(8, 0).unwrap()],
    ///     1,
    ///     None,
    /// )
    /// .unwrap();
    ///
    /// let counts: Vec<usize> = schedule
    ///     .occurrences_between(
    ///         Date::from_ymd(2015, 12, 30).unwrap(),
    ///         Date::from_ymd(2016, 1, 4).unwrap(),
    ///     )
    ///     .map(|(_, count)| count)
    ///     .collect();
    ///
    /// assert_eq!(counts, vec![1, 0, 1, 0]);
    /// ```
    pub fn occurrences_between(
        &self,
        from: impl Into<Date>,
        to: impl Into<Date>,
    ) -> Occurrences<'_> {
        let from = from.into().max(self.spec.start_time().date());
        let to = match self.spec.end_time() {
            Some(end) => to.into().min(end.date()),
            None => to.into(),
        };
        Occurrences {
            schedule: self,
            next: (from <= to).then_some(from),
            last: to,
        }
    }

    /// Returns the total number of events in `from..=to`.
    pub fn total_events_between(&self, from: impl Into<Date>, to: impl Into<Date>) -> u64 {
        self.occurrences_between(from, to)
            .map(|(_, count)| count as u64)
            .sum()
    }

    /// Returns the first date strictly after `after` with at least one event.
    ///
    /// The search stops at the end date and, for unbounded schedules, after
    /// one full cycle of the rule: daily schedules repeat every
    /// `skip + 1` days, weekly schedules every `7 * (skip + 1)` days. Custom
    /// rules without a cycle are searched for
    /// [`DEFAULT_SEARCH_HORIZON_DAYS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::{Date, DateComponents, TimeOfDay};
    /// use careplan_schedules::schedules::CareSchedule;
    ///
    /// let eight = TimeOfDay::from_hm(8, 0).unwrap();
    /// let schedule = CareSchedule::weekly_with_skip(
    ///     DateComponents::from_ymd(2016, 1, 3).unwrap(),
    ///     vec![vec![eight], vec![], vec![], vec![], vec![], vec![], vec![]],
    ///     1,
    ///     None,
    /// )
    /// .unwrap();
    ///
    /// // Sunday the 10th is in a skipped week
    /// assert_eq!(
    ///     schedule.next_event_date(Date::from_ymd(2016, 1, 3).unwrap()),
    ///     Some(Date::from_ymd(2016, 1, 17).unwrap())
    /// );
    /// ```
    pub fn next_event_date(&self, after: impl Into<Date>) -> Option<Date> {
        let start = self.spec.start_time().date();
        let first = after.into().succ()?.max(start);
        let horizon = self
            .rule
            .cycle_days(&self.spec)
            .unwrap_or(DEFAULT_SEARCH_HORIZON_DAYS);
        let last = first.saturating_add_days(horizon.saturating_sub(1));

        match (&self.rule, self.kind().period_days()) {
            (RecurrenceRule::Custom(_), _) | (_, None) => self.first_event_in(first, last),
            (_, Some(period_days)) => self.first_event_in_active_periods(first, last, period_days),
        }
    }

    fn first_event_in(&self, from: Date, to: Date) -> Option<Date> {
        self.occurrences_between(from, to)
            .find(|&(_, count)| count > 0)
            .map(|(date, _)| date)
    }

    /// Visits only active periods, jumping over the skipped ones.
    fn first_event_in_active_periods(
        &self,
        from: Date,
        to: Date,
        period_days: u32,
    ) -> Option<Date> {
        let anchor = self.spec.start_time().date();
        let skip = self.spec.time_units_to_skip();
        let stride = u64::from(skip) + 1;
        let mut date = from;
        while date <= to {
            let period = ActivePeriod::locate(anchor, date, period_days, skip)?;
            if period.is_active() {
                if let Some(found) = self.first_event_in(date, period.end().min(to)) {
                    return Some(found);
                }
            }
            let next_active = (period.index() / stride + 1).checked_mul(stride)?;
            date = anchor.checked_add_days(next_active.checked_mul(u64::from(period_days))?)?;
        }
        None
    }
}

/// Iterator over the per-date event counts of a schedule.
///
/// Created by [`CareSchedule::occurrences_between`].
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    schedule: &'a CareSchedule,
    next: Option<Date>,
    last: Date,
}

impl Iterator for Occurrences<'_> {
    type Item = (Date, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let date = self.next?;
        self.next = date.succ().filter(|next| *next <= self.last);
        Some((date, self.schedule.number_of_events(date)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) => {
                let remaining = usize::try_from(self.last - next + 1).unwrap_or(usize::MAX);
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

fn bound(spec: ScheduleSpec, rule: RecurrenceRule) -> CareSchedule {
    tracing::debug!(
        kind = %spec.kind(),
        start = %spec.start_time(),
        skip = spec.time_units_to_skip(),
        custom = rule.is_custom(),
        "built care schedule"
    );
    CareSchedule { spec, rule }
}

fn rejected(err: ScheduleError) -> ScheduleError {
    tracing::warn!(error = %err, "rejected care schedule");
    err
}

/// Builder for constructing care schedules with flexible configuration.
///
/// # Examples
///
/// ```
/// use careplan_core::types::{DateComponents, TimeOfDay, UserInfo};
/// use careplan_schedules::schedules::{ScheduleBuilder, ScheduleKind};
///
/// let mut info = UserInfo::new();
/// info.insert("medication", "ibuprofen");
///
/// let schedule = ScheduleBuilder::new()
///     .kind(ScheduleKind::Daily)
///     .start(DateComponents::from_ymd(2016, 1, 1).unwrap())
///     .daily_times(vec![TimeOfDay::from_hm(8, 0).unwrap()])
///     .skip(2)
///     .user_info(info)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.time_units_to_skip(), 2);
/// assert!(schedule.user_info().contains_key("medication"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    kind: Option<ScheduleKind>,
    start: Option<DateComponents>,
    end: Option<DateComponents>,
    times: Option<Vec<Vec<TimeOfDay>>>,
    skip: u32,
    user_info: UserInfo,
    rule: Option<Arc<dyn OccurrenceRule>>,
}

impl ScheduleBuilder {
    /// Creates a new schedule builder.
    ///
    /// Defaults: unbounded, no skipped periods, empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the schedule kind.
    pub fn kind(mut self, kind: ScheduleKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the start of the schedule.
    pub fn start(mut self, start: impl Into<DateComponents>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Sets the end of the schedule.
    pub fn end(mut self, end: impl Into<DateComponents>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Sets or clears the end of the schedule.
    pub fn end_time(mut self, end: Option<DateComponents>) -> Self {
        self.end = end;
        self
    }

    /// Sets the single time list of a daily schedule.
    pub fn daily_times(mut self, times: Vec<TimeOfDay>) -> Self {
        self.times = Some(vec![times]);
        self
    }

    /// Sets the full time table.
    pub fn times(mut self, times: Vec<Vec<TimeOfDay>>) -> Self {
        self.times = Some(times);
        self
    }

    /// Sets the number of inactive periods between active ones.
    pub fn skip(mut self, time_units_to_skip: u32) -> Self {
        self.skip = time_units_to_skip;
        self
    }

    /// Sets the caller metadata.
    pub fn user_info(mut self, user_info: UserInfo) -> Self {
        self.user_info = user_info;
        self
    }

    /// Sets the custom rule of an `Other` schedule.
    pub fn rule<R: OccurrenceRule + 'static>(mut self, rule: R) -> Self {
        self.rule = Some(Arc::new(rule));
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Kind, start or times are missing
    /// - The time table shape does not fit the kind
    /// - The end date precedes the start date
    /// - An `Other` schedule has no rule, or a built-in kind was given one
    pub fn build(self) -> Result<CareSchedule, ScheduleError> {
        let kind = self
            .kind
            .ok_or(ScheduleError::MissingField { field: "kind" })
            .map_err(rejected)?;
        let start = self
            .start
            .ok_or(ScheduleError::MissingField { field: "start" })
            .map_err(rejected)?;
        let times = self
            .times
            .ok_or(ScheduleError::MissingField { field: "times" })
            .map_err(rejected)?;

        let spec = ScheduleSpec::new(kind, start, self.end, times, self.skip, self.user_info)
            .map_err(rejected)?;

        let rule = match (RecurrenceRule::for_kind(kind), self.rule) {
            (Some(builtin), None) => builtin,
            (None, Some(custom)) => RecurrenceRule::Custom(custom),
            (None, None) => return Err(rejected(ScheduleError::CustomRuleRequired)),
            (Some(_), Some(_)) => {
                return Err(rejected(ScheduleError::KindMismatch {
                    expected: kind,
                    got: ScheduleKind::Other,
                }))
            }
        };

        Ok(bound(spec, rule))
    }
}

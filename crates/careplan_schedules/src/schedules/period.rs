//! Period arithmetic for recurring schedules.

use careplan_core::types::Date;
use std::fmt;

/// Returns the number of whole periods between `start` and `date`.
///
/// Periods are anchored at `start`: period 0 covers `start` and the
/// following `period_days - 1` days. Returns `None` when `date` precedes
/// `start` or `period_days` is zero.
///
/// # Examples
///
/// ```
/// use careplan_core::types::Date;
/// use careplan_schedules::schedules::elapsed_periods;
///
/// let start = Date::from_ymd(2016, 1, 3).unwrap();
/// let date = Date::from_ymd(2016, 1, 16).unwrap();
///
/// assert_eq!(elapsed_periods(start, date, 1), Some(13));
/// assert_eq!(elapsed_periods(start, date, 7), Some(1));
/// assert_eq!(elapsed_periods(date, start, 7), None);
/// ```
#[inline]
pub fn elapsed_periods(start: Date, date: Date, period_days: u32) -> Option<u64> {
    if period_days == 0 {
        return None;
    }
    let days = u64::try_from(date - start).ok()?;
    Some(days / u64::from(period_days))
}

/// Returns whether period `elapsed` is active under a skip count.
///
/// One active period is followed by `skip` inactive ones, so period 0 is
/// always active.
///
/// # Examples
///
/// ```
/// use careplan_schedules::schedules::is_active;
///
/// assert!(is_active(0, 3));
/// assert!(!is_active(1, 1));
/// assert!(is_active(2, 1));
/// assert!(is_active(5, 0));
/// ```
#[inline]
pub fn is_active(elapsed: u64, skip: u32) -> bool {
    elapsed % (u64::from(skip) + 1) == 0
}

/// A single period of a recurring schedule.
///
/// Covers `period_days` consecutive dates starting at `start`. Both ends
/// are inclusive. The span is the natural period and is not clipped to the
/// schedule's end date.
///
/// # Examples
///
/// ```
/// use careplan_core::types::Date;
/// use careplan_schedules::schedules::ActivePeriod;
///
/// // Weekly schedule starting Sunday 2016-01-03, every other week
/// let period = ActivePeriod::locate(
///     Date::from_ymd(2016, 1, 3).unwrap(),
///     Date::from_ymd(2016, 1, 13).unwrap(),
///     7,
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(period.index(), 1);
/// assert_eq!(period.start(), Date::from_ymd(2016, 1, 10).unwrap());
/// assert_eq!(period.end(), Date::from_ymd(2016, 1, 16).unwrap());
/// assert!(!period.is_active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePeriod {
    index: u64,
    start: Date,
    end: Date,
    active: bool,
}

impl ActivePeriod {
    /// Locates the period of a schedule anchored at `anchor` containing `date`.
    ///
    /// Returns `None` if `date` precedes the anchor or `period_days` is zero.
    /// A period running past the last representable date ends at
    /// [`Date::MAX`].
    pub fn locate(anchor: Date, date: Date, period_days: u32, skip: u32) -> Option<Self> {
        let index = elapsed_periods(anchor, date, period_days)?;
        let offset = index.checked_mul(u64::from(period_days))?;
        let start = anchor.checked_add_days(offset)?;
        let end = start.saturating_add_days(u64::from(period_days) - 1);

        Some(Self {
            index,
            start,
            end,
            active: is_active(index, skip),
        })
    }

    /// Returns the zero-based period index counted from the anchor.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the first date of the period.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the last date of the period.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns whether events may occur in this period.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the number of dates in this period.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Returns whether this period contains the given date.
    ///
    /// The date is contained if start <= date <= end.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for ActivePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.active { "active" } else { "skipped" };
        write!(
            f,
            "Period {} ({} to {}, {})",
            self.index, self.start, self.end, state
        )
    }
}

//! Calendar types for schedule calculations.
//!
//! This module provides:
//! - `Date`: Type-safe Gregorian date wrapper around chrono::NaiveDate
//! - `TimeOfDay`: Wall-clock time of an event within a day
//! - `DateComponents`: A date with an optional time of day carried alongside
//!
//! All arithmetic is Gregorian and date-only. A time of day never moves
//! a date across a day boundary.
//!
//! # Examples
//!
//! ```
//! use careplan_core::types::time::{Date, DateComponents, TimeOfDay};
//!
//! let start = Date::from_ymd(2016, 1, 1).unwrap();
//! let later = Date::from_ymd(2016, 1, 11).unwrap();
//! assert_eq!(later - start, 10);
//!
//! let dose = DateComponents::with_time(start, TimeOfDay::from_hm(8, 0).unwrap());
//! assert_eq!(dose.date(), start);
//! ```

use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime, Timelike};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and standard date arithmetic.
/// Only the era/year/month/day of a date take part in comparisons.
///
/// # Examples
///
/// ```
/// use careplan_core::types::time::Date;
///
/// // Create from year, month, day
/// let date = Date::from_ymd(2016, 1, 3).unwrap();
/// assert_eq!(date.year(), 2016);
/// assert_eq!(date.month(), 1);
/// assert_eq!(date.day(), 3);
///
/// // 2016-01-03 is a Sunday
/// assert_eq!(date.weekday_index(), 0);
///
/// // Parse from ISO 8601 string
/// let parsed: Date = "2016-01-03".parse().unwrap();
/// assert_eq!(date, parsed);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// The latest representable date.
    pub const MAX: Date = Date(NaiveDate::MAX);

    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::time::Date;
    ///
    /// let leap = Date::from_ymd(2016, 2, 29).unwrap();
    /// assert_eq!(leap.day(), 29);
    ///
    /// assert!(Date::from_ymd(2015, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns today's date based on local system time.
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::time::Date;
    ///
    /// let date = Date::parse("2016-01-01").unwrap();
    /// assert_eq!(date.year(), 2016);
    ///
    /// assert!(Date::parse("not-a-date").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the underlying NaiveDate.
    ///
    /// Use this method when you need access to chrono's full API.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the weekday as an index from Sunday (0) to Saturday (6).
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::time::Date;
    ///
    /// assert_eq!(Date::from_ymd(2016, 1, 3).unwrap().weekday_index(), 0); // Sunday
    /// assert_eq!(Date::from_ymd(2016, 1, 4).unwrap().weekday_index(), 1); // Monday
    /// assert_eq!(Date::from_ymd(2016, 1, 9).unwrap().weekday_index(), 6); // Saturday
    /// ```
    #[inline]
    pub fn weekday_index(&self) -> usize {
        self.0.weekday().num_days_from_sunday() as usize
    }

    /// Returns the date `days` days later, or `None` on calendar overflow.
    #[inline]
    pub fn checked_add_days(self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Date)
    }

    /// Adds `days`, clamping to [`Date::MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2016, 1, 1).unwrap();
    /// assert_eq!(date.saturating_add_days(31), Date::from_ymd(2016, 2, 1).unwrap());
    /// assert_eq!(date.saturating_add_days(u64::MAX), Date::MAX);
    /// ```
    #[inline]
    pub fn saturating_add_days(self, days: u64) -> Self {
        self.checked_add_days(days).unwrap_or(Date::MAX)
    }

    /// Returns the following day, or `None` at the end of chrono's range.
    #[inline]
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of whole days between two dates.
    ///
    /// The result is positive if `self` is after `other`, negative otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_core::types::time::Date;
    ///
    /// let start = Date::from_ymd(2015, 12, 25).unwrap();
    /// let end = Date::from_ymd(2016, 1, 4).unwrap();
    ///
    /// assert_eq!(end - start, 10);
    /// assert_eq!(start - end, -10);
    /// ```
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Wall-clock time of an event within a day.
///
/// Times are listed per day in a schedule's time table. They are carried
/// for presentation and never influence which day an event falls on.
///
/// # Examples
///
/// ```
/// use careplan_core::types::time::TimeOfDay;
///
/// let morning = TimeOfDay::from_hm(8, 0).unwrap();
/// assert_eq!(morning.to_string(), "08:00");
///
/// let parsed: TimeOfDay = "20:30:15".parse().unwrap();
/// assert_eq!(parsed.hour(), 20);
/// assert_eq!(parsed.second(), 15);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Creates a time from hour, minute and second components.
    ///
    /// # Returns
    /// `Ok(TimeOfDay)` if the time is valid, `Err(DateError::InvalidTime)` otherwise.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, DateError> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(TimeOfDay)
            .ok_or(DateError::InvalidTime {
                hour,
                minute,
                second,
            })
    }

    /// Creates a time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, DateError> {
        Self::from_hms(hour, minute, 0)
    }

    /// Parses a time from `HH:MM` or `HH:MM:SS`.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map(TimeOfDay)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the underlying NaiveTime.
    pub fn into_inner(self) -> NaiveTime {
        self.0
    }

    /// Returns the hour component (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Returns the second component (0-59).
    pub fn second(&self) -> u32 {
        self.0.second()
    }
}

impl FromStr for TimeOfDay {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        TimeOfDay::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    /// Formats as `HH:MM`, or `HH:MM:SS` when seconds are present.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.second() == 0 {
            write!(f, "{}", self.0.format("%H:%M"))
        } else {
            write!(f, "{}", self.0.format("%H:%M:%S"))
        }
    }
}

/// A Gregorian date with an optional time of day.
///
/// Schedule start and end points are expressed as date components.
/// Counting only observes [`DateComponents::date`]; the time of day is
/// carried so that it survives persistence unchanged.
///
/// # Examples
///
/// ```
/// use careplan_core::types::time::{Date, DateComponents};
///
/// let start: DateComponents = "2016-01-01T08:30".parse().unwrap();
/// assert_eq!(start.date(), Date::from_ymd(2016, 1, 1).unwrap());
/// assert_eq!(start.time().unwrap().minute(), 30);
///
/// let plain: DateComponents = "2016-01-01".parse().unwrap();
/// assert!(plain.time().is_none());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateComponents {
    date: Date,
    time: Option<TimeOfDay>,
}

impl DateComponents {
    /// Creates date components without a time of day.
    #[inline]
    pub fn from_date(date: Date) -> Self {
        Self { date, time: None }
    }

    /// Creates date components carrying a time of day.
    #[inline]
    pub fn with_time(date: Date, time: TimeOfDay) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Creates date components from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        Date::from_ymd(year, month, day).map(Self::from_date)
    }

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or the same with a space separator.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let s = s.trim();
        match s.split_once(['T', ' ']) {
            Some((date, time)) => Ok(Self::with_time(
                Date::parse(date)?,
                TimeOfDay::parse(time)?,
            )),
            None => Date::parse(s).map(Self::from_date),
        }
    }

    /// Returns the calendar date.
    #[inline]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Returns the time of day, if one was given.
    #[inline]
    pub fn time(&self) -> Option<TimeOfDay> {
        self.time
    }
}

impl From<Date> for DateComponents {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl From<DateComponents> for Date {
    fn from(components: DateComponents) -> Self {
        components.date
    }
}

impl FromStr for DateComponents {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        DateComponents::parse(s)
    }
}

impl fmt::Display for DateComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{}T{}", self.date, time),
            None => write!(f, "{}", self.date),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{DateComponents, TimeOfDay};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for TimeOfDay {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for TimeOfDay {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            TimeOfDay::from_str(&s).map_err(de::Error::custom)
        }
    }

    impl Serialize for DateComponents {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for DateComponents {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DateComponents::from_str(&s).map_err(de::Error::custom)
        }
    }
}

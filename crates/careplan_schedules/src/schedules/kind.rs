//! Schedule kind enumeration.

use std::fmt;
use std::str::FromStr;

/// Recurrence kind of a care schedule.
///
/// Daily and weekly are the built-in kinds. Any other recurrence is tagged
/// `Other` and counted by a caller-supplied
/// [`OccurrenceRule`](super::OccurrenceRule).
///
/// # Examples
///
/// ```
/// use careplan_schedules::schedules::ScheduleKind;
///
/// let kind = ScheduleKind::Weekly;
/// assert_eq!(kind.period_days(), Some(7));
/// assert_eq!(kind.expected_time_lists(), Some(7));
/// assert_eq!("weekly".parse::<ScheduleKind>().unwrap(), kind);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleKind {
    /// Same event times on each active day.
    Daily,
    /// Per-weekday event times in each active week.
    Weekly,
    /// Recurrence counted by a custom rule.
    Other,
}

impl ScheduleKind {
    /// Returns the length of one period in days.
    ///
    /// Returns `None` for `Other`, whose period is defined by its rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_schedules::schedules::ScheduleKind;
    ///
    /// assert_eq!(ScheduleKind::Daily.period_days(), Some(1));
    /// assert_eq!(ScheduleKind::Weekly.period_days(), Some(7));
    /// assert_eq!(ScheduleKind::Other.period_days(), None);
    /// ```
    #[inline]
    pub fn period_days(&self) -> Option<u32> {
        match self {
            ScheduleKind::Daily => Some(1),
            ScheduleKind::Weekly => Some(7),
            ScheduleKind::Other => None,
        }
    }

    /// Returns the number of time lists a spec of this kind must carry.
    ///
    /// `Other` specs accept any shape.
    #[inline]
    pub fn expected_time_lists(&self) -> Option<usize> {
        match self {
            ScheduleKind::Daily => Some(1),
            ScheduleKind::Weekly => Some(7),
            ScheduleKind::Other => None,
        }
    }

    /// Returns the name of the unit skipped between active periods.
    #[inline]
    pub fn unit_name(&self) -> &'static str {
        match self {
            ScheduleKind::Daily => "day",
            ScheduleKind::Weekly => "week",
            ScheduleKind::Other => "period",
        }
    }

    /// Returns the standard lowercase name for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use careplan_schedules::schedules::ScheduleKind;
    ///
    /// assert_eq!(ScheduleKind::Daily.name(), "daily");
    /// assert_eq!(ScheduleKind::Other.name(), "other");
    /// ```
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            ScheduleKind::Daily => "daily",
            ScheduleKind::Weekly => "weekly",
            ScheduleKind::Other => "other",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScheduleKind {
    type Err = String;

    /// Parses a schedule kind from string (case-insensitive).
    ///
    /// Supported formats:
    /// - Daily: "daily", "day", "1d"
    /// - Weekly: "weekly", "week", "1w"
    /// - Other: "other", "custom"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "1d" => Ok(ScheduleKind::Daily),
            "weekly" | "week" | "1w" => Ok(ScheduleKind::Weekly),
            "other" | "custom" => Ok(ScheduleKind::Other),
            _ => Err(format!("Unknown schedule kind: {}", s)),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::ScheduleKind;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for ScheduleKind {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for ScheduleKind {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            ScheduleKind::from_str(&s).map_err(de::Error::custom)
        }
    }
}

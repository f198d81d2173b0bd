//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date and time-of-day construction and parsing

use thiserror::Error;

/// Date-related errors.
///
/// Provides structured error handling for date and time-of-day
/// construction and parsing with descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `InvalidTime`: Invalid time-of-day components (e.g., 25:00)
/// - `ParseError`: Failed to parse a date or time string
///
/// # Examples
/// ```
/// use careplan_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Invalid time-of-day components (e.g., 25:00).
    #[error("Invalid time: {hour}:{minute}:{second}")]
    InvalidTime {
        /// Hour component (0-23)
        hour: u32,
        /// Minute component (0-59)
        minute: u32,
        /// Second component (0-59)
        second: u32,
    },

    /// Failed to parse date or time string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

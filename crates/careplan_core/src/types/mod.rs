//! Calendar and metadata types for care schedules.
//!
//! This module provides:
//! - `time`: Gregorian `Date`, `TimeOfDay` and `DateComponents`
//! - `user_info`: Typed caller metadata (`UserInfo`, `UserInfoValue`)
//! - `error`: Structured error type for date and time construction
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`TimeOfDay`], [`DateComponents`] from `time`
//! - [`UserInfo`], [`UserInfoValue`] from `user_info`
//! - [`DateError`] from `error`

pub mod error;
pub mod time;
pub mod user_info;

// Re-export commonly used types at module level
pub use error::DateError;
pub use time::{Date, DateComponents, TimeOfDay};
pub use user_info::{UserInfo, UserInfoValue};

//! # careplan_core: Calendar Foundation for Care Schedules
//!
//! ## Layer 1 (Foundation) Role
//!
//! careplan_core serves as the bottom layer of the workspace, providing:
//! - Time types: `Date`, `TimeOfDay`, `DateComponents` (`types::time`)
//! - Caller metadata: `UserInfo`, `UserInfoValue` (`types::user_info`)
//! - Error types: `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other careplan_* crates, with minimal external dependencies:
//! - chrono: Gregorian date arithmetic
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use careplan_core::types::{Date, DateComponents, TimeOfDay, UserInfo};
//!
//! let start = Date::from_ymd(2016, 1, 3).unwrap();
//! assert_eq!(start.weekday_index(), 0); // Sunday
//!
//! let dose = DateComponents::with_time(start, TimeOfDay::from_hm(8, 0).unwrap());
//! assert_eq!(dose.to_string(), "2016-01-03T08:00");
//!
//! let mut info = UserInfo::new();
//! info.insert("medication", "ibuprofen");
//! assert!(!info.is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, TimeOfDay, DateComponents and UserInfo

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;

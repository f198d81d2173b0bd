//! Structural equality for schedules.
//!
//! Two specs are equal when every field is equal. Numeric metadata values
//! compare by bit pattern, so a NaN equals itself and `0.0` differs from
//! `-0.0`. Custom rules compare by identity.

use super::rule::RecurrenceRule;
use super::schedule::CareSchedule;
use super::spec::ScheduleSpec;
use std::sync::Arc;

impl PartialEq for ScheduleSpec {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.start_time() == other.start_time()
            && self.end_time() == other.end_time()
            && self.times() == other.times()
            && self.time_units_to_skip() == other.time_units_to_skip()
            && self.user_info() == other.user_info()
    }
}

impl PartialEq for RecurrenceRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecurrenceRule::Daily, RecurrenceRule::Daily) => true,
            (RecurrenceRule::Weekly, RecurrenceRule::Weekly) => true,
            (RecurrenceRule::Custom(a), RecurrenceRule::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for CareSchedule {
    fn eq(&self, other: &Self) -> bool {
        self.spec() == other.spec() && self.rule() == other.rule()
    }
}

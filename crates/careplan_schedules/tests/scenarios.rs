//! Integration tests for care schedule scenarios.
//!
//! Each test builds a schedule through the public constructors and checks
//! the per-date counts a care plan store would see.

use careplan_core::types::{Date, DateComponents, TimeOfDay};
use careplan_schedules::schedules::{CareSchedule, ScheduleError};
use std::sync::Arc;
use std::thread;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32) -> DateComponents {
    DateComponents::from_ymd(y, m, d).unwrap()
}

fn eight() -> TimeOfDay {
    TimeOfDay::from_hm(8, 0).unwrap()
}

/// Sunday, Tuesday and Thursday at 08:00.
fn sun_tue_thu() -> Vec<Vec<TimeOfDay>> {
    vec![
        vec![eight()],
        vec![],
        vec![eight()],
        vec![],
        vec![eight()],
        vec![],
        vec![],
    ]
}

/// Daily at 08:00 from 2016-01-01, unbounded.
#[test]
fn test_daily_unbounded() {
    let schedule = CareSchedule::daily(at(2016, 1, 1), vec![eight()]).unwrap();

    assert_eq!(schedule.number_of_events(date(2016, 1, 1)), 1);
    assert_eq!(schedule.number_of_events(date(2016, 1, 5)), 1);
    assert_eq!(schedule.number_of_events(date(2015, 12, 31)), 0);
}

/// Every other day from 2016-01-01 to 2016-01-10.
#[test]
fn test_daily_every_other_day_bounded() {
    let schedule =
        CareSchedule::daily_with_skip(at(2016, 1, 1), vec![eight()], 1, Some(at(2016, 1, 10)))
            .unwrap();

    for day in [1, 3, 5, 7, 9] {
        assert_eq!(schedule.number_of_events(date(2016, 1, day)), 1, "Jan {day}");
    }
    for day in [2, 4, 6, 8, 10] {
        assert_eq!(schedule.number_of_events(date(2016, 1, day)), 0, "Jan {day}");
    }
    assert_eq!(schedule.number_of_events(date(2016, 1, 11)), 0);
    assert_eq!(schedule.total_events_between(date(2015, 1, 1), date(2017, 1, 1)), 5);
}

/// Weekly from Sunday 2016-01-03 on Sunday, Tuesday and Thursday.
#[test]
fn test_weekly_per_weekday() {
    let schedule = CareSchedule::weekly(at(2016, 1, 3), sun_tue_thu()).unwrap();

    assert_eq!(schedule.number_of_events(date(2016, 1, 3)), 1);
    assert_eq!(schedule.number_of_events(date(2016, 1, 4)), 0);
    assert_eq!(schedule.number_of_events(date(2016, 1, 5)), 1);
    assert_eq!(schedule.number_of_events(date(2016, 1, 7)), 1);
    assert_eq!(schedule.number_of_events(date(2016, 1, 9)), 0);
}

/// Weekly every other week: week 0 active, week 1 skipped, week 2 active.
#[test]
fn test_weekly_every_other_week() {
    let schedule = CareSchedule::weekly_with_skip(at(2016, 1, 3), sun_tue_thu(), 1, None).unwrap();

    let week = |offset: u64| -> usize {
        let first = date(2016, 1, 3).checked_add_days(offset * 7).unwrap();
        schedule.total_events_between(first, first.checked_add_days(6).unwrap()) as usize
    };

    assert_eq!(week(0), 3);
    assert_eq!(week(1), 0);
    assert_eq!(week(2), 3);
    assert_eq!(week(3), 0);

    assert_eq!(
        schedule.next_event_date(date(2016, 1, 7)),
        Some(date(2016, 1, 17))
    );
}

#[test]
fn test_weekly_table_must_have_seven_days() {
    let mut table = sun_tue_thu();
    table.pop();

    assert_eq!(
        CareSchedule::weekly(at(2016, 1, 3), table).unwrap_err(),
        ScheduleError::InvalidWeekdayTable { got: 6 }
    );
}

#[test]
fn test_end_date_before_start_rejected() {
    let err = CareSchedule::weekly_with_skip(at(2016, 1, 3), sun_tue_thu(), 0, Some(at(2016, 1, 2)))
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidDateRange { .. }));
}

#[test]
fn test_store_moves_end_date() {
    let mut schedule = CareSchedule::daily(at(2016, 1, 1), vec![eight()]).unwrap();
    schedule.set_end_time(Some(at(2016, 1, 31))).unwrap();

    assert_eq!(schedule.number_of_events(date(2016, 1, 31)), 1);
    assert_eq!(schedule.number_of_events(date(2016, 2, 1)), 0);
    assert_eq!(schedule.next_event_date(date(2016, 1, 31)), None);
}

#[test]
fn test_shared_across_threads() {
    let schedule = Arc::new(CareSchedule::weekly(at(2016, 1, 3), sun_tue_thu()).unwrap());

    let handles: Vec<_> = (0..4u64)
        .map(|week| {
            let schedule = Arc::clone(&schedule);
            thread::spawn(move || {
                let first = date(2016, 1, 3).checked_add_days(week * 7).unwrap();
                schedule.total_events_between(first, first.checked_add_days(6).unwrap())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_persisted_schedule_counts_the_same() {
    use careplan_schedules::schedules::codec;

    let schedule =
        CareSchedule::weekly_with_skip(at(2016, 1, 3), sun_tue_thu(), 1, Some(at(2016, 3, 1)))
            .unwrap();
    let json = codec::encode_json(schedule.spec()).unwrap();
    let restored = CareSchedule::from_spec(codec::decode_json(&json).unwrap()).unwrap();

    assert_eq!(restored, schedule);
    let original: Vec<_> = schedule
        .occurrences_between(date(2016, 1, 1), date(2016, 3, 31))
        .collect();
    let decoded: Vec<_> = restored
        .occurrences_between(date(2016, 1, 1), date(2016, 3, 31))
        .collect();
    assert_eq!(original, decoded);
}

//! Criterion benchmarks for careplan_schedules event counting.
//!
//! Measures single-date counting for the built-in rules and the cost of
//! range queries across increasing spans.

use careplan_core::types::{Date, DateComponents, TimeOfDay};
use careplan_schedules::schedules::CareSchedule;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn times(n: u32) -> Vec<TimeOfDay> {
    (0..n).map(|h| TimeOfDay::from_hm(8 + h, 0).unwrap()).collect()
}

fn start() -> DateComponents {
    DateComponents::from_ymd(2016, 1, 3).unwrap()
}

/// Benchmark a single `number_of_events` query.
fn bench_number_of_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("number_of_events");

    let daily = CareSchedule::daily_with_skip(start(), times(3), 2, None).unwrap();
    let weekly = CareSchedule::weekly_with_skip(start(), vec![times(2); 7], 1, None).unwrap();
    let query = Date::from_ymd(2019, 7, 14).unwrap();

    group.bench_function("daily", |b| {
        b.iter(|| daily.number_of_events(black_box(query)));
    });
    group.bench_function("weekly", |b| {
        b.iter(|| weekly.number_of_events(black_box(query)));
    });

    group.finish();
}

/// Benchmark range totals over spans of increasing length.
fn bench_occurrences_between(c: &mut Criterion) {
    let mut group = c.benchmark_group("occurrences_between");

    let weekly = CareSchedule::weekly_with_skip(start(), vec![times(2); 7], 1, None).unwrap();
    let from = Date::from_ymd(2016, 1, 3).unwrap();

    for days in [30u64, 365, 3650] {
        let to = from.checked_add_days(days - 1).unwrap();
        group.bench_with_input(BenchmarkId::new("total", days), &to, |b, &to| {
            b.iter(|| weekly.total_events_between(black_box(from), black_box(to)));
        });
    }

    // Worst case: one full cycle with no events
    let empty = CareSchedule::weekly_with_skip(start(), vec![vec![]; 7], 52, None).unwrap();
    group.bench_function("next_event_date_empty", |b| {
        b.iter(|| empty.next_event_date(black_box(from)));
    });

    group.finish();
}

criterion_group!(benches, bench_number_of_events, bench_occurrences_between);
criterion_main!(benches);

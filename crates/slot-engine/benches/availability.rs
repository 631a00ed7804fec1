use std::hint::black_box;
use std::num::NonZeroU32;

use chrono::{Days, NaiveDate, Weekday};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use slot_engine::{
    compute_available_slots, subtract, BookedInterval, Interval, ServiceRequirement, TimeOfDay,
    WorkingWindow,
};

fn tod(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hms(hour, minute, 0).unwrap()
}

/// Mon-Fri 09:00-13:00 and 14:00-18:00, with `per_day` half-hour bookings
/// spread across every weekday of the horizon.
fn week_fixture(per_day: u32) -> (Vec<WorkingWindow>, Vec<BookedInterval>) {
    let weekdays = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
    let windows = weekdays
        .iter()
        .flat_map(|&day| {
            [(9, 13), (14, 18)].map(|(start, end)| WorkingWindow {
                professional_id: 1,
                day_of_week: day,
                start: tod(start, 0),
                end: tod(end, 0),
            })
        })
        .collect();

    let first = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let bookings = (0..31u64)
        .filter_map(|offset| first.checked_add_days(Days::new(offset)))
        .flat_map(|date| {
            (0..per_day).map(move |i| BookedInterval {
                professional_id: 1,
                date,
                start: tod(9 + i % 9, 0),
                end: tod(9 + i % 9, 30),
            })
        })
        .collect();

    (windows, bookings)
}

fn bench_compute_available_slots(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_available_slots");
    let service = ServiceRequirement {
        service_id: 1,
        duration_minutes: NonZeroU32::new(30).unwrap(),
    };
    let now = NaiveDate::from_ymd_opt(2026, 3, 16)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap();

    for per_day in [0u32, 4, 8] {
        let (windows, bookings) = week_fixture(per_day);
        group.bench_with_input(
            BenchmarkId::new("bookings_per_day", per_day),
            &(windows, bookings),
            |b, (windows, bookings)| {
                b.iter(|| compute_available_slots(black_box(windows), black_box(bookings), &service, 1, now))
            },
        );
    }

    group.finish();
}

fn bench_subtract(c: &mut Criterion) {
    let base = Interval::new(tod(0, 0), tod(23, 59)).unwrap();
    let cuts: Vec<Interval> = (0..40u32)
        .rev()
        .map(|i| Interval::new(tod(i / 2, (i % 2) * 30), tod(i / 2, (i % 2) * 30 + 20)).unwrap())
        .collect();

    c.bench_function("subtract_40_unsorted_cuts", |b| {
        b.iter(|| subtract(black_box(base), black_box(&cuts).iter().copied()))
    });
}

criterion_group!(benches, bench_compute_available_slots, bench_subtract);
criterion_main!(benches);

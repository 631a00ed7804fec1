//! Property-based tests for interval subtraction and slot computation.
//!
//! These verify invariants that should hold for *any* set of windows and
//! bookings, not just the worked examples in `availability_tests.rs`.

use std::num::NonZeroU32;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use proptest::prelude::*;
use slot_engine::time::weekday_number;
use slot_engine::{
    compute_available_slots, overlaps, subtract, BookedInterval, Interval, ServiceRequirement,
    TimeOfDay, WorkingWindow,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A non-empty interval on a 5-minute grid (keeps point sampling cheap).
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0u32..287, 1u32..=48).prop_map(|(start, len)| {
        let start_min = start * 5;
        let end_min = (start_min + len * 5).min(24 * 60 - 1);
        Interval::new(minute(start_min), minute(end_min)).unwrap()
    })
}

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| weekday_number::from_number(n).unwrap())
}

fn arb_window() -> impl Strategy<Value = WorkingWindow> {
    (arb_weekday(), arb_interval()).prop_map(|(day, span)| WorkingWindow {
        professional_id: 1,
        day_of_week: day,
        start: span.start,
        end: span.end,
    })
}

/// Bookings fall within the first week of the horizon.
fn arb_booking() -> impl Strategy<Value = BookedInterval> {
    (0u64..7, arb_interval()).prop_map(|(offset, span)| BookedInterval {
        professional_id: 1,
        date: base_date() + chrono::Days::new(offset),
        start: span.start,
        end: span.end,
    })
}

fn arb_now() -> impl Strategy<Value = NaiveDateTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| base_date().and_hms_opt(h, m, 0).unwrap())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn minute(m: u32) -> TimeOfDay {
    TimeOfDay::from_seconds(m * 60).unwrap()
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn service(minutes: u32) -> ServiceRequirement {
    ServiceRequirement {
        service_id: 1,
        duration_minutes: NonZeroU32::new(minutes).unwrap(),
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Every minute of the base is in exactly one output segment if and only
    /// if no cut covers it.
    #[test]
    fn subtraction_partitions_the_uncut_time(
        base in arb_interval(),
        cuts in prop::collection::vec(arb_interval(), 0..8),
    ) {
        let segments = subtract(base, cuts.iter().copied());

        for s in &segments {
            prop_assert!(s.start < s.end, "empty segment {:?}", s);
            prop_assert!(base.start <= s.start && s.end <= base.end, "{:?} escapes base", s);
        }
        for pair in segments.windows(2) {
            prop_assert!(pair[0].end < pair[1].start, "segments touch or overlap: {:?}", pair);
        }

        for m in (base.start.seconds() / 60)..(base.end.seconds() / 60) {
            let point = minute(m);
            let cut = cuts.iter().any(|c| c.contains(point));
            let covering = segments.iter().filter(|s| s.contains(point)).count();
            prop_assert_eq!(covering, usize::from(!cut), "minute {}", point);
        }
    }

    #[test]
    fn emitted_slots_are_exact_disjoint_and_free(
        windows in prop::collection::vec(arb_window(), 0..4),
        bookings in prop::collection::vec(arb_booking(), 0..6),
        duration in 5u32..=120,
        now in arb_now(),
    ) {
        // Overlapping windows may legitimately yield overlapping slots, so
        // keep only a non-conflicting set.
        let mut accepted: Vec<WorkingWindow> = Vec::new();
        for w in windows {
            if !slot_engine::has_conflict(&accepted, &w).unwrap() {
                accepted.push(w);
            }
        }

        let slots = compute_available_slots(&accepted, &bookings, &service(duration), 1, now)
            .unwrap();

        for slot in &slots {
            let span = slot.interval().unwrap();
            prop_assert_eq!(span.duration_seconds(), duration * 60);

            let inside_window = accepted.iter().any(|w| {
                w.day_of_week == slot.date.weekday()
                    && w.start <= slot.start
                    && slot.end <= w.end
            });
            prop_assert!(inside_window, "{:?} outside every window", slot);

            let hits_booking = bookings
                .iter()
                .filter(|b| b.date == slot.date)
                .any(|b| overlaps(&b.interval().unwrap(), &span));
            prop_assert!(!hits_booking, "{:?} overlaps a booking", slot);

            if slot.date == now.date() {
                prop_assert!(NaiveDateTime::new(slot.date, slot.start.into()) >= now);
            }
        }

        for (i, a) in slots.iter().enumerate() {
            for b in slots.iter().skip(i + 1).filter(|b| b.date == a.date) {
                prop_assert!(
                    !overlaps(&a.interval().unwrap(), &b.interval().unwrap()),
                    "{:?} overlaps {:?}", a, b
                );
            }
        }

        prop_assert!(slots.windows(2).all(|p| p[0].date <= p[1].date));
    }
}

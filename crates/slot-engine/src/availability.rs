//! Compute bookable fixed-duration slots over a rolling horizon.
//!
//! For every date from today through today + 30, the professional's working
//! windows for that weekday are clipped to "now" (today only), have the day's
//! bookings subtracted, and the remaining free segments are packed greedily
//! with back-to-back slots of exactly the service duration.
//!
//! Pure and deterministic: the caller injects `now`; no clock is read here.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};

use crate::error::Result;
use crate::interval::{self, Interval};
use crate::model::{BookedInterval, ProfessionalId, ServiceRequirement, Slot, WorkingWindow};
use crate::time::{TimeOfDay, SECONDS_PER_DAY};

/// Number of calendar days searched, today included.
pub const HORIZON_DAYS: u64 = 31;

/// All slots for one professional and service over [`HORIZON_DAYS`] days
/// starting at `now.date()`.
///
/// Windows and bookings for other professionals are ignored, so callers may
/// pass unfiltered collections. Slots come back ordered by date, then by the
/// order the matching windows appear in `windows`, then by start time.
///
/// A professional with no windows yields an empty list. A window shorter than
/// the service duration contributes nothing.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if any of the professional's windows
/// or bookings has `start >= end`. Malformed inputs are never clamped.
pub fn compute_available_slots(
    windows: &[WorkingWindow],
    booked: &[BookedInterval],
    service: &ServiceRequirement,
    professional_id: ProfessionalId,
    now: NaiveDateTime,
) -> Result<Vec<Slot>> {
    let windows = own_windows(windows, professional_id)?;
    if windows.is_empty() {
        return Ok(Vec::new());
    }
    let booked = own_bookings(booked, professional_id)?;

    let today = now.date();
    let mut slots = Vec::new();

    for date in horizon(today) {
        let clip = (date == today).then(|| clip_point(now));
        slots.extend(slots_on(&windows, &booked, service, professional_id, date, clip));
    }

    Ok(slots)
}

/// Dates `[today, today + HORIZON_DAYS - 1]`.
pub fn horizon(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    (0..HORIZON_DAYS).filter_map(move |offset| today.checked_add_days(Days::new(offset)))
}

/// Seconds since midnight that no slot on today's date may start before.
///
/// A fractional second rounds up, so a slot can never begin in the past. May
/// equal `SECONDS_PER_DAY` for the last instant of the day.
fn clip_point(now: NaiveDateTime) -> u32 {
    let time = now.time();
    let whole = time.num_seconds_from_midnight();
    if time.nanosecond() > 0 {
        (whole + 1).min(SECONDS_PER_DAY)
    } else {
        whole
    }
}

/// The professional's windows as validated spans, input order preserved.
fn own_windows(
    windows: &[WorkingWindow],
    professional_id: ProfessionalId,
) -> Result<Vec<(chrono::Weekday, Interval)>> {
    windows
        .iter()
        .filter(|w| w.professional_id == professional_id)
        .map(|w| Ok((w.day_of_week, w.interval()?)))
        .collect()
}

fn own_bookings(
    booked: &[BookedInterval],
    professional_id: ProfessionalId,
) -> Result<Vec<(NaiveDate, Interval)>> {
    booked
        .iter()
        .filter(|b| b.professional_id == professional_id)
        .map(|b| Ok((b.date, b.interval()?)))
        .collect()
}

/// Slots for a single date. `clip` is the earliest allowed start in seconds,
/// set only for today.
fn slots_on(
    windows: &[(chrono::Weekday, Interval)],
    booked: &[(NaiveDate, Interval)],
    service: &ServiceRequirement,
    professional_id: ProfessionalId,
    date: NaiveDate,
    clip: Option<u32>,
) -> Vec<Slot> {
    let weekday = date.weekday();
    let day_bookings: Vec<Interval> = booked
        .iter()
        .filter(|(d, _)| *d == date)
        .map(|(_, span)| *span)
        .collect();

    let mut slots = Vec::new();

    for (_, window) in windows.iter().filter(|(day, _)| *day == weekday) {
        let Some(window) = clip_window(*window, clip) else {
            continue;
        };

        for segment in interval::subtract(window, day_bookings.iter().copied()) {
            pack(segment, service.duration_minutes.get(), |start, end| {
                slots.push(Slot {
                    professional_id,
                    service_id: service.service_id,
                    date,
                    start,
                    end,
                });
            });
        }
    }

    slots
}

/// Move the window's start up to `clip`. `None` if nothing is left.
fn clip_window(window: Interval, clip: Option<u32>) -> Option<Interval> {
    let Some(clip) = clip else {
        return Some(window);
    };
    if clip <= window.start.seconds() {
        return Some(window);
    }
    if clip >= window.end.seconds() {
        return None;
    }
    // clip < window.end < SECONDS_PER_DAY, so this always converts.
    TimeOfDay::from_seconds(clip).map(|start| Interval {
        start,
        end: window.end,
    })
}

/// Emit back-to-back `[cursor, cursor + duration)` slots while they fit in
/// `segment`. A short remainder at the end is dropped.
fn pack(segment: Interval, duration_minutes: u32, mut emit: impl FnMut(TimeOfDay, TimeOfDay)) {
    let mut cursor = segment.start;
    while let Some(end) = cursor.checked_add_minutes(duration_minutes) {
        if end > segment.end {
            break;
        }
        emit(cursor, end);
        cursor = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn pack_drops_short_remainder() {
        let mut out = Vec::new();
        let segment = Interval::new(t("09:00"), t("10:40")).unwrap();
        pack(segment, 30, |s, e| out.push((s, e)));
        assert_eq!(
            out,
            vec![
                (t("09:00"), t("09:30")),
                (t("09:30"), t("10:00")),
                (t("10:00"), t("10:30")),
            ]
        );
    }

    #[test]
    fn clip_rounds_fractional_seconds_up() {
        let now = NaiveDate::from_ymd_opt(2026, 3, 16)
            .unwrap()
            .and_hms_milli_opt(10, 30, 0, 250)
            .unwrap();
        assert_eq!(clip_point(now), t("10:30:01").seconds());
    }

    #[test]
    fn clip_window_cases() {
        let window = Interval::new(t("09:00"), t("17:00")).unwrap();
        assert_eq!(clip_window(window, None), Some(window));
        assert_eq!(clip_window(window, Some(t("08:00").seconds())), Some(window));
        assert_eq!(
            clip_window(window, Some(t("10:30").seconds())),
            Some(Interval::new(t("10:30"), t("17:00")).unwrap())
        );
        assert_eq!(clip_window(window, Some(t("17:00").seconds())), None);
        assert_eq!(clip_window(window, Some(SECONDS_PER_DAY)), None);
    }

    #[test]
    fn horizon_spans_year_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 20).unwrap();
        let dates: Vec<NaiveDate> = horizon(today).collect();
        assert_eq!(dates.len(), 31);
        assert_eq!(dates[0], today);
        assert_eq!(dates[30], NaiveDate::from_ymd_opt(2027, 1, 19).unwrap());
    }
}

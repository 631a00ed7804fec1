//! Detect overlapping working windows for a professional.
//!
//! Two windows conflict when they belong to the same professional, fall on the
//! same day of the week, and their time spans overlap. Adjacent windows (one
//! ends exactly when the other starts) are NOT conflicts.

use crate::error::Result;
use crate::interval::{overlaps, Interval};
use crate::model::WorkingWindow;

/// Return every existing window the proposed one would overlap.
///
/// The proposed window's shape is validated first: `start >= end` fails with
/// `InvalidInterval` before any comparison is made. Existing windows for other
/// professionals or other days are ignored.
pub fn find_conflicting_windows<'a>(
    existing: &'a [WorkingWindow],
    proposed: &WorkingWindow,
) -> Result<Vec<&'a WorkingWindow>> {
    let candidate = proposed.interval()?;

    let conflicts = existing
        .iter()
        .filter(|w| {
            w.professional_id == proposed.professional_id && w.day_of_week == proposed.day_of_week
        })
        .filter(|w| {
            let span = Interval {
                start: w.start,
                end: w.end,
            };
            overlaps(&span, &candidate)
        })
        .collect();

    Ok(conflicts)
}

/// True if `proposed` overlaps any existing window for the same professional
/// and day of the week.
pub fn has_conflict(existing: &[WorkingWindow], proposed: &WorkingWindow) -> Result<bool> {
    find_conflicting_windows(existing, proposed).map(|found| !found.is_empty())
}

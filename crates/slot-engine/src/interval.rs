//! Half-open time-of-day intervals: overlap testing and subtraction.
//!
//! Both the working-window conflict check and the slot calculator go through
//! [`overlaps`] and [`subtract`], so the two always agree on what "overlapping"
//! means. Intervals are `[start, end)`; adjacent intervals (one ends exactly
//! where the other starts) do NOT overlap.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::TimeOfDay;

/// A non-empty `[start, end)` interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Interval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration_seconds(&self) -> u32 {
        self.end.seconds().saturating_sub(self.start.seconds())
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_seconds() / 60
    }

    pub fn contains(&self, t: TimeOfDay) -> bool {
        self.start <= t && t < self.end
    }
}

/// True iff `a.start < b.end && a.end > b.start`.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start < b.end && a.end > b.start
}

/// How a single cut affects a single free segment.
enum Cut {
    /// The cut covers the whole segment.
    Consumed,
    /// The cut sits strictly inside the segment.
    Split(Interval, Interval),
    /// The cut overlaps the segment's start; the right part survives.
    Right(Interval),
    /// The cut overlaps the segment's end; the left part survives.
    Left(Interval),
    Untouched(Interval),
}

fn classify(segment: Interval, cut: &Interval) -> Cut {
    if !overlaps(&segment, cut) {
        return Cut::Untouched(segment);
    }

    let covers_start = cut.start <= segment.start;
    let covers_end = cut.end >= segment.end;

    match (covers_start, covers_end) {
        (true, true) => Cut::Consumed,
        (false, false) => Cut::Split(
            Interval {
                start: segment.start,
                end: cut.start,
            },
            Interval {
                start: cut.end,
                end: segment.end,
            },
        ),
        (true, false) => Cut::Right(Interval {
            start: cut.end,
            end: segment.end,
        }),
        (false, true) => Cut::Left(Interval {
            start: segment.start,
            end: cut.start,
        }),
    }
}

/// Remove every `cut` from `base`.
///
/// Returns the remaining free segments: disjoint, ascending, non-empty, and
/// all contained in `base`. Cuts may be unsorted, overlap each other, touch,
/// or lie partly or wholly outside `base`. Cuts with `start >= end` remove
/// nothing.
pub fn subtract<I>(base: Interval, cuts: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    // Fields are public, so an inverted or empty cut can reach here. It
    // covers no time and is dropped.
    let mut cuts: Vec<Interval> = cuts.into_iter().filter(|c| c.start < c.end).collect();
    cuts.sort_by_key(|c| (c.start, c.end));

    let mut segments = vec![base];

    for cut in &cuts {
        if segments.is_empty() {
            break;
        }

        let mut next = Vec::with_capacity(segments.len() + 1);
        for segment in segments {
            match classify(segment, cut) {
                Cut::Consumed => {}
                Cut::Split(left, right) => {
                    next.push(left);
                    next.push(right);
                }
                Cut::Right(piece) | Cut::Left(piece) | Cut::Untouched(piece) => next.push(piece),
            }
        }
        segments = next;
    }

    // Only a degenerate base can leave an empty segment here.
    segments.retain(|s| s.start < s.end);
    segments
}

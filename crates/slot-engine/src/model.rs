//! Plain value records exchanged with the engine.
//!
//! Callers build these from their own storage immediately before a call and
//! drop them once the result is consumed. Nothing here is mutated by the
//! engine.

use std::num::NonZeroU32;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::Interval;
use crate::time::{weekday_number, TimeOfDay};

pub type ProfessionalId = u64;
pub type ServiceId = u64;

/// A recurring weekly interval during which a professional takes appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingWindow {
    pub professional_id: ProfessionalId,
    /// 0 = Sunday .. 6 = Saturday on the wire.
    #[serde(with = "weekday_number")]
    pub day_of_week: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl WorkingWindow {
    /// The window's time span, or `InvalidInterval` if `start >= end`.
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(self.start, self.end)
    }
}

/// The span of an existing appointment on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub professional_id: ProfessionalId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl BookedInterval {
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(self.start, self.end)
    }
}

/// A bookable service and its fixed duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequirement {
    pub service_id: ServiceId,
    pub duration_minutes: NonZeroU32,
}

/// A candidate appointment time. Not yet booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub professional_id: ProfessionalId,
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Slot {
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(self.start, self.end)
    }
}

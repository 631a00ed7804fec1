//! # slot-engine
//!
//! Deterministic availability computation for appointment booking.
//!
//! Given a professional's recurring weekly working windows, a service's fixed
//! duration and the intervals already booked, the engine computes every
//! bookable slot over a 31-day horizon. It also decides whether a proposed
//! working window would overlap the ones a professional already has.
//!
//! Everything is wall-clock local time (a date plus a time of day). The engine
//! performs no I/O and never reads a clock: the caller supplies `now`.
//!
//! ## Quick start
//!
//! ```rust
//! use std::num::NonZeroU32;
//! use chrono::{NaiveDate, Weekday};
//! use slot_engine::{compute_available_slots, ServiceRequirement, WorkingWindow};
//!
//! let windows = vec![WorkingWindow {
//!     professional_id: 1,
//!     day_of_week: Weekday::Mon,
//!     start: "09:00".parse().unwrap(),
//!     end: "11:00".parse().unwrap(),
//! }];
//! let service = ServiceRequirement {
//!     service_id: 7,
//!     duration_minutes: NonZeroU32::new(30).unwrap(),
//! };
//! // A Sunday evening: today's date has no window, tomorrow is Monday.
//! let now = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap().and_hms_opt(20, 0, 0).unwrap();
//!
//! let slots = compute_available_slots(&windows, &[], &service, 1, now).unwrap();
//! assert_eq!(slots[0].start.to_string(), "09:00:00");
//! assert_eq!(slots.len(), 4 * 5); // four slots on each of five Mondays
//! ```
//!
//! ## Modules
//!
//! - [`time`] - `TimeOfDay`, seconds since midnight
//! - [`interval`] - overlap test and interval subtraction shared by everything else
//! - [`conflict`] - working-window conflict detection
//! - [`availability`] - slot computation over the horizon
//! - [`catalog`] - in-memory record store with id lookups and atomic inserts
//! - [`model`] - the records passed in and out
//! - [`error`] - Error types

pub mod availability;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod model;
pub mod time;

pub use availability::{compute_available_slots, HORIZON_DAYS};
pub use catalog::{Appointment, Catalog, Professional};
pub use conflict::{find_conflicting_windows, has_conflict};
pub use error::{EntityKind, Result, SlotError};
pub use interval::{overlaps, subtract, Interval};
pub use model::{BookedInterval, ProfessionalId, ServiceId, ServiceRequirement, Slot, WorkingWindow};
pub use time::TimeOfDay;

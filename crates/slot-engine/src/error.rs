//! Error types for slot-engine operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::TimeOfDay;

/// The kind of record a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Professional,
    Service,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Professional => f.write_str("professional"),
            EntityKind::Service => f.write_str("service"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// An interval whose start is not strictly before its end.
    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    /// A referenced professional or service is absent from the supplied data.
    #[error("Not found: {0}")]
    NotFound(EntityKind),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    /// Raised by [`Catalog::add_window`](crate::catalog::Catalog::add_window)
    /// when the proposed window overlaps a stored one.
    #[error("Working window {start}-{end} overlaps an existing window for this professional on this day")]
    WindowConflict { start: TimeOfDay, end: TimeOfDay },

    /// Raised by [`Catalog::book`](crate::catalog::Catalog::book) when the
    /// requested time is already booked.
    #[error("Slot {start}-{end} on {date} is already booked")]
    SlotTaken {
        date: chrono::NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    #[error("JSON parse error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SlotError {
    fn from(err: serde_json::Error) -> Self {
        SlotError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;

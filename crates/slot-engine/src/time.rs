//! Wall-clock time of day, stored as whole seconds since midnight.
//!
//! No date and no timezone is attached. Ordering and arithmetic are plain
//! integer operations, so comparisons never depend on string formatting.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SlotError};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Seconds since midnight, always in `[0, 86400)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Build from a raw seconds count. Returns `None` at or past 24:00:00.
    pub const fn from_seconds(seconds: u32) -> Option<Self> {
        if seconds < SECONDS_PER_DAY {
            Some(TimeOfDay(seconds))
        } else {
            None
        }
    }

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(SlotError::InvalidTime(format!(
                "{:02}:{:02}:{:02}",
                hour, minute, second
            )));
        }
        Ok(TimeOfDay(hour * 3600 + minute * 60 + second))
    }

    pub const fn seconds(self) -> u32 {
        self.0
    }

    pub const fn hour(self) -> u32 {
        self.0 / 3600
    }

    pub const fn minute(self) -> u32 {
        (self.0 / 60) % 60
    }

    pub const fn second(self) -> u32 {
        self.0 % 60
    }

    /// Add whole minutes, returning `None` if the result would cross midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(|secs| self.0.checked_add(secs))
            .and_then(Self::from_seconds)
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Truncates any fractional second.
    fn from(time: NaiveTime) -> Self {
        TimeOfDay(time.num_seconds_from_midnight())
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(time: TimeOfDay) -> Self {
        // Always in range: the newtype never holds 86400 or more.
        NaiveTime::from_num_seconds_from_midnight_opt(time.0, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Accepts `HH:MM` or `HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTime(s.to_string());

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let mut fields = [0u32; 3];
        for (field, part) in fields.iter_mut().zip(&parts) {
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *field = part.parse().map_err(|_| invalid())?;
        }

        Self::from_hms(fields[0], fields[1], fields[2]).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `chrono::Weekday` as an integer, 0 = Sunday .. 6 = Saturday.
pub mod weekday_number {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn to_number(day: Weekday) -> u8 {
        day.num_days_from_sunday() as u8
    }

    pub fn from_number(n: u8) -> Option<Weekday> {
        match n {
            0 => Some(Weekday::Sun),
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            _ => None,
        }
    }

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(to_number(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let n = u8::deserialize(deserializer)?;
        from_number(n).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "day of week must be between 0 (Sunday) and 6 (Saturday), got {}",
                n
            ))
        })
    }
}

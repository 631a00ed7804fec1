//! In-memory record store standing in for the persistence layer.
//!
//! Holds professionals, services, working windows and bookings, resolves ids
//! for slot queries, and performs the check-then-insert sequences for new
//! windows and bookings. Every mutation takes `&mut self`, so the conflict
//! check and the insert happen under one exclusive borrow and two callers can
//! never interleave between them. A shared catalog must be wrapped in a lock
//! that is held across the whole call.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::availability::compute_available_slots;
use crate::conflict::find_conflicting_windows;
use crate::error::{EntityKind, Result, SlotError};
use crate::interval::{overlaps, Interval};
use crate::model::{
    BookedInterval, ProfessionalId, ServiceId, ServiceRequirement, Slot, WorkingWindow,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    pub id: ProfessionalId,
    pub name: String,
    /// Services this professional offers.
    #[serde(default)]
    pub services: Vec<ServiceId>,
}

/// A stored booking together with the service it was made for.
///
/// Serializes flat: `{"service_id", "professional_id", "date", "start", "end"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub service_id: ServiceId,
    #[serde(flatten)]
    pub booked: BookedInterval,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub professionals: Vec<Professional>,
    #[serde(default)]
    pub services: Vec<ServiceRequirement>,
    #[serde(default)]
    pub windows: Vec<WorkingWindow>,
    #[serde(default)]
    pub bookings: Vec<Appointment>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn professional(&self, id: ProfessionalId) -> Result<&Professional> {
        self.professionals
            .iter()
            .find(|p| p.id == id)
            .ok_or(SlotError::NotFound(EntityKind::Professional))
    }

    pub fn service(&self, id: ServiceId) -> Result<&ServiceRequirement> {
        self.services
            .iter()
            .find(|s| s.service_id == id)
            .ok_or(SlotError::NotFound(EntityKind::Service))
    }

    /// Services the professional offers, in the order they are listed.
    /// Ids with no matching service record are skipped.
    pub fn services_for(
        &self,
        professional_id: ProfessionalId,
    ) -> Result<Vec<&ServiceRequirement>> {
        let professional = self.professional(professional_id)?;
        Ok(professional
            .services
            .iter()
            .filter_map(|id| self.services.iter().find(|s| s.service_id == *id))
            .collect())
    }

    pub fn appointments_for(&self, professional_id: ProfessionalId) -> Vec<&Appointment> {
        self.bookings
            .iter()
            .filter(|a| a.booked.professional_id == professional_id)
            .collect()
    }

    pub fn windows_for(&self, professional_id: ProfessionalId) -> Vec<&WorkingWindow> {
        self.windows
            .iter()
            .filter(|w| w.professional_id == professional_id)
            .collect()
    }

    /// Bookable slots for a professional and service over the horizon.
    ///
    /// # Errors
    /// `NotFound(Service)` if the service is unknown (checked first), then
    /// `NotFound(Professional)` if the professional is unknown. A known
    /// professional without windows yields `Ok` with an empty list.
    pub fn find_available_slots(
        &self,
        professional_id: ProfessionalId,
        service_id: ServiceId,
        now: NaiveDateTime,
    ) -> Result<Vec<Slot>> {
        let service = self.service(service_id)?;
        self.professional(professional_id)?;

        let booked: Vec<BookedInterval> = self
            .bookings
            .iter()
            .map(|a| a.booked.clone())
            .collect();

        compute_available_slots(
            &self.windows,
            &booked,
            service,
            professional_id,
            now,
        )
    }

    /// Validate and store a new working window.
    ///
    /// # Errors
    /// `NotFound(Professional)`, `InvalidInterval` for `start >= end`, or
    /// `WindowConflict` if it overlaps a stored window on the same weekday.
    pub fn add_window(&mut self, proposed: WorkingWindow) -> Result<()> {
        self.professional(proposed.professional_id)?;

        let conflicting = find_conflicting_windows(&self.windows, &proposed)?;
        if !conflicting.is_empty() {
            warn!(
                professional_id = proposed.professional_id,
                day_of_week = %proposed.day_of_week,
                start = %proposed.start,
                end = %proposed.end,
                overlapping = conflicting.len(),
                "rejected overlapping working window"
            );
            return Err(SlotError::WindowConflict {
                start: proposed.start,
                end: proposed.end,
            });
        }

        debug!(
            professional_id = proposed.professional_id,
            day_of_week = %proposed.day_of_week,
            start = %proposed.start,
            end = %proposed.end,
            "stored working window"
        );
        self.windows.push(proposed);
        Ok(())
    }

    /// Record an appointment for `service_id`.
    ///
    /// # Errors
    /// `NotFound` for an unknown professional or service, `InvalidInterval`
    /// for `start >= end` in the request or in a stored booking it is checked
    /// against, or `SlotTaken` if it overlaps an existing booking for the same
    /// professional on the same date.
    pub fn book(&mut self, booking: BookedInterval, service_id: ServiceId) -> Result<()> {
        self.professional(booking.professional_id)?;
        self.service(service_id)?;

        let requested = booking.interval()?;
        let same_day: Vec<Interval> = self
            .bookings
            .iter()
            .map(|a| &a.booked)
            .filter(|b| b.professional_id == booking.professional_id && b.date == booking.date)
            .map(BookedInterval::interval)
            .collect::<Result<_>>()?;
        let taken = same_day.iter().any(|existing| overlaps(existing, &requested));

        if taken {
            warn!(
                professional_id = booking.professional_id,
                date = %booking.date,
                start = %booking.start,
                end = %booking.end,
                "rejected booking for taken time"
            );
            return Err(SlotError::SlotTaken {
                date: booking.date,
                start: booking.start,
                end: booking.end,
            });
        }

        debug!(
            professional_id = booking.professional_id,
            service_id,
            date = %booking.date,
            start = %booking.start,
            end = %booking.end,
            "stored booking"
        );
        self.bookings.push(Appointment {
            service_id,
            booked: booking,
        });
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::constants::TICKET_PREFIX;

/// Identity of a catalog slot. Specialties compare by this id, never by name
/// text, so two same-named entries from different slots stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpecialtyId(usize);

impl SpecialtyId {
    #[must_use]
    pub fn new(slot: usize) -> Self {
        Self(slot)
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for SpecialtyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A medical specialty as seeded into the catalog.
///
/// Intentionally no `PartialEq`: identity lives in `id` alone, and callers
/// compare through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialty {
    pub id: SpecialtyId,
    pub name: String,
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Shared identity fields for everyone registered at the hospital.
///
/// The national id is the lookup key within each registry. Uniqueness is not
/// enforced; lookups return the first match in registration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub full_name: String,
    pub national_id: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | ID: {}", self.full_name, self.national_id)
    }
}

/// A registered patient. Immutable after registration; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub person: Person,
    pub medical_record: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient: {} | Record: {} | ID: {}",
            self.person.full_name, self.medical_record, self.person.national_id
        )
    }
}

/// A registered doctor with an ordered list of open appointment slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub person: Person,
    pub license_code: String,
    pub specialty: Specialty,
    /// Open slots in presentation order. Booking removes entries; nothing
    /// ever re-adds one.
    pub open_slots: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dr. {} | {} | License: {}",
            self.person.full_name, self.specialty.name, self.license_code
        )
    }
}

/// A registered nurse. Nurses do not participate in scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nurse {
    pub id: Uuid,
    pub person: Person,
    pub nurse_code: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Nurse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nurse: {} | Code: {}", self.person.full_name, self.nurse_code)
    }
}

/// A booked appointment.
///
/// Patient and doctor are held by record id and resolved through the
/// directory at display time; the specialty is derived from the doctor,
/// never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    /// Sequential booking number, starting at 1, never reused.
    pub id: u64,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    /// The consumed time-point, no longer present in the doctor's
    /// availability.
    pub slot: DateTime<Utc>,
    pub ticket: String,
    pub booked_at: DateTime<Utc>,
}

/// Ticket code for a booking: prefix, zero-padded appointment id, and the
/// patient's national id.
#[must_use]
pub fn ticket_code(appointment_id: u64, national_id: &str) -> String {
    format!("{}-{:04}-{}", TICKET_PREFIX, appointment_id, national_id)
}

use chrono::{DateTime, Utc};
use std::sync::Mutex;
use tracing::debug;

use crate::domain::{ticket_code, Appointment, Doctor, Patient};

/// Append-only record of every booking, plus the counter that numbers them.
///
/// Counter and entries live under one lock so allocating an id and appending
/// the appointment is a single step: ids run 1, 2, 3, … in ledger order and
/// are never reused.
#[derive(Debug, Default)]
pub struct AppointmentLedger {
    inner: Mutex<LedgerInner>,
}

#[derive(Debug)]
struct LedgerInner {
    next_id: u64,
    entries: Vec<Appointment>,
}

impl Default for LedgerInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

impl AppointmentLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number, ticket, and record a booking in one step.
    pub fn record_booking(
        &self,
        patient: &Patient,
        doctor: &Doctor,
        slot: DateTime<Utc>,
    ) -> Appointment {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        let appointment = Appointment {
            id,
            patient_id: patient.id,
            doctor_id: doctor.id,
            slot,
            ticket: ticket_code(id, &patient.person.national_id),
            booked_at: Utc::now(),
        };
        inner.entries.push(appointment.clone());
        debug!(
            "Recorded appointment {} ({}) for patient {}",
            id, appointment.ticket, patient.id
        );
        appointment
    }

    /// All appointments in booking order.
    #[must_use]
    pub fn all(&self) -> Vec<Appointment> {
        self.inner.lock().unwrap().entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Person, Specialty, SpecialtyId};
    use uuid::Uuid;

    fn patient(national_id: &str) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            person: Person {
                full_name: "Ana Ruiz".to_string(),
                national_id: national_id.to_string(),
            },
            medical_record: "H-001".to_string(),
            created_at: Utc::now(),
        }
    }

    fn doctor() -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            person: Person {
                full_name: "Luis Paz".to_string(),
                national_id: "87654321".to_string(),
            },
            license_code: "MP-01".to_string(),
            specialty: Specialty {
                id: SpecialtyId::new(0),
                name: "Cardiología".to_string(),
            },
            open_slots: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn ids_start_at_one_and_increase_in_booking_order() {
        let ledger = AppointmentLedger::new();
        let patient = patient("12345678");
        let doctor = doctor();

        for _ in 0..5 {
            ledger.record_booking(&patient, &doctor, Utc::now());
        }

        let ids: Vec<u64> = ledger.all().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn tickets_carry_the_patient_national_id() {
        let ledger = AppointmentLedger::new();
        let doctor = doctor();

        let first = ledger.record_booking(&patient("12345678"), &doctor, Utc::now());
        let second = ledger.record_booking(&patient("555"), &doctor, Utc::now());

        assert_eq!(first.ticket, "TCK-0001-12345678");
        assert_eq!(second.ticket, "TCK-0002-555");
    }

    #[test]
    fn entries_keep_booking_order() {
        let ledger = AppointmentLedger::new();
        let patient = patient("12345678");
        let doctor = doctor();
        assert!(ledger.is_empty());

        let slots: Vec<DateTime<Utc>> = (1..=3)
            .map(|h| Utc::now() + chrono::Duration::hours(h))
            .collect();
        for slot in &slots {
            ledger.record_booking(&patient, &doctor, *slot);
        }

        let recorded: Vec<DateTime<Utc>> = ledger.all().iter().map(|a| a.slot).collect();
        assert_eq!(recorded, slots);
        assert_eq!(ledger.len(), 3);
    }
}

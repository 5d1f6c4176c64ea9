use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Appointment, Doctor, Nurse, Patient, Person, Specialty, SpecialtyId};
use crate::error::{HospitalError, Result};
use crate::ledger::AppointmentLedger;

/// Registries and booking operations over hospital state.
///
/// All state lives for the process lifetime; records are never deleted.
/// Registration always succeeds and never checks for duplicates.
#[async_trait]
pub trait HospitalStore: Send + Sync {
    // Patient registry
    async fn register_patient(
        &self,
        full_name: &str,
        medical_record: &str,
        national_id: &str,
    ) -> Result<Patient>;
    /// Linear scan; first match in registration order wins.
    async fn find_patient_by_national_id(&self, national_id: &str) -> Result<Option<Patient>>;
    async fn patient(&self, id: Uuid) -> Result<Option<Patient>>;
    async fn patients(&self) -> Result<Vec<Patient>>;

    // Doctor registry and availability
    async fn register_doctor(
        &self,
        full_name: &str,
        national_id: &str,
        license_code: &str,
        specialty: Specialty,
        open_slots: Vec<DateTime<Utc>>,
    ) -> Result<Doctor>;
    async fn doctor(&self, id: Uuid) -> Result<Option<Doctor>>;
    async fn doctors(&self) -> Result<Vec<Doctor>>;
    /// Filtered by catalog-slot identity, never by name text.
    async fn doctors_with_specialty(&self, specialty: SpecialtyId) -> Result<Vec<Doctor>>;
    /// The doctor's current open slots, in presentation order.
    async fn open_slots(&self, doctor_id: Uuid) -> Result<Vec<DateTime<Utc>>>;

    // Nurse registry
    async fn register_nurse(
        &self,
        full_name: &str,
        national_id: &str,
        nurse_code: &str,
    ) -> Result<Nurse>;
    async fn nurses(&self) -> Result<Vec<Nurse>>;

    // Booking and ledger
    /// Convert the slot at `slot_index` (0-based) of the doctor's
    /// availability into a booked appointment. Atomic: either the
    /// appointment is recorded and the slot removed, or nothing changes.
    async fn book_appointment(
        &self,
        patient_id: Uuid,
        doctor_id: Uuid,
        slot_index: usize,
    ) -> Result<Appointment>;
    /// All appointments in booking order.
    async fn appointments(&self) -> Result<Vec<Appointment>>;
}

/// In-memory hospital state: the patient/doctor/nurse registries and the
/// appointment ledger.
///
/// Collections are vectors, not maps: registration order is load-bearing
/// (first-match national-id lookups, 1-based positional selection), and the
/// registries are small enough that linear scans are fine.
#[derive(Debug, Default)]
pub struct InMemoryHospital {
    patients: Mutex<Vec<Patient>>,
    doctors: Mutex<Vec<Doctor>>,
    nurses: Mutex<Vec<Nurse>>,
    ledger: AppointmentLedger,
}

impl InMemoryHospital {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HospitalStore for InMemoryHospital {
    async fn register_patient(
        &self,
        full_name: &str,
        medical_record: &str,
        national_id: &str,
    ) -> Result<Patient> {
        let patient = Patient {
            id: Uuid::new_v4(),
            person: Person {
                full_name: full_name.to_string(),
                national_id: national_id.to_string(),
            },
            medical_record: medical_record.to_string(),
            created_at: Utc::now(),
        };

        let mut patients = self.patients.lock().unwrap();
        patients.push(patient.clone());

        debug!("Registered patient {} with id {}", full_name, patient.id);
        Ok(patient)
    }

    async fn find_patient_by_national_id(&self, national_id: &str) -> Result<Option<Patient>> {
        let patients = self.patients.lock().unwrap();
        let patient = patients
            .iter()
            .find(|p| p.person.national_id == national_id)
            .cloned();
        Ok(patient)
    }

    async fn patient(&self, id: Uuid) -> Result<Option<Patient>> {
        let patients = self.patients.lock().unwrap();
        Ok(patients.iter().find(|p| p.id == id).cloned())
    }

    async fn patients(&self) -> Result<Vec<Patient>> {
        Ok(self.patients.lock().unwrap().clone())
    }

    async fn register_doctor(
        &self,
        full_name: &str,
        national_id: &str,
        license_code: &str,
        specialty: Specialty,
        open_slots: Vec<DateTime<Utc>>,
    ) -> Result<Doctor> {
        let doctor = Doctor {
            id: Uuid::new_v4(),
            person: Person {
                full_name: full_name.to_string(),
                national_id: national_id.to_string(),
            },
            license_code: license_code.to_string(),
            specialty,
            open_slots,
            created_at: Utc::now(),
        };

        let mut doctors = self.doctors.lock().unwrap();
        doctors.push(doctor.clone());

        debug!(
            "Registered doctor {} ({}) with {} open slots",
            full_name,
            doctor.specialty.name,
            doctor.open_slots.len()
        );
        Ok(doctor)
    }

    async fn doctor(&self, id: Uuid) -> Result<Option<Doctor>> {
        let doctors = self.doctors.lock().unwrap();
        Ok(doctors.iter().find(|d| d.id == id).cloned())
    }

    async fn doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.doctors.lock().unwrap().clone())
    }

    async fn doctors_with_specialty(&self, specialty: SpecialtyId) -> Result<Vec<Doctor>> {
        let doctors = self.doctors.lock().unwrap();
        let matching: Vec<Doctor> = doctors
            .iter()
            .filter(|d| d.specialty.id == specialty)
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn open_slots(&self, doctor_id: Uuid) -> Result<Vec<DateTime<Utc>>> {
        let doctors = self.doctors.lock().unwrap();
        let doctor = doctors
            .iter()
            .find(|d| d.id == doctor_id)
            .ok_or(HospitalError::DoctorNotFound(doctor_id))?;
        Ok(doctor.open_slots.clone())
    }

    async fn register_nurse(
        &self,
        full_name: &str,
        national_id: &str,
        nurse_code: &str,
    ) -> Result<Nurse> {
        let nurse = Nurse {
            id: Uuid::new_v4(),
            person: Person {
                full_name: full_name.to_string(),
                national_id: national_id.to_string(),
            },
            nurse_code: nurse_code.to_string(),
            created_at: Utc::now(),
        };

        let mut nurses = self.nurses.lock().unwrap();
        nurses.push(nurse.clone());

        debug!("Registered nurse {} with id {}", full_name, nurse.id);
        Ok(nurse)
    }

    async fn nurses(&self) -> Result<Vec<Nurse>> {
        Ok(self.nurses.lock().unwrap().clone())
    }

    /// The booking critical section.
    ///
    /// Held locks: the doctor registry across the whole operation, the
    /// ledger inside `record_booking`. Lock order is patients → doctors →
    /// ledger, and no lock is held across an await. `slot_index` is
    /// 0-based; errors report the 1-based position as shown in menus.
    #[instrument(skip(self))]
    async fn book_appointment(
        &self,
        patient_id: Uuid,
        doctor_id: Uuid,
        slot_index: usize,
    ) -> Result<Appointment> {
        let patient = {
            let patients = self.patients.lock().unwrap();
            patients.iter().find(|p| p.id == patient_id).cloned()
        }
        .ok_or_else(|| HospitalError::PatientNotFound(patient_id.to_string()))?;

        let mut doctors = self.doctors.lock().unwrap();
        let doctor = doctors
            .iter_mut()
            .find(|d| d.id == doctor_id)
            .ok_or(HospitalError::DoctorNotFound(doctor_id))?;

        // Bounds check before touching anything: a bad index must leave the
        // availability and the ledger exactly as they were.
        if slot_index >= doctor.open_slots.len() {
            return Err(HospitalError::InvalidSelection {
                position: slot_index.saturating_add(1),
                available: doctor.open_slots.len(),
            });
        }
        let slot = doctor.open_slots[slot_index];

        let appointment = self.ledger.record_booking(&patient, doctor, slot);
        doctor.open_slots.remove(slot_index);

        info!(
            "Booked appointment {} ({}) with Dr. {}, {} slots remain",
            appointment.id,
            appointment.ticket,
            doctor.person.full_name,
            doctor.open_slots.len()
        );
        Ok(appointment)
    }

    async fn appointments(&self) -> Result<Vec<Appointment>> {
        Ok(self.ledger.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpecialtyCatalog;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn cardiology() -> Specialty {
        SpecialtyCatalog::default().select(1).unwrap().clone()
    }

    fn slots(count: i64) -> Vec<DateTime<Utc>> {
        (1..=count).map(|h| Utc::now() + chrono::Duration::hours(h)).collect()
    }

    #[tokio::test]
    async fn national_id_lookup_returns_first_match_in_registration_order() {
        let store = InMemoryHospital::new();
        let first = store
            .register_patient("Ana Ruiz", "H-001", "12345678")
            .await
            .unwrap();
        store
            .register_patient("Ana Ruiz II", "H-002", "12345678")
            .await
            .unwrap();

        let found = store
            .find_patient_by_national_id("12345678")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.medical_record, "H-001");

        assert!(store
            .find_patient_by_national_id("00000000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn specialty_filter_compares_slot_identity_not_name() {
        let store = InMemoryHospital::new();
        let catalog = SpecialtyCatalog::from_names(["Cardiología", "Cardiología"]);
        let slot_one = catalog.select(1).unwrap().clone();
        let slot_two = catalog.select(2).unwrap().clone();

        store
            .register_doctor("Luis Paz", "87654321", "MP-01", slot_one.clone(), slots(2))
            .await
            .unwrap();

        let same_slot = store.doctors_with_specialty(slot_one.id).await.unwrap();
        assert_eq!(same_slot.len(), 1);

        // Same name, different catalog slot: no match.
        let other_slot = store.doctors_with_specialty(slot_two.id).await.unwrap();
        assert!(other_slot.is_empty());
    }

    #[tokio::test]
    async fn booking_consumes_the_selected_slot_and_shifts_the_rest() {
        let store = InMemoryHospital::new();
        let patient = store
            .register_patient("Ana Ruiz", "H-001", "12345678")
            .await
            .unwrap();
        let seeded = slots(3);
        let doctor = store
            .register_doctor("Luis Paz", "87654321", "MP-01", cardiology(), seeded.clone())
            .await
            .unwrap();

        let appointment = store
            .book_appointment(patient.id, doctor.id, 1)
            .await
            .unwrap();
        assert_eq!(appointment.slot, seeded[1]);
        assert_eq!(appointment.patient_id, patient.id);
        assert_eq!(appointment.doctor_id, doctor.id);

        let remaining = store.open_slots(doctor.id).await.unwrap();
        assert_eq!(remaining, vec![seeded[0], seeded[2]]);
    }

    #[tokio::test]
    async fn out_of_range_slot_leaves_everything_unchanged() {
        let store = InMemoryHospital::new();
        let patient = store
            .register_patient("Ana Ruiz", "H-001", "12345678")
            .await
            .unwrap();
        let seeded = slots(2);
        let doctor = store
            .register_doctor("Luis Paz", "87654321", "MP-01", cardiology(), seeded.clone())
            .await
            .unwrap();

        let err = store
            .book_appointment(patient.id, doctor.id, 2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HospitalError::InvalidSelection {
                position: 3,
                available: 2
            }
        ));

        assert_eq!(store.open_slots(doctor.id).await.unwrap(), seeded);
        assert!(store.appointments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booking_requires_registered_patient_and_doctor() {
        let store = InMemoryHospital::new();
        let patient = store
            .register_patient("Ana Ruiz", "H-001", "12345678")
            .await
            .unwrap();
        let doctor = store
            .register_doctor("Luis Paz", "87654321", "MP-01", cardiology(), slots(1))
            .await
            .unwrap();

        let ghost = Uuid::new_v4();
        assert!(matches!(
            store.book_appointment(ghost, doctor.id, 0).await.unwrap_err(),
            HospitalError::PatientNotFound(_)
        ));
        assert!(matches!(
            store.book_appointment(patient.id, ghost, 0).await.unwrap_err(),
            HospitalError::DoctorNotFound(_)
        ));
        // Neither failed precondition consumed the slot.
        assert_eq!(store.open_slots(doctor.id).await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_bookings_never_double_consume_a_slot() {
        let store = Arc::new(InMemoryHospital::new());
        let patient = store
            .register_patient("Ana Ruiz", "H-001", "12345678")
            .await
            .unwrap();
        let doctor = store
            .register_doctor("Luis Paz", "87654321", "MP-01", cardiology(), slots(2))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            let (patient_id, doctor_id) = (patient.id, doctor.id);
            handles.push(tokio::spawn(async move {
                store.book_appointment(patient_id, doctor_id, 0).await
            }));
        }

        let mut booked = Vec::new();
        for handle in handles {
            if let Ok(appointment) = handle.await.unwrap() {
                booked.push(appointment);
            }
        }

        // Two slots, four attempts: exactly two bookings, distinct slots.
        assert_eq!(booked.len(), 2);
        let unique: HashSet<_> = booked.iter().map(|a| a.slot).collect();
        assert_eq!(unique.len(), 2);
        assert!(store.open_slots(doctor.id).await.unwrap().is_empty());
        assert_eq!(store.appointments().await.unwrap().len(), 2);
    }
}

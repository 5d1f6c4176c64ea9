use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::catalog::SpecialtyCatalog;
use crate::domain::{Appointment, Doctor, Patient, Specialty};
use crate::error::{HospitalError, Result};
use crate::selection;
use crate::store::HospitalStore;

/// One appointment joined with the people behind it, ready for display.
///
/// Built live from the registries at listing time, so a doctor's current
/// specialty is what shows up, not whatever it was when the slot was booked.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentSummary {
    pub ticket: String,
    pub patient_name: String,
    pub specialty_name: String,
    pub doctor_name: String,
    pub slot: DateTime<Utc>,
}

impl std::fmt::Display for AppointmentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "🎫 {} | {} | {} | Dr. {} | {}",
            self.ticket,
            self.patient_name,
            self.specialty_name,
            self.doctor_name,
            self.slot.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Drives the booking workflow: resolves the patient, narrows doctors by
/// specialty, validates the menu selection and hands the final slot claim
/// to the store.
pub struct Scheduler {
    store: Arc<dyn HospitalStore>,
    catalog: Arc<SpecialtyCatalog>,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("catalog", &self.catalog)
            .finish()
    }
}

impl Scheduler {
    pub fn new(store: Arc<dyn HospitalStore>, catalog: Arc<SpecialtyCatalog>) -> Self {
        Self { store, catalog }
    }

    pub fn catalog(&self) -> &SpecialtyCatalog {
        &self.catalog
    }

    /// Resolve a patient by national id or fail with the id echoed back.
    pub async fn find_patient(&self, national_id: &str) -> Result<Patient> {
        self.store
            .find_patient_by_national_id(national_id)
            .await?
            .ok_or_else(|| HospitalError::PatientNotFound(national_id.to_string()))
    }

    /// Doctors holding the given catalog specialty, in registration order.
    /// An empty result is an error here: the guided flow has nothing to offer.
    pub async fn doctors_for(&self, specialty: &Specialty) -> Result<Vec<Doctor>> {
        let doctors = self.store.doctors_with_specialty(specialty.id).await?;
        if doctors.is_empty() {
            return Err(HospitalError::NoDoctorsAvailable(specialty.name.clone()));
        }
        debug!(
            "{} doctor(s) available for {}",
            doctors.len(),
            specialty.name
        );
        Ok(doctors)
    }

    /// The doctor's open slots, failing when there is nothing left to book.
    pub async fn open_slots(&self, doctor: &Doctor) -> Result<Vec<DateTime<Utc>>> {
        let slots = self.store.open_slots(doctor.id).await?;
        if slots.is_empty() {
            return Err(HospitalError::NoOpenSlots(doctor.person.full_name.clone()));
        }
        Ok(slots)
    }

    /// Book by 0-based slot index. The store does the atomic claim.
    pub async fn book(
        &self,
        patient: &Patient,
        doctor: &Doctor,
        slot_index: usize,
    ) -> Result<Appointment> {
        self.store
            .book_appointment(patient.id, doctor.id, slot_index)
            .await
    }

    /// Book by 1-based menu position, validating it against the slots the
    /// caller was just shown.
    #[instrument(skip(self, patient, doctor))]
    pub async fn book_by_selection(
        &self,
        patient: &Patient,
        doctor: &Doctor,
        position: usize,
    ) -> Result<Appointment> {
        let slots = self.open_slots(doctor).await?;
        let slot_index = selection::pick_index(slots.len(), position)?;
        debug!(
            "Selection {} maps to slot {}",
            position,
            slots[slot_index].format("%Y-%m-%d %H:%M")
        );
        self.book(patient, doctor, slot_index).await
    }

    pub async fn appointments(&self) -> Result<Vec<Appointment>> {
        self.store.appointments().await
    }

    /// All appointments joined with patient and doctor details, in booking
    /// order. Registries never forget a record, so a dangling id means the
    /// ledger and the registries disagree and the join fails loudly.
    pub async fn appointment_summaries(&self) -> Result<Vec<AppointmentSummary>> {
        let appointments = self.store.appointments().await?;
        let mut summaries = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            let patient = self
                .store
                .patient(appointment.patient_id)
                .await?
                .ok_or_else(|| {
                    HospitalError::PatientNotFound(appointment.patient_id.to_string())
                })?;
            let doctor = self
                .store
                .doctor(appointment.doctor_id)
                .await?
                .ok_or(HospitalError::DoctorNotFound(appointment.doctor_id))?;
            summaries.push(AppointmentSummary {
                ticket: appointment.ticket.clone(),
                patient_name: patient.person.full_name.clone(),
                specialty_name: doctor.specialty.name.clone(),
                doctor_name: doctor.person.full_name.clone(),
                slot: appointment.slot,
            });
        }
        Ok(summaries)
    }
}

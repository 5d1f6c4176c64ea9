use chrono::Utc;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::warn;

use crate::config::SchedulingConfig;
use crate::domain::Specialty;
use crate::error::{HospitalError, Result};
use crate::scheduler::Scheduler;
use crate::selection;
use crate::store::HospitalStore;

/// Interactive desk menu over stdin/stdout.
///
/// Registration and booking failures are printed and the menu comes back;
/// only I/O failures on the terminal itself end the loop.
pub struct Shell {
    store: Arc<dyn HospitalStore>,
    scheduler: Scheduler,
    scheduling: SchedulingConfig,
}

impl Shell {
    pub fn new(
        store: Arc<dyn HospitalStore>,
        scheduler: Scheduler,
        scheduling: SchedulingConfig,
    ) -> Self {
        Self {
            store,
            scheduler,
            scheduling,
        }
    }

    pub async fn run(&self) -> Result<()> {
        loop {
            print_menu();
            let choice = match prompt("Select an option: ") {
                Ok(choice) => choice,
                // Treat a closed stdin like choosing Exit
                Err(HospitalError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    println!();
                    break;
                }
                Err(e) => return Err(e),
            };

            match choice.as_str() {
                "1" => self.report(self.register_patient().await),
                "2" => self.report(self.register_doctor().await),
                "3" => self.report(self.register_nurse().await),
                "4" => self.report(self.book_appointment().await),
                "5" => self.report(self.list_appointments().await),
                "0" => {
                    println!("👋 Goodbye");
                    break;
                }
                other => println!("❌ Invalid option '{other}'"),
            }
        }
        Ok(())
    }

    fn report(&self, outcome: Result<()>) {
        if let Err(e) = outcome {
            warn!("Desk operation failed: {e}");
            println!("❌ {e}");
        }
    }

    async fn register_patient(&self) -> Result<()> {
        println!("--- Register patient ---");
        let full_name = prompt("Full name: ")?;
        let national_id = prompt("National id: ")?;
        let medical_record = prompt("Medical record: ")?;

        let patient = self
            .store
            .register_patient(&full_name, &medical_record, &national_id)
            .await?;
        println!("✅ Registered {patient}");
        Ok(())
    }

    async fn register_doctor(&self) -> Result<()> {
        println!("--- Register doctor ---");
        let full_name = prompt("Full name: ")?;
        let national_id = prompt("National id: ")?;
        let license_code = prompt("License code: ")?;
        let specialty = self.pick_specialty()?;

        // New doctors start with the configured availability template.
        let open_slots = self.scheduling.seed_slots(Utc::now());
        let doctor = self
            .store
            .register_doctor(&full_name, &national_id, &license_code, specialty, open_slots)
            .await?;
        println!(
            "✅ Registered {doctor} with {} open slot(s)",
            doctor.open_slots.len()
        );
        Ok(())
    }

    async fn register_nurse(&self) -> Result<()> {
        println!("--- Register nurse ---");
        let full_name = prompt("Full name: ")?;
        let national_id = prompt("National id: ")?;
        let nurse_code = prompt("Nurse code: ")?;

        let nurse = self
            .store
            .register_nurse(&full_name, &national_id, &nurse_code)
            .await?;
        println!("✅ Registered {nurse}");
        Ok(())
    }

    /// The guided flow: patient by national id, then specialty, doctor and
    /// slot by menu position. Every step validates before moving on.
    async fn book_appointment(&self) -> Result<()> {
        println!("--- Book appointment ---");
        let national_id = prompt("Patient national id: ")?;
        let patient = self.scheduler.find_patient(&national_id).await?;
        println!("   {patient}");

        let specialty = self.pick_specialty()?;
        let doctors = self.scheduler.doctors_for(&specialty).await?;
        println!("Doctors for {}:", specialty.name);
        for (position, doctor) in doctors.iter().enumerate() {
            println!("  {}. {doctor}", position + 1);
        }
        let doctor = selection::pick(&doctors, selection::parse_choice(&prompt("Doctor: ")?)?)?;

        let slots = self.scheduler.open_slots(doctor).await?;
        println!("Open slots:");
        for (position, slot) in slots.iter().enumerate() {
            println!("  {}. {}", position + 1, slot.format("%Y-%m-%d %H:%M"));
        }
        let position = selection::parse_choice(&prompt("Slot: ")?)?;

        let appointment = self
            .scheduler
            .book_by_selection(&patient, doctor, position)
            .await?;
        println!("🎫 Appointment booked: {}", appointment.ticket);
        Ok(())
    }

    async fn list_appointments(&self) -> Result<()> {
        let summaries = self.scheduler.appointment_summaries().await?;
        if summaries.is_empty() {
            println!("No appointments on record yet.");
            return Ok(());
        }

        println!("--- Appointments ({}) ---", summaries.len());
        for summary in &summaries {
            println!("{summary}");
        }
        Ok(())
    }

    fn pick_specialty(&self) -> Result<Specialty> {
        println!("Specialties:");
        for (position, specialty) in self.scheduler.catalog().list().iter().enumerate() {
            println!("  {}. {}", position + 1, specialty.name);
        }
        let position = selection::parse_choice(&prompt("Specialty: ")?)?;
        Ok(self.scheduler.catalog().select(position)?.clone())
    }
}

fn print_menu() {
    println!();
    println!("===== HOSPITAL DESK =====");
    println!("1. Register patient");
    println!("2. Register doctor");
    println!("3. Register nurse");
    println!("4. Book appointment");
    println!("5. List appointments");
    println!("0. Exit");
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
    }
    Ok(input.trim().to_string())
}

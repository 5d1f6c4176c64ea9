use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use meddesk::catalog::SpecialtyCatalog;
use meddesk::config::{HospitalConfig, DEFAULT_CONFIG_PATH};
use meddesk::error::HospitalError;
use meddesk::logging;
use meddesk::scheduler::Scheduler;
use meddesk::shell::Shell;
use meddesk::store::{HospitalStore, InMemoryHospital};

#[derive(Parser)]
#[command(name = "meddesk")]
#[command(about = "Hospital desk: staff and patient registration plus appointment booking")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive desk menu (the default)
    Desk,
    /// Seed a demo hospital, book until the calendar drains, print the ledger
    Demo {
        /// Print the resulting appointments as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let store: Arc<dyn HospitalStore> = Arc::new(InMemoryHospital::new());
    let catalog = Arc::new(SpecialtyCatalog::from_names(
        config.catalog.specialties.clone(),
    ));
    let scheduler = Scheduler::new(Arc::clone(&store), Arc::clone(&catalog));

    match cli.command.unwrap_or(Commands::Desk) {
        Commands::Desk => {
            info!("Starting desk session");
            let shell = Shell::new(Arc::clone(&store), scheduler, config.scheduling.clone());
            shell.run().await?;
        }
        Commands::Demo { json } => {
            run_demo(&store, &scheduler, &config, json).await?;
        }
    }

    Ok(())
}

/// An explicit --config must load or the run stops; the implicit
/// config.toml falls back to defaults when unreadable.
fn load_config(explicit: Option<&Path>) -> Result<HospitalConfig, HospitalError> {
    if let Some(path) = explicit {
        println!("📄 Loading configuration from {}", path.display());
        return HospitalConfig::load(path);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        match HospitalConfig::load(DEFAULT_CONFIG_PATH) {
            Ok(config) => Ok(config),
            Err(e) => {
                println!("⚠️ Ignoring {DEFAULT_CONFIG_PATH}: {e}");
                Ok(HospitalConfig::default())
            }
        }
    } else {
        Ok(HospitalConfig::default())
    }
}

/// Seeds one patient and one doctor, books until the doctor's calendar is
/// empty, then shows that the next attempt is refused.
async fn run_demo(
    store: &Arc<dyn HospitalStore>,
    scheduler: &Scheduler,
    config: &HospitalConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🏥 Seeding demo hospital");
    let patient = store
        .register_patient("Ana Ruiz", "H-001", "12345678")
        .await?;
    let specialty = scheduler.catalog().select(1)?.clone();
    let doctor = store
        .register_doctor(
            "Luis Paz",
            "87654321",
            "MP-2044",
            specialty,
            config.scheduling.seed_slots(Utc::now()),
        )
        .await?;
    println!("   {patient}");
    println!("   {doctor}");

    while let Ok(appointment) = scheduler.book_by_selection(&patient, &doctor, 1).await {
        println!("🎫 Booked {}", appointment.ticket);
    }
    match scheduler.book_by_selection(&patient, &doctor, 1).await {
        Ok(_) => println!("⚠️ Expected the calendar to be empty"),
        Err(e) => println!("✅ Next attempt refused: {e}"),
    }

    let summaries = scheduler.appointment_summaries().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("--- Appointments ({}) ---", summaries.len());
        for summary in &summaries {
            println!("{summary}");
        }
    }
    Ok(())
}

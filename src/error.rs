use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("No patient found for identifier '{0}'")]
    PatientNotFound(String),

    #[error("No doctor found for id '{0}'")]
    DoctorNotFound(Uuid),

    #[error("No doctors available for specialty '{0}'")]
    NoDoctorsAvailable(String),

    #[error("Doctor '{0}' has no open slots")]
    NoOpenSlots(String),

    #[error("Selection {position} is out of range ({available} available)")]
    InvalidSelection { position: usize, available: usize },

    #[error("Expected a numeric selection, got '{0}'")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HospitalError>;

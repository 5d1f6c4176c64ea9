use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_SLOT_OFFSETS_HOURS, DEFAULT_SPECIALTIES};
use crate::error::{HospitalError, Result};

/// Default location of the desk configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Desk-wide configuration: the specialty catalog seed and the slot seeding
/// policy applied when a doctor is registered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HospitalConfig {
    pub catalog: CatalogConfig,
    pub scheduling: SchedulingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Specialty names in presentation order.
    pub specialties: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            specialties: DEFAULT_SPECIALTIES.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Hour offsets from registration time for a new doctor's seeded slots.
    pub seed_slot_offsets_hours: Vec<i64>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            seed_slot_offsets_hours: DEFAULT_SLOT_OFFSETS_HOURS.to_vec(),
        }
    }
}

impl HospitalConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            HospitalError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: HospitalConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.catalog.specialties.is_empty() {
            return Err(HospitalError::Config(
                "catalog must list at least one specialty".to_string(),
            ));
        }
        Ok(())
    }
}

impl SchedulingConfig {
    /// Open slots for a doctor registered at `from`, per the seeding policy.
    #[must_use]
    pub fn seed_slots(&self, from: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        self.seed_slot_offsets_hours
            .iter()
            .map(|hours| from + Duration::hours(*hours))
            .collect()
    }
}

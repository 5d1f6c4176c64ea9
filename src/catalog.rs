use crate::constants::DEFAULT_SPECIALTIES;
use crate::domain::{Specialty, SpecialtyId};
use crate::error::Result;
use crate::selection;

/// The fixed set of specialties offered by the hospital.
///
/// Seeded once at startup and read-only afterwards. Slot order is the
/// presentation order, and the slot position doubles as the specialty's
/// identity (`SpecialtyId`).
#[derive(Debug, Clone)]
pub struct SpecialtyCatalog {
    entries: Vec<Specialty>,
}

impl SpecialtyCatalog {
    /// Build a catalog from the configured names, in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = names
            .into_iter()
            .enumerate()
            .map(|(slot, name)| Specialty {
                id: SpecialtyId::new(slot),
                name: name.into(),
            })
            .collect();
        Self { entries }
    }

    /// All specialties in stable presentation order.
    #[must_use]
    pub fn list(&self) -> &[Specialty] {
        &self.entries
    }

    /// Resolve a 1-based menu position, bounds-checked.
    pub fn select(&self, position: usize) -> Result<&Specialty> {
        selection::pick(&self.entries, position)
    }

    /// Look up a specialty by its slot identity.
    #[must_use]
    pub fn get(&self, id: SpecialtyId) -> Option<&Specialty> {
        self.entries.get(id.value())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpecialtyCatalog {
    fn default() -> Self {
        Self::from_names(DEFAULT_SPECIALTIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HospitalError;

    #[test]
    fn default_catalog_keeps_seed_order() {
        let catalog = SpecialtyCatalog::default();
        let names: Vec<&str> = catalog.list().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["Cardiología", "Pediatría", "Neurología", "Dermatología"]
        );
    }

    #[test]
    fn select_is_one_based_and_bounds_checked() {
        let catalog = SpecialtyCatalog::default();
        assert_eq!(catalog.select(1).unwrap().name, "Cardiología");
        assert_eq!(catalog.select(4).unwrap().name, "Dermatología");
        assert!(matches!(
            catalog.select(5).unwrap_err(),
            HospitalError::InvalidSelection {
                position: 5,
                available: 4
            }
        ));
        assert!(catalog.select(0).is_err());
    }

    #[test]
    fn same_name_in_different_slots_stays_distinct() {
        let catalog = SpecialtyCatalog::from_names(["Cardiología", "Cardiología"]);
        let first = catalog.select(1).unwrap();
        let second = catalog.select(2).unwrap();
        assert_eq!(first.name, second.name);
        assert_ne!(first.id, second.id);
    }
}

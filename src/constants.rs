/// Specialties seeded into the catalog when no configuration overrides them.
/// Order is significant: selection menus present these by 1-based position.
pub const DEFAULT_SPECIALTIES: [&str; 4] = [
    "Cardiología",
    "Pediatría",
    "Neurología",
    "Dermatología",
];

/// Hour offsets from registration time used to seed a new doctor's open
/// slots when the registration workflow does not supply its own list.
pub const DEFAULT_SLOT_OFFSETS_HOURS: [i64; 2] = [1, 2];

/// Prefix for appointment ticket codes, e.g. `TCK-0001-12345678`.
pub const TICKET_PREFIX: &str = "TCK";

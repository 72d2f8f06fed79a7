//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default database location (created on first run)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://eventpro.db?mode=rwc";

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// JUDGING DEFAULTS (seeded into a fresh database)
// =============================================================================

/// Default number of judges per event
pub const DEFAULT_NUMBER_OF_JUDGES: u32 = 3;

/// Default maximum marks a single judge can award
pub const DEFAULT_MAX_MARKS_PER_JUDGE: u32 = 10;

/// Default minimum total for a ranked prize (inclusive)
pub const DEFAULT_MIN_MARKS_FOR_PRIZE: u32 = 1;

/// Default maximum number of events a student may register for
pub const DEFAULT_MAX_EVENTS_PER_STUDENT: u32 = 5;

/// Houses created with a fresh database
pub const DEFAULT_HOUSES: &[&str] = &["Red", "Yellow", "Blue", "Green"];

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum length of names (students, events, houses, categories)
pub const MAX_NAME_LENGTH: u64 = 128;

/// Maximum length of judging remarks
pub const MAX_REMARKS_LENGTH: u64 = 512;

/// Maximum number of students in one import request
pub const MAX_IMPORT_BATCH: usize = 5000;

/// Maximum request body size (bytes)
pub const MAX_REQUEST_BODY_BYTES: usize = 4 * 1024 * 1024;

// =============================================================================
// CERTIFICATES
// =============================================================================

/// Date format printed on certificates
pub const CERTIFICATE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Class identifiers and the numerals printed on certificates
pub mod classes {
    pub const NUMERALS: &[(&str, &str)] = &[
        ("1", "I"),
        ("2", "II"),
        ("3", "III"),
        ("4", "IV"),
        ("5", "V"),
        ("6", "VI"),
        ("7", "VII"),
        ("8", "VIII"),
        ("9", "IX"),
        ("10", "X"),
        ("11", "XI"),
        ("12", "XII"),
        ("lkg", "LKG"),
        ("ukg", "UKG"),
    ];
}

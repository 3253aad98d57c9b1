//! Constants used throughout the encounter core crate.
//!
//! Specialization identifiers and the alias table live here so that the canonicalizer, the
//! display labels and the tests all agree on one source of truth.

/// Canonical identifier used when a specialization is empty or absent.
pub const GENERAL_SPECIALTY: &str = "general";

/// Raw alias spellings and the canonical specialization each one resolves to.
///
/// Lookups happen after trimming and lowercasing the raw identifier.
pub const SPECIALTY_ALIASES: &[(&str, &str)] = &[
    ("dermatology", "dermatology"),
    ("dermatologist", "dermatology"),
    ("cardiology", "cardiology"),
    ("cardiologist", "cardiology"),
    ("neurology", "neurology"),
    ("neurologist", "neurology"),
    ("orthopedics", "orthopedics"),
    ("orthopedist", "orthopedics"),
    ("psychiatry", "psychiatry"),
    ("psychiatrist", "psychiatry"),
    ("general", "general"),
];

/// Default depth the content-presence predicate descends into nested objects.
pub const DEFAULT_CONTENT_DEPTH: usize = 1;

/// Upper bound accepted for a configured content depth.
pub const MAX_CONTENT_DEPTH: usize = 8;

/// Default config filename looked up in the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = "encounter.yaml";

/// Persisted record field holding the JSON-encoded active assessment.
pub const SPECIALTY_DATA_FIELD: &str = "specialty_data";

/// Persisted record field holding the JSON-encoded specialization archive.
pub const SPECIALIZATIONS_FIELD: &str = "specializations";

/// Persisted record field holding the JSON-encoded symptoms sub-document.
pub const SYMPTOMS_FIELD: &str = "symptoms";

//! Build a specialization session from a persisted diagnosis record.
//!
//! Records come in two shapes:
//! - **modern**: `specializations` holds the whole archive as JSON text.
//! - **legacy**: only `specialty` + `specialty_data`, describing a single specialization.
//!
//! A legacy archive is synthesized only when the modern field produced nothing, so a populated
//! modern archive is never overwritten. Malformed embedded JSON never blocks loading a draft.

use crate::archive::Archive;
use crate::assessment::ActiveSlot;
use crate::constants::{GENERAL_SPECIALTY, SPECIALIZATIONS_FIELD, SPECIALTY_DATA_FIELD};
use crate::embedded::{decode_archive, decode_assessment};
use crate::record::DiagnosisRecord;
use crate::session::SpecialtySession;

/// What hydration had to do beyond a straight decode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Record fields whose embedded JSON was malformed and replaced by an empty value.
    pub recovered_fields: Vec<&'static str>,
    /// The archive was synthesized from legacy `specialty` / `specialty_data`.
    pub legacy_migrated: bool,
}

impl HydrationReport {
    pub fn recovered(&self, field: &str) -> bool {
        self.recovered_fields.iter().any(|f| *f == field)
    }

    pub fn is_clean(&self) -> bool {
        self.recovered_fields.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hydrated {
    pub session: SpecialtySession,
    pub report: HydrationReport,
}

/// Build the archive and active slot for `record`.
///
/// The active type is the first of: `specialization.type`, `specialty`, the first archive key,
/// `"general"`. Its data is the archive entry under that exact key, or an empty assessment.
pub fn hydrate(record: &DiagnosisRecord) -> Hydrated {
    let mut report = HydrationReport::default();

    let decoded = decode_archive(record.specializations.as_ref());
    if decoded.recovered {
        report.recovered_fields.push(SPECIALIZATIONS_FIELD);
    }
    let mut archive: Archive = decoded.value;

    if archive.is_empty() {
        if let Some(specialty) = record.legacy_specialty() {
            let data = decode_assessment(SPECIALTY_DATA_FIELD, record.specialty_data.as_ref());
            if data.recovered {
                report.recovered_fields.push(SPECIALTY_DATA_FIELD);
            }

            tracing::debug!(specialty, "migrating legacy single-specialty record");
            archive.insert(specialty, data.value);
            report.legacy_migrated = true;
        }
    }

    let initial_type = record
        .specialization_type()
        .or(record.legacy_specialty())
        .or(archive.first_key())
        .unwrap_or(GENERAL_SPECIALTY)
        .to_string();
    let initial_data = archive.get(&initial_type).cloned().unwrap_or_default();
    let active = ActiveSlot::new(initial_type, initial_data);

    Hydrated {
        session: SpecialtySession::from_parts(archive, active),
        report,
    }
}

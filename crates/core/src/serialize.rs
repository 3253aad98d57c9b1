//! Flatten a specialization session into persisted record fields.
//!
//! `specialty` is the raw active identifier, aliases included. It is never canonicalized on
//! save: hydration looks the active entry up by this exact key, so writing a canonical form
//! would orphan any assessment stored under an alias.

use crate::embedded::{encode_archive, encode_assessment};
use crate::record::DiagnosisRecord;
use crate::session::SpecialtySession;
use serde::{Deserialize, Serialize};

/// The specialization fields of an outbound diagnosis record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyFields {
    pub specialty: String,
    /// JSON text of the active assessment.
    pub specialty_data: String,
    /// JSON text of the entire archive.
    pub specializations: String,
}

impl SpecialtyFields {
    /// A record carrying only these fields.
    pub fn into_record(self) -> DiagnosisRecord {
        let mut record = DiagnosisRecord::default();
        record.apply_specialty_fields(self);
        record
    }
}

/// Flatten `session` into record fields.
///
/// The active assessment is written into the encoded archive under the active key whether or
/// not the session has been flushed. Use [`SpecialtySession::serialize`] to also bring the
/// session's own archive up to date.
pub fn serialize(session: &SpecialtySession) -> SpecialtyFields {
    let active = session.active();

    let mut archive = session.archive().clone();
    archive.insert(active.type_.clone(), active.data.clone());

    SpecialtyFields {
        specialty: active.type_.clone(),
        specialty_data: encode_assessment(&active.data),
        specializations: encode_archive(&archive),
    }
}

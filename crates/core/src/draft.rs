//! A diagnosis draft: the specialization session plus the rest of the persisted record.
//!
//! Loading a draft hydrates the specialization session and decodes the JSON-encoded `symptoms`
//! sub-document. Saving re-encodes both and carries every other field of the original record
//! through untouched.

use crate::constants::SYMPTOMS_FIELD;
use crate::embedded::{decode_embedded, encode_embedded};
use crate::hydrate::{hydrate, HydrationReport};
use crate::record::DiagnosisRecord;
use crate::session::SpecialtySession;
use serde_json::{json, Value};

#[derive(Clone, Debug)]
pub struct DiagnosisDraft {
    base: DiagnosisRecord,
    session: SpecialtySession,
    symptoms: Value,
    symptoms_changed: bool,
    report: HydrationReport,
}

impl DiagnosisDraft {
    pub fn load(record: DiagnosisRecord) -> Self {
        let hydrated = hydrate(&record);
        let mut report = hydrated.report;

        let symptoms = decode_embedded(SYMPTOMS_FIELD, record.symptoms.as_ref());
        if symptoms.recovered {
            report.recovered_fields.push(SYMPTOMS_FIELD);
        }

        Self {
            base: record,
            session: hydrated.session,
            symptoms: symptoms.value,
            symptoms_changed: false,
            report,
        }
    }

    pub fn session(&self) -> &SpecialtySession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SpecialtySession {
        &mut self.session
    }

    /// Decoded symptoms sub-document, `null` when absent or unreadable.
    pub fn symptoms(&self) -> &Value {
        &self.symptoms
    }

    pub fn set_symptoms(&mut self, symptoms: Value) {
        self.symptoms = symptoms;
        self.symptoms_changed = true;
    }

    pub fn report(&self) -> &HydrationReport {
        &self.report
    }

    /// Flush the session and build the outbound record.
    ///
    /// Symptoms are re-encoded as JSON text. If they were never changed and could not be decoded
    /// on load, the original raw value is written back unchanged. An existing `specialization`
    /// field is rewritten to match the active slot so it cannot point at a stale type.
    pub fn to_record(&mut self) -> DiagnosisRecord {
        let fields = self.session.serialize();

        let mut record = self.base.clone();
        record.apply_specialty_fields(fields);

        if self.symptoms_changed || !self.symptoms.is_null() {
            record.symptoms = encode_embedded(&self.symptoms).map(Value::String);
        }

        if record.specialization.is_some() {
            let active = self.session.active();
            record.specialization = Some(json!({
                "type": active.type_,
                "data": Value::Object(active.data.clone()),
            }));
        }

        record
    }
}

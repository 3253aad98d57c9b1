//! Persisted diagnosis record.
//!
//! Only the fields the reconciliation engine reads or writes are modelled explicitly. Every
//! other field (vitals, treatment plan, timestamps and whatever else earlier clients stored)
//! is kept verbatim in [`DiagnosisRecord::extra`], in its original order, so that loading and
//! saving a draft never drops data.
//!
//! Deserialization is lenient because the backend schema has changed over time:
//! - `specialty` / `specialty_data` also accept the older `speciality` / `speciality_data`.
//! - A non-string `specialty` is treated as absent.
//! - `specialty_data`, `specializations` and `symptoms` may hold JSON text or parsed values.

use crate::serialize::SpecialtyFields;
use crate::{ReconcileError, ReconcileResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    #[serde(
        default,
        alias = "speciality",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub specialty: Option<String>,

    #[serde(
        default,
        alias = "speciality_data",
        skip_serializing_if = "Option::is_none"
    )]
    pub specialty_data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Value>,

    /// `{ "type": ..., "data": ... }` written by some clients alongside `specialty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl DiagnosisRecord {
    /// Parse a record from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::RecordDeserialization`] for invalid JSON and
    /// [`ReconcileError::RecordNotObject`] when the top-level value is not an object.
    pub fn from_json_str(input: &str) -> ReconcileResult<Self> {
        let value: Value =
            serde_json::from_str(input).map_err(ReconcileError::RecordDeserialization)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> ReconcileResult<Self> {
        if !value.is_object() {
            return Err(ReconcileError::RecordNotObject);
        }
        serde_json::from_value(value).map_err(ReconcileError::RecordDeserialization)
    }

    /// Explicit active type from `specialization.type`, when it is a non-empty string.
    pub fn specialization_type(&self) -> Option<&str> {
        self.specialization
            .as_ref()
            .and_then(|s| s.get("type"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Legacy active type from `specialty`, when it is non-empty.
    pub fn legacy_specialty(&self) -> Option<&str> {
        self.specialty.as_deref().filter(|s| !s.is_empty())
    }

    /// Overwrite the specialization fields with serialized session output.
    pub fn apply_specialty_fields(&mut self, fields: SpecialtyFields) {
        self.specialty = Some(fields.specialty);
        self.specialty_data = Some(Value::String(fields.specialty_data));
        self.specializations = Some(Value::String(fields.specializations));
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => {
            tracing::warn!(value = %other, "ignoring non-string specialty");
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_modern_record() {
        let record = DiagnosisRecord::from_value(json!({
            "specialty": "dermatology",
            "specialty_data": "{\"lesion_description\":\"plaque\"}",
            "specializations": "{\"dermatology\":{}}",
            "specialization": { "type": "dermatology", "data": {} }
        }))
        .expect("record");

        assert_eq!(record.legacy_specialty(), Some("dermatology"));
        assert_eq!(record.specialization_type(), Some("dermatology"));
        assert!(record.specializations.is_some());
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_accepts_historical_field_spellings() {
        let record = DiagnosisRecord::from_value(json!({
            "speciality": "neurology",
            "speciality_data": { "gait": "ataxic" }
        }))
        .expect("record");

        assert_eq!(record.specialty.as_deref(), Some("neurology"));
        assert_eq!(record.specialty_data, Some(json!({ "gait": "ataxic" })));
    }

    #[test]
    fn test_non_string_specialty_is_absent() {
        let record = DiagnosisRecord::from_value(json!({ "specialty": 7 })).expect("record");
        assert_eq!(record.specialty, None);
    }

    #[test]
    fn test_blank_types_are_ignored() {
        let record = DiagnosisRecord::from_value(json!({
            "specialty": "",
            "specialization": { "type": "" }
        }))
        .expect("record");

        assert_eq!(record.legacy_specialty(), None);
        assert_eq!(record.specialization_type(), None);
    }

    #[test]
    fn test_specialization_without_string_type_is_ignored() {
        let record =
            DiagnosisRecord::from_value(json!({ "specialization": "cardiology" })).expect("record");
        assert_eq!(record.specialization_type(), None);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "patient_id": 12,
            "vitals": "{\"bp\":\"120/80\"}",
            "specialty": "general",
            "treatment_plan": { "medications": [] }
        });
        let record = DiagnosisRecord::from_value(input).expect("record");
        assert_eq!(
            record.extra.keys().collect::<Vec<_>>(),
            vec!["patient_id", "vitals", "treatment_plan"]
        );

        let output = serde_json::to_value(&record).expect("serialize");
        assert_eq!(output["vitals"], json!("{\"bp\":\"120/80\"}"));
        assert_eq!(output["patient_id"], json!(12));
        assert_eq!(output["specialty"], json!("general"));
    }

    #[test]
    fn test_rejects_non_object_records() {
        let err = DiagnosisRecord::from_json_str("[1, 2]").expect_err("array record");
        assert!(matches!(err, ReconcileError::RecordNotObject));

        let err = DiagnosisRecord::from_json_str("{oops").expect_err("invalid JSON");
        assert!(matches!(err, ReconcileError::RecordDeserialization(_)));
    }
}

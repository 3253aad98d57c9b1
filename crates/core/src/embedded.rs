//! Encode/decode boundary for JSON-encoded sub-documents.
//!
//! Diagnosis records carry JSON text nested inside the record itself (`specialty_data`,
//! `specializations`, `symptoms`). Depending on which client wrote the record, a field may hold
//! JSON text, an already-parsed value, or nothing at all. Historical records also contain
//! truncated or otherwise malformed text.
//!
//! Decoding never fails. A malformed field degrades to an empty value, is logged with
//! `tracing::warn!`, and is reported back through [`Decoded::recovered`] so callers can tell a
//! recovered field apart from one that was simply absent.

use crate::archive::Archive;
use crate::assessment::AssessmentData;
use crate::constants::SPECIALIZATIONS_FIELD;
use serde_json::Value;

/// A decoded value together with whether recovery was needed to produce it.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub recovered: bool,
}

impl<T> Decoded<T> {
    fn clean(value: T) -> Self {
        Self {
            value,
            recovered: false,
        }
    }

    fn recovered(value: T) -> Self {
        Self {
            value,
            recovered: true,
        }
    }
}

/// Decode a field that may hold JSON text or an already-parsed value.
///
/// Absent, `null` and blank-text fields decode to `Value::Null` without recovery. Text that does
/// not parse decodes to `Value::Null` with recovery.
pub fn decode_embedded(field: &str, raw: Option<&Value>) -> Decoded<Value> {
    match raw {
        None | Some(Value::Null) => Decoded::clean(Value::Null),
        Some(Value::String(text)) if text.trim().is_empty() => Decoded::clean(Value::Null),
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(value) => Decoded::clean(value),
            Err(e) => {
                tracing::warn!(field, error = %e, "malformed embedded JSON, using empty value");
                Decoded::recovered(Value::Null)
            }
        },
        Some(value) => Decoded::clean(value.clone()),
    }
}

/// Decode a field expected to hold a single assessment object.
pub fn decode_assessment(field: &str, raw: Option<&Value>) -> Decoded<AssessmentData> {
    let decoded = decode_embedded(field, raw);
    match decoded.value {
        Value::Object(map) => Decoded {
            value: map,
            recovered: decoded.recovered,
        },
        Value::Null => Decoded {
            value: AssessmentData::new(),
            recovered: decoded.recovered,
        },
        other => {
            tracing::warn!(
                field,
                kind = json_kind(&other),
                "embedded JSON is not an object, using empty assessment"
            );
            Decoded::recovered(AssessmentData::new())
        }
    }
}

/// Decode the `specializations` field into an [`Archive`].
///
/// `null` entries become empty assessments. Entries of any other non-object kind also become
/// empty assessments but mark the archive as recovered.
pub fn decode_archive(raw: Option<&Value>) -> Decoded<Archive> {
    let decoded = decode_assessment(SPECIALIZATIONS_FIELD, raw);
    let mut recovered = decoded.recovered;

    let archive = decoded
        .value
        .into_iter()
        .map(|(raw_type, entry)| {
            let data = match entry {
                Value::Object(map) => map,
                Value::Null => AssessmentData::new(),
                other => {
                    tracing::warn!(
                        raw_type = %raw_type,
                        kind = json_kind(&other),
                        "archive entry is not an object, using empty assessment"
                    );
                    recovered = true;
                    AssessmentData::new()
                }
            };
            (raw_type, data)
        })
        .collect();

    Decoded {
        value: archive,
        recovered,
    }
}

/// JSON text for an assessment object.
pub fn encode_assessment(data: &AssessmentData) -> String {
    Value::Object(data.clone()).to_string()
}

/// JSON text for the whole archive, in insertion order.
pub fn encode_archive(archive: &Archive) -> String {
    archive.to_value().to_string()
}

/// JSON text for an arbitrary sub-document, or `None` for `null`.
pub fn encode_embedded(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_embedded_parses_text() {
        let raw = json!(r#"{"lesion_description":"plaque"}"#);
        let decoded = decode_embedded("specialty_data", Some(&raw));
        assert_eq!(decoded.value, json!({ "lesion_description": "plaque" }));
        assert!(!decoded.recovered);
    }

    #[test]
    fn test_decode_embedded_passes_parsed_values_through() {
        let raw = json!({ "mood": "low" });
        let decoded = decode_embedded("specialty_data", Some(&raw));
        assert_eq!(decoded, Decoded::clean(raw.clone()));
    }

    #[test]
    fn test_decode_embedded_absent_and_blank_are_not_recovered() {
        assert_eq!(decode_embedded("x", None), Decoded::clean(Value::Null));
        assert_eq!(
            decode_embedded("x", Some(&Value::Null)),
            Decoded::clean(Value::Null)
        );
        assert_eq!(
            decode_embedded("x", Some(&json!("  "))),
            Decoded::clean(Value::Null)
        );
    }

    #[test]
    fn test_decode_embedded_malformed_text_is_recovered() {
        let decoded = decode_embedded("specializations", Some(&json!("{not valid json")));
        assert_eq!(decoded, Decoded::recovered(Value::Null));
    }

    #[test]
    fn test_decode_assessment_rejects_non_objects() {
        let decoded = decode_assessment("specialty_data", Some(&json!("[1, 2]")));
        assert!(decoded.value.is_empty());
        assert!(decoded.recovered);

        let decoded = decode_assessment("specialty_data", Some(&json!("null")));
        assert!(decoded.value.is_empty());
        assert!(!decoded.recovered);
    }

    #[test]
    fn test_decode_archive_keeps_entries_in_order() {
        let raw = json!(r#"{"neurologist":{"gait":"ataxic"},"general":{}}"#);
        let decoded = decode_archive(Some(&raw));

        assert!(!decoded.recovered);
        assert_eq!(
            decoded.value.keys().collect::<Vec<_>>(),
            vec!["neurologist", "general"]
        );
    }

    #[test]
    fn test_decode_archive_coerces_bad_entries() {
        let raw = json!({ "cardiology": null, "neurology": "oops", "general": { "notes": "x" } });
        let decoded = decode_archive(Some(&raw));

        assert!(decoded.recovered);
        assert_eq!(decoded.value.len(), 3);
        assert!(decoded.value.get("cardiology").expect("kept").is_empty());
        assert!(decoded.value.get("neurology").expect("kept").is_empty());
        assert_eq!(
            decoded.value.get("general").expect("kept").get("notes"),
            Some(&json!("x"))
        );
    }

    #[test]
    fn test_encode_archive_round_trips_through_decode() {
        let raw = json!({ "psychiatry": { "mood": "low" }, "dermatology": {} });
        let archive = decode_archive(Some(&raw)).value;

        let text = encode_archive(&archive);
        assert_eq!(decode_archive(Some(&Value::String(text))).value, archive);
    }

    #[test]
    fn test_encode_embedded_omits_null() {
        assert_eq!(encode_embedded(&Value::Null), None);
        assert_eq!(encode_embedded(&json!(["fever"])).as_deref(), Some(r#"["fever"]"#));
    }
}

//! Assessment data and the active slot.

use serde::{Deserialize, Serialize};

/// A specialization's assessment fields.
///
/// The five specialization editors each have their own field set (dermatology has
/// `lesion_description` and a nested `lesion_characteristics` object, cardiology has rhythm and
/// murmur findings, and so on), so assessments stay structurally open. Key order is preserved.
pub type AssessmentData = serde_json::Map<String, serde_json::Value>;

/// The specialization currently bound to the visible assessment editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveSlot {
    /// Raw specialization identifier, possibly an alias.
    #[serde(rename = "type")]
    pub type_: String,
    pub data: AssessmentData,
}

impl ActiveSlot {
    pub fn new(type_: impl Into<String>, data: AssessmentData) -> Self {
        Self {
            type_: type_.into(),
            data,
        }
    }
}

//! The specialization archive.
//!
//! Every specialization touched during a diagnosis session is kept here under the raw identifier
//! it was stored with. Keys are not required to be canonical: two keys may name the same
//! specialization (for example `"cardiologist"` and `"cardiology"` in records written before
//! canonicalization existed). Insertion order is preserved so that tab order is stable.

use crate::assessment::AssessmentData;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Archive(IndexMap<String, AssessmentData>);

impl Archive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an entry by its exact raw key. No canonicalization is applied.
    pub fn get(&self, raw_type: &str) -> Option<&AssessmentData> {
        self.0.get(raw_type)
    }

    pub fn contains_key(&self, raw_type: &str) -> bool {
        self.0.contains_key(raw_type)
    }

    /// Stores `data` under `raw_type`, returning the previous entry.
    ///
    /// Overwriting an existing key keeps its original position.
    pub fn insert(
        &mut self,
        raw_type: impl Into<String>,
        data: AssessmentData,
    ) -> Option<AssessmentData> {
        self.0.insert(raw_type.into(), data)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssessmentData)> {
        self.0.iter().map(|(key, data)| (key.as_str(), data))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn first_key(&self) -> Option<&str> {
        self.0.keys().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object form of the archive, in insertion order.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, data)| (key.clone(), Value::Object(data.clone())))
                .collect(),
        )
    }
}

impl FromIterator<(String, AssessmentData)> for Archive {
    fn from_iter<I: IntoIterator<Item = (String, AssessmentData)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Archive {
    type Item = (String, AssessmentData);
    type IntoIter = indexmap::map::IntoIter<String, AssessmentData>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

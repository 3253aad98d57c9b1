//! "Has this specialization been worked on?"
//!
//! An assessment scaffold such as `{ "lesion_description": "", "affected_areas": [] }` carries
//! keys but no clinician input. Such entries must not be offered as switchable tabs, so the
//! archive is filtered through [`ContentPredicate`] first.
//!
//! A value is *meaningful* when it is:
//! - a string with non-whitespace content
//! - a non-empty array
//! - a non-zero number or `true`
//! - a nested object containing a meaningful value, inspected up to the configured depth
//!
//! Objects nested deeper than the configured depth are not inspected and count as empty.

use crate::assessment::AssessmentData;
use crate::constants::DEFAULT_CONTENT_DEPTH;
use serde_json::Value;

/// Content-presence predicate with a bounded nested-object depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentPredicate {
    max_depth: usize,
}

impl ContentPredicate {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns true if `data` is an object holding at least one meaningful value.
    pub fn matches_value(&self, data: &Value) -> bool {
        match data {
            Value::Object(map) => self.matches(map),
            _ => false,
        }
    }

    /// Returns true if the assessment holds at least one meaningful value.
    pub fn matches(&self, data: &AssessmentData) -> bool {
        data.values()
            .any(|value| is_meaningful(value, self.max_depth))
    }
}

impl Default for ContentPredicate {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_DEPTH)
    }
}

fn is_meaningful(value: &Value, remaining_depth: usize) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => {
            remaining_depth > 0
                && map
                    .values()
                    .any(|nested| is_meaningful(nested, remaining_depth - 1))
        }
    }
}

/// [`ContentPredicate::matches_value`] with the default single-level depth.
pub fn has_content(data: &Value) -> bool {
    ContentPredicate::default().matches_value(data)
}

/// [`ContentPredicate::matches`] with the default single-level depth.
pub fn has_assessment_content(data: &AssessmentData) -> bool {
    ContentPredicate::default().matches(data)
}

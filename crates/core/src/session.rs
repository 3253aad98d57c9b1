//! Archive / active-slot state machine.
//!
//! A diagnosis draft carries assessment data for every specialization the clinician has
//! touched. Exactly one of them is bound to the visible editor at a time: the *active slot*.
//! Everything else lives in the [`Archive`], keyed by raw identifier.
//!
//! ## Flushing
//! Edits go to the active slot only. The archive copy for the active key is brought up to date
//! by [`SpecialtySession::flush`], which runs automatically before every switch and before
//! serialization. Readers that need the archive in sync at any other time must flush first.
//!
//! ## Switching
//! [`SpecialtySession::switch_to`] flushes, then loads the target by its *exact* raw key. Use
//! [`SpecialtySession::switch_to_canonical`] for alias-aware restore.
//!
//! A blank raw type is never stored: `new` and both switches replace it with `general`, the
//! identifier a record without a specialty hydrates to.

use crate::archive::Archive;
use crate::assessment::{ActiveSlot, AssessmentData};
use crate::canonical::canonicalize;
use crate::constants::GENERAL_SPECIALTY;
use crate::content::ContentPredicate;
use crate::projection::{tabs_for, SpecialtyTab};
use crate::serialize::{serialize, SpecialtyFields};

#[derive(Clone, Debug, PartialEq)]
pub struct SpecialtySession {
    archive: Archive,
    active: ActiveSlot,
}

impl SpecialtySession {
    /// Start a session with an empty archive and an empty assessment for `active_type`.
    pub fn new(active_type: impl Into<String>) -> Self {
        Self {
            archive: Archive::new(),
            active: ActiveSlot::new(raw_type_or_general(active_type), AssessmentData::new()),
        }
    }

    pub fn from_parts(archive: Archive, active: ActiveSlot) -> Self {
        Self { archive, active }
    }

    pub fn into_parts(self) -> (Archive, ActiveSlot) {
        (self.archive, self.active)
    }

    /// The archive as last flushed. The active key may lag behind [`Self::active_data`].
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    pub fn active(&self) -> &ActiveSlot {
        &self.active
    }

    pub fn active_type(&self) -> &str {
        &self.active.type_
    }

    pub fn active_data(&self) -> &AssessmentData {
        &self.active.data
    }

    /// Shallow-merge `partial` into the active assessment.
    ///
    /// Top-level keys in `partial` replace those in the active data. The archive is not touched.
    pub fn edit_active_data(&mut self, partial: AssessmentData) {
        self.active.data.extend(partial);
    }

    /// Write the active assessment into the archive under the active raw key.
    pub fn flush(&mut self) {
        tracing::debug!(raw_type = %self.active.type_, "flushing active specialization");
        self.archive
            .insert(self.active.type_.clone(), self.active.data.clone());
    }

    /// Flush, then make `new_type` active with its archived data (or an empty assessment).
    ///
    /// The lookup uses `new_type` exactly as given.
    pub fn switch_to(&mut self, new_type: impl Into<String>) {
        let new_type = raw_type_or_general(new_type);
        self.flush();

        let data = self.archive.get(&new_type).cloned().unwrap_or_default();
        tracing::debug!(
            from = %self.active.type_,
            to = %new_type,
            restored = !data.is_empty(),
            "switching specialization"
        );
        self.active = ActiveSlot::new(new_type, data);
    }

    /// Flush, then make `new_type` active with `data`, recording `data` in the archive too.
    pub fn switch_to_with_data(&mut self, new_type: impl Into<String>, data: AssessmentData) {
        let new_type = raw_type_or_general(new_type);
        self.flush();

        tracing::debug!(
            from = %self.active.type_,
            to = %new_type,
            "switching specialization with snapshot"
        );
        self.archive.insert(new_type.clone(), data.clone());
        self.active = ActiveSlot::new(new_type, data);
    }

    /// Raw archive key that represents `requested` once aliases are resolved.
    ///
    /// The active slot counts as stored even before it is flushed. When nothing is stored for
    /// the specialization yet, the canonical identifier is returned.
    pub fn resolve_raw_key(&self, requested: &str) -> String {
        let canonical = canonicalize(requested);

        // An unflushed active key sorts after every archived key, as it would once flushed.
        let pending = (!self.archive.contains_key(&self.active.type_))
            .then_some(self.active.type_.as_str());

        let mut first_seen = None;
        for raw_type in self.archive.keys().chain(pending) {
            if canonicalize(raw_type) != canonical {
                continue;
            }
            if canonical == raw_type {
                return raw_type.to_string();
            }
            first_seen.get_or_insert(raw_type);
        }

        match first_seen {
            Some(raw_type) => raw_type.to_string(),
            None => canonical.into_string(),
        }
    }

    /// Alias-aware [`Self::switch_to`].
    pub fn switch_to_canonical(&mut self, requested: &str) {
        let raw_type = self.resolve_raw_key(requested);
        self.switch_to(raw_type);
    }

    /// "Previously worked on" tabs for the archive as last flushed.
    pub fn tabs(&self, predicate: &ContentPredicate) -> Vec<SpecialtyTab> {
        tabs_for(&self.archive, &self.active.type_, predicate)
    }

    /// Flush and flatten the session into persisted record fields.
    pub fn serialize(&mut self) -> SpecialtyFields {
        self.flush();
        serialize(self)
    }
}

/// Blank identifiers become `general`. Anything else is kept exactly as given.
fn raw_type_or_general(raw_type: impl Into<String>) -> String {
    let raw_type = raw_type.into();
    if raw_type.trim().is_empty() {
        GENERAL_SPECIALTY.to_string()
    } else {
        raw_type
    }
}

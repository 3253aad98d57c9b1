//! Deduplicated display projection of the archive.
//!
//! Several raw spellings of one specialization must render as exactly one tab. The projection
//! groups archive entries by canonical identifier and picks one representative per group:
//! the first entry seen, unless a later entry's raw key is literally the canonical identifier,
//! in which case that unaliased entry wins. Groups keep the order in which their canonical
//! identifier was first seen.

use crate::archive::Archive;
use crate::assessment::AssessmentData;
use crate::canonical::{canonicalize, CanonicalSpecialty};
use crate::content::ContentPredicate;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

/// The archive entry chosen to represent a canonical specialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedEntry<'a> {
    pub raw_type: &'a str,
    pub data: &'a AssessmentData,
}

/// One "previously worked on" tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpecialtyTab {
    pub canonical_type: CanonicalSpecialty,
    /// Raw archive key to pass back to `switch_to` when the tab is clicked.
    pub raw_type: String,
    pub label: String,
    pub is_active: bool,
}

/// Collapse `archive` into one representative entry per canonical specialization.
///
/// Only entries for which `filter` returns true take part.
pub fn project_for_display<'a, F>(
    archive: &'a Archive,
    filter: F,
) -> IndexMap<CanonicalSpecialty, ProjectedEntry<'a>>
where
    F: Fn(&AssessmentData) -> bool,
{
    let mut projected: IndexMap<CanonicalSpecialty, ProjectedEntry<'a>> = IndexMap::new();

    for (raw_type, data) in archive.iter().filter(|&(_, data)| filter(data)) {
        let entry = ProjectedEntry { raw_type, data };
        match projected.entry(canonicalize(raw_type)) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                if slot.key().as_str() == raw_type {
                    slot.insert(entry);
                }
            }
        }
    }

    projected
}

/// Projection over every archive entry, worked on or not.
pub fn project_all(archive: &Archive) -> IndexMap<CanonicalSpecialty, ProjectedEntry<'_>> {
    project_for_display(archive, |_| true)
}

/// Build the tab list for the archive, marking the tab matching `active_type`.
pub fn tabs_for(
    archive: &Archive,
    active_type: &str,
    predicate: &ContentPredicate,
) -> Vec<SpecialtyTab> {
    let active = canonicalize(active_type);

    project_for_display(archive, |data| predicate.matches(data))
        .into_iter()
        .map(|(canonical_type, entry)| SpecialtyTab {
            label: canonical_type.label(),
            is_active: canonical_type == active,
            raw_type: entry.raw_type.to_string(),
            canonical_type,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::has_assessment_content;
    use serde_json::{json, Value};

    fn data(value: Value) -> AssessmentData {
        value.as_object().cloned().expect("object literal")
    }

    fn archive(entries: &[(&str, Value)]) -> Archive {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), data(value.clone())))
            .collect()
    }

    #[test]
    fn test_unaliased_spelling_wins_when_it_comes_second() {
        let archive = archive(&[
            ("cardiologist", json!({ "notes": "a" })),
            ("cardiology", json!({ "notes": "b" })),
        ]);

        let projected = project_for_display(&archive, has_assessment_content);
        assert_eq!(projected.len(), 1);
        let entry = projected.get(&canonicalize("cardiology")).expect("cardiology tab");
        assert_eq!(entry.raw_type, "cardiology");
        assert_eq!(entry.data, &data(json!({ "notes": "b" })));
    }

    #[test]
    fn test_unaliased_spelling_wins_when_it_comes_first() {
        let archive = archive(&[
            ("cardiology", json!({ "notes": "b" })),
            ("cardiologist", json!({ "notes": "a" })),
        ]);

        let projected = project_for_display(&archive, has_assessment_content);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].raw_type, "cardiology");
    }

    #[test]
    fn test_first_alias_kept_without_unaliased_entry() {
        let archive = archive(&[
            ("Cardiologist", json!({ "notes": "a" })),
            ("cardiologist", json!({ "notes": "b" })),
        ]);

        let projected = project_all(&archive);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].raw_type, "Cardiologist");
    }

    #[test]
    fn test_order_follows_first_seen_canonical_key() {
        let archive = archive(&[
            ("psychiatrist", json!({ "mood": "low" })),
            ("dermatology", json!({ "lesion_description": "plaque" })),
            ("psychiatry", json!({ "mood": "flat" })),
        ]);

        let keys: Vec<_> = project_all(&archive)
            .keys()
            .map(|k| k.as_str().to_string())
            .collect();
        assert_eq!(keys, vec!["psychiatry", "dermatology"]);
    }

    #[test]
    fn test_filter_drops_untouched_scaffolds() {
        let archive = archive(&[
            ("dermatology", json!({ "lesion_description": "", "affected_areas": [] })),
            ("neurology", json!({ "gait": "ataxic" })),
        ]);

        let projected = project_for_display(&archive, has_assessment_content);
        assert_eq!(projected.len(), 1);
        assert!(projected.contains_key(&canonicalize("neurology")));
    }

    #[test]
    fn test_tabs_mark_active_by_canonical_match() {
        let archive = archive(&[
            ("cardiology", json!({ "notes": "b" })),
            ("orthopedist", json!({ "joint": "knee" })),
        ]);

        let tabs = tabs_for(&archive, "Cardiologist", &ContentPredicate::default());
        assert_eq!(
            tabs,
            vec![
                SpecialtyTab {
                    canonical_type: canonicalize("cardiology"),
                    raw_type: "cardiology".into(),
                    label: "Cardiology".into(),
                    is_active: true,
                },
                SpecialtyTab {
                    canonical_type: canonicalize("orthopedics"),
                    raw_type: "orthopedist".into(),
                    label: "Orthopedics".into(),
                    is_active: false,
                },
            ]
        );
    }
}

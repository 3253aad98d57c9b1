//! Specialization identifier canonicalization.
//!
//! Diagnosis drafts store specialization identifiers exactly as they were typed or persisted, so
//! the same specialization may appear under several spellings (`"cardiology"`,
//! `"Cardiologist "`). This module maps any raw identifier onto a *canonical* identifier.
//!
//! ## Canonical form
//! - Leading and trailing whitespace removed, then lowercased.
//! - Known aliases resolve through [`SPECIALTY_ALIASES`] (`"cardiologist"` becomes
//!   `"cardiology"`).
//! - Unknown non-empty identifiers pass through unchanged after trimming and lowercasing.
//! - Empty or absent identifiers become [`GENERAL_SPECIALTY`].
//!
//! Canonicalization is total and idempotent.

use crate::constants::{GENERAL_SPECIALTY, SPECIALTY_ALIASES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The specializations that ship with a dedicated assessment editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Specialty {
    Dermatology,
    Cardiology,
    Neurology,
    Orthopedics,
    Psychiatry,
    General,
}

impl Specialty {
    pub const ALL: [Specialty; 6] = [
        Specialty::Dermatology,
        Specialty::Cardiology,
        Specialty::Neurology,
        Specialty::Orthopedics,
        Specialty::Psychiatry,
        Specialty::General,
    ];

    /// Canonical identifier for this specialty.
    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Dermatology => "dermatology",
            Specialty::Cardiology => "cardiology",
            Specialty::Neurology => "neurology",
            Specialty::Orthopedics => "orthopedics",
            Specialty::Psychiatry => "psychiatry",
            Specialty::General => GENERAL_SPECIALTY,
        }
    }

    /// Human-readable tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Dermatology => "Dermatology",
            Specialty::Cardiology => "Cardiology",
            Specialty::Neurology => "Neurology",
            Specialty::Orthopedics => "Orthopedics",
            Specialty::Psychiatry => "Psychiatry",
            Specialty::General => "General",
        }
    }

    fn from_canonical(canonical: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == canonical)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specialization identifier in canonical form.
///
/// Only [`canonicalize`] and [`canonicalize_opt`] construct this type, so holding one guarantees
/// the value is trimmed, lowercased, alias-resolved and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalSpecialty(String);

impl CanonicalSpecialty {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The known specialty this identifier names, if any.
    pub fn known(&self) -> Option<Specialty> {
        Specialty::from_canonical(&self.0)
    }

    /// Display label for tabs.
    ///
    /// Known specialties use their fixed label; pass-through identifiers are title-cased word by
    /// word (`"sports medicine"` becomes `"Sports Medicine"`).
    pub fn label(&self) -> String {
        match self.known() {
            Some(specialty) => specialty.label().to_string(),
            None => title_case(&self.0),
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalSpecialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalSpecialty {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalSpecialty {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalSpecialty {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<Specialty> for CanonicalSpecialty {
    fn from(specialty: Specialty) -> Self {
        Self(specialty.as_str().to_string())
    }
}

/// Map a raw specialization identifier onto its canonical identifier.
pub fn canonicalize(raw: &str) -> CanonicalSpecialty {
    let normalised = raw.trim().to_lowercase();
    if normalised.is_empty() {
        return CanonicalSpecialty(GENERAL_SPECIALTY.to_string());
    }

    match SPECIALTY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalised)
    {
        Some((_, canonical)) => CanonicalSpecialty((*canonical).to_string()),
        None => CanonicalSpecialty(normalised),
    }
}

/// Like [`canonicalize`], treating an absent identifier as empty.
pub fn canonicalize_opt(raw: Option<&str>) -> CanonicalSpecialty {
    canonicalize(raw.unwrap_or_default())
}

fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//! # Encounter Core
//!
//! Specialization reconciliation engine for clinical diagnosis drafts.
//!
//! A single diagnosis draft can carry assessment data for several medical specializations
//! (dermatology, cardiology, neurology, orthopedics, psychiatry, general). This crate owns:
//! - Canonicalization of specialization identifiers and their alias spellings
//! - The archive / active-slot state machine that lets a clinician switch specializations
//!   without losing work
//! - The content-presence predicate deciding which specializations count as worked on
//! - The deduplicated tab projection over the archive
//! - Hydration from, and serialization to, the flat persisted diagnosis record, including the
//!   legacy single-specialty shape
//!
//! **No I/O**: fetching and submitting records, rendering editors and authentication belong to
//! the surrounding client. Everything here is a synchronous transformation over owned values.

pub mod archive;
pub mod assessment;
pub mod canonical;
pub mod config;
pub mod constants;
pub mod content;
pub mod draft;
pub mod embedded;
pub mod error;
pub mod hydrate;
pub mod projection;
pub mod record;
pub mod serialize;
pub mod session;

pub use archive::Archive;
pub use assessment::{ActiveSlot, AssessmentData};
pub use canonical::{canonicalize, canonicalize_opt, CanonicalSpecialty, Specialty};
pub use config::CoreConfig;
pub use content::{has_assessment_content, has_content, ContentPredicate};
pub use draft::DiagnosisDraft;
pub use embedded::Decoded;
pub use error::{ReconcileError, ReconcileResult};
pub use hydrate::{hydrate, Hydrated, HydrationReport};
pub use projection::{project_all, project_for_display, ProjectedEntry, SpecialtyTab};
pub use record::DiagnosisRecord;
pub use serialize::{serialize, SpecialtyFields};
pub use session::SpecialtySession;

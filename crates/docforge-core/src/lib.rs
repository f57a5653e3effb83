//! # docforge-core — Foundational Types for docforge
//!
//! Defines the data model of a documentation corpus: language
//! configurations, categories, entries, sections, diagrams, quizzes,
//! practice challenges and learning paths. Every other crate in the
//! workspace depends on `docforge-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `LanguageId`, `CategoryId`, `EntryId`,
//!    `LearningPathId`, `CrossLanguageId`. No bare strings for ids.
//!
//! 2. **Explicit absence.** Every optional attribute is an `Option`. An
//!    empty string is content, not "unset".
//!
//! 3. **Shape only.** The model types accept any shape-correct value.
//!    Content invariants live in `docforge-schema`.
//!
//! 4. **Canonical digests.** `ContentDigest` is computed only from
//!    `CanonicalBytes` (RFC 8785), so authoring key order is irrelevant.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `docforge-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod diagram;
pub mod digest;
pub mod error;
pub mod identity;
pub mod model;

pub use canonical::CanonicalBytes;
pub use diagram::{CustomDiagram, CustomDiagramType, DiagramDefinition, MermaidDiagram};
pub use digest::{digest_of, sha256_digest, ContentDigest};
pub use error::CanonicalizationError;
pub use identity::{CategoryId, CrossLanguageId, EntryId, LanguageId, LearningPathId};
pub use model::{
    Difficulty, DocCategory, DocEntry, DocSection, LanguageConfig, LearningPath,
    PracticeChallenge, QuizQuestion,
};

//! # docforge-schema — Content Validation & Freezing
//!
//! Validates authored documentation corpora before they reach the
//! rendering application, and freezes validated content into indexed,
//! immutable views.
//!
//! ## Pipeline
//!
//! 1. **Load** ([`load`]): read a language from a single JSON/YAML file or
//!    a partitioned directory, converting YAML to JSON values.
//! 2. **Structural gate** ([`structure`]): check the raw value against the
//!    bundled JSON Schema. Input that cannot be traversed as a language
//!    config is a [`ContractError`], not a content diagnostic.
//! 3. **Semantic validation** ([`validate`]): walk the typed tree and
//!    collect every located [`Diagnostic`] in one pass.
//! 4. **Freeze** ([`freeze`]): refuse content with hard errors, otherwise
//!    build O(1) indexes over entries, categories, learning paths and
//!    cross-language concepts.
//!
//! ## Crate Policy
//!
//! - Depends only on `docforge-core` internally.
//! - Validation is pure and deterministic; only [`load`] touches the
//!   filesystem.
//! - Hard error kinds are fixed. [`ValidationPolicy`] controls advisory
//!   warnings only.

pub mod diagnostic;
pub mod freeze;
pub mod load;
pub mod policy;
pub mod structure;
pub mod validate;

pub use diagnostic::{Diagnostic, DiagnosticCode, Locator, Severity, ValidationResult};
pub use freeze::{
    freeze, freeze_corpus, FreezeError, FrozenCorpus, FrozenLanguage, InvalidCorpusError,
};
pub use load::{load_corpus, load_language, CorpusLoader, LoadError};
pub use policy::{PolicyError, ValidationPolicy};
pub use structure::{
    ContractError, StructureValidator, Violation, Violations, LANGUAGE_CONFIG_SCHEMA,
};
pub use validate::{validate_corpus, validate_language, validate_language_value, Validator};

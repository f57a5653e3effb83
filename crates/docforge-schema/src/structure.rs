//! # Structural Gate
//!
//! Raw authored input is checked against the bundled JSON Schema
//! (`schemas/language-config.schema.json`, Draft 2020-12) before it is
//! deserialized into the typed model.
//!
//! A value that fails here is not "bad content", it is not a language
//! config at all: a required sequence is missing or of the wrong kind, a
//! diagram has an unknown `kind`, a field name is misspelled. These are
//! contract errors and are returned as `Err(ContractError)`, never mixed
//! into the content diagnostics.
//!
//! The schema deliberately checks shape only. Emptiness, uniqueness and
//! referential integrity are left to the semantic validator so that every
//! content problem is reported with a locator in a single pass.

use std::fmt;

use docforge_core::LanguageConfig;
use jsonschema::Validator;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The bundled language-config schema source.
pub const LANGUAGE_CONFIG_SCHEMA: &str = include_str!("../schemas/language-config.schema.json");

/// The input cannot be traversed as a language config.
#[derive(Error, Debug)]
pub enum ContractError {
    /// The value does not have the language-config shape.
    #[error("input is not shaped like a language config:\n{0}")]
    Structure(Violations),

    /// The value passed the schema but could not be deserialized
    /// (e.g. an integer outside the representable range).
    #[error("cannot deserialize language config: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The schema itself could not be compiled.
    #[error("schema build error: {0}")]
    SchemaBuild(String),
}

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating node in the instance.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// All structural violations found in one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled structural schema for language configs.
///
/// Compilation happens once at construction; a single instance can check
/// any number of documents and is `Send + Sync`.
pub struct StructureValidator {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for StructureValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureValidator")
            .field("title", &self.schema.get("title"))
            .finish_non_exhaustive()
    }
}

impl StructureValidator {
    /// Compile the bundled language-config schema.
    pub fn new() -> Result<Self, ContractError> {
        let schema: Value = serde_json::from_str(LANGUAGE_CONFIG_SCHEMA)
            .map_err(|e| ContractError::SchemaBuild(format!("bundled schema is not JSON: {e}")))?;
        Self::from_schema(schema)
    }

    /// Compile an arbitrary schema, e.g. a stricter project-local variant.
    pub fn from_schema(schema: Value) -> Result<Self, ContractError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| ContractError::SchemaBuild(e.to_string()))?;
        Ok(Self { schema, validator })
    }

    /// The schema this validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Check an instance against the schema, collecting every violation.
    pub fn check(&self, instance: &Value) -> Result<(), ContractError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ContractError::Structure(Violations(violations)))
        }
    }

    /// Check the shape, then deserialize into the typed model.
    pub fn parse_language(&self, instance: &Value) -> Result<LanguageConfig, ContractError> {
        self.check(instance)?;
        Ok(LanguageConfig::deserialize(instance)?)
    }
}

//! # docforge-cli — Content Gate for Documentation Corpora
//!
//! Provides the `docforge` command-line interface used by authoring tools
//! and CI build gates.
//!
//! ## Subcommands
//!
//! - `docforge validate` — Load content and report every diagnostic.
//! - `docforge inspect` — Freeze a corpus and print per-language counts
//!   and content digests.
//! - `docforge schema` — Print the bundled structural schema.
//!
//! ```bash
//! docforge validate content/
//! docforge validate content/rust --format json --deny-warnings
//! docforge --config docforge.yaml inspect content/
//! ```
//!
//! ## Exit Codes
//!
//! - `0` content passed the gate.
//! - `1` hard errors (or warnings under `--deny-warnings`).
//! - `2` content could not be loaded or is not shaped like a language config.

pub mod inspect;
pub mod schema;
pub mod validate;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use docforge_core::LanguageConfig;
use docforge_schema::{CorpusLoader, LoadError, ValidationPolicy};

/// Exit code for content that passed.
pub const EXIT_OK: u8 = 0;
/// Exit code for content with blocking diagnostics.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for content that could not be loaded.
pub const EXIT_LOAD_FAILURE: u8 = 2;

/// Report format for subcommands that print results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolve the validation policy from an optional policy file, then apply
/// `DOCFORGE_*` environment overrides.
pub fn load_policy(config: Option<&Path>) -> Result<ValidationPolicy> {
    let policy = match config {
        Some(path) => ValidationPolicy::from_file(path)
            .with_context(|| format!("failed to load policy file {}", path.display()))?,
        None => ValidationPolicy::default(),
    };
    let policy = policy
        .with_env_overrides()
        .context("invalid DOCFORGE_* environment override")?;
    tracing::debug!(?policy, "resolved validation policy");
    Ok(policy)
}

/// A path that failed to load.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: LoadError,
}

impl LoadFailure {
    /// Print the failure in the gate's line format.
    pub fn report(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "FAIL: {}: {}", self.path.display(), self.error)
    }
}

/// Load every language reachable from `paths`, in argument order.
///
/// Each path may be a language file, a partitioned language directory or
/// a corpus directory. Stops at the first path that fails to load.
pub fn load_languages(
    loader: &CorpusLoader,
    paths: &[PathBuf],
) -> std::result::Result<Vec<LanguageConfig>, LoadFailure> {
    let mut configs = Vec::new();
    for path in paths {
        let loaded = loader.load_path(path).map_err(|error| LoadFailure {
            path: path.clone(),
            error,
        })?;
        tracing::info!(path = %path.display(), languages = loaded.len(), "content loaded");
        configs.extend(loaded);
    }
    Ok(configs)
}

/// Compile the bundled schema into a loader.
pub fn corpus_loader() -> Result<CorpusLoader> {
    CorpusLoader::new().context("failed to compile the bundled content schema")
}

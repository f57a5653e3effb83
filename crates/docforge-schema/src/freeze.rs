//! # Frozen Corpus
//!
//! `freeze` turns a validated `LanguageConfig` into an immutable view with
//! precomputed indexes, so the rendering application can resolve related
//! entries, learning paths and cross-language links in O(1) without
//! rescanning the tree.
//!
//! ## Invariants
//!
//! - A frozen view exists only for a config with zero hard errors.
//!   Freezing known-bad content returns `InvalidCorpusError` naming the
//!   first offending locator.
//! - Frozen views expose shared references only. The owned tree is never
//!   handed out mutably.
//! - Indexes store positions into the owned tree, built in
//!   O(categories + entries).

use std::collections::HashMap;
use std::sync::Arc;

use docforge_core::{
    digest_of, CanonicalizationError, CategoryId, ContentDigest, CrossLanguageId, DocCategory,
    DocEntry, EntryId, LanguageConfig, LanguageId, LearningPath, LearningPathId,
};
use thiserror::Error;

use crate::diagnostic::ValidationResult;
use crate::validate::{validate_corpus, validate_language};

/// Refusal to freeze content with outstanding hard errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot freeze {scope}: {error_count} hard error(s), first at {locator}: {message}")]
pub struct InvalidCorpusError {
    /// What was being frozen, e.g. "language `rust`" or "corpus".
    pub scope: String,
    /// Rendered locator of the first hard error.
    pub locator: String,
    /// Message of the first hard error.
    pub message: String,
    pub error_count: usize,
}

impl InvalidCorpusError {
    fn from_result(scope: String, result: &ValidationResult) -> Option<Self> {
        result.first_error().map(|first| Self {
            scope,
            locator: first.locator.to_string(),
            message: first.message.clone(),
            error_count: result.errors.len(),
        })
    }
}

/// Freezing failed.
#[derive(Error, Debug)]
pub enum FreezeError {
    #[error(transparent)]
    InvalidCorpus(#[from] InvalidCorpusError),

    /// The content digest could not be computed.
    #[error("content digest failed: {0}")]
    Digest(#[from] CanonicalizationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EntryPos {
    category: usize,
    entry: usize,
}

/// Immutable, indexed view of one validated language config.
#[derive(Debug)]
pub struct FrozenLanguage {
    config: LanguageConfig,
    digest: ContentDigest,
    entries: HashMap<EntryId, EntryPos>,
    categories: HashMap<CategoryId, usize>,
    cross_language: HashMap<CrossLanguageId, EntryPos>,
    learning_paths: HashMap<LearningPathId, usize>,
}

impl FrozenLanguage {
    /// Build indexes without validating. Callers must have validated.
    fn build(config: LanguageConfig) -> Result<Self, CanonicalizationError> {
        let digest = digest_of(&config)?;

        let mut entries = HashMap::new();
        let mut categories = HashMap::new();
        let mut cross_language = HashMap::new();
        for (ci, category) in config.categories.iter().enumerate() {
            categories.insert(category.id.clone(), ci);
            for (ei, entry) in category.entries.iter().enumerate() {
                let pos = EntryPos { category: ci, entry: ei };
                entries.insert(entry.id.clone(), pos);
                if let Some(cross) = &entry.cross_language_id {
                    cross_language.insert(cross.clone(), pos);
                }
            }
        }

        let learning_paths = config
            .learning_paths()
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        tracing::info!(
            language = %config.id,
            entries = entries.len(),
            categories = categories.len(),
            digest = %digest,
            "language frozen"
        );

        Ok(Self {
            config,
            digest,
            entries,
            categories,
            cross_language,
            learning_paths,
        })
    }

    fn at(&self, pos: EntryPos) -> Option<&DocEntry> {
        self.config
            .categories
            .get(pos.category)
            .and_then(|c| c.entries.get(pos.entry))
    }

    pub fn id(&self) -> &LanguageId {
        &self.config.id
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn icon(&self) -> &str {
        &self.config.icon
    }

    pub fn color(&self) -> &str {
        &self.config.color
    }

    pub fn docs_url(&self) -> &str {
        &self.config.docs_url
    }

    pub fn tagline(&self) -> &str {
        &self.config.tagline
    }

    /// The underlying validated tree.
    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    /// SHA-256 over the canonical serialization of the config.
    pub fn digest(&self) -> &ContentDigest {
        &self.digest
    }

    pub fn categories(&self) -> &[DocCategory] {
        &self.config.categories
    }

    pub fn learning_paths(&self) -> &[LearningPath] {
        self.config.learning_paths()
    }

    /// Every entry in document order.
    pub fn entries(&self) -> impl Iterator<Item = &DocEntry> {
        self.config.entries()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, id: &str) -> Option<&DocEntry> {
        self.entries.get(id).and_then(|&pos| self.at(pos))
    }

    pub fn category(&self, id: &str) -> Option<&DocCategory> {
        self.categories.get(id).and_then(|&i| self.config.categories.get(i))
    }

    /// The category that owns an entry.
    pub fn category_of(&self, entry_id: &str) -> Option<&DocCategory> {
        self.entries
            .get(entry_id)
            .and_then(|pos| self.config.categories.get(pos.category))
    }

    /// The entry in this language declaring a cross-language concept id.
    pub fn entry_for_concept(&self, cross_language_id: &str) -> Option<&DocEntry> {
        self.cross_language
            .get(cross_language_id)
            .and_then(|&pos| self.at(pos))
    }

    pub fn learning_path(&self, id: &str) -> Option<&LearningPath> {
        self.learning_paths
            .get(id)
            .and_then(|&i| self.config.learning_paths().get(i))
    }

    /// Resolve an entry's `relatedEntryIds`, in authored order.
    pub fn related_entries<'a>(&'a self, entry: &'a DocEntry) -> impl Iterator<Item = &'a DocEntry> {
        entry
            .related_entry_ids()
            .iter()
            .filter_map(move |id| self.entry(id.as_str()))
    }

    /// Resolve a learning path's entries, in curriculum order.
    pub fn path_entries<'a>(&'a self, path: &'a LearningPath) -> impl Iterator<Item = &'a DocEntry> {
        path.entry_ids
            .iter()
            .filter_map(move |id| self.entry(id.as_str()))
    }

    /// Give back the owned tree.
    pub fn into_config(self) -> LanguageConfig {
        self.config
    }
}

/// Freeze one language config.
///
/// # Errors
///
/// Returns `FreezeError::InvalidCorpus` if `validate_language(&config)`
/// reports any hard error.
pub fn freeze(config: LanguageConfig) -> Result<FrozenLanguage, FreezeError> {
    let result = validate_language(&config);
    if let Some(err) = InvalidCorpusError::from_result(format!("language `{}`", config.id), &result) {
        return Err(err.into());
    }
    Ok(FrozenLanguage::build(config)?)
}

/// Immutable, indexed view of a validated multi-language corpus.
#[derive(Debug, Clone, Default)]
pub struct FrozenCorpus {
    languages: Vec<Arc<FrozenLanguage>>,
    by_id: HashMap<LanguageId, usize>,
    /// Concept id → indexes of languages declaring it, in corpus order.
    concepts: HashMap<CrossLanguageId, Vec<usize>>,
}

impl FrozenCorpus {
    pub fn languages(&self) -> &[Arc<FrozenLanguage>] {
        &self.languages
    }

    pub fn language(&self, id: &str) -> Option<&Arc<FrozenLanguage>> {
        self.by_id.get(id).and_then(|&i| self.languages.get(i))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Every entry declaring a concept, one per language, in corpus order.
    pub fn concept(&self, cross_language_id: &str) -> Vec<(&FrozenLanguage, &DocEntry)> {
        self.concepts
            .get(cross_language_id)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.languages.get(i))
            .filter_map(|lang| {
                lang.entry_for_concept(cross_language_id)
                    .map(|entry| (lang.as_ref(), entry))
            })
            .collect()
    }

    /// Equivalent entries in other languages for a given entry.
    pub fn counterparts(
        &self,
        language_id: &str,
        entry_id: &str,
    ) -> Vec<(&FrozenLanguage, &DocEntry)> {
        let cross = self
            .language(language_id)
            .and_then(|lang| lang.entry(entry_id))
            .and_then(|entry| entry.cross_language_id.as_ref());
        match cross {
            Some(cross) => self
                .concept(cross.as_str())
                .into_iter()
                .filter(|(lang, _)| lang.id().as_str() != language_id)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Validate and freeze a whole corpus.
///
/// # Errors
///
/// Returns `FreezeError::InvalidCorpus` if `validate_corpus` reports any
/// hard error; the locator carries the owning language prefix.
pub fn freeze_corpus(configs: Vec<LanguageConfig>) -> Result<FrozenCorpus, FreezeError> {
    let result = validate_corpus(&configs);
    if let Some(err) = InvalidCorpusError::from_result("corpus".to_string(), &result) {
        return Err(err.into());
    }

    let mut corpus = FrozenCorpus::default();
    for (i, config) in configs.into_iter().enumerate() {
        let frozen = FrozenLanguage::build(config)?;
        corpus.by_id.insert(frozen.id().clone(), i);
        for entry in frozen.entries() {
            if let Some(cross) = &entry.cross_language_id {
                corpus.concepts.entry(cross.clone()).or_default().push(i);
            }
        }
        corpus.languages.push(Arc::new(frozen));
    }
    Ok(corpus)
}

//! # Content Validation
//!
//! Semantic validation of a typed language config. Walks the tree
//! depth-first (categories → entries → sections, quiz, challenge), then the
//! learning paths, and records every violation as a located `Diagnostic`.
//! The walk never stops at the first problem: authors fix everything in
//! one pass.
//!
//! ## Invariants
//!
//! - Validation is pure. No I/O, no shared state; the same input always
//!   yields an identical `ValidationResult`, in tree-walk order.
//! - Content problems are never returned as `Err`.
//! - A duplicate is reported once, at the later occurrence, naming the
//!   locator of the first.
//!
//! Hash maps are used for lookups only and are never iterated, so
//! diagnostic order cannot depend on hashing.

use std::collections::{HashMap, HashSet};

use docforge_core::{
    DiagramDefinition, DocCategory, DocEntry, DocSection, LanguageConfig, LearningPath,
    PracticeChallenge, QuizQuestion,
};
use serde_json::Value;

use crate::diagnostic::{Diagnostic, DiagnosticCode, Locator, ValidationResult};
use crate::policy::ValidationPolicy;
use crate::structure::{ContractError, StructureValidator};

/// Validator carrying a policy for the advisory checks.
///
/// Cheap to construct and `Copy`; the free functions in this module use
/// the default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate one language config.
    pub fn validate_language(&self, config: &LanguageConfig) -> ValidationResult {
        let _span = tracing::debug_span!("validate_language", language = %config.id).entered();
        let mut pass = LanguagePass::new(self.policy, config);
        pass.run();
        tracing::debug!(
            errors = pass.result.errors.len(),
            warnings = pass.result.warnings.len(),
            "language validated"
        );
        pass.result
    }

    /// Validate a corpus of language configs.
    ///
    /// Each language is validated independently and its locators are
    /// prefixed with the language id. A cross-cutting pass then checks that
    /// language ids are unique across the corpus. The per-language
    /// `crossLanguageId` single-match rule is enforced by
    /// [`Validator::validate_language`] and is not reported twice.
    pub fn validate_corpus(&self, configs: &[LanguageConfig]) -> ValidationResult {
        let _span = tracing::debug_span!("validate_corpus", languages = configs.len()).entered();
        let mut result = ValidationResult::new();

        for config in configs {
            result.merge(self.validate_language(config).with_language(config.id.as_str()));
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (i, config) in configs.iter().enumerate() {
            if let Some(first) = seen.get(config.id.as_str()) {
                result.push(Diagnostic::new(
                    DiagnosticCode::DuplicateLanguageId,
                    Locator::root().field("id").with_language(config.id.as_str()),
                    format!(
                        "language id `{}` of corpus member #{i} is already used by member #{first}",
                        config.id
                    ),
                ));
            } else {
                seen.insert(config.id.as_str(), i);
            }
        }

        result
    }

    /// Shape-check a raw value, deserialize it, and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ContractError` if the value is not shaped like a language
    /// config. Content problems are reported in the `Ok` result.
    pub fn validate_language_value(&self, raw: &Value) -> Result<ValidationResult, ContractError> {
        let config = StructureValidator::new()?.parse_language(raw)?;
        Ok(self.validate_language(&config))
    }
}

/// Validate one language config with the default policy.
pub fn validate_language(config: &LanguageConfig) -> ValidationResult {
    Validator::default().validate_language(config)
}

/// Validate a corpus with the default policy.
pub fn validate_corpus(configs: &[LanguageConfig]) -> ValidationResult {
    Validator::default().validate_corpus(configs)
}

/// Shape-check and validate a raw value with the default policy.
pub fn validate_language_value(raw: &Value) -> Result<ValidationResult, ContractError> {
    Validator::default().validate_language_value(raw)
}

/// State for one walk over a language config.
struct LanguagePass<'a> {
    policy: ValidationPolicy,
    config: &'a LanguageConfig,
    /// Every entry id declared anywhere in the language.
    entry_ids: HashSet<&'a str>,
    categories_seen: HashMap<&'a str, Locator>,
    entries_seen: HashMap<&'a str, Locator>,
    cross_seen: HashMap<&'a str, (Locator, &'a str)>,
    result: ValidationResult,
}

impl<'a> LanguagePass<'a> {
    fn new(policy: ValidationPolicy, config: &'a LanguageConfig) -> Self {
        Self {
            policy,
            config,
            entry_ids: config.entries().map(|e| e.id.as_str()).collect(),
            categories_seen: HashMap::new(),
            entries_seen: HashMap::new(),
            cross_seen: HashMap::new(),
            result: ValidationResult::new(),
        }
    }

    fn report(&mut self, code: DiagnosticCode, locator: Locator, message: impl Into<String>) {
        self.result.push(Diagnostic::new(code, locator, message));
    }

    fn require_text(&mut self, value: &str, locator: Locator, what: &str) {
        if value.trim().is_empty() {
            self.report(DiagnosticCode::EmptyText, locator, format!("{what} must not be empty"));
        }
    }

    fn run(&mut self) {
        let config = self.config;
        let root = Locator::root();

        if config.id.is_blank() {
            self.report(DiagnosticCode::EmptyId, root.field("id"), "language id must not be empty");
        }

        let categories = root.field("categories");
        for (i, category) in config.categories.iter().enumerate() {
            self.check_category(category, categories.index(i));
        }

        let paths = root.field("learningPaths");
        let mut paths_seen: HashMap<&str, Locator> = HashMap::new();
        for (i, path) in config.learning_paths().iter().enumerate() {
            let loc = paths.index(i);
            if let Some(first) = paths_seen.get(path.id.as_str()) {
                self.report(
                    DiagnosticCode::DuplicateLearningPathId,
                    loc.field("id"),
                    format!("learning path id `{}` is already declared at {first}", path.id),
                );
            } else {
                paths_seen.insert(path.id.as_str(), loc.clone());
            }
            self.check_learning_path(path, loc);
        }
    }

    fn check_category(&mut self, category: &'a DocCategory, loc: Locator) {
        if category.id.is_blank() {
            self.report(DiagnosticCode::EmptyId, loc.field("id"), "category id must not be empty");
        } else if let Some(first) = self.categories_seen.get(category.id.as_str()) {
            let message = format!("category id `{}` is already declared at {first}", category.id);
            self.report(DiagnosticCode::DuplicateCategoryId, loc.field("id"), message);
        } else {
            self.categories_seen.insert(category.id.as_str(), loc.clone());
        }

        if category.entries.is_empty() {
            self.report(
                DiagnosticCode::EmptyCategory,
                loc.field("entries"),
                "category must contain at least one entry",
            );
        }

        let entries = loc.field("entries");
        for (i, entry) in category.entries.iter().enumerate() {
            self.check_entry(entry, entries.index(i));
        }
    }

    fn check_entry(&mut self, entry: &'a DocEntry, loc: Locator) {
        if entry.id.is_blank() {
            self.report(DiagnosticCode::EmptyId, loc.field("id"), "entry id must not be empty");
        } else if let Some(first) = self.entries_seen.get(entry.id.as_str()) {
            let message = format!("entry id `{}` is already declared at {first}", entry.id);
            self.report(DiagnosticCode::DuplicateEntryId, loc.field("id"), message);
        } else {
            self.entries_seen.insert(entry.id.as_str(), loc.clone());
        }

        if entry.sections.is_empty() {
            self.report(
                DiagnosticCode::EmptySections,
                loc.field("sections"),
                "entry must contain at least one section",
            );
        }
        let sections = loc.field("sections");
        for (i, section) in entry.sections.iter().enumerate() {
            self.check_section(section, sections.index(i));
        }

        if entry.difficulty.is_none() && self.policy.require_difficulty {
            self.report(
                DiagnosticCode::MissingDifficulty,
                loc.field("difficulty"),
                format!("entry `{}` has no difficulty rating", entry.id),
            );
        }

        if let Some(minutes) = entry.reading_time.filter(|&m| m < 1) {
            self.report(
                DiagnosticCode::InvalidReadingTime,
                loc.field("readingTime"),
                format!("reading time must be a positive number of minutes, found {minutes}"),
            );
        }

        let related = loc.field("relatedEntryIds");
        for (i, id) in entry.related_entry_ids().iter().enumerate() {
            if !self.entry_ids.contains(id.as_str()) {
                self.report(
                    DiagnosticCode::DanglingRelatedEntry,
                    related.index(i),
                    format!("related entry `{id}` does not exist in language `{}`", self.config.id),
                );
            }
        }

        if let Some(cross) = &entry.cross_language_id {
            let cross_loc = loc.field("crossLanguageId");
            if cross.is_blank() {
                self.report(DiagnosticCode::EmptyId, cross_loc, "crossLanguageId must not be empty");
            } else if let Some((first, first_entry)) = self.cross_seen.get(cross.as_str()) {
                let message = format!(
                    "crossLanguageId `{cross}` is declared by both `{first_entry}` ({first}) and `{}`",
                    entry.id
                );
                self.report(DiagnosticCode::DuplicateCrossLanguageId, cross_loc, message);
            } else {
                self.cross_seen
                    .insert(cross.as_str(), (cross_loc, entry.id.as_str()));
            }
        }

        let quiz = loc.field("quiz");
        for (i, question) in entry.quiz().iter().enumerate() {
            self.check_quiz(question, quiz.index(i));
        }

        if let Some(challenge) = &entry.challenge {
            self.check_challenge(challenge, loc.field("challenge"));
        }

        if entry.tags().is_empty() && self.policy.require_tags {
            self.report(
                DiagnosticCode::MissingTags,
                loc.field("tags"),
                format!("entry `{}` has no tags", entry.id),
            );
        }
    }

    fn check_section(&mut self, section: &DocSection, loc: Locator) {
        self.require_text(&section.heading, loc.field("heading"), "section heading");
        self.require_text(&section.content, loc.field("content"), "section content");

        if section.output.is_some() && section.code.is_none() {
            self.report(
                DiagnosticCode::OutputWithoutCode,
                loc.field("output"),
                "section has output but no code to produce it",
            );
        }

        if let Some(lines) = &section.code_highlight_lines {
            let highlight = loc.field("codeHighlightLines");
            let line_count = section.code_line_count();
            for (i, &line) in lines.iter().enumerate() {
                if line < 1 {
                    self.report(
                        DiagnosticCode::HighlightOutOfBounds,
                        highlight.index(i),
                        format!("highlight line {line} must be a positive line number"),
                    );
                } else if let Some(count) = line_count {
                    if line as u64 > count as u64 {
                        self.report(
                            DiagnosticCode::HighlightOutOfBounds,
                            highlight.index(i),
                            format!("highlight line {line} is past the end of the code ({count} lines)"),
                        );
                    }
                }
            }
            if line_count.is_none() && !lines.is_empty() {
                self.report(
                    DiagnosticCode::HighlightWithoutCode,
                    highlight,
                    "highlight lines given but the section has no code",
                );
            }
        }

        if let Some(diagram) = &section.diagram {
            let diagram_loc = loc.field("diagram");
            match diagram {
                DiagramDefinition::Mermaid(m) => {
                    if m.source.trim().is_empty() {
                        self.report(
                            DiagnosticCode::MalformedDiagram,
                            diagram_loc.field("source"),
                            "mermaid diagram source must not be empty",
                        );
                    }
                }
                DiagramDefinition::Custom(c) => {
                    let problem = match &c.data {
                        Value::Object(_) => None,
                        Value::Null => Some("is missing"),
                        _ => Some("must be a mapping"),
                    };
                    if let Some(problem) = problem {
                        self.report(
                            DiagnosticCode::MalformedDiagram,
                            diagram_loc.field("data"),
                            format!("{} diagram data {problem}", c.diagram_type),
                        );
                    }
                }
            }
        }
    }

    fn check_quiz(&mut self, question: &QuizQuestion, loc: Locator) {
        let count = question.options.len();
        if count < 2 {
            self.report(
                DiagnosticCode::QuizTooFewOptions,
                loc.field("options"),
                format!("quiz question needs at least 2 options, found {count}"),
            );
        }

        let index = question.correct_index;
        let in_range = usize::try_from(index).map_or(false, |i| i < count);
        if !in_range {
            let message = if count == 0 {
                format!("correctIndex {index} is out of range: the question has no options")
            } else {
                format!(
                    "correctIndex {index} is out of range: valid range is 0\u{2013}{}",
                    count - 1
                )
            };
            self.report(DiagnosticCode::QuizAnswerOutOfRange, loc.field("correctIndex"), message);
        }
    }

    fn check_challenge(&mut self, challenge: &PracticeChallenge, loc: Locator) {
        self.require_text(&challenge.starter_code, loc.field("starterCode"), "challenge starter code");
        self.require_text(
            &challenge.solution_code,
            loc.field("solutionCode"),
            "challenge solution code",
        );

        let starter = challenge.starter_code.trim();
        if !starter.is_empty() && starter == challenge.solution_code.trim() {
            self.report(
                DiagnosticCode::ChallengeSolvedByStarter,
                loc.field("solutionCode"),
                "solution code is identical to the starter code",
            );
        }
    }

    fn check_learning_path(&mut self, path: &LearningPath, loc: Locator) {
        if path.id.is_blank() {
            self.report(DiagnosticCode::EmptyId, loc.field("id"), "learning path id must not be empty");
        }

        if !(path.estimated_hours.is_finite() && path.estimated_hours > 0.0) {
            self.report(
                DiagnosticCode::InvalidEstimatedHours,
                loc.field("estimatedHours"),
                format!("estimated hours must be positive, found {}", path.estimated_hours),
            );
        }

        let ids = loc.field("entryIds");
        if path.entry_ids.is_empty() {
            self.report(
                DiagnosticCode::EmptyLearningPath,
                ids.clone(),
                format!("learning path `{}` must list at least one entry", path.id),
            );
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (i, id) in path.entry_ids.iter().enumerate() {
            if !self.entry_ids.contains(id.as_str()) {
                self.report(
                    DiagnosticCode::DanglingPathEntry,
                    ids.index(i),
                    format!("learning path entry `{id}` does not exist in language `{}`", self.config.id),
                );
            }
            if !seen.insert(id.as_str()) {
                self.report(
                    DiagnosticCode::RepeatedPathEntry,
                    ids.index(i),
                    format!("entry `{id}` appears more than once in learning path `{}`", path.id),
                );
            }
        }
    }
}

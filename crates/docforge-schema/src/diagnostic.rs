//! # Diagnostics
//!
//! Content problems are reported as data, never raised. Each `Diagnostic`
//! carries a severity, a stable code, a human-readable message and a
//! `Locator` pointing into the corpus tree, e.g.
//! `categories[2].entries[5].sections[1].codeHighlightLines[0]`.
//!
//! Severity is a function of the code: a given kind of problem is always
//! an error or always a warning.

use std::fmt;

use serde::{Serialize, Serializer};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The corpus is unsafe to render. Blocks `freeze`.
    Error,
    /// Advisory only. Never blocks anything.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Stable identifier for each kind of content problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    // Hard errors.
    EmptyId,
    DuplicateLanguageId,
    DuplicateCategoryId,
    DuplicateEntryId,
    DuplicateLearningPathId,
    DuplicateCrossLanguageId,
    EmptyCategory,
    EmptySections,
    EmptyText,
    DanglingRelatedEntry,
    DanglingPathEntry,
    EmptyLearningPath,
    InvalidEstimatedHours,
    InvalidReadingTime,
    QuizTooFewOptions,
    QuizAnswerOutOfRange,
    HighlightOutOfBounds,
    MalformedDiagram,

    // Warnings.
    OutputWithoutCode,
    HighlightWithoutCode,
    RepeatedPathEntry,
    MissingDifficulty,
    MissingTags,
    ChallengeSolvedByStarter,
}

impl DiagnosticCode {
    pub fn severity(&self) -> Severity {
        match self {
            Self::OutputWithoutCode
            | Self::HighlightWithoutCode
            | Self::RepeatedPathEntry
            | Self::MissingDifficulty
            | Self::MissingTags
            | Self::ChallengeSolvedByStarter => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty-id",
            Self::DuplicateLanguageId => "duplicate-language-id",
            Self::DuplicateCategoryId => "duplicate-category-id",
            Self::DuplicateEntryId => "duplicate-entry-id",
            Self::DuplicateLearningPathId => "duplicate-learning-path-id",
            Self::DuplicateCrossLanguageId => "duplicate-cross-language-id",
            Self::EmptyCategory => "empty-category",
            Self::EmptySections => "empty-sections",
            Self::EmptyText => "empty-text",
            Self::DanglingRelatedEntry => "dangling-related-entry",
            Self::DanglingPathEntry => "dangling-path-entry",
            Self::EmptyLearningPath => "empty-learning-path",
            Self::InvalidEstimatedHours => "invalid-estimated-hours",
            Self::InvalidReadingTime => "invalid-reading-time",
            Self::QuizTooFewOptions => "quiz-too-few-options",
            Self::QuizAnswerOutOfRange => "quiz-answer-out-of-range",
            Self::HighlightOutOfBounds => "highlight-out-of-bounds",
            Self::MalformedDiagram => "malformed-diagram",
            Self::OutputWithoutCode => "output-without-code",
            Self::HighlightWithoutCode => "highlight-without-code",
            Self::RepeatedPathEntry => "repeated-path-entry",
            Self::MissingDifficulty => "missing-difficulty",
            Self::MissingTags => "missing-tags",
            Self::ChallengeSolvedByStarter => "challenge-solved-by-starter",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(&'static str),
    Index(usize),
}

/// Path from the root of a language config to the offending node.
///
/// Built immutably while walking the tree: `field` and `index` return an
/// extended copy. Rendered as `categories[2].entries[5].title`, prefixed
/// with `<language>:` once the owning language is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locator {
    language: Option<String>,
    segments: Vec<Segment>,
}

impl Locator {
    /// The root of a language config.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &'static str) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Field(name));
        next
    }

    pub fn index(&self, i: usize) -> Self {
        let mut next = self.clone();
        next.segments.push(Segment::Index(i));
        next
    }

    /// Attach the owning language id. Replaces any earlier prefix.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(language) = &self.language {
            write!(f, "{language}:")?;
        }
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Locator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One located content problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub locator: Locator,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, locator: Locator, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            locator,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.locator, self.message
        )
    }
}

/// Outcome of validating a language config or a whole corpus.
///
/// Both sequences are in tree-walk order, so the same input always yields
/// an identical result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic in the sequence matching its severity.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Append another result, preserving order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Prefix every locator with the owning language id.
    pub fn with_language(self, language: &str) -> Self {
        let tag = |d: Diagnostic| Diagnostic {
            locator: d.locator.with_language(language),
            ..d
        };
        Self {
            errors: self.errors.into_iter().map(tag).collect(),
            warnings: self.warnings.into_iter().map(tag).collect(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Whether a build gate should pass, optionally treating warnings as
    /// failures.
    pub fn passes(&self, deny_warnings: bool) -> bool {
        !self.has_errors() && !(deny_warnings && !self.warnings.is_empty())
    }

    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.errors.first()
    }

    /// Errors first, then warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.iter().filter(|d| d.code == code).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_renders_fields_and_indexes() {
        let loc = Locator::root()
            .field("categories")
            .index(2)
            .field("entries")
            .index(5)
            .field("sections")
            .index(1)
            .field("codeHighlightLines")
            .index(0);
        assert_eq!(
            loc.to_string(),
            "categories[2].entries[5].sections[1].codeHighlightLines[0]"
        );
    }

    #[test]
    fn locator_language_prefix() {
        let loc = Locator::root().field("learningPaths").index(0).with_language("rust");
        assert_eq!(loc.to_string(), "rust:learningPaths[0]");
        assert_eq!(Locator::root().with_language("go").to_string(), "go:(root)");
    }

    #[test]
    fn extending_does_not_mutate_parent() {
        let parent = Locator::root().field("categories");
        let _child = parent.index(0);
        assert_eq!(parent.to_string(), "categories");
    }

    #[test]
    fn push_routes_by_severity() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::new(DiagnosticCode::EmptyCategory, Locator::root(), "e"));
        result.push(Diagnostic::new(DiagnosticCode::MissingTags, Locator::root(), "w"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.has_errors());
        assert!(!result.passes(false));
    }

    #[test]
    fn deny_warnings_gate() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::new(DiagnosticCode::MissingDifficulty, Locator::root(), "w"));
        assert!(result.passes(false));
        assert!(!result.passes(true));
    }

    #[test]
    fn diagnostic_display_and_json() {
        let d = Diagnostic::new(
            DiagnosticCode::QuizAnswerOutOfRange,
            Locator::root().field("categories").index(0),
            "correctIndex 3 is out of range",
        );
        assert_eq!(
            d.to_string(),
            "error[quiz-answer-out-of-range] categories[0]: correctIndex 3 is out of range"
        );
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["code"], "quiz-answer-out-of-range");
        assert_eq!(json["locator"], "categories[0]");
    }

    #[test]
    fn with_language_tags_every_diagnostic() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::new(DiagnosticCode::EmptyId, Locator::root().field("id"), "e"));
        result.push(Diagnostic::new(DiagnosticCode::MissingTags, Locator::root(), "w"));
        let tagged = result.with_language("ts");
        assert!(tagged.iter().all(|d| d.locator.language() == Some("ts")));
        assert_eq!(tagged.errors[0].locator.to_string(), "ts:id");
    }
}

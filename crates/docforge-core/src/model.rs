//! # Corpus Data Model
//!
//! The documentation corpus is a forest of nested, insertion-ordered
//! entities:
//!
//! ```text
//! LanguageConfig
//! ├── categories: [DocCategory]
//! │   └── entries: [DocEntry]
//! │       ├── sections: [DocSection] ── diagram: DiagramDefinition
//! │       ├── quiz: [QuizQuestion]
//! │       └── challenge: PracticeChallenge
//! └── learningPaths: [LearningPath]
//! ```
//!
//! Field names on the wire are camelCase, matching what content authors
//! write in JSON or YAML. Every optional attribute is an `Option`; absence
//! is never encoded as an empty string or a zero.
//!
//! These types carry no invariants of their own. A value that deserializes
//! is shape-correct, nothing more. The content invariants (unique ids,
//! resolving references, answer bounds) are enforced by the validator in
//! `docforge-schema`.

use serde::{Deserialize, Serialize};

use crate::diagram::DiagramDefinition;
use crate::identity::{CategoryId, CrossLanguageId, EntryId, LanguageId, LearningPathId};

/// Top-level documentation set for one programming language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    pub id: LanguageId,
    pub label: String,
    /// Icon identifier resolved by the rendering application.
    pub icon: String,
    pub color: String,
    /// External reference documentation URL.
    pub docs_url: String,
    pub tagline: String,
    pub categories: Vec<DocCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_paths: Option<Vec<LearningPath>>,
}

impl LanguageConfig {
    /// Iterate every entry in document order (category by category).
    pub fn entries(&self) -> impl Iterator<Item = &DocEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    /// Learning paths, or an empty slice when none are declared.
    pub fn learning_paths(&self) -> &[LearningPath] {
        self.learning_paths.as_deref().unwrap_or_default()
    }
}

/// A topical grouping of entries, e.g. "Modules & Namespaces".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocCategory {
    pub id: CategoryId,
    pub label: String,
    pub icon: String,
    pub entries: Vec<DocEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reader-facing difficulty rating of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One learnable unit: a documentation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    pub id: EntryId,
    pub title: String,
    pub sections: Vec<DocSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Estimated reading time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entry_ids: Option<Vec<EntryId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_language_id: Option<CrossLanguageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Vec<QuizQuestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<PracticeChallenge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheat_sheet_summary: Option<String>,
    /// Type signature of the documented item, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl DocEntry {
    pub fn related_entry_ids(&self) -> &[EntryId] {
        self.related_entry_ids.as_deref().unwrap_or_default()
    }

    pub fn quiz(&self) -> &[QuizQuestion] {
        self.quiz.as_deref().unwrap_or_default()
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// One content block inside an entry.
///
/// `tip`, `warning` and `note` are independent annotations; any subset may
/// be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSection {
    pub heading: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Expected output of `code`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<DiagramDefinition>,
    /// 1-based line numbers of `code` to highlight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_highlight_lines: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analogy: Option<String>,
}

impl DocSection {
    /// Number of lines in the code sample, if there is one.
    ///
    /// A trailing newline does not start a new line.
    pub fn code_line_count(&self) -> Option<usize> {
        self.code.as_deref().map(|code| code.lines().count())
    }
}

/// A multiple-choice question attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: i64,
    pub explanation: String,
}

impl QuizQuestion {
    /// The correct option, if `correct_index` is in range.
    pub fn correct_option(&self) -> Option<&str> {
        usize::try_from(self.correct_index)
            .ok()
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

/// A coding exercise attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeChallenge {
    pub prompt: String,
    pub starter_code: String,
    pub solution_code: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// An authored curriculum cutting across categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: LearningPathId,
    pub label: String,
    pub description: String,
    pub entry_ids: Vec<EntryId>,
    pub estimated_hours: f64,
}

//! # Inspect Subcommand
//!
//! Freezes a corpus and prints a per-language summary with the content
//! digest, so a build log records exactly which content was shipped.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use docforge_schema::{freeze_corpus, FreezeError, FrozenCorpus, FrozenLanguage};

use crate::{corpus_loader, load_languages, OutputFormat, EXIT_INVALID, EXIT_LOAD_FAILURE, EXIT_OK};

/// Arguments for the `docforge inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Language files, language directories or corpus directories.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Counts for one frozen language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    pub id: String,
    pub label: String,
    pub categories: usize,
    pub entries: usize,
    pub quiz_questions: usize,
    pub challenges: usize,
    pub learning_paths: usize,
    pub concepts: usize,
    pub digest: String,
}

impl LanguageSummary {
    pub fn of(language: &FrozenLanguage) -> Self {
        let entries: Vec<_> = language.entries().collect();
        Self {
            id: language.id().to_string(),
            label: language.label().to_string(),
            categories: language.categories().len(),
            entries: entries.len(),
            quiz_questions: entries.iter().map(|e| e.quiz().len()).sum(),
            challenges: entries.iter().filter(|e| e.challenge.is_some()).count(),
            learning_paths: language.learning_paths().len(),
            concepts: entries.iter().filter(|e| e.cross_language_id.is_some()).count(),
            digest: language.digest().to_string(),
        }
    }
}

/// Summaries for every language in corpus order.
pub fn summarize(corpus: &FrozenCorpus) -> Vec<LanguageSummary> {
    corpus
        .languages()
        .iter()
        .map(|language| LanguageSummary::of(language))
        .collect()
}

/// Execute the inspect subcommand, writing to stdout.
///
/// Returns exit code: 0 when the corpus froze, 1 when it has hard errors,
/// 2 when content cannot be loaded.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    inspect_to(args, &mut stdout.lock())
}

/// Execute the inspect subcommand against an arbitrary writer.
pub fn inspect_to(args: &InspectArgs, out: &mut impl Write) -> Result<u8> {
    let loader = corpus_loader()?;
    let configs = match load_languages(&loader, &args.paths) {
        Ok(configs) => configs,
        Err(failure) => {
            failure.report(out)?;
            return Ok(EXIT_LOAD_FAILURE);
        }
    };

    let corpus = match freeze_corpus(configs) {
        Ok(corpus) => corpus,
        Err(FreezeError::InvalidCorpus(e)) => {
            writeln!(out, "FAIL: {e}")?;
            writeln!(out, "run `docforge validate` for the full report")?;
            return Ok(EXIT_INVALID);
        }
        Err(e) => return Err(e.into()),
    };

    let summaries = summarize(&corpus);
    match args.format {
        OutputFormat::Text => {
            for s in &summaries {
                writeln!(out, "{} ({})", s.id, s.label)?;
                writeln!(
                    out,
                    "  categories: {}  entries: {}  quiz questions: {}  challenges: {}  learning paths: {}  concepts: {}",
                    s.categories, s.entries, s.quiz_questions, s.challenges, s.learning_paths, s.concepts
                )?;
                writeln!(out, "  digest: {}", s.digest)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &summaries)?;
            writeln!(out)?;
        }
    }
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn content_dir() -> PathBuf {
        let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        dir.pop(); // crates
        dir.pop(); // repo root
        dir.join("content")
    }

    fn run(args: &InspectArgs) -> (u8, String) {
        let mut out = Vec::new();
        let code = inspect_to(args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn sample_corpus_summary() {
        let args = InspectArgs {
            paths: vec![content_dir()],
            format: OutputFormat::Json,
        };
        let (code, out) = run(&args);
        assert_eq!(code, EXIT_OK);

        let summaries: serde_json::Value = serde_json::from_str(&out).unwrap();
        let rust = &summaries[1];
        assert_eq!(rust["id"], "rust");
        assert_eq!(rust["categories"], 2);
        assert_eq!(rust["entries"], 3);
        assert_eq!(rust["quizQuestions"], 1);
        assert_eq!(rust["challenges"], 1);
        assert_eq!(rust["learningPaths"], 1);
        assert!(rust["digest"].as_str().unwrap().starts_with("sha256:"));
    }

    #[test]
    fn text_summary_is_stable_across_runs() {
        let args = InspectArgs {
            paths: vec![content_dir().join("rust")],
            format: OutputFormat::Text,
        };
        let (_, first) = run(&args);
        let (_, second) = run(&args);
        assert_eq!(first, second);
        assert!(first.starts_with("rust (Rust)\n"), "{first}");
    }

    #[test]
    fn invalid_corpus_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        let bad = serde_json::json!({
            "id": "bad", "label": "Bad", "icon": "x", "color": "#000000",
            "docsUrl": "https://example.org", "tagline": "Broken",
            "categories": [{"id": "empty", "label": "Empty", "icon": "x", "entries": []}]
        });
        std::fs::write(&path, bad.to_string()).unwrap();

        let (code, out) = run(&InspectArgs {
            paths: vec![path],
            format: OutputFormat::Text,
        });
        assert_eq!(code, EXIT_INVALID);
        assert!(out.contains("bad:categories[0].entries"), "{out}");
    }

    #[test]
    fn missing_path_is_load_failure() {
        let (code, _) = run(&InspectArgs {
            paths: vec![Path::new("/nonexistent/docforge/content").to_path_buf()],
            format: OutputFormat::Text,
        });
        assert_eq!(code, EXIT_LOAD_FAILURE);
    }
}

//! # Validate Subcommand
//!
//! Loads one or more content paths, validates them as a single corpus and
//! prints every diagnostic with its locator.
//!
//! Text output is one line per diagnostic, errors first:
//!
//! ```text
//! error[dangling-related-entry] rust:categories[1].entries[0].relatedEntryIds[0]: related entry `missing-id` does not exist in language `rust`
//! warning[missing-difficulty] rust:categories[0].entries[2].difficulty: entry `traits` has no difficulty rating
//! 2 language(s): 1 error(s), 1 warning(s)
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use docforge_schema::{ValidationPolicy, ValidationResult, Validator};

use crate::{corpus_loader, load_languages, OutputFormat, EXIT_INVALID, EXIT_LOAD_FAILURE, EXIT_OK};

/// Arguments for the `docforge validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Language files, language directories or corpus directories.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail the gate on warnings as well as errors.
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Machine-readable validation report.
#[derive(Debug, Serialize)]
struct Report<'a> {
    languages: Vec<&'a str>,
    passed: bool,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Execute the validate subcommand, writing to stdout.
///
/// Returns exit code: 0 when the gate passes, 1 on blocking diagnostics,
/// 2 when content cannot be loaded.
pub fn run_validate(args: &ValidateArgs, policy: &ValidationPolicy) -> Result<u8> {
    let stdout = std::io::stdout();
    validate_to(args, policy, &mut stdout.lock())
}

/// Execute the validate subcommand against an arbitrary writer.
pub fn validate_to(
    args: &ValidateArgs,
    policy: &ValidationPolicy,
    out: &mut impl Write,
) -> Result<u8> {
    let loader = corpus_loader()?;
    let configs = match load_languages(&loader, &args.paths) {
        Ok(configs) => configs,
        Err(failure) => {
            tracing::error!(path = %failure.path.display(), "content could not be loaded");
            failure.report(out)?;
            return Ok(EXIT_LOAD_FAILURE);
        }
    };

    let result = Validator::new(*policy).validate_corpus(&configs);
    let deny_warnings = args.deny_warnings || policy.deny_warnings;
    let passed = result.passes(deny_warnings);

    match args.format {
        OutputFormat::Text => {
            for diagnostic in result.iter() {
                writeln!(out, "{diagnostic}")?;
            }
            writeln!(
                out,
                "{} language(s): {} error(s), {} warning(s)",
                configs.len(),
                result.errors.len(),
                result.warnings.len()
            )?;
            if !passed && !result.has_errors() {
                writeln!(out, "FAIL: warnings are denied")?;
            }
        }
        OutputFormat::Json => {
            let report = Report {
                languages: configs.iter().map(|c| c.id.as_str()).collect(),
                passed,
                result: &result,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    tracing::info!(
        languages = configs.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        passed,
        "validation finished"
    );

    Ok(if passed { EXIT_OK } else { EXIT_INVALID })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const VALID: &str = r##"
id: rust
label: Rust
icon: rust
color: "#dea584"
docsUrl: https://doc.rust-lang.org
tagline: Fearless systems programming
categories:
  - id: basics
    label: Basics
    icon: book
    entries:
      - id: hello
        title: Hello
        difficulty: beginner
        tags: [start]
        sections:
          - heading: main
            content: Programs start at main.
"##;

    fn args(paths: Vec<PathBuf>) -> ValidateArgs {
        ValidateArgs {
            paths,
            format: OutputFormat::Text,
            deny_warnings: false,
        }
    }

    fn run(args: &ValidateArgs, policy: ValidationPolicy) -> (u8, String) {
        let mut out = Vec::new();
        let code = validate_to(args, &policy, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn clean_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "rust.yaml", VALID);
        let (code, out) = run(&args(vec![path]), ValidationPolicy::default());
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("1 language(s): 0 error(s), 0 warning(s)"), "{out}");
    }

    #[test]
    fn content_errors_exit_one_with_locators() {
        let dir = tempfile::tempdir().unwrap();
        let broken = VALID.replace("tags: [start]", "tags: [start]\n        relatedEntryIds: [nope]");
        let path = write(dir.path(), "rust.yaml", &broken);
        let (code, out) = run(&args(vec![path]), ValidationPolicy::default());
        assert_eq!(code, EXIT_INVALID);
        assert!(
            out.contains("error[dangling-related-entry] rust:categories[0].entries[0].relatedEntryIds[0]"),
            "{out}"
        );
    }

    #[test]
    fn warnings_fail_only_when_denied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "rust.yaml", &VALID.replace("        difficulty: beginner\n", ""));

        let (code, out) = run(&args(vec![path.clone()]), ValidationPolicy::default());
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("warning[missing-difficulty]"), "{out}");

        let mut denied = args(vec![path.clone()]);
        denied.deny_warnings = true;
        let (code, out) = run(&denied, ValidationPolicy::default());
        assert_eq!(code, EXIT_INVALID);
        assert!(out.contains("FAIL: warnings are denied"));

        let policy = ValidationPolicy {
            deny_warnings: true,
            ..ValidationPolicy::default()
        };
        let (code, _) = run(&args(vec![path]), policy);
        assert_eq!(code, EXIT_INVALID);
    }

    #[test]
    fn shape_errors_exit_two() {
        let dir = tempfile::tempdir().unwrap();
        let missing_tagline = VALID.replace("tagline: Fearless systems programming\n", "");
        let path = write(dir.path(), "rust.yaml", &missing_tagline);
        let (code, out) = run(&args(vec![path]), ValidationPolicy::default());
        assert_eq!(code, EXIT_LOAD_FAILURE);
        assert!(out.starts_with("FAIL: "), "{out}");
        assert!(out.contains("tagline"), "{out}");
    }

    #[test]
    fn corpus_with_policy_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rust.yaml", VALID);
        let policy_path = write(dir.path(), "docforge.yaml", "deny_warnings: true\n");
        let policy = ValidationPolicy::from_file(&policy_path).unwrap();

        let (code, out) = run(&args(vec![dir.path().to_path_buf()]), policy);
        assert_eq!(code, EXIT_OK, "{out}");
        assert!(out.contains("1 language(s): 0 error(s), 0 warning(s)"), "{out}");
    }

    #[test]
    fn duplicate_languages_across_paths_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(dir.path(), "a.yaml", VALID);
        let b = write(dir.path(), "b.yaml", VALID);
        let (code, out) = run(&args(vec![a, b]), ValidationPolicy::default());
        assert_eq!(code, EXIT_INVALID);
        assert!(out.contains("error[duplicate-language-id] rust:id"), "{out}");
    }

    #[test]
    fn json_report_is_machine_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "rust.yaml", VALID);
        let mut json_args = args(vec![path]);
        json_args.format = OutputFormat::Json;
        let (code, out) = run(&json_args, ValidationPolicy::default());
        assert_eq!(code, EXIT_OK);

        let report: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["languages"], serde_json::json!(["rust"]));
        assert_eq!(report["passed"], true);
        assert_eq!(report["errors"], serde_json::json!([]));
    }
}

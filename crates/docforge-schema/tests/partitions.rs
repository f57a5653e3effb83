//! On-disk layouts: single files, partitioned directories, and corpus
//! directories mixing both.

use std::fs;
use std::path::Path;

use docforge_schema::{
    load_corpus, load_language, validate_language, CorpusLoader, LoadError, ValidationPolicy,
};

const MANIFEST: &str = r##"
id: go
label: Go
icon: go
color: "#00add8"
docsUrl: https://go.dev/doc/
tagline: Simple, reliable, efficient
categories:
  - id: intro
    label: Intro
    icon: book
    entries:
      - id: hello
        title: Hello
        difficulty: beginner
        tags: [start]
        sections:
          - heading: main
            content: Programs start in package main.
"##;

fn category(id: &str, entry: &str) -> String {
    format!(
        "- id: {id}\n  label: {id}\n  icon: box\n  entries:\n    - id: {entry}\n      title: {entry}\n      difficulty: beginner\n      tags: [t]\n      relatedEntryIds: [hello]\n      sections:\n        - heading: H\n          content: C\n"
    )
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn partitions_append_after_manifest_categories_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    let go = dir.path().join("go");
    write(&go.join("language.yaml"), MANIFEST);
    write(&go.join("categories/10-types.yaml"), &category("types", "structs"));
    write(&go.join("categories/02-flow.yml"), &category("flow", "loops"));
    write(
        &go.join("categories/30-json.json"),
        r#"[{"id": "io", "label": "IO", "icon": "disk", "entries": [
            {"id": "files", "title": "Files", "difficulty": "advanced", "tags": ["io"],
             "sections": [{"heading": "Open", "content": "os.Open"}]}]}]"#,
    );
    write(&go.join("categories/README.md"), "ignored");

    let config = load_language(&go).unwrap();
    let ids: Vec<_> = config.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["intro", "flow", "types", "io"]);

    // Cross-partition references resolve once assembled.
    assert!(validate_language(&config).is_clean());
}

#[test]
fn partition_that_is_not_a_sequence_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("language.yaml"), MANIFEST);
    write(&dir.path().join("categories/01.yaml"), "id: lonely\n");

    let err = load_language(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Partition { .. }), "got {err}");
}

#[test]
fn shape_errors_in_partitions_are_contract_errors() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("language.yaml"), MANIFEST);
    write(
        &dir.path().join("categories/01.yaml"),
        "- id: broken\n  label: Broken\n  icon: x\n  entries: not-a-list\n",
    );

    let err = load_language(dir.path()).unwrap_err();
    match err {
        LoadError::Contract { source, .. } => {
            assert!(source.to_string().contains("/categories/1/entries"), "{source}");
        }
        other => panic!("expected Contract, got {other}"),
    }
}

#[test]
fn corpus_directory_mixes_files_and_partitioned_languages() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("b-go/language.yaml"), MANIFEST);
    let json = serde_json::json!({
        "id": "c", "label": "C", "icon": "c", "color": "#555555",
        "docsUrl": "https://en.cppreference.com/w/c", "tagline": "Portable assembly",
        "categories": []
    });
    write(&dir.path().join("a-c.json"), &json.to_string());
    write(&dir.path().join("notes.txt"), "skipped");
    fs::create_dir_all(dir.path().join("drafts")).unwrap();

    let configs = load_corpus(dir.path()).unwrap();
    let ids: Vec<_> = configs.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "go"]);
}

#[test]
fn policy_file_beside_languages_is_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("go.yaml"), MANIFEST);
    write(&dir.path().join("docforge.yaml"), "deny_warnings: true\n");
    write(&dir.path().join("docforge.json"), "{\"require_tags\": false}");

    let configs = CorpusLoader::new().unwrap().load_path(dir.path()).unwrap();
    let ids: Vec<_> = configs.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["go"]);

    let policy = ValidationPolicy::from_file(&dir.path().join("docforge.yaml")).unwrap();
    assert!(policy.deny_warnings);
}

#[test]
fn load_path_dispatches_on_layout() {
    let dir = tempfile::tempdir().unwrap();
    let go = dir.path().join("go");
    write(&go.join("language.yaml"), MANIFEST);

    let loader = CorpusLoader::new().unwrap();
    assert_eq!(loader.load_path(&go).unwrap().len(), 1);
    assert_eq!(loader.load_path(&go.join("language.yaml")).unwrap().len(), 1);
    assert_eq!(loader.load_path(dir.path()).unwrap().len(), 1);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_corpus(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

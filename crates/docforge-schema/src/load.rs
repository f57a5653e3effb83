//! # Corpus Loading
//!
//! Reads authored content from disk into typed language configs. Two
//! layouts are supported for a language:
//!
//! - **Single file.** `rust.yaml` / `rust.yml` / `rust.json` holding the
//!   whole config.
//! - **Partitioned directory.** Large corpora are split across files for
//!   manageability:
//!
//!   ```text
//!   rust/
//!   ├── language.yaml        # metadata, learning paths, optional categories
//!   └── categories/
//!       ├── 01-basics.yaml   # a sequence of categories
//!       └── 02-modules.yaml
//!   ```
//!
//!   Partition files are concatenated in file-name order onto the
//!   manifest's own `categories`. The assembled value then goes through
//!   the structural gate exactly like a single file, so the validator is
//!   agnostic to how many partitions were involved.
//!
//! A corpus directory holds any mix of both layouts. Policy files
//! (`docforge.yaml` and friends) found there are not languages and are
//! skipped.
//!
//! YAML is converted to JSON values before the structural gate.

use std::path::{Path, PathBuf};

use docforge_core::LanguageConfig;
use serde_json::Value;
use thiserror::Error;

use crate::policy::POLICY_FILE_NAMES;
use crate::structure::{ContractError, StructureValidator};

/// Manifest file names recognised in a partitioned language directory.
pub const MANIFEST_NAMES: [&str; 3] = ["language.yaml", "language.yml", "language.json"];

/// Directory holding category partitions inside a language directory.
pub const PARTITION_DIR: &str = "categories";

/// Error while loading content from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// A partition file is not a sequence of categories.
    #[error("partition '{path}' must be a sequence of categories")]
    Partition { path: String },

    /// The manifest is not a mapping.
    #[error("manifest '{path}' must be a mapping")]
    Manifest { path: String },

    #[error("'{path}' is not a language file or language directory")]
    NotALanguage { path: String },

    #[error("'{path}': {source}")]
    Contract {
        path: String,
        #[source]
        source: ContractError,
    },
}

/// Loads language configs through one compiled structural gate.
#[derive(Debug)]
pub struct CorpusLoader {
    structure: StructureValidator,
}

impl CorpusLoader {
    /// Create a loader using the bundled schema.
    pub fn new() -> Result<Self, ContractError> {
        Ok(Self {
            structure: StructureValidator::new()?,
        })
    }

    pub fn with_structure(structure: StructureValidator) -> Self {
        Self { structure }
    }

    /// Load one language from a file or a partitioned directory.
    pub fn load_language(&self, path: &Path) -> Result<LanguageConfig, LoadError> {
        let raw = if path.is_dir() {
            assemble_partitions(path)?
        } else if is_content_file(path) {
            read_document(path)?
        } else {
            return Err(LoadError::NotALanguage {
                path: path.display().to_string(),
            });
        };

        let config = self
            .structure
            .parse_language(&raw)
            .map_err(|source| LoadError::Contract {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            language = %config.id,
            categories = config.categories.len(),
            "language loaded"
        );
        Ok(config)
    }

    /// Load every language directly under `dir`, sorted by name.
    ///
    /// Children that are content files or language directories are loaded;
    /// anything else is skipped with a warning.
    pub fn load_corpus(&self, dir: &Path) -> Result<Vec<LanguageConfig>, LoadError> {
        let mut configs = Vec::new();
        for path in sorted_children(dir)? {
            if is_policy_file(&path) {
                tracing::debug!(path = %path.display(), "skipping policy file in corpus");
            } else if is_language_dir(&path) || is_content_file(&path) {
                configs.push(self.load_language(&path)?);
            } else {
                tracing::warn!(path = %path.display(), "skipping non-language path in corpus");
            }
        }
        Ok(configs)
    }

    /// Load a path that may be a language file, a language directory, or
    /// a corpus directory of languages.
    pub fn load_path(&self, path: &Path) -> Result<Vec<LanguageConfig>, LoadError> {
        if path.is_dir() && !is_language_dir(path) {
            self.load_corpus(path)
        } else {
            Ok(vec![self.load_language(path)?])
        }
    }
}

/// Load one language with the bundled schema.
pub fn load_language(path: &Path) -> Result<LanguageConfig, LoadError> {
    loader(path)?.load_language(path)
}

/// Load every language under a corpus directory with the bundled schema.
pub fn load_corpus(dir: &Path) -> Result<Vec<LanguageConfig>, LoadError> {
    loader(dir)?.load_corpus(dir)
}

fn loader(path: &Path) -> Result<CorpusLoader, LoadError> {
    CorpusLoader::new().map_err(|source| LoadError::Contract {
        path: path.display().to_string(),
        source,
    })
}

/// True if `path` is a directory containing a language manifest.
pub fn is_language_dir(path: &Path) -> bool {
    path.is_dir() && manifest_path(path).is_some()
}

fn manifest_path(dir: &Path) -> Option<PathBuf> {
    MANIFEST_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn is_policy_file(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| POLICY_FILE_NAMES.contains(&n))
}

fn is_content_file(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("json" | "yaml" | "yml")
        )
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let read_err = |source| LoadError::Read {
        path: dir.display().to_string(),
        source,
    };
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        children.push(entry.map_err(read_err)?.path());
    }
    children.sort();
    Ok(children)
}

/// Read the manifest and append every partition's categories to it.
fn assemble_partitions(dir: &Path) -> Result<Value, LoadError> {
    let manifest = manifest_path(dir).ok_or_else(|| LoadError::NotALanguage {
        path: dir.display().to_string(),
    })?;
    let mut root = read_document(&manifest)?;
    let object = root.as_object_mut().ok_or_else(|| LoadError::Manifest {
        path: manifest.display().to_string(),
    })?;

    let mut categories = match object.remove("categories") {
        Some(Value::Array(items)) => items,
        // Let the structural gate report a non-sequence with its path.
        Some(other) => {
            object.insert("categories".to_string(), other);
            return Ok(root);
        }
        None => Vec::new(),
    };

    let partition_dir = dir.join(PARTITION_DIR);
    if partition_dir.is_dir() {
        for path in sorted_children(&partition_dir)? {
            if !is_content_file(&path) {
                tracing::warn!(path = %path.display(), "skipping non-content file in partitions");
                continue;
            }
            match read_document(&path)? {
                Value::Array(items) => {
                    tracing::debug!(path = %path.display(), categories = items.len(), "partition read");
                    categories.extend(items);
                }
                _ => {
                    return Err(LoadError::Partition {
                        path: path.display().to_string(),
                    })
                }
            }
        }
    }

    object.insert("categories".to_string(), Value::Array(categories));
    Ok(root)
}

/// Read a JSON or YAML document into a JSON value, by file extension.
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let parse_err = |reason: String| LoadError::Parse {
        path: path.display().to_string(),
        reason,
    };

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| parse_err(format!("invalid YAML: {e}")))?;
            yaml_to_json(&yaml).map_err(|e| parse_err(format!("YAML-to-JSON conversion failed: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_err(format!("invalid JSON: {e}"))),
    }
}

/// Convert a YAML value tree to the equivalent JSON value tree.
///
/// Content files use the JSON-compatible subset of YAML. Scalar map keys
/// are stringified; tags are dropped.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().ok_or_else(|| format!("unsupported number {n}"))?;
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("non-finite number {f} has no JSON form"))?
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(
            items
                .iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported map key {other:?}")),
                };
                out.insert(key, yaml_to_json(v)?);
            }
            Value::Object(out)
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_conversion_keeps_scalars_and_nesting() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "id: rust\nreadingTime: 5\nestimatedHours: 2.5\nok: true\nlist:\n  - a\n  - b\n1: numeric key\n",
        )
        .unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value["id"], "rust");
        assert_eq!(value["readingTime"], 5);
        assert_eq!(value["estimatedHours"], 2.5);
        assert_eq!(value["ok"], true);
        assert_eq!(value["list"], json!(["a", "b"]));
        assert_eq!(value["1"], "numeric key");
    }

    #[test]
    fn yaml_non_finite_number_is_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("hours: .nan\n").unwrap();
        assert!(yaml_to_json(&yaml).is_err());
    }

    #[test]
    fn unknown_extension_is_not_a_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(matches!(
            load_language(&path),
            Err(LoadError::NotALanguage { .. })
        ));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rust.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_language(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {err}");
    }

    #[test]
    fn manifest_must_be_mapping() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("language.yaml"), "- just\n- a list\n").unwrap();
        assert!(matches!(
            load_language(dir.path()),
            Err(LoadError::Manifest { .. })
        ));
    }
}

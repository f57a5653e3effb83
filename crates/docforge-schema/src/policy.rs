//! Validation policy.
//!
//! Controls which advisory warnings are emitted and whether warnings fail
//! a build gate. Hard errors are not configurable. Loaded from a YAML (or
//! JSON) file; every field is optional and environment variables override
//! the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File names a policy file conventionally uses. Corpus loading skips
/// them so a policy can live next to the languages it governs.
pub const POLICY_FILE_NAMES: [&str; 3] = ["docforge.yaml", "docforge.yml", "docforge.json"];

/// Which soft checks run and how warnings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    /// Warn when an entry has no `difficulty`.
    pub require_difficulty: bool,
    /// Warn when an entry has no `tags` or an empty tag list.
    pub require_tags: bool,
    /// Treat any warning as a build failure.
    pub deny_warnings: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            require_difficulty: true,
            require_tags: true,
            deny_warnings: false,
        }
    }
}

impl ValidationPolicy {
    /// Load a policy file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|e| PolicyError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply overrides from the process environment.
    ///
    /// Variables:
    /// - `DOCFORGE_REQUIRE_DIFFICULTY`
    /// - `DOCFORGE_REQUIRE_TAGS`
    /// - `DOCFORGE_DENY_WARNINGS`
    ///
    /// Accepted values: `true`, `false`, `1`, `0`, `yes`, `no`.
    pub fn with_env_overrides(self) -> Result<Self, PolicyError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PolicyError> {
        if let Some(v) = lookup("DOCFORGE_REQUIRE_DIFFICULTY") {
            self.require_difficulty = parse_flag("DOCFORGE_REQUIRE_DIFFICULTY", &v)?;
        }
        if let Some(v) = lookup("DOCFORGE_REQUIRE_TAGS") {
            self.require_tags = parse_flag("DOCFORGE_REQUIRE_TAGS", &v)?;
        }
        if let Some(v) = lookup("DOCFORGE_DENY_WARNINGS") {
            self.deny_warnings = parse_flag("DOCFORGE_DENY_WARNINGS", &v)?;
        }
        Ok(self)
    }
}

fn parse_flag(var: &str, raw: &str) -> Result<bool, PolicyError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(PolicyError::InvalidFlag {
            var: var.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Policy loading errors.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("cannot read policy file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid policy file '{path}': {reason}")]
    Parse { path: String, reason: String },
    #[error("invalid boolean for {var}: '{value}'")]
    InvalidFlag { var: String, value: String },
}

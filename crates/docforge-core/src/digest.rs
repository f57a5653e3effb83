//! # Content Digest
//!
//! A `ContentDigest` identifies a language documentation set by content.
//! The rendering application can use it to invalidate caches whenever an
//! author changes anything in the corpus.
//!
//! Digests are computed only from `CanonicalBytes`, so key order in the
//! authored files never changes the result.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// A SHA-256 digest over canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    bytes: [u8; 32],
}

impl ContentDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 digest from canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest { bytes }
}

/// Canonicalize a value and digest it in one step.
pub fn digest_of(obj: &impl Serialize) -> Result<ContentDigest, CanonicalizationError> {
    Ok(sha256_digest(&CanonicalBytes::new(obj)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_digest_is_known_value() {
        // sha256("{}")
        let digest = digest_of(&json!({})).unwrap();
        assert_eq!(
            digest.to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn display_carries_algorithm_prefix() {
        let digest = digest_of(&json!({"a": 1})).unwrap();
        let rendered = digest.to_string();
        assert!(rendered.starts_with("sha256:"));
        assert_eq!(rendered.len(), "sha256:".len() + 64);
    }

    #[test]
    fn digest_ignores_key_order() {
        let a = digest_of(&json!({"id": "rust", "label": "Rust"})).unwrap();
        let b = digest_of(&json!({"label": "Rust", "id": "rust"})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn learning_path_with_nan_hours_has_no_digest() {
        let path = crate::LearningPath {
            id: "intro".into(),
            label: "Intro".to_string(),
            description: "First steps".to_string(),
            entry_ids: vec!["hello".into()],
            estimated_hours: f64::NAN,
        };
        assert!(matches!(
            digest_of(&path),
            Err(CanonicalizationError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn digest_changes_with_content() {
        let a = digest_of(&json!({"title": "Ownership"})).unwrap();
        let b = digest_of(&json!({"title": "Borrowing"})).unwrap();
        assert_ne!(a, b);
    }
}

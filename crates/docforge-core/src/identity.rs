//! # Identifier Newtypes
//!
//! Newtype wrappers for every identifier namespace in a documentation
//! corpus. You cannot pass an `EntryId` where a `CategoryId` is expected,
//! and a learning path cannot be looked up with a language id.
//!
//! All identifiers serialize transparently as plain strings, so the wire
//! format is exactly what content authors write. Each type implements
//! `Borrow<str>`, which lets indexes keyed by an identifier be queried
//! with a bare `&str`.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Access the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True if the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id! {
    /// Identifier of a language documentation set. Unique across a corpus.
    LanguageId
}

string_id! {
    /// Identifier of a documentation category. Unique within its language.
    CategoryId
}

string_id! {
    /// Identifier of a documentation entry. Unique within its language and
    /// referenced by related-entry lists and learning paths.
    EntryId
}

string_id! {
    /// Identifier of an authored learning path. Unique within its language.
    LearningPathId
}

string_id! {
    /// Concept identifier shared by equivalent entries in different
    /// languages. At most one entry per language may declare a given value.
    CrossLanguageId
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn serializes_as_plain_string() {
        let id = EntryId::new("modules-intro");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""modules-intro""#);
        let back: EntryId = serde_json::from_str(r#""modules-intro""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn index_lookup_by_str() {
        let mut index: HashMap<CategoryId, usize> = HashMap::new();
        index.insert(CategoryId::from("basics"), 3);
        assert_eq!(index.get("basics"), Some(&3));
        assert_eq!(index.get("advanced"), None);
    }

    #[test]
    fn blank_detection() {
        assert!(LanguageId::new("").is_blank());
        assert!(LanguageId::new("  \t").is_blank());
        assert!(!LanguageId::new("rust").is_blank());
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(CrossLanguageId::new("closures").to_string(), "closures");
    }
}

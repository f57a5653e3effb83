//! # Error Types
//!
//! Errors raised by the core crate. All use `thiserror` for derived
//! `Display` and `Error` implementations. Content problems are never
//! errors at this layer; they are diagnostics produced by the validator.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// NaN and infinities have no JSON form.
    #[error("non-finite number {0} has no canonical JSON form")]
    NonFiniteNumber(f64),
}

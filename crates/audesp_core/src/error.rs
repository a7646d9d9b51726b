//! Error types for the filing engine.
//!
//! Normalization and validation never fail: malformed input becomes
//! pass-through values or diagnostics. These errors cover the edges that can
//! genuinely fail, such as a broken schema definition or serialization.

use thiserror::Error;

/// Result type for filing operations.
pub type Result<T> = std::result::Result<T, FilingError>;

/// Main error type for filing operations.
#[derive(Error, Debug)]
pub enum FilingError {
    /// The schema itself is malformed
    #[error("Schema definition error: {0}")]
    SchemaDefinition(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

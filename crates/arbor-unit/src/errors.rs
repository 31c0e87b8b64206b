use thiserror::Error;

/// Errors raised by the unit layer.
#[derive(Debug, Error)]
pub enum UnitError {
    /// An identifier failed pattern validation.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A required document field is missing or mistyped.
    #[error("missing or invalid field '{name}'")]
    MissingField {
        /// Name of the missing field.
        name: String,
    },
    /// Document structure was rejected.
    #[error("invalid unit document: {0}")]
    InvalidDocument(String),
    /// A data field name collides with a built-in slot.
    #[error("data field '{name}' collides with a built-in slot name")]
    ReservedField {
        /// The colliding field name.
        name: String,
    },
    /// A data field is not declared by the pool schema.
    #[error("data field '{name}' is not declared by the pool schema")]
    UndeclaredField {
        /// The undeclared field name.
        name: String,
    },
    /// The pool schema failed verification.
    #[error("schema rejected: {detail}")]
    SchemaRejected {
        /// Accumulated verification diagnostics.
        detail: String,
    },
    /// A unit with the same package hash is already pooled.
    #[error("unit {hash} is already pooled")]
    DuplicateUnit {
        /// Hex form of the duplicate hash.
        hash: String,
    },
    /// Hashing-layer failure.
    #[error("hash error: {0}")]
    Hash(#[from] arbor_hash::HashError),
    /// Schema-layer failure.
    #[error("schema error: {0}")]
    Schema(#[from] arbor_schema::SchemaError),
    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Canonical serialization failure.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
}

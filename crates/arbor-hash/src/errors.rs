use thiserror::Error;

/// Structural errors raised by the hashing layer.
///
/// Every variant is a deterministic function of the input; retrying an
/// operation with the same input always fails the same way.
#[derive(Debug, Error)]
pub enum HashError {
    /// Digest text is not 64 lowercase hex characters.
    #[error("digest ('{value}') is not a lowercase hex digest")]
    MalformedDigest {
        /// Offending text.
        value: String,
    },
    /// A value that must be atomic was itself an array or object.
    /// Sub-containers must be modeled as record slots instead.
    #[error("nested container at {context}; model sub-containers as record slots")]
    NestedContainer {
        /// Where the composite value appeared.
        context: String,
    },
    /// A value cannot cross the JSON boundary.
    #[error("{context}: {reason}")]
    InvalidStructure {
        /// Where the value appeared.
        context: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Two record slots share a name.
    #[error("duplicate slot name '{name}'")]
    DuplicateSlot {
        /// The repeated slot name.
        name: String,
    },
    /// A record must have at least one slot to hash.
    #[error("record has no slots to hash")]
    EmptyRecord,
    /// A container slot with no items has no subtree root.
    #[error("slot '{name}' holds an empty container and has no root digest")]
    EmptySlot {
        /// Name of the offending slot.
        name: String,
    },
}

use thiserror::Error;

/// Errors raised by the schema grammar.
///
/// Structural misuse is fatal to the operation that produced it;
/// unknown primitive tokens are never errors and accumulate into the
/// verification verdict instead.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Expression could not be parsed: unbalanced delimiters, an empty
    /// container expression, an unknown wrapper, or trailing input.
    #[error("malformed type expression '{expr}' at position {position}: {reason}")]
    MalformedExpression {
        /// The offending expression.
        expr: String,
        /// Character position where parsing stopped.
        position: usize,
        /// Why parsing stopped.
        reason: String,
    },
    /// Expression nests deeper than the maximum depth bound.
    #[error("type expression '{expr}' nests deeper than {max} levels")]
    DepthExceeded {
        /// The offending expression.
        expr: String,
        /// The depth bound that was exceeded.
        max: usize,
    },
    /// A name failed pattern validation.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A schema document was not an object of string-or-object fields.
    #[error("invalid schema document: {reason}")]
    InvalidDocument {
        /// Why the document was rejected.
        reason: String,
    },
    /// A field's type is a named map container; maps must be modeled
    /// as sub-schemas, not as a container type string.
    #[error("field '{field}' uses a map container type; model maps as sub-schemas")]
    UnsupportedContainer {
        /// Path of the offending field.
        field: String,
    },
    /// A schema reference cycle was detected.
    #[error("cyclic schema reference through '{name}'")]
    CyclicReference {
        /// Name at which the cycle closed.
        name: String,
    },
    /// A schema reference does not resolve in the registry.
    #[error("unknown schema reference '{name}'")]
    UnknownReference {
        /// The unresolved name.
        name: String,
    },
}

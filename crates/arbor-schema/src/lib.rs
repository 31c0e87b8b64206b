//! Schema grammar for nested container type expressions.
//!
//! This crate provides:
//! - A tokenizer/recursive-descent parser for type-expression strings
//!   like `list[dict[string, list[int]]]`
//! - Fixed-point unpacking of expressions into flat primitive tokens
//! - A static base-type vocabulary and accumulating verification
//!   verdicts
//! - Schema objects (field name → type expression or sub-schema) with
//!   registry-resolved `schema:<name>` references and cycle detection
//!
//! Core invariants:
//! - Parsing and verification are pure functions of the input; a
//!   schema never mutates and verifying twice yields the same verdict
//! - Unknown tokens accumulate into the verdict diagnostic instead of
//!   short-circuiting
//! - Recursion is bounded by an explicit maximum nesting depth;
//!   malformed input is rejected, never looped on
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_schema::{unpack_fully, Schema};
//! use serde_json::json;
//!
//! let tokens = unpack_fully("list[dict[string, list[int]]]")?;
//! assert_eq!(tokens, vec!["string", "int"]);
//!
//! let schema = Schema::from_json(&json!({ "name": "string", "age": "int" }))?;
//! assert!(schema.verify()?.is_valid);
//! # Ok::<(), arbor_schema::SchemaError>(())
//! ```
#![deny(missing_docs)]

/// Error types for schema operations.
pub mod errors;
/// Tokenizer and parser for type expressions.
pub mod expr;
/// Schema fields, registries, and verification.
pub mod schema;
/// Base-type vocabulary.
pub mod token;
/// Fixed-point unpacking of type expressions.
pub mod unpack;
/// Verdict accumulation and base-type validation.
pub mod verify;

pub use errors::SchemaError;
pub use expr::{parse_type_expr, ContainerKind, TypeExpr, MAX_TYPE_DEPTH};
pub use schema::{get_key_types, FieldName, FieldType, Schema, SchemaName, SchemaRegistry};
pub use token::{BaseType, BASE_TYPE_ALIASES};
pub use unpack::{unpack, unpack_fully};
pub use verify::{verify_base_types, Verdict};

//! Group-unit assembly and pool bookkeeping for Arbor.
//!
//! This crate provides:
//! - Validated identifier newtypes for owners, nonces, credentials,
//!   and timestamps
//! - `GroupUnit`: the composite record (public owner/creation/data
//!   slots, private nonce/credential slots) content-addressed by its
//!   package hash
//! - Canonical JSON unit documents with the hash embedded under
//!   `"hash"`, and recompute-and-compare document verification
//! - `UnitPool`: schema-gated controller bookkeeping with filtered
//!   selection
//!
//! Core invariants:
//! - Units are immutable, content-derived records; the package hash
//!   covers every slot in both visibility partitions
//! - Verification is deterministic and offline
//! - The pool only admits units whose data fields the schema declares
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_unit::{verify_document, GroupUnit};
//! use serde_json::json;
//!
//! let unit = GroupUnit::from_json(&json!({
//!     "owner": "org:acme",
//!     "created_at": "2024-01-01T00:00:00Z",
//!     "nonce": "deadbeefdeadbeef",
//!     "credential": "cred_tok_1",
//!     "data": { "name": "ada" }
//! }))?;
//!
//! let document = unit.to_document()?;
//! assert!(verify_document(&document)?);
//! # Ok::<(), arbor_unit::UnitError>(())
//! ```
#![deny(missing_docs)]

/// Error types for unit operations.
pub mod errors;
/// Validated identifier newtypes.
pub mod identifiers;
/// Pool bookkeeping and unit filters.
pub mod pool;
/// Group-unit assembly and document verification.
pub mod unit;

pub use errors::UnitError;
pub use identifiers::{Credential, Nonce, OwnerId, Timestamp};
pub use pool::{AndFilter, FieldFilter, OrFilter, OwnerFilter, UnitFilter, UnitPool};
pub use unit::{verify_document, GroupUnit, UnitJson, RESERVED_SLOTS};

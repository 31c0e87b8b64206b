//! Content-addressed hashing primitives for Arbor.
//!
//! This crate provides:
//! - Digest primitives with a canonical lowercase-hex text form
//! - Atomic values and containers with deterministic byte encodings
//! - Binary Merkle trees with leaf-membership and inclusion-proof checks
//! - Layered content hashing for atoms, containers, and records
//!
//! Core invariants:
//! - Hashing is a pure, deterministic function of the input value
//! - Atom digests cover the kind tag, so equal payload bytes under
//!   different kinds never collide
//! - Trees and records are immutable once constructed
//! - An empty tree has no root; it is never the digest of empty input
//!
//! ## Quick Start
//!
//! ```rust
//! use arbor_hash::{container_contains, hash_container, Atom, Container, Shape};
//!
//! let container = Container::new(
//!     Shape::List,
//!     vec![Atom::Str("alpha".to_string()), Atom::Int(7)],
//! )?;
//! let tree = hash_container(&container);
//! assert!(tree.root().is_some());
//! assert!(container_contains(&container, &Atom::Int(7)));
//! # Ok::<(), arbor_hash::HashError>(())
//! ```
#![deny(missing_docs)]

/// Atomic values and kind tags.
pub mod atom;
/// Ordered atom containers with shape tags.
pub mod container;
/// Digest primitives.
pub mod digest;
/// Error types for hashing operations.
pub mod errors;
/// Layered content hashing over atoms, containers, and records.
pub mod hasher;
/// Record slots and visibility partitions.
pub mod record;
/// Binary Merkle tree construction and verification.
pub mod tree;

pub use atom::{Atom, Kind};
pub use container::{Container, Shape};
pub use digest::{Digest, DigestAlg, DIGEST_LEN};
pub use errors::HashError;
pub use hasher::{container_contains, hash_atom, hash_container, hash_record, record_hash};
pub use record::{Record, Slot, SlotValue, Visibility};
pub use tree::{hash_level, MerkleProof, MerkleTree, Side};

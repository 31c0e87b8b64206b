//! Layered content hashing over atoms, containers, and records.
//!
//! Atom digests are domain-separated SHA-256 over the kind tag and the
//! canonical payload bytes; container and record hashes compose atom
//! digests through [`MerkleTree`].

use crate::atom::Atom;
use crate::container::Container;
use crate::digest::Digest;
use crate::errors::HashError;
use crate::record::{Record, Slot, SlotValue, Visibility};
use crate::tree::MerkleTree;

/// Domain separator for atom digests: `b"arbor:atom:v1\0"`.
const ATOM_DOMAIN_SEPARATOR: &[u8] = b"arbor:atom:v1\0";

/// Digest of a single atomic value.
///
/// The digest covers both the kind tag and the canonical payload
/// bytes: `sha256(domain_separator || kind_tag || 0x00 || payload)`.
/// Two calls with the same atom always yield the same digest, and two
/// atoms with identical payload bytes but different kinds never share
/// one.
pub fn hash_atom(atom: &Atom) -> Digest {
    let payload = atom.canonical_bytes();
    let tag = atom.kind().tag().as_bytes();
    let mut input =
        Vec::with_capacity(ATOM_DOMAIN_SEPARATOR.len() + tag.len() + 1 + payload.len());
    input.extend_from_slice(ATOM_DOMAIN_SEPARATOR);
    input.extend_from_slice(tag);
    input.push(0);
    input.extend_from_slice(&payload);
    Digest::of_bytes(&input)
}

/// Merkle tree over a container's item digests, in item order.
///
/// Map containers contribute their flattened key, value, ... sequence.
pub fn hash_container(container: &Container) -> MerkleTree {
    let leaves: Vec<Digest> = container.items().iter().map(hash_atom).collect();
    MerkleTree::from_leaves(leaves)
}

/// True iff the item's digest is among the container's tree leaves.
pub fn container_contains(container: &Container, item: &Atom) -> bool {
    hash_container(container).verify(&hash_atom(item))
}

fn slot_digest(slot: &Slot) -> Result<Digest, HashError> {
    match slot.value() {
        SlotValue::Atom(atom) => Ok(hash_atom(atom)),
        SlotValue::Container(container) => hash_container(container)
            .root()
            .copied()
            .ok_or_else(|| HashError::EmptySlot {
                name: slot.name().to_string(),
            }),
    }
}

fn side_root(record: &Record, visibility: Visibility) -> Result<Option<Digest>, HashError> {
    let mut leaves = Vec::new();
    for slot in record.slots_with(visibility) {
        leaves.push(slot_digest(slot)?);
    }
    if leaves.is_empty() {
        return Ok(None);
    }
    Ok(MerkleTree::from_leaves(leaves).root().copied())
}

/// Packages a record's public and private subtrees into its identity
/// tree.
///
/// Each side's subtree hashes that partition's slot digests in
/// insertion order. The package is a single-leaf tree over the one
/// non-empty side's root, or a 2-leaf tree over
/// `(public_root, private_root)` when both sides are populated. A
/// record with no slots cannot be hashed.
pub fn hash_record(record: &Record) -> Result<MerkleTree, HashError> {
    let public = side_root(record, Visibility::Public)?;
    let private = side_root(record, Visibility::Private)?;
    let leaves = match (public, private) {
        (None, None) => return Err(HashError::EmptyRecord),
        (Some(p), None) => vec![p],
        (None, Some(q)) => vec![q],
        (Some(p), Some(q)) => vec![p, q],
    };
    Ok(MerkleTree::from_leaves(leaves))
}

/// Root of the record's package tree: the record's content-addressed
/// identity.
pub fn record_hash(record: &Record) -> Result<Digest, HashError> {
    hash_record(record)?
        .root()
        .copied()
        .ok_or(HashError::EmptyRecord)
}

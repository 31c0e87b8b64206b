use crate::digest::Digest;

/// Which side of the pair a proof sibling sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Sibling is the left input of the parent hash.
    Left,
    /// Sibling is the right input of the parent hash.
    Right,
}

/// Authenticated inclusion path from a leaf up to the root.
///
/// Produced by [`MerkleTree::prove`]; verifying a proof needs only the
/// root digest and the candidate leaf, not the tree itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof {
    path: Vec<(Digest, Side)>,
}

impl MerkleProof {
    /// Sibling digests from leaf level upward.
    pub fn path(&self) -> &[(Digest, Side)] {
        &self.path
    }

    /// Folds the path from the leaf and compares against the root.
    pub fn verify(&self, root: &Digest, leaf: &Digest) -> bool {
        let mut acc = *leaf;
        for (sibling, side) in &self.path {
            acc = match side {
                Side::Left => Digest::combine(sibling, &acc),
                Side::Right => Digest::combine(&acc, sibling),
            };
        }
        acc == *root
    }
}

/// Binary hash tree over an ordered sequence of leaf digests.
///
/// Level 0 holds the leaves; each subsequent level holds the pairwise
/// hashes of the previous one, with the odd digest out paired with
/// itself. The tree is immutable after construction; re-hashing means
/// building a new tree. Zero leaves yield a rootless tree, never a
/// digest of empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Builds the tree bottom-up from an ordered leaf sequence.
    ///
    /// A non-empty tree always hashes at least one level, so a single
    /// leaf `A` roots at `combine(A, A)` rather than `A` itself.
    pub fn from_leaves(leaves: Vec<Digest>) -> Self {
        if leaves.is_empty() {
            return MerkleTree {
                levels: vec![leaves],
            };
        }
        let mut levels = vec![leaves];
        loop {
            let next = {
                let last = &levels[levels.len() - 1];
                if last.len() == 1 && levels.len() > 1 {
                    break;
                }
                hash_level(last)
            };
            levels.push(next);
        }
        MerkleTree { levels }
    }

    /// Root digest, or `None` for the empty tree.
    pub fn root(&self) -> Option<&Digest> {
        match self.levels.last() {
            Some(level) if self.levels.len() > 1 => level.first(),
            _ => None,
        }
    }

    /// Original leaf sequence.
    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// All levels, leaves first.
    pub fn levels(&self) -> &[Vec<Digest>] {
        &self.levels
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// True when the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Number of levels, leaves included.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Leaf-membership predicate: true iff the candidate digest appears
    /// in the original leaf sequence.
    ///
    /// This checks membership among the leaves, not an authenticated
    /// path against the root; use [`MerkleTree::prove`] and
    /// [`MerkleProof::verify`] for the root-only check.
    pub fn verify(&self, candidate: &Digest) -> bool {
        self.leaves().contains(candidate)
    }

    /// Builds the inclusion proof for the leaf at `index`.
    ///
    /// Returns `None` when the index is out of range.
    pub fn prove(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.len() {
            return None;
        }
        let mut path = Vec::with_capacity(self.levels.len().saturating_sub(1));
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_idx = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            // The odd leaf out is self-paired; its sibling is itself.
            let sibling = if sibling_idx < level.len() {
                level[sibling_idx]
            } else {
                level[idx]
            };
            let side = if idx % 2 == 0 { Side::Right } else { Side::Left };
            path.push((sibling, side));
            idx /= 2;
        }
        Some(MerkleProof { path })
    }
}

/// Pairwise-hashes one level into the next.
///
/// A level of length `n` produces `ceil(n / 2)` parents; the odd
/// digest out is paired with itself, never passed through unhashed.
pub fn hash_level(level: &[Digest]) -> Vec<Digest> {
    let mut next = Vec::with_capacity(level.len().div_ceil(2));
    for pair in level.chunks(2) {
        let parent = match pair {
            [left, right] => Digest::combine(left, right),
            [lone] => Digest::combine(lone, lone),
            _ => continue,
        };
        next.push(parent);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str) -> Digest {
        Digest::of_bytes(tag.as_bytes())
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = MerkleTree::from_leaves(Vec::new());
        assert!(tree.root().is_none());
        assert!(tree.is_empty());
    }

    #[test]
    fn single_leaf_roots_at_its_self_pair() {
        let a = leaf("a");
        let tree = MerkleTree::from_leaves(vec![a]);
        assert_eq!(tree.root(), Some(&Digest::combine(&a, &a)));
    }

    #[test]
    fn odd_leaf_is_self_paired_not_passed_through() {
        let (a, b, c) = (leaf("a"), leaf("b"), leaf("c"));
        let tree = MerkleTree::from_leaves(vec![a, b, c]);
        let level1 = &tree.levels()[1];
        assert_eq!(level1, &vec![Digest::combine(&a, &b), Digest::combine(&c, &c)]);
        assert_eq!(
            tree.root(),
            Some(&Digest::combine(&level1[0], &level1[1]))
        );
    }

    #[test]
    fn level_lengths_halve_rounding_up() {
        let leaves: Vec<Digest> = (0..7).map(|i| leaf(&i.to_string())).collect();
        let tree = MerkleTree::from_leaves(leaves);
        let lengths: Vec<usize> = tree.levels().iter().map(Vec::len).collect();
        assert_eq!(lengths, [7, 4, 2, 1]);
    }

    #[test]
    fn verify_is_exactly_leaf_membership() {
        let leaves = vec![leaf("a"), leaf("b"), leaf("c")];
        let tree = MerkleTree::from_leaves(leaves.clone());
        for l in &leaves {
            assert!(tree.verify(l));
        }
        assert!(!tree.verify(&leaf("d")));
        // Interior nodes are not leaves.
        assert!(!tree.verify(&Digest::combine(&leaves[0], &leaves[1])));
    }

    #[test]
    fn proofs_round_trip_for_every_leaf() {
        let leaves: Vec<Digest> = (0..5).map(|i| leaf(&i.to_string())).collect();
        let tree = MerkleTree::from_leaves(leaves.clone());
        let root = *tree.root().unwrap();
        for (idx, l) in leaves.iter().enumerate() {
            let proof = tree.prove(idx).unwrap();
            assert!(proof.verify(&root, l));
        }
    }

    #[test]
    fn proof_rejects_forged_leaf() {
        let leaves = vec![leaf("a"), leaf("b")];
        let tree = MerkleTree::from_leaves(leaves);
        let root = *tree.root().unwrap();
        let proof = tree.prove(0).unwrap();
        assert!(!proof.verify(&root, &leaf("x")));
    }

    #[test]
    fn prove_rejects_out_of_range_index() {
        let tree = MerkleTree::from_leaves(vec![leaf("a")]);
        assert!(tree.prove(1).is_none());
        assert!(MerkleTree::from_leaves(Vec::new()).prove(0).is_none());
    }

    #[test]
    fn hash_level_is_pure_and_matches_construction() {
        let leaves = vec![leaf("a"), leaf("b"), leaf("c")];
        let tree = MerkleTree::from_leaves(leaves.clone());
        assert_eq!(hash_level(&leaves), tree.levels()[1]);
    }
}

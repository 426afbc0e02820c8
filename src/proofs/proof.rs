//! Existence proof generation and verification
//!
//! An [`AuthenticationPath`] carries one sibling digest per level, ordered
//! from the leaf's immediate sibling up to the child of the root. It does not
//! store left/right flags: both the generator and the verifier derive the
//! placement of every sibling by replaying the bisection of `[0, leaf_count)`
//! towards `leaf_index`.

use crate::core::{error::*, hash::hash_pair, types::Digest};
use crate::proofs::merkle::{midpoint, MerkleNode, MerkleTree};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Current version of the proof interchange format
pub const PROOF_VERSION: &str = "1.0";

/// Position of a sibling relative to the running hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofPosition {
    Left,
    Right,
}

/// Sibling positions for `leaf_index`, ordered from the leaf upward
///
/// Replays the build split rule; fails when the index cannot exist in a tree
/// of `leaf_count` leaves.
pub fn sibling_positions(leaf_index: usize, leaf_count: usize) -> Result<Vec<ProofPosition>> {
    if leaf_count == 0 {
        return Err(HashTreeError::malformed_proof("proof refers to an empty tree"));
    }
    if leaf_index >= leaf_count {
        return Err(HashTreeError::malformed_proof(format!(
            "leaf index {} outside a tree of {} leaves",
            leaf_index, leaf_count
        )));
    }

    let mut positions = Vec::new();
    let (mut l, mut r) = (0, leaf_count - 1);
    while l < r {
        let mid = midpoint(l, r);
        if leaf_index <= mid {
            positions.push(ProofPosition::Right);
            r = mid;
        } else {
            positions.push(ProofPosition::Left);
            l = mid + 1;
        }
    }
    positions.reverse();
    Ok(positions)
}

/// Sibling digests authenticating one leaf against a root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationPath {
    /// Index of the proven leaf
    leaf_index: usize,
    /// Number of leaves in the tree the path was generated from
    leaf_count: usize,
    /// Sibling digests, leaf level first
    siblings: Vec<Digest>,
}

impl AuthenticationPath {
    /// Assemble a path from its parts
    ///
    /// No consistency check happens here; the verifier rejects paths whose
    /// length does not match the shape implied by `leaf_index` and `leaf_count`.
    pub fn new(leaf_index: usize, leaf_count: usize, siblings: Vec<Digest>) -> Self {
        Self {
            leaf_index,
            leaf_count,
            siblings,
        }
    }

    /// Index of the proven leaf
    pub fn leaf_index(&self) -> usize {
        self.leaf_index
    }

    /// Number of leaves in the source tree
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Sibling digests, leaf level first
    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    /// Number of sibling digests
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the path has no siblings (single-leaf tree)
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Recompute the root implied by `leaf` and this path
    pub fn compute_root(&self, leaf: &Digest) -> Result<Digest> {
        let positions = sibling_positions(self.leaf_index, self.leaf_count)?;
        if positions.len() != self.siblings.len() {
            return Err(HashTreeError::malformed_proof(format!(
                "expected {} siblings for leaf {} of {}, got {}",
                positions.len(),
                self.leaf_index,
                self.leaf_count,
                self.siblings.len()
            )));
        }

        let root = self
            .siblings
            .iter()
            .zip(positions)
            .fold(*leaf, |current, (sibling, position)| match position {
                ProofPosition::Right => hash_pair(&current, sibling),
                ProofPosition::Left => hash_pair(sibling, &current),
            });
        Ok(root)
    }

    /// Verify that `leaf` is committed to by `root` through this path
    pub fn verify(&self, root: &Digest, leaf: &Digest) -> Result<bool> {
        verify_existence(root, leaf, self)
    }
}

/// Generate the authentication path for the leaf at `leaf_index`
pub fn prove_existence(tree: &MerkleTree, leaf_index: usize) -> Result<AuthenticationPath> {
    let leaf_count = tree.leaf_count();
    if leaf_index >= leaf_count {
        return Err(HashTreeError::index_out_of_range(leaf_index, leaf_count));
    }

    let mut siblings = Vec::with_capacity(tree.depth());
    let mut current = tree.root_node();
    let (mut l, mut r) = (0, leaf_count - 1);

    while l != r {
        let (left, right) = match current {
            MerkleNode::Internal { left, right, .. } => (*left, *right),
            MerkleNode::Leaf { .. } => {
                return Err(HashTreeError::internal("reached a leaf before the range closed"))
            }
        };
        let (left, right) = match (tree.node(left), tree.node(right)) {
            (Some(left), Some(right)) => (left, right),
            _ => return Err(HashTreeError::internal("dangling child index")),
        };

        let mid = midpoint(l, r);
        if leaf_index <= mid {
            siblings.push(*right.digest());
            current = left;
            r = mid;
        } else {
            siblings.push(*left.digest());
            current = right;
            l = mid + 1;
        }
    }

    // Collected root-down, stored leaf-up
    siblings.reverse();
    debug!(leaf_index, leaf_count, siblings = siblings.len(), "generated existence proof");
    Ok(AuthenticationPath::new(leaf_index, leaf_count, siblings))
}

/// Verify an authentication path against a trusted root
///
/// Returns `Ok(false)` when the recomputed root differs and
/// [`HashTreeError::MalformedProof`] when the path cannot belong to any tree
/// of the recorded shape. No hashing happens for malformed paths.
pub fn verify_existence(root: &Digest, leaf: &Digest, path: &AuthenticationPath) -> Result<bool> {
    let computed = path.compute_root(leaf)?;
    let valid = computed == *root;
    trace!(
        leaf_index = path.leaf_index(),
        valid,
        "verified existence proof"
    );
    Ok(valid)
}

/// Proof generator bound to one tree
#[derive(Debug, Clone, Copy)]
pub struct ProofGenerator<'a> {
    tree: &'a MerkleTree,
}

impl<'a> ProofGenerator<'a> {
    /// Create a new proof generator
    pub fn new(tree: &'a MerkleTree) -> Self {
        Self { tree }
    }

    /// Generate the authentication path for a leaf
    pub fn prove(&self, leaf_index: usize) -> Result<AuthenticationPath> {
        prove_existence(self.tree, leaf_index)
    }

    /// Generate a self-contained existence proof for a leaf
    pub fn prove_bundle(&self, leaf_index: usize) -> Result<ExistenceProof> {
        ExistenceProof::new(self.tree, leaf_index)
    }
}

/// Self-contained existence proof: root, leaf and path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistenceProof {
    /// Version of the proof format
    pub version: String,
    /// Root digest the proof commits to
    pub root: Digest,
    /// Digest of the proven leaf
    pub leaf: Digest,
    /// Authentication path from the leaf to the root
    pub path: AuthenticationPath,
}

impl ExistenceProof {
    /// Create an existence proof for the leaf at `leaf_index`
    pub fn new(tree: &MerkleTree, leaf_index: usize) -> Result<Self> {
        let path = prove_existence(tree, leaf_index)?;
        let leaf = *tree
            .leaf(leaf_index)
            .ok_or_else(|| HashTreeError::index_out_of_range(leaf_index, tree.leaf_count()))?;

        Ok(ExistenceProof {
            version: PROOF_VERSION.to_string(),
            root: tree.root(),
            leaf,
            path,
        })
    }

    /// Verify this proof against its embedded root
    pub fn verify(&self) -> Result<bool> {
        if self.version != PROOF_VERSION {
            return Err(HashTreeError::malformed_proof(format!(
                "unsupported proof version {}",
                self.version
            )));
        }
        verify_existence(&self.root, &self.leaf, &self.path)
    }

    /// Serialize proof to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(HashTreeError::JsonSerialization)
    }

    /// Deserialize proof from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(HashTreeError::JsonSerialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::hash;

    fn abcd_tree() -> (MerkleTree, Vec<Digest>) {
        let leaves: Vec<Digest> = ["a", "b", "c", "d"]
            .iter()
            .map(|m| hash(m.as_bytes()).unwrap())
            .collect();
        (MerkleTree::build(leaves.clone()).unwrap(), leaves)
    }

    #[test]
    fn test_positions_four_leaves() {
        use ProofPosition::*;
        assert_eq!(sibling_positions(0, 4).unwrap(), vec![Right, Right]);
        assert_eq!(sibling_positions(1, 4).unwrap(), vec![Left, Right]);
        assert_eq!(sibling_positions(2, 4).unwrap(), vec![Right, Left]);
        assert_eq!(sibling_positions(3, 4).unwrap(), vec![Left, Left]);
    }

    #[test]
    fn test_positions_odd_tree() {
        use ProofPosition::*;
        // [0,1,2] splits into [0,1] and [2]
        assert_eq!(sibling_positions(2, 3).unwrap(), vec![Left]);
        assert_eq!(sibling_positions(0, 3).unwrap(), vec![Right, Right]);
        assert!(sibling_positions(0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_path_order_is_leaf_first() {
        let (tree, leaves) = abcd_tree();
        let path = prove_existence(&tree, 2).unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path.siblings()[0], leaves[3]);
        assert_eq!(path.siblings()[1], hash_pair(&leaves[0], &leaves[1]));
    }

    #[test]
    fn test_round_trip_every_index() {
        let (tree, leaves) = abcd_tree();
        for (i, leaf) in leaves.iter().enumerate() {
            let path = prove_existence(&tree, i).unwrap();
            assert!(verify_existence(&tree.root(), leaf, &path).unwrap());
        }
    }

    #[test]
    fn test_wrong_leaf_is_false_not_error() {
        let (tree, leaves) = abcd_tree();
        let path = prove_existence(&tree, 2).unwrap();
        assert!(!verify_existence(&tree.root(), &leaves[3], &path).unwrap());
    }

    #[test]
    fn test_index_out_of_range() {
        let (tree, _) = abcd_tree();
        assert!(matches!(
            prove_existence(&tree, 4),
            Err(HashTreeError::IndexOutOfRange {
                index: 4,
                leaf_count: 4
            })
        ));
    }

    #[test]
    fn test_truncated_path_is_malformed() {
        let (tree, leaves) = abcd_tree();
        let path = prove_existence(&tree, 1).unwrap();
        let truncated = AuthenticationPath::new(1, 4, path.siblings()[..1].to_vec());

        assert!(matches!(
            verify_existence(&tree.root(), &leaves[1], &truncated),
            Err(HashTreeError::MalformedProof { .. })
        ));
    }

    #[test]
    fn test_inconsistent_shape_is_malformed() {
        let (tree, leaves) = abcd_tree();
        let path = AuthenticationPath::new(5, 4, vec![leaves[0], leaves[1]]);
        assert!(verify_existence(&tree.root(), &leaves[0], &path).is_err());

        let empty_tree = AuthenticationPath::new(0, 0, vec![]);
        assert!(verify_existence(&tree.root(), &leaves[0], &empty_tree).is_err());
    }

    #[test]
    fn test_single_leaf_proof() {
        let leaf = hash(b"solo").unwrap();
        let tree = MerkleTree::build(vec![leaf]).unwrap();
        let path = prove_existence(&tree, 0).unwrap();

        assert!(path.is_empty());
        assert!(path.verify(&tree.root(), &leaf).unwrap());
    }

    #[test]
    fn test_existence_proof_json() -> Result<()> {
        let (tree, _) = abcd_tree();
        let proof = ProofGenerator::new(&tree).prove_bundle(3)?;

        let json = proof.to_json()?;
        let parsed = ExistenceProof::from_json(&json)?;
        assert_eq!(parsed, proof);
        assert!(parsed.verify()?);
        Ok(())
    }

    #[test]
    fn test_existence_proof_rejects_unknown_version() {
        let (tree, _) = abcd_tree();
        let mut proof = ExistenceProof::new(&tree, 0).unwrap();
        proof.version = "9.9".to_string();
        assert!(proof.verify().is_err());
    }
}

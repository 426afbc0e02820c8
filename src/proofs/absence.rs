//! Absence check over a merkle tree
//!
//! The check walks every leaf of the tree, so it is `O(n)` and only says
//! something about the tree it was run against. It is not a non-membership
//! proof a third party could verify without the leaves; that would need
//! sorted leaves and boundary proofs.

use crate::core::{hash::hash_pair, types::Digest};
use crate::proofs::merkle::{MerkleNode, MerkleTree};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of an absence check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceReport {
    /// Whether the target digest is absent from every leaf
    pub absent: bool,
    /// Index of the first matching leaf when the target is present
    pub leaf_index: Option<usize>,
    /// Digests directly below the root when absent, empty when present
    pub witness: Vec<Digest>,
}

impl AbsenceReport {
    /// Whether the witness hashes to `root`
    ///
    /// Lets a caller tie the report to the root it trusts. A present target
    /// carries no witness and never binds.
    pub fn binds_root(&self, root: &Digest) -> bool {
        match self.witness.as_slice() {
            [single] => single == root,
            [left, right] => hash_pair(left, right) == *root,
            _ => false,
        }
    }
}

/// Exhaustive absence checker bound to one tree
#[derive(Debug, Clone, Copy)]
pub struct NonExistenceChecker<'a> {
    tree: &'a MerkleTree,
}

impl<'a> NonExistenceChecker<'a> {
    /// Create a new checker
    pub fn new(tree: &'a MerkleTree) -> Self {
        Self { tree }
    }

    /// Search every leaf for `target`
    pub fn check(&self, target: &Digest) -> AbsenceReport {
        let tree = self.tree;
        let mut stack = vec![tree.root_node()];
        let mut leaf_index = 0usize;
        let mut visited = 0usize;

        while let Some(node) = stack.pop() {
            visited += 1;
            match node {
                MerkleNode::Leaf { digest } => {
                    if digest == target {
                        debug!(leaf_index, visited, "target digest found in tree");
                        return AbsenceReport {
                            absent: false,
                            leaf_index: Some(leaf_index),
                            witness: Vec::new(),
                        };
                    }
                    leaf_index += 1;
                }
                MerkleNode::Internal { left, right, .. } => {
                    // Right pushed first so leaves are visited in order
                    stack.extend(tree.node(*right));
                    stack.extend(tree.node(*left));
                }
            }
        }

        let witness = match tree.root_node() {
            MerkleNode::Leaf { digest } => vec![*digest],
            MerkleNode::Internal { left, right, .. } => tree
                .node(*left)
                .into_iter()
                .chain(tree.node(*right))
                .map(|node| *node.digest())
                .collect(),
        };

        debug!(visited, "target digest absent from tree");
        AbsenceReport {
            absent: true,
            leaf_index: None,
            witness,
        }
    }
}

/// Check whether `target` is absent from the leaves of `tree`
pub fn check_absence(tree: &MerkleTree, target: &Digest) -> AbsenceReport {
    NonExistenceChecker::new(tree).check(target)
}

//! Merkle tree implementation
//!
//! The tree is built by bisecting the leaf range `[start, end]` at
//! `start + (end - start) / 2`, so an odd range gives its extra leaf to the
//! left subtree. Nodes live in a flat arena and internal nodes refer to their
//! children by index.
//!
//! ```text
//!            root = h(h(ab) || c)
//!           /                    \
//!     h(ab) = h(a || b)           c
//!      /          \
//!     a            b
//! ```

use crate::core::{error::*, hash::hash_pair, types::Digest};
use tracing::debug;

/// Index of a node inside the tree arena
pub type NodeId = usize;

/// A node of the merkle tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleNode {
    /// A leaf holding one of the original digests
    Leaf { digest: Digest },
    /// An internal node; `digest = hash(left.digest || right.digest)`
    Internal {
        digest: Digest,
        left: NodeId,
        right: NodeId,
    },
}

impl MerkleNode {
    /// Digest stored at this node
    pub fn digest(&self) -> &Digest {
        match self {
            MerkleNode::Leaf { digest } | MerkleNode::Internal { digest, .. } => digest,
        }
    }

    /// Child indices of an internal node
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            MerkleNode::Leaf { .. } => None,
            MerkleNode::Internal { left, right, .. } => Some((*left, *right)),
        }
    }

    /// Whether this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, MerkleNode::Leaf { .. })
    }
}

/// Split point of the inclusive leaf range `[start, end]`
#[inline]
pub(crate) fn midpoint(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

/// Pending work while building the tree without recursion
enum Frame {
    /// Build the subtree over `[start, end]`
    Visit { start: usize, end: usize },
    /// Join the two most recently built subtrees
    Join,
}

/// Merkle tree over an ordered sequence of leaf digests
///
/// Immutable after construction. Keeps the original leaves because proof
/// generation replays the split policy by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// Node arena, `2n - 1` entries for `n` leaves
    nodes: Vec<MerkleNode>,
    /// Index of the root node in the arena
    root: NodeId,
    /// Leaf digests in their original order
    leaves: Vec<Digest>,
}

impl MerkleTree {
    /// Build a merkle tree from an ordered list of leaf digests
    pub fn build(leaves: Vec<Digest>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(HashTreeError::EmptyInput);
        }

        let mut nodes: Vec<MerkleNode> = Vec::with_capacity(2 * leaves.len() - 1);
        let mut built: Vec<NodeId> = Vec::new();
        let mut work = vec![Frame::Visit {
            start: 0,
            end: leaves.len() - 1,
        }];

        while let Some(frame) = work.pop() {
            match frame {
                Frame::Visit { start, end } if start == end => {
                    nodes.push(MerkleNode::Leaf {
                        digest: leaves[start],
                    });
                    built.push(nodes.len() - 1);
                }
                Frame::Visit { start, end } => {
                    let mid = midpoint(start, end);
                    // Popped in reverse: left subtree first, then right, then join
                    work.push(Frame::Join);
                    work.push(Frame::Visit {
                        start: mid + 1,
                        end,
                    });
                    work.push(Frame::Visit { start, end: mid });
                }
                Frame::Join => {
                    let (right, left) = match (built.pop(), built.pop()) {
                        (Some(right), Some(left)) => (right, left),
                        _ => return Err(HashTreeError::internal("merkle build stack underflow")),
                    };
                    let digest = hash_pair(nodes[left].digest(), nodes[right].digest());
                    nodes.push(MerkleNode::Internal {
                        digest,
                        left,
                        right,
                    });
                    built.push(nodes.len() - 1);
                }
            }
        }

        let root = match (built.pop(), built.is_empty()) {
            (Some(root), true) => root,
            _ => return Err(HashTreeError::internal("merkle build left dangling subtrees")),
        };

        let tree = Self {
            nodes,
            root,
            leaves,
        };
        debug!(
            leaves = tree.leaf_count(),
            nodes = tree.node_count(),
            depth = tree.depth(),
            root = %tree.root(),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// Hash every message into a leaf and build the tree over them
    pub fn from_messages<M: AsRef<[u8]>>(messages: &[M]) -> Result<Self> {
        let leaves = messages
            .iter()
            .map(|message| crate::core::hash::hash(message.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::build(leaves)
    }

    /// Root digest of the tree
    pub fn root(&self) -> Digest {
        *self.nodes[self.root].digest()
    }

    /// Root node of the tree
    pub fn root_node(&self) -> &MerkleNode {
        &self.nodes[self.root]
    }

    /// Node at the given arena index
    pub fn node(&self, id: NodeId) -> Option<&MerkleNode> {
        self.nodes.get(id)
    }

    /// Leaf digest at the given leaf index
    pub fn leaf(&self, index: usize) -> Option<&Digest> {
        self.leaves.get(index)
    }

    /// Leaf digests in their original order
    pub fn leaves(&self) -> &[Digest] {
        &self.leaves
    }

    /// Number of leaves the tree was built from
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Total number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Length of the longest root-to-leaf path
    ///
    /// Bisection keeps the tree balanced, so this is `ceil(log2(n))`.
    pub fn depth(&self) -> usize {
        let n = self.leaf_count();
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }

    /// Index of the first leaf equal to `digest`
    pub fn position(&self, digest: &Digest) -> Option<usize> {
        self.leaves.iter().position(|leaf| leaf == digest)
    }
}

//! hashtree - Merkle trees and existence proofs over a 256-bit hash
//!
//! hashtree hashes byte messages into 256-bit digests with an SM3-shaped
//! Merkle–Damgård construction, builds a merkle tree over an ordered list of
//! leaf digests by bisecting the index range, and produces authentication
//! paths that a verifier folds back into the root.
//!
//! # Core Features
//!
//! - **Hashing**: 64-byte blocks, 68-word message schedule, 64 rounds
//! - **Merkle Trees**: arena-backed, built without recursion
//! - **Existence Proofs**: leaf-upward sibling paths with JSON interchange
//! - **Absence Checks**: exhaustive search of a tree's leaves
//!
//! # Example Usage
//!
//! ```rust
//! use hashtree::{hash, prove_existence, verify_existence, MerkleTree};
//!
//! let tree = MerkleTree::from_messages(&["a", "b", "c", "d"])?;
//! let path = prove_existence(&tree, 2)?;
//!
//! assert!(verify_existence(&tree.root(), &hash(b"c")?, &path)?);
//! assert!(!verify_existence(&tree.root(), &hash(b"d")?, &path)?);
//! # Ok::<(), hashtree::HashTreeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;

// Re-export commonly used types
pub use self::core::{
    error::{HashTreeError, Result},
    hash::{hash, hash_file, hash_pair, hash_string},
    types::{Digest, DIGEST_SIZE},
};

pub use proofs::{
    check_absence, prove_existence, verify_existence, AbsenceReport, AuthenticationPath,
    ExistenceProof, MerkleTree, NonExistenceChecker, ProofGenerator,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Merkle tree and proof system for hashtree
//!
//! This module builds merkle trees over leaf digests, generates and verifies
//! existence proofs, and runs exhaustive absence checks.

pub mod absence;
pub mod merkle;
pub mod proof;

// Re-export commonly used items
pub use absence::{check_absence, AbsenceReport, NonExistenceChecker};
pub use merkle::{MerkleNode, MerkleTree, NodeId};
pub use proof::{
    prove_existence, sibling_positions, verify_existence, AuthenticationPath, ExistenceProof,
    ProofGenerator, ProofPosition, PROOF_VERSION,
};

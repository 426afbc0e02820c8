//! Core types and utilities for hashtree
//!
//! This module contains the digest type, the compression hash and the
//! error taxonomy shared by the tree and proof modules.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{HashTreeError, Result};
pub use hash::{hash, hash_file, hash_pair, hash_string};
pub use types::{Digest, DIGEST_SIZE};

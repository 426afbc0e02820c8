//! Error types for hashtree

use thiserror::Error;

/// Main error type for hashtree operations
///
/// A verification mismatch is not an error: verifiers return `Ok(false)`.
/// Every variant here describes input that could not be processed at all.
#[derive(Error, Debug)]
pub enum HashTreeError {
    /// Hashing errors
    #[error("Invalid input: message of {length} bytes overflows the 64-bit length field")]
    InvalidInput { length: usize },

    /// Merkle tree errors
    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyInput,

    #[error("Leaf index {index} out of range for a tree of {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    /// Proof-related errors
    #[error("Malformed proof: {reason}")]
    MalformedProof { reason: String },

    /// Digest parsing errors
    #[error("Invalid digest: {reason}")]
    InvalidDigest { reason: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Hex encoding/decoding errors
    #[error("Hex encoding error: {0}")]
    HexError(#[from] hex::FromHexError),

    /// Generic error for unexpected conditions
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HashTreeError {
    /// Create a new invalid input error for a message of `length` bytes
    pub fn invalid_input(length: usize) -> Self {
        Self::InvalidInput { length }
    }

    /// Create a new index out of range error
    pub fn index_out_of_range(index: usize, leaf_count: usize) -> Self {
        Self::IndexOutOfRange { index, leaf_count }
    }

    /// Create a new malformed proof error
    pub fn malformed_proof(reason: impl Into<String>) -> Self {
        Self::MalformedProof {
            reason: reason.into(),
        }
    }

    /// Create a new invalid digest error
    pub fn invalid_digest(reason: impl Into<String>) -> Self {
        Self::InvalidDigest {
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type alias for hashtree operations
pub type Result<T> = std::result::Result<T, HashTreeError>;

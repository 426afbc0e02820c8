//! CLI command implementations

pub mod absent;
pub mod config;
pub mod demo;
pub mod hash;
pub mod prove;
pub mod root;
pub mod verify;

// Common utilities for commands
use crate::cli::context::CliContext;
use crate::core::{error::HashTreeError, hash::hash, types::Digest};
use crate::proofs::MerkleTree;
use anyhow::Result;
use std::path::Path;

/// Split raw file content into lines without requiring UTF-8
///
/// Behaves like `str::lines`: `\n` separates lines, one trailing `\r` is
/// dropped per line and a final newline does not start an empty line.
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    if content.is_empty() {
        return Vec::new();
    }
    let content = content.strip_suffix(b"\n").unwrap_or(content);
    content
        .split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

/// Read the leaves of a tree from a file
///
/// Every line is one message of arbitrary bytes, hashed into a leaf; a
/// trailing newline does not add an empty message. With `digests`, every
/// non-blank line is parsed as a hex leaf digest instead.
pub fn load_leaves(path: &Path, digests: bool) -> Result<Vec<Digest>> {
    let content = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read leaf file {}: {}", path.display(), e))?;

    let lines = split_lines(&content);

    let leaves = if digests {
        lines
            .into_iter()
            .enumerate()
            .filter(|(_, line)| !line.iter().all(u8::is_ascii_whitespace))
            .map(|(number, line)| {
                std::str::from_utf8(line)
                    .map_err(|e| anyhow::anyhow!("{}:{}: {}", path.display(), number + 1, e))
                    .and_then(|text| {
                        Digest::from_hex(text).map_err(|e| {
                            anyhow::anyhow!("{}:{}: {}", path.display(), number + 1, e)
                        })
                    })
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        lines
            .into_iter()
            .map(hash)
            .collect::<std::result::Result<Vec<_>, HashTreeError>>()?
    };

    if leaves.is_empty() {
        return Err(anyhow::anyhow!(
            "Leaf file {} contains no leaves",
            path.display()
        ));
    }

    Ok(leaves)
}

/// Load a leaf file and build the merkle tree over it
pub fn load_tree(path: &Path, digests: bool) -> Result<MerkleTree> {
    let leaves = load_leaves(path, digests)?;
    Ok(MerkleTree::build(leaves)?)
}

/// Parse a digest given on the command line
pub fn parse_digest(value: &str, what: &str) -> Result<Digest> {
    Digest::from_hex(value).map_err(|e| anyhow::anyhow!("Invalid {} digest: {}", what, e))
}

/// Render a digest in the case selected for this run
pub fn format_digest(digest: &Digest) -> String {
    digest.to_hex_case(CliContext::is_uppercase())
}

//! Hash command implementation

use crate::cli::commands::format_digest;
use crate::core::hash::{hash, hash_file};
use anyhow::Result;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Execute the hash command
pub fn execute(text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let digest = match (text, file) {
        (Some(text), _) => hash(text.as_bytes())?,
        (None, Some(path)) => hash_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to hash {}: {}", path.display(), e))?,
        (None, None) => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            debug!(bytes = buffer.len(), "hashing stdin");
            hash(&buffer)?
        }
    };

    println!("{}", format_digest(&digest));
    Ok(())
}

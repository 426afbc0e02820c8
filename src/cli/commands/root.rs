//! Root command implementation

use crate::cli::commands::{format_digest, load_tree};
use crate::cli::context::CliContext;
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the root command
pub fn execute(leaves: PathBuf, digests: bool, hash_only: bool, json: bool) -> Result<()> {
    let tree = load_tree(&leaves, digests)?;
    let root = format_digest(&tree.root());

    if hash_only || (CliContext::is_quiet() && !json) {
        println!("{}", root);
        return Ok(());
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "root": root,
                "leaf_count": tree.leaf_count(),
                "node_count": tree.node_count(),
                "depth": tree.depth(),
            }))?
        );
        return Ok(());
    }

    println!("{}", "Merkle Root".green().bold());
    println!("{}", "═".repeat(50).green());
    println!("{}: {}", "Root Hash".bold(), root.cyan());
    println!("{}: {}", "Leaves".bold(), tree.leaf_count());
    println!("{}: {}", "Depth".bold(), tree.depth());
    if CliContext::is_verbose() {
        println!("{}: {}", "Nodes".bold(), tree.node_count());
        println!("{}: {}", "Source".bold(), leaves.display().to_string().dimmed());
    }

    Ok(())
}

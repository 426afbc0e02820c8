//! Verify command implementation

use crate::cli::commands::{format_digest, parse_digest};
use crate::cli::context::CliContext;
use crate::proofs::ExistenceProof;
use anyhow::Result;
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;

/// Execute the verify command
///
/// Fails when the proof does not fold to its root, or when the root or leaf
/// it carries differ from the ones pinned on the command line.
pub fn execute(
    proof: Option<PathBuf>,
    root: Option<String>,
    leaf: Option<String>,
    from_stdin: bool,
) -> Result<()> {
    let content = match proof {
        Some(path) if !from_stdin => std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read proof {}: {}", path.display(), e))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let proof = ExistenceProof::from_json(&content)?;
    let root_pinned = root.is_some();

    if let Some(expected) = root {
        let expected = parse_digest(&expected, "root")?;
        if expected != proof.root {
            return Err(anyhow::anyhow!(
                "Proof root {} does not match expected root {}",
                format_digest(&proof.root),
                format_digest(&expected)
            ));
        }
    }

    if let Some(expected) = leaf {
        let expected = parse_digest(&expected, "leaf")?;
        if expected != proof.leaf {
            return Err(anyhow::anyhow!(
                "Proof leaf {} does not match expected leaf {}",
                format_digest(&proof.leaf),
                format_digest(&expected)
            ));
        }
    }

    if CliContext::is_verbose() {
        println!("{}: {}", "Root".bold(), format_digest(&proof.root));
        println!("{}: {}", "Leaf".bold(), format_digest(&proof.leaf));
        println!(
            "{}: {} of {}",
            "Leaf index".bold(),
            proof.path.leaf_index(),
            proof.path.leaf_count()
        );
        for (level, sibling) in proof.path.siblings().iter().enumerate() {
            println!("  {} {}", format!("[{}]", level).dimmed(), format_digest(sibling));
        }
    }

    if !proof.verify()? {
        return Err(anyhow::anyhow!("Proof verification failed"));
    }

    if !CliContext::is_quiet() {
        println!("{} Proof verified successfully!", "✓".green());
        if !root_pinned {
            println!(
                "  {}",
                "Root not pinned: checked only against the root stored in the proof (use --root)"
                    .dimmed()
            );
        }
    }
    Ok(())
}

//! Prove command implementation

use crate::cli::commands::{format_digest, load_tree};
use crate::cli::context::CliContext;
use crate::proofs::ProofGenerator;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the prove command
pub fn execute(
    leaves: PathBuf,
    digests: bool,
    index: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let tree = load_tree(&leaves, digests)?;
    let proof = ProofGenerator::new(&tree).prove_bundle(index)?;
    let json = proof.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))?;
            if !CliContext::is_quiet() {
                eprintln!(
                    "{} Proof for leaf {} written to {}",
                    "✓".green(),
                    index.to_string().bold(),
                    path.display().to_string().cyan()
                );
                if CliContext::is_verbose() {
                    eprintln!("  {}: {}", "Root".bold(), format_digest(&proof.root));
                    eprintln!("  {}: {}", "Leaf".bold(), format_digest(&proof.leaf));
                    eprintln!("  {}: {}", "Path length".bold(), proof.path.len());
                }
            }
        }
        None => println!("{}", json),
    }

    Ok(())
}

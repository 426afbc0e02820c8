//! Absent command implementation

use crate::cli::commands::{format_digest, load_tree, parse_digest};
use crate::cli::context::CliContext;
use crate::proofs::NonExistenceChecker;
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Execute the absent command
///
/// Prints the outcome either way; a present target is not an error.
pub fn execute(leaves: PathBuf, digests: bool, target: String, json: bool) -> Result<()> {
    let tree = load_tree(&leaves, digests)?;
    let target = parse_digest(&target, "target")?;
    let report = NonExistenceChecker::new(&tree).check(&target);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "target": format_digest(&target),
                "root": format_digest(&tree.root()),
                "absent": report.absent,
                "leaf_index": report.leaf_index,
                "witness": report.witness.iter().map(format_digest).collect::<Vec<_>>(),
            }))?
        );
        return Ok(());
    }

    if CliContext::is_quiet() {
        println!("{}", if report.absent { "absent" } else { "present" });
        return Ok(());
    }

    match report.leaf_index {
        Some(index) => println!(
            "{} {} is present at leaf {}",
            "•".yellow(),
            format_digest(&target).cyan(),
            index.to_string().bold()
        ),
        None => {
            println!(
                "{} {} is absent from {} leaves",
                "✓".green(),
                format_digest(&target).cyan(),
                tree.leaf_count()
            );
            if CliContext::is_verbose() {
                println!("{}: {}", "Root".bold(), format_digest(&tree.root()));
                for digest in &report.witness {
                    println!("  {} {}", "witness".dimmed(), format_digest(digest));
                }
            }
        }
    }

    Ok(())
}

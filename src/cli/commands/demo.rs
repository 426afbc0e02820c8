//! Demo command implementation
//!
//! End-to-end run over random data: hash the leaves, build the tree, prove
//! and verify the first and last leaf, then check a random digest for absence.

use crate::cli::commands::format_digest;
use crate::cli::context::CliContext;
use crate::config::GlobalConfig;
use crate::core::{hash::hash, types::Digest};
use crate::proofs::{check_absence, prove_existence, verify_existence, MerkleTree};
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::info;

/// Execute the demo command
pub fn execute(
    leaves: Option<usize>,
    message_length: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let config = GlobalConfig::load()?;
    let leaf_count = leaves.unwrap_or(config.demo.leaf_count);
    let message_length = message_length.unwrap_or(config.demo.message_length);

    if leaf_count == 0 {
        return Err(anyhow::anyhow!("The demo needs at least one leaf"));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let quiet = CliContext::is_quiet();

    info!(leaf_count, message_length, ?seed, "starting demo run");

    let messages: Vec<Vec<u8>> = (0..leaf_count)
        .map(|_| {
            let mut message = vec![0u8; message_length];
            rng.fill(&mut message[..]);
            message
        })
        .collect();

    // Phase 1: leaf hashing
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(leaf_count as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:50.cyan/blue} {pos:>7}/{len:7} leaves ({percent:>3}%) | {per_sec:>8} | ETA: {eta:>5}")?,
    );

    let started = Instant::now();
    let mut leaf_digests = Vec::with_capacity(leaf_count);
    for message in &messages {
        leaf_digests.push(hash(message)?);
        progress.inc(1);
    }
    progress.finish_and_clear();
    let hashing_time = started.elapsed();

    // Phase 2: tree construction
    let started = Instant::now();
    let tree = MerkleTree::build(leaf_digests)?;
    let build_time = started.elapsed();

    // Phase 3: proofs for the first and last leaf
    let started = Instant::now();
    let mut proofs = Vec::new();
    for index in [0, leaf_count - 1] {
        let path = prove_existence(&tree, index)?;
        let leaf = *tree
            .leaf(index)
            .ok_or_else(|| anyhow::anyhow!("Leaf {} missing from tree", index))?;
        let verified = verify_existence(&tree.root(), &leaf, &path)?;
        proofs.push((index, path.len(), verified));
    }
    let proof_time = started.elapsed();

    // Phase 4: absence check of a random digest
    let target = Digest::from_bytes(rng.gen());
    let started = Instant::now();
    let report = check_absence(&tree, &target);
    let absence_time = started.elapsed();

    if proofs.iter().any(|(_, _, verified)| !verified) {
        return Err(anyhow::anyhow!("Demo proof failed to verify"));
    }

    if quiet {
        println!("{}", format_digest(&tree.root()));
        return Ok(());
    }

    println!("{}", "Merkle Tree Demo".green().bold());
    println!("{}", "═".repeat(50).green());
    println!("{}: {}", "Leaves".bold(), leaf_count);
    println!("{}: {} bytes", "Message length".bold(), message_length);
    if let Some(seed) = seed {
        println!("{}: {}", "Seed".bold(), seed);
    }
    println!("{}: {}", "Root Hash".bold(), format_digest(&tree.root()).cyan());
    println!("{}: {}", "Depth".bold(), tree.depth());
    println!();

    println!("{}", "Proofs:".bold());
    for (index, length, _) in &proofs {
        println!("  • leaf {} (path length {}): {}", index, length, "verified".green());
    }
    println!(
        "  • random digest {}: {}",
        format_digest(&target).dimmed(),
        if report.absent { "absent".green() } else { "present".yellow() }
    );
    println!();

    println!("{}", "Timings:".bold());
    println!("  • Leaf hashing: {}", format_elapsed(hashing_time));
    println!("  • Tree build: {}", format_elapsed(build_time));
    println!("  • Proofs: {}", format_elapsed(proof_time));
    println!("  • Absence check: {}", format_elapsed(absence_time));

    Ok(())
}

/// Human-readable duration rounded to microseconds
fn format_elapsed(elapsed: Duration) -> String {
    let micros = Duration::from_micros(elapsed.as_micros() as u64);
    humantime::format_duration(micros).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_drops_nanoseconds() {
        assert_eq!(format_elapsed(Duration::from_nanos(1_500_999)), "1ms 500us");
        assert_eq!(format_elapsed(Duration::from_secs(2)), "2s");
    }
}

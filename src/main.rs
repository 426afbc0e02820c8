//! hashtree CLI
//!
//! Command-line interface for building merkle trees and checking proofs.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use hashtree::cli::{self, context::CliContext, Cli, ColorChoice, Commands};
use hashtree::config::GlobalConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }

    // Fall back to defaults when the config file cannot be read
    let config = GlobalConfig::load().unwrap_or_else(|e| {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
        GlobalConfig::default()
    });

    // Initialize logging: RUST_LOG, then --verbose, then log.level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if cli.verbose { "debug" } else { config.log.level.as_str() };
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
        uppercase: cli.upper || config.output.uppercase,
    });

    // Execute the command
    match cli.command {
        Commands::Hash { text, file } => cli::commands::hash::execute(text, file),
        Commands::Root {
            leaves,
            digests,
            hash_only,
            json,
        } => cli::commands::root::execute(leaves, digests, hash_only, json),
        Commands::Prove {
            leaves,
            digests,
            index,
            output,
        } => cli::commands::prove::execute(leaves, digests, index, output),
        Commands::Verify {
            proof,
            root,
            leaf,
            from_stdin,
        } => cli::commands::verify::execute(proof, root, leaf, from_stdin),
        Commands::Absent {
            leaves,
            digests,
            target,
            json,
        } => cli::commands::absent::execute(leaves, digests, target, json),
        Commands::Demo {
            leaves,
            message_length,
            seed,
        } => cli::commands::demo::execute(leaves, message_length, seed),
        Commands::Config {
            key,
            value,
            list,
            unset,
            show_origin,
            json,
        } => cli::commands::config::execute(key, value, list, unset, show_origin, json),
    }
}

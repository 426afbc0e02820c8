//! Command-line interface for hashtree

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// hashtree - Merkle tree construction and proofs over a 256-bit hash
#[derive(Parser)]
#[command(
    name = "hashtree",
    version,
    about = "Build merkle trees, generate existence proofs and verify them",
    long_about = "hashtree hashes messages into 256-bit digests, builds bisection merkle trees over them, produces authentication paths for any leaf and checks digests for absence."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,

    /// Print digests in uppercase hex
    #[arg(long, global = true)]
    pub upper: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to colorize output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash text, a file, or stdin
    Hash {
        /// Text to hash (reads stdin when neither TEXT nor --file is given)
        #[arg(conflicts_with = "file")]
        text: Option<String>,

        /// File to hash
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Build a merkle tree from a leaf file and show its root
    Root {
        /// Leaf file, one message per line
        #[arg(short, long)]
        leaves: PathBuf,

        /// Treat every line as a hex digest instead of a message
        #[arg(long)]
        digests: bool,

        /// Show only the root hash
        #[arg(long)]
        hash_only: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an existence proof for one leaf
    Prove {
        /// Leaf file, one message per line
        #[arg(short, long)]
        leaves: PathBuf,

        /// Treat every line as a hex digest instead of a message
        #[arg(long)]
        digests: bool,

        /// Zero-based index of the leaf to prove
        #[arg(short, long)]
        index: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify an existence proof
    Verify {
        /// Proof file to verify
        #[arg(required_unless_present = "from_stdin")]
        proof: Option<PathBuf>,

        /// Expected root hash
        #[arg(long)]
        root: Option<String>,

        /// Expected leaf hash
        #[arg(long)]
        leaf: Option<String>,

        /// Read proof from stdin
        #[arg(long, conflicts_with = "proof")]
        from_stdin: bool,
    },

    /// Check whether a digest is absent from a tree
    Absent {
        /// Leaf file, one message per line
        #[arg(short, long)]
        leaves: PathBuf,

        /// Treat every line as a hex digest instead of a message
        #[arg(long)]
        digests: bool,

        /// Digest to look for
        #[arg(short, long)]
        target: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hash random messages, build a tree, prove and check absence
    Demo {
        /// Number of random leaves (default: demo.leaf_count)
        #[arg(long)]
        leaves: Option<usize>,

        /// Length of each random message in bytes (default: demo.message_length)
        #[arg(long)]
        message_length: Option<usize>,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Manage global configuration
    Config {
        /// Configuration key to get/set
        key: Option<String>,
        /// Configuration value to set
        value: Option<String>,
        /// List all configuration values
        #[arg(short, long)]
        list: bool,
        /// Unset a configuration value
        #[arg(long)]
        unset: bool,
        /// Show global configuration file location
        #[arg(long)]
        show_origin: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

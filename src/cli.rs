use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::Threshold;
use crate::erasure::CodecKind;
use crate::field::PrimeField;

/// Validates that threshold is at least 2
/// A threshold of 1 defeats the purpose of Shamir Secret Sharing
/// (any single share would be able to recover the entire secret)
fn validate_threshold(s: &str) -> Result<Threshold, String> {
    let value: u16 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    Threshold::new(value).map_err(|e| e.to_string())
}

/// Validates that the modulus is a prime large enough to share over
fn validate_modulus(s: &str) -> Result<PrimeField, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    PrimeField::new(value).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "sharevault")]
#[command(about = "Split secrets into verifiable shares and erasure-code ledger payloads")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a secret read from stdin into armored shares
    Split {
        /// Number of shares to create
        #[arg(short, long)]
        shares: u16,

        /// Threshold: minimum number of shares needed to reconstruct (must be >= 2)
        #[arg(short, long, value_parser = validate_threshold)]
        threshold: Threshold,

        /// Prime modulus of the sharing field (defaults to 2^61 - 1)
        #[arg(long, value_parser = validate_modulus)]
        modulus: Option<PrimeField>,
    },
    /// Combine armored shares to reconstruct the secret
    Combine {
        /// Published commitments, comma separated, in share index order
        #[arg(long, value_delimiter = ',')]
        commitments: Option<Vec<String>>,
    },
    /// Erasure-code a payload into symbols
    Encode {
        /// Number of symbols needed to recover the payload
        #[arg(short = 'k', long = "data-symbols")]
        data_symbols: u16,

        /// Total number of symbols to produce (at most 256)
        #[arg(short = 'n', long = "total-symbols")]
        total_symbols: u16,

        /// Erasure code to use
        #[arg(long, value_enum, default_value_t = CodecKind::Lagrange)]
        codec: CodecKind,

        /// Payload file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Recover a payload from an encode document
    Decode {
        /// Encode document (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

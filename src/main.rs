use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

use sharevault::cli::{Cli, Commands};
use sharevault::commands::{EncodeOutput, combine_shares, decode_payload, encode_payload, split_secret};
use sharevault::domain::{CodingConfig, ShareCount, SharingConfig};

/// Logs go to stderr so stdout carries only command output
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read a secret securely from stdin (hidden input when TTY available)
fn read_secret() -> Result<Zeroizing<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter secret (decimal or 0x-prefixed hex):");
        rpassword::read_password()
            .map(Zeroizing::new)
            .context("Failed to read secret from stdin")
    } else {
        // Non-interactive mode (piped input) - read directly from stdin
        let mut secret = Zeroizing::new(String::new());
        io::stdin()
            .lock()
            .read_line(&mut secret)
            .context("Failed to read secret from stdin")?;
        Ok(Zeroizing::new(secret.trim().to_string()))
    }
}

/// Read shares securely from stdin (hidden input when TTY available)
/// User should input shares one per line, followed by an empty line to finish
fn read_shares() -> Result<Vec<String>> {
    let mut shares = Vec::new();

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter armored shares (one per line, empty line to finish):");

        loop {
            let share = Zeroizing::new(
                rpassword::read_password().context("Failed to read share from stdin")?,
            );
            if share.trim().is_empty() {
                break;
            }
            shares.push(share.trim().to_string());
        }
    } else {
        for line in io::stdin().lock().lines() {
            let line = Zeroizing::new(line.context("Failed to read line from stdin")?);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            shares.push(trimmed.to_string());
        }
    }

    if shares.is_empty() {
        anyhow::bail!("No shares provided");
    }

    Ok(shares)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data).context("Failed to write stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Split {
            shares,
            threshold,
            modulus,
        } => {
            let share_count = ShareCount::new(shares)?;
            let config = SharingConfig::new(modulus.unwrap_or_default(), threshold, share_count)?;

            let secret = read_secret()?;
            print_json(&split_secret(&secret, &config)?)?;
        }
        Commands::Combine { commitments } => {
            let shares = read_shares()?;
            let secret = combine_shares(&shares, commitments.as_deref())?;
            println!("{}", secret.expose());
        }
        Commands::Encode {
            data_symbols,
            total_symbols,
            codec,
            input,
        } => {
            let config = CodingConfig::new(data_symbols, total_symbols)?;
            let data = read_input(input.as_deref())?;
            print_json(&encode_payload(&data, &config, codec)?)?;
        }
        Commands::Decode { input, output } => {
            let raw = read_input(input.as_deref())?;
            let document: EncodeOutput =
                serde_json::from_slice(&raw).context("Failed to parse encode document")?;
            let data = decode_payload(&document)?;
            write_output(output.as_deref(), &data)?;
        }
    }

    Ok(())
}

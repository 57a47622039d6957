use anyhow::{Context, Result, anyhow, bail};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::armor;
use crate::commitment::CommitmentSet;
use crate::domain::{CodingConfig, SharingConfig};
use crate::erasure::{CodecKind, Symbol};
use crate::recovery;
use crate::shamir;
use crate::share::{Secret, Share};
use crate::wire;

/// One armored share with its published commitment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    pub index: u16,
    pub mnemonic: String,
    pub commitment: String,
}

/// Document printed by `split`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutput {
    pub modulus: u64,
    pub threshold: u16,
    pub share_count: u16,
    pub shares: Vec<SplitShare>,
}

impl SplitOutput {
    /// Commitments in share index order
    #[must_use]
    pub fn commitments(&self) -> Vec<String> {
        self.shares.iter().map(|s| s.commitment.clone()).collect()
    }
}

/// One symbol in wire encoding, hex rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSymbol {
    pub position: u16,
    pub data: String,
}

/// Document printed by `encode` and read back by `decode`
///
/// Symbols may be deleted from the document before decoding; any
/// `data_symbols` of them are enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOutput {
    pub codec: CodecKind,
    pub data_symbols: u16,
    pub total_symbols: u16,
    pub original_len: usize,
    pub symbols: Vec<EncodedSymbol>,
    #[serde(default)]
    pub commitments: Vec<String>,
}

/// Parse a secret given in decimal or `0x`-prefixed hex
///
/// # Errors
/// Returns an error if the input is empty or not a valid `u64`
pub fn parse_secret(input: &str) -> Result<Secret> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("No secret provided");
    }

    let value = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    }
    .map_err(|_| anyhow!("Secret must be a decimal or 0x-prefixed hex integer"))?;

    Ok(Secret::new(value))
}

/// Split a secret into armored shares with published commitments
///
/// # Errors
/// Returns an error if the secret cannot be parsed or does not fit the field
pub fn split_secret(secret_str: &str, config: &SharingConfig) -> Result<SplitOutput> {
    let secret = parse_secret(secret_str)?;

    let distribution = recovery::distribute_secret(config, &secret, &mut OsRng)
        .context("Failed to split secret")?;

    let shares = distribution
        .shares
        .iter()
        .zip(distribution.commitments.iter())
        .map(|(share, commitment)| {
            let mnemonic = armor::armor_share(config, share)
                .with_context(|| format!("Failed to armor share #{}", *share.index()))?;
            Ok(SplitShare {
                index: *share.index(),
                mnemonic: mnemonic.to_string(),
                commitment: commitment.to_hex(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        threshold = *config.threshold(),
        shares = shares.len(),
        "split secret"
    );

    Ok(SplitOutput {
        modulus: config.field().modulus(),
        threshold: *config.threshold(),
        share_count: *config.share_count(),
        shares,
    })
}

/// Combine armored shares to reconstruct the secret
///
/// Sharing parameters come from the shares themselves and must agree. With
/// `commitments`, shares are checked against them first and failures are
/// excluded; without, the shares are reconstructed as presented.
///
/// # Errors
/// Returns an error if a share cannot be parsed, the shares disagree on their
/// parameters, or reconstruction fails
pub fn combine_shares(share_strings: &[String], commitments: Option<&[String]>) -> Result<Secret> {
    if share_strings.is_empty() {
        bail!("No shares provided");
    }

    let mut parsed_shares: Vec<Share> = Vec::with_capacity(share_strings.len());
    let mut config_from_shares: Option<SharingConfig> = None;

    for (idx, share_str) in share_strings.iter().enumerate() {
        let (config, share) = armor::parse_share(share_str)
            .with_context(|| format!("Failed to parse share #{}", idx + 1))?;

        match config_from_shares {
            None => config_from_shares = Some(config),
            Some(expected) if expected != config => {
                bail!(
                    "Share #{} has inconsistent parameters: expected t={} n={} p={}, got t={} n={} p={}",
                    idx + 1,
                    *expected.threshold(),
                    *expected.share_count(),
                    expected.field().modulus(),
                    *config.threshold(),
                    *config.share_count(),
                    config.field().modulus()
                );
            }
            Some(_) => {}
        }

        parsed_shares.push(share);
    }

    let config = config_from_shares.ok_or_else(|| anyhow!("No valid shares found"))?;

    let secret = match commitments {
        Some(entries) => {
            let published =
                CommitmentSet::from_hex(entries).context("Failed to parse commitments")?;
            recovery::recover_secret(&config, &published, &parsed_shares)
        }
        None => {
            warn!("no commitments given; shares are not verified");
            shamir::reconstruct(&config, &parsed_shares)
        }
    }
    .context("Failed to recover secret")?;

    Ok(secret)
}

/// Erasure-code a payload into a self-describing document
///
/// # Errors
/// Returns an error if encoding fails
pub fn encode_payload(data: &[u8], config: &CodingConfig, codec: CodecKind) -> Result<EncodeOutput> {
    let coder = codec.codec();
    let distribution = recovery::distribute_payload(coder.as_ref(), config, data)
        .context("Failed to encode payload")?;

    let symbols = distribution
        .block
        .symbols()
        .iter()
        .map(|symbol| {
            Ok(EncodedSymbol {
                position: symbol.position,
                data: hex::encode(wire::encode_symbol(config, symbol)?),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        codec = coder.name(),
        k = config.data_symbols(),
        n = config.total_symbols(),
        width = distribution.block.symbol_width(),
        "encoded payload"
    );

    Ok(EncodeOutput {
        codec,
        data_symbols: config.data_symbols(),
        total_symbols: config.total_symbols(),
        original_len: data.len(),
        symbols,
        commitments: distribution.commitments.to_hex(),
    })
}

/// Recover a payload from a (possibly partial) encode document
///
/// # Errors
/// Returns an error if a symbol is malformed or belongs to another block,
/// or if decoding fails
pub fn decode_payload(document: &EncodeOutput) -> Result<Vec<u8>> {
    let config = CodingConfig::new(document.data_symbols, document.total_symbols)
        .context("Invalid coding parameters in document")?;

    let mut symbols: Vec<Symbol> = Vec::with_capacity(document.symbols.len());
    for entry in &document.symbols {
        let bytes = hex::decode(&entry.data)
            .with_context(|| format!("Symbol {} is not valid hex", entry.position))?;
        let (symbol_config, symbol) = wire::decode_symbol(&bytes)
            .with_context(|| format!("Failed to decode symbol {}", entry.position))?;

        if symbol_config != config {
            bail!(
                "Symbol {} belongs to a k={} n={} block, expected k={} n={}",
                entry.position,
                symbol_config.data_symbols(),
                symbol_config.total_symbols(),
                config.data_symbols(),
                config.total_symbols()
            );
        }
        if symbol.position != entry.position {
            bail!(
                "Symbol listed at position {} encodes position {}",
                entry.position,
                symbol.position
            );
        }
        symbols.push(symbol);
    }

    let published = if document.commitments.is_empty() {
        warn!("no commitments in document; symbols are not verified");
        None
    } else {
        Some(CommitmentSet::from_hex(&document.commitments).context("Failed to parse commitments")?)
    };

    let coder = document.codec.codec();
    let data = recovery::recover_payload(coder.as_ref(), &config, &symbols, published.as_ref())
        .context("Failed to decode payload")?;

    if data.len() != document.original_len {
        bail!(
            "Decoded {} bytes but the document records {}",
            data.len(),
            document.original_len
        );
    }

    info!(
        codec = coder.name(),
        supplied = symbols.len(),
        bytes = data.len(),
        "decoded payload"
    );
    Ok(data)
}

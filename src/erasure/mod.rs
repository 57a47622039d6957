//! Erasure coding of arbitrary payloads
//!
//! An [`ErasureCodec`] turns a payload into `n` equal-width symbols such that
//! any `k` of them, by position, reproduce the payload exactly. This is loss
//! tolerance only: symbols carry no secrecy and are unrelated to shares.
//!
//! Every codec frames the payload the same way before coding it:
//!
//! ```text
//! payload length (u64, big-endian) | payload | zero padding
//! ```
//!
//! The padding brings the framed length to a multiple of `k`; its length is
//! recorded in [`EncodedBlock::padding`], and the length prefix lets a
//! decoder strip it using only the symbols.
//!
//! Two implementations are available:
//! - [`LagrangeCodec`] - systematic evaluation code over GF(2^8)
//! - [`ReedSolomonCodec`] - the `reed-solomon-erasure` matrix codec

mod lagrange;
mod reed_solomon;

pub use lagrange::LagrangeCodec;
pub use reed_solomon::ReedSolomonCodec;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::CodingConfig;
use crate::error::{Error, Result};

/// Bytes used by the length prefix of a framed payload
const LENGTH_PREFIX: usize = 8;

/// One coded symbol of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Position in the block, `0..n`; positions `0..k` carry framed payload
    pub position: u16,
    pub value: Vec<u8>,
}

/// A complete erasure-coded payload (metadata + symbols)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlock {
    config: CodingConfig,
    symbol_width: usize,
    original_len: usize,
    padding: usize,
    symbols: Vec<Symbol>,
}

impl EncodedBlock {
    #[must_use]
    pub fn config(&self) -> &CodingConfig {
        &self.config
    }

    /// Width in bytes shared by every symbol
    #[must_use]
    pub fn symbol_width(&self) -> usize {
        self.symbol_width
    }

    /// Length of the payload before framing
    #[must_use]
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Zero bytes appended after the payload
    #[must_use]
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// All `n` symbols ordered by position
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn symbol(&self, position: u16) -> Option<&Symbol> {
        self.symbols.get(usize::from(position))
    }

    #[must_use]
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

/// A pluggable erasure code
pub trait ErasureCodec {
    /// Short identifier used in logs and documents
    fn name(&self) -> &'static str;

    /// Encodes `data` into `n` symbols
    ///
    /// # Errors
    /// Returns an error if the backend rejects the configuration
    fn encode(&self, config: &CodingConfig, data: &[u8]) -> Result<EncodedBlock>;

    /// Decodes the payload from at least `k` symbols of one block
    ///
    /// # Errors
    /// - `InsufficientSymbols` if fewer than `k` symbols are supplied
    /// - `DuplicateIndex` if two symbols share a position
    /// - `InvalidParameters` if a position is outside the block
    /// - `SymbolMismatch` or `DecodeFailure` if the symbols are not
    ///   consistent with a single codeword or framed payload
    fn decode(&self, config: &CodingConfig, symbols: &[Symbol]) -> Result<Vec<u8>>;
}

/// Selects a codec implementation at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum CodecKind {
    /// Systematic Lagrange evaluation code over GF(2^8)
    #[default]
    Lagrange,
    /// Matrix-based Reed-Solomon from the `reed-solomon-erasure` crate
    ReedSolomon,
}

impl CodecKind {
    /// Instantiates the selected codec
    #[must_use]
    pub fn codec(self) -> Box<dyn ErasureCodec + Send + Sync> {
        match self {
            Self::Lagrange => Box::new(LagrangeCodec),
            Self::ReedSolomon => Box::new(ReedSolomonCodec),
        }
    }
}

/// Payload split into `k` equal-width data symbols
struct Framed {
    data_symbols: Vec<Vec<u8>>,
    width: usize,
    padding: usize,
    original_len: usize,
}

fn frame(config: &CodingConfig, data: &[u8]) -> Framed {
    let k = usize::from(config.data_symbols());
    let framed_len = LENGTH_PREFIX + data.len();
    let width = framed_len.div_ceil(k);
    let padding = width * k - framed_len;

    let mut buffer = Vec::with_capacity(width * k);
    buffer.extend_from_slice(&(data.len() as u64).to_be_bytes());
    buffer.extend_from_slice(data);
    buffer.resize(width * k, 0);

    Framed {
        data_symbols: buffer.chunks(width).map(<[u8]>::to_vec).collect(),
        width,
        padding,
        original_len: data.len(),
    }
}

fn into_block(config: &CodingConfig, framed: Framed, parity: Vec<Vec<u8>>) -> EncodedBlock {
    let symbols = framed
        .data_symbols
        .into_iter()
        .chain(parity)
        .zip(0u16..)
        .map(|(value, position)| Symbol { position, value })
        .collect();

    EncodedBlock {
        config: *config,
        symbol_width: framed.width,
        original_len: framed.original_len,
        padding: framed.padding,
        symbols,
    }
}

/// Strips framing from the `k` data symbols in position order
fn unframe(data_symbols: &[Vec<u8>]) -> Result<Vec<u8>> {
    let framed = data_symbols.concat();
    if framed.len() < LENGTH_PREFIX {
        return Err(Error::decode("framed payload shorter than its length prefix"));
    }

    let mut prefix = [0u8; LENGTH_PREFIX];
    prefix.copy_from_slice(&framed[..LENGTH_PREFIX]);
    let declared = usize::try_from(u64::from_be_bytes(prefix))
        .map_err(|_| Error::decode("declared payload length does not fit in memory"))?;

    let body = &framed[LENGTH_PREFIX..];
    if declared > body.len() {
        return Err(Error::decode(format!(
            "declared payload length {declared} exceeds decoded {} bytes",
            body.len()
        )));
    }
    if body[declared..].iter().any(|&b| b != 0) {
        return Err(Error::decode("non-zero padding after payload"));
    }
    Ok(body[..declared].to_vec())
}

/// Validates a decode request and orders the symbols by position
///
/// Checks count, positions and widths; the returned symbols are sorted so
/// any permutation of the same input decodes identically.
fn select_symbols<'a>(config: &CodingConfig, symbols: &'a [Symbol]) -> Result<Vec<&'a Symbol>> {
    let k = usize::from(config.data_symbols());
    if symbols.len() < k {
        return Err(Error::InsufficientSymbols {
            provided: symbols.len(),
            required: k,
        });
    }

    let mut seen = HashSet::with_capacity(symbols.len());
    for symbol in symbols {
        config.check_position(symbol.position)?;
        if !seen.insert(symbol.position) {
            return Err(Error::DuplicateIndex(symbol.position));
        }
    }

    let width = symbols[0].value.len();
    if width == 0 {
        return Err(Error::decode("symbols are empty"));
    }
    if symbols.iter().any(|s| s.value.len() != width) {
        return Err(Error::decode("symbols have differing widths"));
    }

    let mut ordered: Vec<&Symbol> = symbols.iter().collect();
    ordered.sort_by_key(|s| s.position);
    Ok(ordered)
}

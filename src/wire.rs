//! Canonical byte encodings for shares and symbols
//!
//! Both layouts are self-describing: they carry the field identifier and
//! the parameters the value was produced under, so an independent
//! implementation can validate and use them without side information.
//! All integers are big-endian.
//!
//! Share (24 bytes):
//!
//! ```text
//! version(1) | field tag(1) | modulus(8) | n(2) | t(2) | index(2) | value(8)
//! ```
//!
//! Symbol (12-byte header followed by `width` bytes):
//!
//! ```text
//! version(1) | field tag(1) | k(2) | n(2) | position(2) | width(4) | bytes(width)
//! ```

use crate::domain::{CodingConfig, ShareCount, ShareIndex, SharingConfig, Threshold};
use crate::erasure::Symbol;
use crate::error::{Error, Result};
use crate::field::{FieldKind, PrimeField};
use crate::share::Share;

/// Layout version of both encodings
pub const WIRE_VERSION: u8 = 1;

/// Length of an encoded share
pub const SHARE_LEN: usize = 24;

/// Length of the header preceding a symbol's bytes
pub const SYMBOL_HEADER_LEN: usize = 12;

/// Encodes a share together with the parameters it was issued under
#[must_use]
pub fn encode_share(config: &SharingConfig, share: &Share) -> [u8; SHARE_LEN] {
    let mut out = [0u8; SHARE_LEN];
    out[0] = WIRE_VERSION;
    out[1] = FieldKind::Prime.tag();
    out[2..10].copy_from_slice(&config.field().modulus().to_be_bytes());
    out[10..12].copy_from_slice(&config.share_count().to_be_bytes());
    out[12..14].copy_from_slice(&config.threshold().to_be_bytes());
    out[14..16].copy_from_slice(&share.index().to_be_bytes());
    out[16..24].copy_from_slice(&share.value().to_be_bytes());
    out
}

/// Decodes and validates an encoded share
///
/// # Errors
/// Returns an encoding error for a wrong length, version or field tag, and
/// `InvalidParameters` if the embedded parameters or value are out of range
pub fn decode_share(bytes: &[u8]) -> Result<(SharingConfig, Share)> {
    if bytes.len() != SHARE_LEN {
        return Err(Error::encoding(format!(
            "share must be {SHARE_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    check_header(bytes[0], bytes[1], FieldKind::Prime)?;

    let field = PrimeField::new(read_u64(&bytes[2..10]))?;
    let config = SharingConfig::new(
        field,
        Threshold::new(read_u16(&bytes[12..14]))?,
        ShareCount::new(read_u16(&bytes[10..12]))?,
    )?;
    let index = ShareIndex::new(read_u16(&bytes[14..16]))?;
    config.check_index(index)?;
    let value = field.element(read_u64(&bytes[16..24]))?;

    Ok((config, Share::new(index, value)))
}

/// Encodes a symbol together with its block parameters
///
/// # Errors
/// Returns an encoding error if the symbol is wider than `u32::MAX` bytes
pub fn encode_symbol(config: &CodingConfig, symbol: &Symbol) -> Result<Vec<u8>> {
    let width = u32::try_from(symbol.value.len())
        .map_err(|_| Error::encoding("symbol width exceeds u32::MAX"))?;

    let mut out = Vec::with_capacity(SYMBOL_HEADER_LEN + symbol.value.len());
    out.push(WIRE_VERSION);
    out.push(FieldKind::Binary8.tag());
    out.extend_from_slice(&config.data_symbols().to_be_bytes());
    out.extend_from_slice(&config.total_symbols().to_be_bytes());
    out.extend_from_slice(&symbol.position.to_be_bytes());
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&symbol.value);
    Ok(out)
}

/// Decodes and validates an encoded symbol
///
/// # Errors
/// Returns an encoding error for a truncated buffer, a wrong version or field
/// tag, or a width that disagrees with the buffer length, and
/// `InvalidParameters` if the block parameters or position are out of range
pub fn decode_symbol(bytes: &[u8]) -> Result<(CodingConfig, Symbol)> {
    if bytes.len() < SYMBOL_HEADER_LEN {
        return Err(Error::encoding(format!(
            "symbol must be at least {SYMBOL_HEADER_LEN} bytes, got {}",
            bytes.len()
        )));
    }
    check_header(bytes[0], bytes[1], FieldKind::Binary8)?;

    let config = CodingConfig::new(read_u16(&bytes[2..4]), read_u16(&bytes[4..6]))?;
    let position = read_u16(&bytes[6..8]);
    config.check_position(position)?;

    let width = usize::try_from(read_u32(&bytes[8..12]))
        .map_err(|_| Error::encoding("symbol width does not fit in memory"))?;
    let body = &bytes[SYMBOL_HEADER_LEN..];
    if body.len() != width {
        return Err(Error::encoding(format!(
            "symbol header declares {width} bytes, got {}",
            body.len()
        )));
    }

    Ok((
        config,
        Symbol {
            position,
            value: body.to_vec(),
        },
    ))
}

fn check_header(version: u8, tag: u8, expected: FieldKind) -> Result<()> {
    if version != WIRE_VERSION {
        return Err(Error::encoding(format!(
            "unsupported wire version {version} (expected {WIRE_VERSION})"
        )));
    }
    let kind = FieldKind::from_tag(tag)?;
    if kind != expected {
        return Err(Error::encoding(format!(
            "unexpected field {kind:?} (expected {expected:?})"
        )));
    }
    Ok(())
}

fn read_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_be_bytes(buf)
}

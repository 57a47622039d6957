//! Human-transcribable share armor
//!
//! A share's canonical [`wire`](crate::wire) bytes are framed and written out
//! as BIP39 English words so they can be copied by hand or read aloud:
//!
//! ```text
//! sharevault <data words>
//! ```
//!
//! The data words carry `length (u16) || share bytes || CRC-32 (u32)`, 11 bits
//! per word, left-padded with zero bits to a whole number of words. The
//! checksum catches transcription mistakes before a share ever reaches the
//! reconstructor; it is not a substitute for commitments.
//!
//! # Examples
//!
//! ```rust
//! use sharevault::armor::{armor_share, parse_share};
//! use sharevault::domain::{ShareIndex, SharingConfig};
//! use sharevault::Share;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SharingConfig::with_defaults(3, 5)?;
//! let share = Share::new(ShareIndex::new(2)?, 123_456_789);
//!
//! let mnemonic = armor_share(&config, &share)?;
//! assert!(mnemonic.as_str().starts_with("sharevault "));
//!
//! let (parsed_config, parsed_share) = parse_share(mnemonic.as_str())?;
//! assert_eq!(parsed_config, config);
//! assert_eq!(parsed_share, share);
//! # Ok(())
//! # }
//! ```

use bip39::Language;
use crc::{CRC_32_ISO_HDLC, Crc};
use std::collections::HashMap;
use std::sync::LazyLock;
use zeroize::Zeroizing;

use crate::domain::SharingConfig;
use crate::error::{Error, Result};
use crate::share::Share;
use crate::wire;

/// CRC32 algorithm guarding the armored bytes
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Leading word identifying the armor format
pub const VERSION_WORD: &str = "sharevault";

const BITS_PER_WORD: usize = 11;
const LENGTH_BYTES: usize = 2;
const CHECKSUM_BYTES: usize = 4;

/// An armored share, zeroized on drop
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMnemonic(Zeroizing<String>);

impl ShareMnemonic {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

static WORD_TO_INDEX_MAP: LazyLock<HashMap<&'static str, u16>> = LazyLock::new(|| {
    Language::English
        .word_list()
        .iter()
        .zip(0u16..)
        .map(|(&word, idx)| (word, idx))
        .collect()
});

/// Armors a share together with its sharing parameters
///
/// # Errors
/// Returns an encoding error if a word index falls outside the word list
pub fn armor_share(config: &SharingConfig, share: &Share) -> Result<ShareMnemonic> {
    let payload = Zeroizing::new(wire::encode_share(config, share));
    armor_bytes(payload.as_slice())
}

/// Parses an armored share and validates its contents
///
/// Words are matched case-insensitively and may be separated by any
/// whitespace.
///
/// # Errors
/// Returns an encoding error for a wrong version word, an unknown word, a
/// length or checksum mismatch, or malformed share bytes, and
/// `InvalidParameters` if the embedded parameters are out of range
pub fn parse_share(mnemonic: &str) -> Result<(SharingConfig, Share)> {
    let payload = unarmor_bytes(mnemonic)?;
    wire::decode_share(&payload)
}

fn armor_bytes(payload: &[u8]) -> Result<ShareMnemonic> {
    let length = u16::try_from(payload.len())
        .map_err(|_| Error::encoding(format!("payload too large: {} bytes", payload.len())))?;

    let mut framed = Zeroizing::new(Vec::with_capacity(
        LENGTH_BYTES + payload.len() + CHECKSUM_BYTES,
    ));
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(payload);
    framed.extend_from_slice(&CRC32.checksum(payload).to_be_bytes());

    let mut words = vec![VERSION_WORD];
    words.extend(encode_words(&framed)?);
    Ok(ShareMnemonic(Zeroizing::new(words.join(" "))))
}

fn unarmor_bytes(mnemonic: &str) -> Result<Zeroizing<Vec<u8>>> {
    let words: Vec<String> = mnemonic.split_whitespace().map(str::to_lowercase).collect();

    let Some((version, data_words)) = words.split_first() else {
        return Err(Error::encoding("empty mnemonic"));
    };
    if version != VERSION_WORD {
        return Err(Error::encoding(format!(
            "invalid version word: expected '{VERSION_WORD}', got '{version}'"
        )));
    }
    if data_words.is_empty() {
        return Err(Error::encoding("no share data words found"));
    }

    let decoded = decode_words(data_words)?;
    let framed = strip_alignment(&decoded)?;

    let body_end = framed.len() - CHECKSUM_BYTES;
    let payload = &framed[LENGTH_BYTES..body_end];
    let expected = CRC32.checksum(payload);
    let actual = u32::from_be_bytes([
        framed[body_end],
        framed[body_end + 1],
        framed[body_end + 2],
        framed[body_end + 3],
    ]);
    if expected != actual {
        return Err(Error::encoding(format!(
            "checksum verification failed: expected 0x{expected:08x}, got 0x{actual:08x}"
        )));
    }

    Ok(Zeroizing::new(payload.to_vec()))
}

/// Finds the framed bytes inside the decoded word bits
///
/// The word count fixes the byte count only up to one leading byte of
/// alignment zeros, so the frame is taken at the offset whose length prefix
/// accounts for every remaining byte.
fn strip_alignment(decoded: &[u8]) -> Result<&[u8]> {
    for offset in 0..=1 {
        if decoded.len() < offset + LENGTH_BYTES + CHECKSUM_BYTES {
            break;
        }
        if decoded[..offset].iter().any(|&b| b != 0) {
            break;
        }
        let declared = usize::from(u16::from_be_bytes([decoded[offset], decoded[offset + 1]]));
        if offset + LENGTH_BYTES + declared + CHECKSUM_BYTES == decoded.len() {
            return Ok(&decoded[offset..]);
        }
    }
    Err(Error::encoding(format!(
        "declared length does not match {} decoded bytes",
        decoded.len()
    )))
}

/// Packs bytes into words, 11 bits each, zero-padding on the left
fn encode_words(data: &[u8]) -> Result<Vec<&'static str>> {
    let bit_count = data.len() * 8;
    let padding = (BITS_PER_WORD - bit_count % BITS_PER_WORD) % BITS_PER_WORD;

    let mut words = Vec::with_capacity((bit_count + padding) / BITS_PER_WORD);
    let mut buffer: u32 = 0;
    let mut bits_in_buffer = padding;

    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits_in_buffer += 8;

        if bits_in_buffer >= BITS_PER_WORD {
            bits_in_buffer -= BITS_PER_WORD;
            let index = (buffer >> bits_in_buffer) & 0x7ff;
            words.push(word_from_index(index)?);
            buffer &= (1 << bits_in_buffer) - 1;
        }
    }

    Ok(words)
}

/// Unpacks words into as many whole bytes as they hold
///
/// The leading bits that do not fill a byte are padding and must be zero.
fn decode_words(words: &[String]) -> Result<Zeroizing<Vec<u8>>> {
    let total_bits = words.len() * BITS_PER_WORD;
    let mut skip = total_bits % 8;

    let mut out = Zeroizing::new(Vec::with_capacity(total_bits / 8));
    let mut buffer: u32 = 0;
    let mut bits_in_buffer = 0usize;

    for word in words {
        buffer = (buffer << BITS_PER_WORD) | u32::from(word_to_index(word)?);
        bits_in_buffer += BITS_PER_WORD;

        if skip > 0 {
            bits_in_buffer -= skip;
            if buffer >> bits_in_buffer != 0 {
                return Err(Error::encoding("non-zero padding bits"));
            }
            skip = 0;
        }

        while bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "masked to the low 8 bits"
            )]
            out.push(((buffer >> bits_in_buffer) & 0xff) as u8);
            buffer &= (1 << bits_in_buffer) - 1;
        }
    }

    Ok(out)
}

/// Converts a BIP39 word to its index (0-2047)
fn word_to_index(word: &str) -> Result<u16> {
    WORD_TO_INDEX_MAP
        .get(word)
        .copied()
        .ok_or_else(|| Error::encoding(format!("word '{word}' not found in BIP39 wordlist")))
}

/// Converts an index (0-2047) to its BIP39 word
fn word_from_index(index: u32) -> Result<&'static str> {
    usize::try_from(index)
        .ok()
        .and_then(|i| Language::English.word_list().get(i))
        .copied()
        .ok_or_else(|| Error::encoding(format!("word index {index} out of range (must be 0-2047)")))
}

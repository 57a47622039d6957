//! Hash commitments binding shares and symbols to published values
//!
//! A commitment is SHA-256 over a domain-separation tag and the canonical
//! [`wire`](crate::wire) encoding, so it binds the value together with the
//! field, `n`, `t`/`k` and index it was issued under. Commitments are meant
//! to be published; verification recomputes the hash and compares it in
//! constant time.
//!
//! # Examples
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sharevault::commitment::{split_with_commitments, verify};
//! use sharevault::domain::SharingConfig;
//! use sharevault::Secret;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SharingConfig::with_defaults(2, 3)?;
//! let (shares, commitments) = split_with_commitments(&config, &Secret::new(7), &mut OsRng)?;
//!
//! for (share, commitment) in shares.iter().zip(&commitments) {
//!     assert!(verify(&config, share, commitment));
//! }
//! # Ok(())
//! # }
//! ```

use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::{CodingConfig, ShareIndex, SharingConfig};
use crate::erasure::Symbol;
use crate::error::{Error, Result};
use crate::share::{Secret, Share};
use crate::{shamir, wire};

const SHARE_DOMAIN: &[u8] = b"sharevault/share-commitment/v1";
const SYMBOL_DOMAIN: &[u8] = b"sharevault/symbol-commitment/v1";

/// A 32-byte SHA-256 commitment
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; Commitment::LEN]);

impl Commitment {
    /// Length of a commitment in bytes
    pub const LEN: usize = 32;

    #[must_use]
    pub fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Lowercase hex rendering
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a hex rendering
    ///
    /// # Errors
    /// Returns an encoding error if the text is not 64 hex digits
    pub fn from_hex(text: &str) -> Result<Self> {
        let bytes = hex::decode(text.trim())
            .map_err(|e| Error::encoding(format!("invalid commitment hex: {e}")))?;
        let bytes: [u8; Self::LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            Error::encoding(format!(
                "commitment must be {} bytes, got {}",
                Self::LEN,
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Constant-time equality
    #[must_use]
    pub fn ct_matches(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl std::fmt::Debug for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Commitment({})", self.to_hex())
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn digest(domain: &[u8], encoded: &[u8]) -> Commitment {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(encoded);
    Commitment(hasher.finalize().into())
}

/// Commits to a share under its sharing parameters
#[must_use]
pub fn commit(config: &SharingConfig, share: &Share) -> Commitment {
    digest(SHARE_DOMAIN, &wire::encode_share(config, share))
}

/// Checks a share against a commitment
#[must_use]
pub fn verify(config: &SharingConfig, share: &Share, commitment: &Commitment) -> bool {
    commit(config, share).ct_matches(commitment)
}

/// Like [`verify`], but reports a mismatch as an error
///
/// # Errors
/// Returns `CommitmentMismatch` if the share does not match
pub fn ensure_verified(config: &SharingConfig, share: &Share, commitment: &Commitment) -> Result<()> {
    if verify(config, share, commitment) {
        Ok(())
    } else {
        Err(Error::CommitmentMismatch {
            index: *share.index(),
        })
    }
}

/// Splits a secret and commits to every share
///
/// `commitments[i]` belongs to `shares[i]`.
///
/// # Errors
/// Returns `InvalidParameters` if the secret is not below the field modulus
pub fn split_with_commitments<R: RngCore + CryptoRng>(
    config: &SharingConfig,
    secret: &Secret,
    rng: &mut R,
) -> Result<(Vec<Share>, Vec<Commitment>)> {
    let shares = shamir::split(config, secret, rng)?;
    let commitments = shares.iter().map(|share| commit(config, share)).collect();
    Ok((shares, commitments))
}

/// Commits to an erasure symbol under its block parameters
///
/// # Errors
/// Returns an encoding error if the symbol cannot be encoded
pub fn commit_symbol(config: &CodingConfig, symbol: &Symbol) -> Result<Commitment> {
    Ok(digest(SYMBOL_DOMAIN, &wire::encode_symbol(config, symbol)?))
}

/// Checks an erasure symbol against a commitment
#[must_use]
pub fn verify_symbol(config: &CodingConfig, symbol: &Symbol, commitment: &Commitment) -> bool {
    commit_symbol(config, symbol).is_ok_and(|c| c.ct_matches(commitment))
}

/// Published commitments, ordered by share index or symbol position
///
/// Entry `i` belongs to share index `i + 1`, or to symbol position `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitmentSet(Vec<Commitment>);

impl CommitmentSet {
    #[must_use]
    pub fn new(commitments: Vec<Commitment>) -> Self {
        Self(commitments)
    }

    /// Parses hex renderings in publication order
    ///
    /// # Errors
    /// Returns an encoding error if any entry is malformed
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        entries
            .iter()
            .map(|entry| Commitment::from_hex(entry.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    /// Commitment published for a share index
    #[must_use]
    pub fn for_share(&self, index: ShareIndex) -> Option<&Commitment> {
        self.0.get(usize::from(*index) - 1)
    }

    /// Commitment published for a symbol position
    #[must_use]
    pub fn for_symbol(&self, position: u16) -> Option<&Commitment> {
        self.0.get(usize::from(position))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Commitment> {
        self.0.iter()
    }

    /// Hex renderings in publication order
    #[must_use]
    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(Commitment::to_hex).collect()
    }
}

impl From<Vec<Commitment>> for CommitmentSet {
    fn from(commitments: Vec<Commitment>) -> Self {
        Self(commitments)
    }
}

//! End-to-end workflows over shares, commitments and erasure symbols
//!
//! Distribution produces the values to hand out together with the
//! commitments to publish. Recovery checks presented values against those
//! published commitments, drops the ones that fail and only then rebuilds
//! the secret or payload. Nothing is kept between calls.

use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};

use crate::commitment::{self, Commitment, CommitmentSet};
use crate::domain::{CodingConfig, SharingConfig};
use crate::erasure::{EncodedBlock, ErasureCodec, Symbol};
use crate::error::{Error, Result};
use crate::shamir;
use crate::share::{Secret, Share};

/// Shares to hand out plus the commitments to publish
#[derive(Debug, Clone)]
pub struct SecretDistribution {
    pub shares: Vec<Share>,
    pub commitments: CommitmentSet,
}

/// An encoded payload plus one commitment per symbol
#[derive(Debug, Clone)]
pub struct PayloadDistribution {
    pub block: EncodedBlock,
    pub commitments: CommitmentSet,
}

/// Splits a secret and commits to every share
///
/// # Errors
/// Returns `InvalidParameters` if the secret is not below the field modulus
pub fn distribute_secret<R: RngCore + CryptoRng>(
    config: &SharingConfig,
    secret: &Secret,
    rng: &mut R,
) -> Result<SecretDistribution> {
    let (shares, commitments) = commitment::split_with_commitments(config, secret, rng)?;
    debug!(
        threshold = *config.threshold(),
        shares = shares.len(),
        "distributed secret"
    );
    Ok(SecretDistribution {
        shares,
        commitments: commitments.into(),
    })
}

/// Verifies presented shares against the published commitments and
/// reconstructs the secret from those that pass
///
/// A share whose index has no published commitment counts as rejected.
///
/// # Errors
/// - `InsufficientShares` if fewer than `t` shares are presented
/// - `QuorumNotMet` if fewer than `t` shares survive verification
/// - any reconstruction error on the verified shares
pub fn recover_secret(
    config: &SharingConfig,
    commitments: &CommitmentSet,
    shares: &[Share],
) -> Result<Secret> {
    let required = usize::from(*config.threshold());
    if shares.len() < required {
        return Err(Error::InsufficientShares {
            provided: shares.len(),
            required,
        });
    }

    let (verified, rejected): (Vec<Share>, Vec<Share>) = shares.iter().copied().partition(|share| {
        commitments
            .for_share(share.index())
            .is_some_and(|published| commitment::verify(config, share, published))
    });

    for share in &rejected {
        warn!(index = *share.index(), "share failed commitment verification");
    }

    if verified.len() < required {
        return Err(Error::QuorumNotMet {
            verified: verified.len(),
            rejected: rejected.len(),
            required,
        });
    }

    debug!(
        verified = verified.len(),
        rejected = rejected.len(),
        "shares verified"
    );
    shamir::reconstruct(config, &verified)
}

/// Encodes a payload and commits to every symbol
///
/// # Errors
/// Returns an error if the codec rejects the configuration
pub fn distribute_payload<C: ErasureCodec + ?Sized>(
    codec: &C,
    config: &CodingConfig,
    data: &[u8],
) -> Result<PayloadDistribution> {
    let block = codec.encode(config, data)?;
    let commitments = block
        .symbols()
        .iter()
        .map(|symbol| commitment::commit_symbol(config, symbol))
        .collect::<Result<Vec<Commitment>>>()?;

    Ok(PayloadDistribution {
        block,
        commitments: commitments.into(),
    })
}

/// Decodes a payload, first dropping symbols that fail their published
/// commitment when `commitments` is given
///
/// # Errors
/// - `InsufficientSymbols` if fewer than `k` symbols survive verification
/// - any decode error on the remaining symbols
pub fn recover_payload<C: ErasureCodec + ?Sized>(
    codec: &C,
    config: &CodingConfig,
    symbols: &[Symbol],
    commitments: Option<&CommitmentSet>,
) -> Result<Vec<u8>> {
    let Some(commitments) = commitments else {
        return codec.decode(config, symbols);
    };

    let verified: Vec<Symbol> = symbols
        .iter()
        .filter(|symbol| {
            let ok = commitments
                .for_symbol(symbol.position)
                .is_some_and(|published| commitment::verify_symbol(config, symbol, published));
            if !ok {
                warn!(
                    position = symbol.position,
                    "symbol failed commitment verification"
                );
            }
            ok
        })
        .cloned()
        .collect();

    debug!(
        supplied = symbols.len(),
        verified = verified.len(),
        codec = codec.name(),
        "symbols verified"
    );
    codec.decode(config, &verified)
}

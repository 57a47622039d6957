//! Threshold splitting and reconstruction over a prime field
//!
//! A secret `s` becomes the constant term of a random polynomial
//! `f(x) = s + a_1 x + ... + a_{t-1} x^{t-1}`; share `i` is `(i, f(i))`.
//! Any `t` shares fix `f` and therefore `f(0) = s` via Lagrange
//! interpolation, while `t - 1` shares are consistent with every secret.
//!
//! # Examples
//!
//! ```rust
//! use rand::rngs::OsRng;
//! use sharevault::domain::SharingConfig;
//! use sharevault::shamir::{reconstruct, split};
//! use sharevault::Secret;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SharingConfig::with_defaults(3, 5)?;
//! let shares = split(&config, &Secret::new(42), &mut OsRng)?;
//! assert_eq!(shares.len(), 5);
//!
//! let recovered = reconstruct(&config, &[shares[0], shares[2], shares[4]])?;
//! assert_eq!(recovered.expose(), 42);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use rand::{CryptoRng, RngCore};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::SharingConfig;
use crate::error::{Error, Result};
use crate::field::{Field, PrimeField};
use crate::poly;
use crate::share::{Secret, Share};

/// Sharing polynomial whose coefficients are wiped on drop
struct Polynomial {
    coefficients: Zeroizing<Vec<u64>>,
}

impl Polynomial {
    /// Builds `secret + a_1 x + ... + a_degree x^degree` with fresh random `a_i`
    fn random<R: RngCore + CryptoRng>(
        field: &PrimeField,
        secret: u64,
        degree: usize,
        rng: &mut R,
    ) -> Self {
        let mut coefficients = Zeroizing::new(Vec::with_capacity(degree + 1));
        coefficients.push(secret);
        coefficients.extend((0..degree).map(|_| field.random(&mut *rng)));
        Self { coefficients }
    }

    fn evaluate(&self, field: &PrimeField, x: u64) -> u64 {
        poly::evaluate(field, &self.coefficients, x)
    }
}

/// Splits a secret into `n` shares with recovery threshold `t`
///
/// Draws `t - 1` coefficients from `rng`; a fresh polynomial is built for
/// every call so coefficients are never reused across splits.
///
/// # Errors
/// Returns `InvalidParameters` if the secret is not below the field modulus
pub fn split<R: RngCore + CryptoRng>(
    config: &SharingConfig,
    secret: &Secret,
    rng: &mut R,
) -> Result<Vec<Share>> {
    let field = config.field();
    let value = field.element(secret.expose()).map_err(|_| {
        Error::invalid(format!(
            "secret must be below the field modulus {}",
            field.modulus()
        ))
    })?;

    let degree = usize::from(*config.threshold()) - 1;
    let polynomial = Polynomial::random(field, value, degree, rng);

    let shares = config
        .indices()
        .map(|index| Share::new(index, polynomial.evaluate(field, u64::from(*index))))
        .collect();

    debug!(
        threshold = *config.threshold(),
        share_count = *config.share_count(),
        modulus = field.modulus(),
        "split secret"
    );
    Ok(shares)
}

/// Reconstructs the secret from at least `t` shares
///
/// Interpolates at zero from the first `t` shares. Every surplus share must
/// lie on the same polynomial; otherwise some share is corrupted and the
/// call fails rather than guessing.
///
/// # Errors
/// - `InsufficientShares` if fewer than `t` shares are supplied
/// - `DuplicateIndex` if two shares carry the same index
/// - `InvalidParameters` if a share index or value is out of range
/// - `InconsistentShares` if surplus shares disagree with the basis
pub fn reconstruct(config: &SharingConfig, shares: &[Share]) -> Result<Secret> {
    let threshold = usize::from(*config.threshold());
    if shares.len() < threshold {
        return Err(Error::InsufficientShares {
            provided: shares.len(),
            required: threshold,
        });
    }

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen.insert(share.index()) {
            return Err(Error::DuplicateIndex(*share.index()));
        }
        config.check_index(share.index())?;
        config.field().element(share.value())?;
    }

    let field = config.field();
    let (basis, surplus) = shares.split_at(threshold);
    let xs: Vec<u64> = basis.iter().map(|s| u64::from(*s.index())).collect();
    let ys: Vec<u64> = basis.iter().map(Share::value).collect();

    for share in surplus {
        let x = u64::from(*share.index());
        let weights = poly::lagrange_weights(field, &xs, x)?;
        if poly::combine(field, &weights, &ys) != share.value() {
            warn!(
                index = *share.index(),
                "surplus share disagrees with interpolated polynomial"
            );
            return Err(Error::InconsistentShares);
        }
    }

    let weights = poly::lagrange_weights(field, &xs, field.zero())?;
    let secret = Secret::new(poly::combine(field, &weights, &ys));

    debug!(provided = shares.len(), threshold, "reconstructed secret");
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ShareCount, ShareIndex, Threshold};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn config(threshold: u16, share_count: u16) -> SharingConfig {
        SharingConfig::with_defaults(threshold, share_count).unwrap()
    }

    #[test]
    fn test_split_produces_n_distinct_indices() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let shares = split(&config(3, 5), &Secret::new(42), &mut rng).unwrap();
        let indices: Vec<u16> = shares.iter().map(|s| *s.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_secret_out_of_range_rejected() {
        let field = PrimeField::new(257).unwrap();
        let config = SharingConfig::new(
            field,
            Threshold::new(2).unwrap(),
            ShareCount::new(3).unwrap(),
        )
        .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let result = split(&config, &Secret::new(257), &mut rng);
        assert!(matches!(result, Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn test_concrete_scenario_42_of_5_threshold_3() {
        let config = config(3, 5);
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let shares = split(&config, &Secret::new(42), &mut rng).unwrap();

        let first = reconstruct(&config, &[shares[0], shares[2], shares[4]]).unwrap();
        let second = reconstruct(&config, &[shares[1], shares[2], shares[3]]).unwrap();
        assert_eq!(first.expose(), 42);
        assert_eq!(second.expose(), 42);

        let result = reconstruct(&config, &[shares[0], shares[1]]);
        assert!(matches!(
            result,
            Err(Error::InsufficientShares {
                provided: 2,
                required: 3
            })
        ));
    }

    #[test]
    fn test_duplicate_index_rejected_even_with_equal_values() {
        let config = config(2, 3);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let shares = split(&config, &Secret::new(7), &mut rng).unwrap();

        let result = reconstruct(&config, &[shares[0], shares[0]]);
        assert!(matches!(result, Err(Error::DuplicateIndex(1))));
    }

    #[test]
    fn test_corrupted_surplus_share_detected() {
        let config = config(3, 5);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let mut shares = split(&config, &Secret::new(99), &mut rng).unwrap();
        let field = config.field();
        shares[4] = Share::new(shares[4].index(), field.add(shares[4].value(), 1));

        let result = reconstruct(&config, &shares);
        assert!(matches!(result, Err(Error::InconsistentShares)));

        // The untouched shares still agree
        assert_eq!(reconstruct(&config, &shares[..4]).unwrap().expose(), 99);
    }

    #[test]
    fn test_corrupted_basis_share_detected() {
        let config = config(2, 4);
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut shares = split(&config, &Secret::new(1000), &mut rng).unwrap();
        shares[0] = Share::new(shares[0].index(), config.field().add(shares[0].value(), 5));

        let result = reconstruct(&config, &shares);
        assert!(matches!(result, Err(Error::InconsistentShares)));
    }

    #[test]
    fn test_index_beyond_share_count_rejected() {
        let config = config(2, 3);
        let shares = [
            Share::new(ShareIndex::new(1).unwrap(), 5),
            Share::new(ShareIndex::new(9).unwrap(), 6),
        ];
        let result = reconstruct(&config, &shares);
        assert!(matches!(result, Err(Error::InvalidParameters(_))));
    }

    #[test]
    fn test_same_secret_gives_fresh_shares() {
        let config = config(3, 5);
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let first = split(&config, &Secret::new(5), &mut rng).unwrap();
        let second = split(&config, &Secret::new(5), &mut rng).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_small_field() {
        let field = PrimeField::new(257).unwrap();
        let config = SharingConfig::new(
            field,
            Threshold::new(4).unwrap(),
            ShareCount::new(256).unwrap(),
        )
        .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let shares = split(&config, &Secret::new(256), &mut rng).unwrap();
        let subset = [shares[0], shares[100], shares[200], shares[255]];
        assert_eq!(reconstruct(&config, &subset).unwrap().expose(), 256);
    }
}

//! Property tests for split/combine workflows

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use sharevault::commitment::{self, CommitmentSet};
use sharevault::domain::SharingConfig;
use sharevault::field::{Field, PrimeField};
use sharevault::{Error, Secret, Share, recovery, shamir};

/// Secret drawn from the default field
#[derive(Clone, Copy, Debug)]
struct FieldSecret(u64);

impl Arbitrary for FieldSecret {
    fn arbitrary(g: &mut Gen) -> Self {
        FieldSecret(u64::arbitrary(g) % PrimeField::MERSENNE_61)
    }
}

/// Wrapper for valid threshold and share count pairs
#[derive(Clone, Copy, Debug)]
struct ValidShamirParams {
    threshold: u16,
    num_shares: u16,
}

impl Arbitrary for ValidShamirParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_shares = (u16::arbitrary(g) % 19) + 2; // 2..=20
        let threshold = (u16::arbitrary(g) % (num_shares - 1)) + 2; // 2..=num_shares

        ValidShamirParams {
            threshold,
            num_shares,
        }
    }
}

impl ValidShamirParams {
    fn config(self) -> SharingConfig {
        SharingConfig::with_defaults(self.threshold, self.num_shares)
            .unwrap_or_else(|e| unreachable!("generated parameters are valid: {e}"))
    }
}

fn split(config: &SharingConfig, secret: FieldSecret, seed: u64) -> Vec<Share> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    shamir::split(config, &Secret::new(secret.0), &mut rng)
        .unwrap_or_else(|e| unreachable!("secret lies in the field: {e}"))
}

/// Test that splitting and combining all shares recovers the secret
#[quickcheck]
fn prop_split_combine_round_trip(secret: FieldSecret, params: ValidShamirParams, seed: u64) -> bool {
    let config = params.config();
    let shares = split(&config, secret, seed);

    shares.len() == usize::from(params.num_shares)
        && shamir::reconstruct(&config, &shares).is_ok_and(|s| s.expose() == secret.0)
}

/// Test that random selections of threshold shares work
#[quickcheck]
fn prop_random_share_selection_works(
    secret: FieldSecret,
    params: ValidShamirParams,
    seed: u64,
    selection_seed: u64,
) -> bool {
    let config = params.config();
    let mut shares = split(&config, secret, seed);

    shares.shuffle(&mut ChaCha20Rng::seed_from_u64(selection_seed));
    shares.truncate(usize::from(params.threshold));

    shamir::reconstruct(&config, &shares).is_ok_and(|s| s.expose() == secret.0)
}

/// Test that insufficient shares fail to recover
#[quickcheck]
fn prop_insufficient_shares_fail(secret: FieldSecret, params: ValidShamirParams, seed: u64) -> bool {
    let config = params.config();
    let shares = split(&config, secret, seed);
    let insufficient = &shares[..usize::from(params.threshold) - 1];

    matches!(
        shamir::reconstruct(&config, insufficient),
        Err(Error::InsufficientShares { .. })
    )
}

/// Test that any altered share value fails its commitment
#[quickcheck]
fn prop_commitment_detects_tampering(
    secret: FieldSecret,
    params: ValidShamirParams,
    seed: u64,
    victim: usize,
    delta: u64,
) -> bool {
    let config = params.config();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok((shares, commitments)) =
        commitment::split_with_commitments(&config, &Secret::new(secret.0), &mut rng)
    else {
        return false;
    };

    let victim = victim % shares.len();
    let delta = delta % (PrimeField::MERSENNE_61 - 1) + 1; // never zero
    let original = shares[victim];
    let tampered = Share::new(original.index(), config.field().add(original.value(), delta));

    commitment::verify(&config, &original, &commitments[victim])
        && !commitment::verify(&config, &tampered, &commitments[victim])
}

/// Test that the orchestrated workflow recovers past one tampered surplus share
#[quickcheck]
fn prop_recovery_excludes_tampered_share(
    secret: FieldSecret,
    params: ValidShamirParams,
    seed: u64,
    victim: usize,
) -> bool {
    let config = params.config();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let Ok(distribution) = recovery::distribute_secret(&config, &Secret::new(secret.0), &mut rng)
    else {
        return false;
    };

    let mut shares = distribution.shares.clone();
    let victim = victim % shares.len();
    shares[victim] = Share::new(
        shares[victim].index(),
        config.field().add(shares[victim].value(), 1),
    );

    let published: &CommitmentSet = &distribution.commitments;
    let result = recovery::recover_secret(&config, published, &shares);

    if params.threshold < params.num_shares {
        result.is_ok_and(|s| s.expose() == secret.0)
    } else {
        matches!(result, Err(Error::QuorumNotMet { rejected: 1, .. }))
    }
}

//! Property tests for erasure coding

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use sharevault::Error;
use sharevault::domain::CodingConfig;
use sharevault::erasure::{CodecKind, Symbol};

/// Wrapper for valid `(k, n)` block parameters
#[derive(Clone, Copy, Debug)]
struct ValidCodingParams {
    data_symbols: u16,
    total_symbols: u16,
}

impl Arbitrary for ValidCodingParams {
    fn arbitrary(g: &mut Gen) -> Self {
        let data_symbols = (u16::arbitrary(g) % 12) + 1; // 1..=12
        let total_symbols = data_symbols + u16::arbitrary(g) % 9; // k..=k+8

        ValidCodingParams {
            data_symbols,
            total_symbols,
        }
    }
}

impl ValidCodingParams {
    fn config(self) -> CodingConfig {
        CodingConfig::new(self.data_symbols, self.total_symbols)
            .unwrap_or_else(|e| unreachable!("generated parameters are valid: {e}"))
    }
}

fn random_subset(codec: CodecKind, config: &CodingConfig, data: &[u8], seed: u64, keep: usize) -> Option<Vec<Symbol>> {
    let mut symbols = codec.codec().encode(config, data).ok()?.into_symbols();
    symbols.shuffle(&mut ChaCha20Rng::seed_from_u64(seed));
    symbols.truncate(keep);
    Some(symbols)
}

/// Test that any k symbols, in any order, decode the payload
#[quickcheck]
fn prop_any_k_subset_decodes(data: Vec<u8>, params: ValidCodingParams, seed: u64, reed_solomon: bool) -> bool {
    let codec = if reed_solomon {
        CodecKind::ReedSolomon
    } else {
        CodecKind::Lagrange
    };
    let config = params.config();
    let Some(subset) = random_subset(codec, &config, &data, seed, usize::from(params.data_symbols))
    else {
        return false;
    };

    codec
        .codec()
        .decode(&config, &subset)
        .is_ok_and(|decoded| decoded == data)
}

/// Test that both codecs agree on every subset of the same block
#[quickcheck]
fn prop_all_symbols_decode_for_both_codecs(data: Vec<u8>, params: ValidCodingParams) -> bool {
    let config = params.config();
    [CodecKind::Lagrange, CodecKind::ReedSolomon].into_iter().all(|codec| {
        let coder = codec.codec();
        coder
            .encode(&config, &data)
            .and_then(|block| coder.decode(&config, block.symbols()))
            .is_ok_and(|decoded| decoded == data)
    })
}

/// Test that fewer than k symbols fail to decode
#[quickcheck]
fn prop_fewer_than_k_symbols_fail(data: Vec<u8>, params: ValidCodingParams, seed: u64) -> bool {
    let config = params.config();
    let keep = usize::from(params.data_symbols) - 1;
    let Some(subset) = random_subset(CodecKind::Lagrange, &config, &data, seed, keep) else {
        return false;
    };

    matches!(
        CodecKind::Lagrange.codec().decode(&config, &subset),
        Err(Error::InsufficientSymbols { .. })
    )
}

//! Reed–Solomon codec backed by `reed-solomon-erasure`

use reed_solomon_erasure::galois_8::ReedSolomon;
use tracing::{debug, warn};

use super::{EncodedBlock, ErasureCodec, Symbol, frame, into_block, select_symbols, unframe};
use crate::domain::CodingConfig;
use crate::error::{Error, Result};

/// Matrix-based systematic Reed–Solomon codec
///
/// The backend cannot attribute a bad codeword to one shard, so surplus
/// inconsistencies surface as `DecodeFailure` rather than `SymbolMismatch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReedSolomonCodec;

fn backend(config: &CodingConfig) -> Result<ReedSolomon> {
    Ok(ReedSolomon::new(
        usize::from(config.data_symbols()),
        usize::from(config.parity_symbols()),
    )?)
}

impl ErasureCodec for ReedSolomonCodec {
    fn name(&self) -> &'static str {
        "reed-solomon"
    }

    fn encode(&self, config: &CodingConfig, data: &[u8]) -> Result<EncodedBlock> {
        let framed = frame(config, data);
        let parity_count = usize::from(config.parity_symbols());

        // The backend rejects blocks without parity; those are plain chunking
        let parity = if parity_count == 0 {
            Vec::new()
        } else {
            let rs = backend(config)?;
            let mut shards = framed.data_symbols.clone();
            shards.resize(shards.len() + parity_count, vec![0u8; framed.width]);
            rs.encode(&mut shards)?;
            shards.split_off(usize::from(config.data_symbols()))
        };

        debug!(
            codec = self.name(),
            k = config.data_symbols(),
            n = config.total_symbols(),
            width = framed.width,
            "encoded payload"
        );
        Ok(into_block(config, framed, parity))
    }

    fn decode(&self, config: &CodingConfig, symbols: &[Symbol]) -> Result<Vec<u8>> {
        let ordered = select_symbols(config, symbols)?;
        let k = usize::from(config.data_symbols());

        let mut shards: Vec<Option<Vec<u8>>> = vec![None; usize::from(config.total_symbols())];
        for symbol in &ordered {
            shards[usize::from(symbol.position)] = Some(symbol.value.clone());
        }

        if config.parity_symbols() > 0 {
            let rs = backend(config)?;
            rs.reconstruct(shards.as_mut_slice())?;

            if ordered.len() > k {
                let complete = shards
                    .iter()
                    .map(|shard| {
                        shard
                            .clone()
                            .ok_or_else(|| Error::decode("backend left a shard unreconstructed"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                if !rs.verify(complete.as_slice())? {
                    warn!(
                        supplied = ordered.len(),
                        "supplied symbols do not form a valid codeword"
                    );
                    return Err(Error::decode(
                        "supplied symbols do not form a valid codeword",
                    ));
                }
            }
        }

        let data_symbols = shards
            .into_iter()
            .take(k)
            .map(|shard| {
                shard.ok_or_else(|| Error::decode("data symbol missing after reconstruction"))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            codec = self.name(),
            supplied = symbols.len(),
            k,
            "decoded payload"
        );
        unframe(&data_symbols)
    }
}

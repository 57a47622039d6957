//! Systematic evaluation code over GF(2^8)
//!
//! Byte `c` of the `k` data symbols is read as the values at `x = 0..k` of the
//! unique polynomial of degree below `k`; parity symbol `j` holds that
//! polynomial's value at `x = j`. Any `k` symbols fix the polynomial, so
//! decoding is Lagrange interpolation back onto the data positions.

use tracing::{debug, warn};

use super::{EncodedBlock, ErasureCodec, Symbol, frame, into_block, select_symbols, unframe};
use crate::domain::CodingConfig;
use crate::error::{Error, Result};
use crate::field::{Field, Gf256};
use crate::poly;

/// Lagrange-interpolation erasure codec
#[derive(Debug, Clone, Copy, Default)]
pub struct LagrangeCodec;

/// Evaluates column-wise at `target` the polynomial through `points`
fn extrapolate(points: &[(u8, &[u8])], target: u8, width: usize) -> Result<Vec<u8>> {
    let xs: Vec<u8> = points.iter().map(|&(x, _)| x).collect();
    let weights = poly::lagrange_weights(&Gf256, &xs, target)?;

    let mut out = vec![0u8; width];
    for (&weight, &(_, values)) in weights.iter().zip(points) {
        if weight == 0 {
            continue;
        }
        for (acc, &value) in out.iter_mut().zip(values) {
            *acc = Gf256.add(*acc, Gf256.mul(weight, value));
        }
    }
    Ok(out)
}

/// Evaluation point of a block position (positions never exceed 255)
fn point(position: u16) -> Result<u8> {
    u8::try_from(position)
        .map_err(|_| Error::invalid(format!("position {position} is not a GF(2^8) element")))
}

impl ErasureCodec for LagrangeCodec {
    fn name(&self) -> &'static str {
        "lagrange"
    }

    fn encode(&self, config: &CodingConfig, data: &[u8]) -> Result<EncodedBlock> {
        let framed = frame(config, data);
        let points = framed
            .data_symbols
            .iter()
            .zip(0u16..)
            .map(|(values, position)| Ok((point(position)?, values.as_slice())))
            .collect::<Result<Vec<_>>>()?;

        let parity = (config.data_symbols()..config.total_symbols())
            .map(|position| extrapolate(&points, point(position)?, framed.width))
            .collect::<Result<Vec<_>>>()?;

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
        let width = ordered[0].value.len();

        let (basis, surplus) = ordered.split_at(k);
        let points = basis
            .iter()
            .map(|s| Ok((point(s.position)?, s.value.as_slice())))
            .collect::<Result<Vec<_>>>()?;

        for symbol in surplus {
            let expected = extrapolate(&points, point(symbol.position)?, width)?;
            if expected != symbol.value {
                warn!(
                    position = symbol.position,
                    "surplus symbol disagrees with the codeword"
                );
                return Err(Error::SymbolMismatch {
                    position: symbol.position,
                });
            }
        }

        let data_symbols = (0..config.data_symbols())
            .map(|position| match basis.iter().find(|s| s.position == position) {
                Some(symbol) => Ok(symbol.value.clone()),
                None => extrapolate(&points, point(position)?, width),
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

#[cfg(test)]
mod tests {
    use super::*;

    fn block(k: u16, n: u16, data: &[u8]) -> (CodingConfig, EncodedBlock) {
        let config = CodingConfig::new(k, n).unwrap();
        let block = LagrangeCodec.encode(&config, data).unwrap();
        (config, block)
    }

    #[test]
    fn test_encode_is_systematic() {
        let data = b"0123456789ab";
        let (_, block) = block(4, 6, data);
        assert_eq!(block.symbols().len(), 6);
        assert_eq!(block.symbol_width(), 5);
        assert_eq!(block.original_len(), 12);

        let mut prefix = (data.len() as u64).to_be_bytes().to_vec();
        prefix.extend_from_slice(data);
        let systematic: Vec<u8> = block.symbols()[..4]
            .iter()
            .flat_map(|s| s.value.clone())
            .collect();
        assert_eq!(systematic, prefix);
    }

    #[test]
    fn test_decode_from_parity_heavy_subset() {
        let data = b"Transaction ID,User ID,Amount\n1,123,100\n";
        let (config, block) = block(3, 7, data);
        let subset: Vec<Symbol> = [6, 4, 5]
            .iter()
            .map(|&p| block.symbol(p).unwrap().clone())
            .collect();
        assert_eq!(LagrangeCodec.decode(&config, &subset).unwrap(), data);
    }

    #[test]
    fn test_corrupted_surplus_symbol_reported_by_position() {
        let data = b"twelve bytes";
        let (config, block) = block(4, 6, data);
        let mut symbols = block.into_symbols();
        symbols[5].value[0] ^= 0x01;

        let result = LagrangeCodec.decode(&config, &symbols);
        assert!(matches!(result, Err(Error::SymbolMismatch { position: 5 })));
    }

    #[test]
    fn test_corrupted_basis_symbol_detected_by_surplus() {
        let data = b"twelve bytes";
        let (config, block) = block(4, 6, data);
        let mut symbols = block.into_symbols();
        symbols[0].value[2] ^= 0xff;

        let result = LagrangeCodec.decode(&config, &symbols);
        assert!(matches!(result, Err(Error::SymbolMismatch { .. })));
    }

    #[test]
    fn test_full_width_block() {
        let data: Vec<u8> = (0..=255).collect();
        let (config, block) = block(200, 256, &data);
        let subset: Vec<Symbol> = block.symbols()[56..].to_vec();
        assert_eq!(LagrangeCodec.decode(&config, &subset).unwrap(), data);
    }
}

//! GF(2^8) arithmetic with compile-time log/exp tables

use super::Field;
use crate::error::{Error, Result};

/// Reduction polynomial x^8 + x^4 + x^3 + x^2 + 1
const REDUCTION_POLY: u16 = 0x11d;

struct Tables {
    /// `exp[i] = 2^i`, doubled in length so `log a + log b` never needs reducing
    exp: [u8; 512],
    log: [u8; 256],
}

static TABLES: Tables = build_tables();

const fn build_tables() -> Tables {
    let mut exp = [0u8; 512];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= REDUCTION_POLY;
        }
        i += 1;
    }
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    Tables { exp, log }
}

/// The field GF(2^8); addition and subtraction are both XOR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gf256;

impl Field for Gf256 {
    type Elem = u8;

    fn zero(&self) -> u8 {
        0
    }

    fn one(&self) -> u8 {
        1
    }

    fn from_u64(&self, value: u64) -> Result<u8> {
        u8::try_from(value)
            .map_err(|_| Error::invalid(format!("{value} is not an element of GF(2^8)")))
    }

    fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    fn sub(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let index = usize::from(TABLES.log[usize::from(a)]) + usize::from(TABLES.log[usize::from(b)]);
        TABLES.exp[index]
    }

    fn inv(&self, a: u8) -> Result<u8> {
        if a == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(TABLES.exp[255 - usize::from(TABLES.log[usize::from(a)])])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bitwise reference multiplication
    fn slow_mul(mut a: u8, mut b: u8) -> u8 {
        let mut product = 0u8;
        while b != 0 {
            if b & 1 != 0 {
                product ^= a;
            }
            let carry = a & 0x80 != 0;
            a <<= 1;
            if carry {
                a ^= (REDUCTION_POLY & 0xff) as u8;
            }
            b >>= 1;
        }
        product
    }

    #[test]
    fn test_mul_matches_reference() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(Gf256.mul(a, b), slow_mul(a, b), "{a} * {b}");
            }
        }
    }

    #[test]
    fn test_every_nonzero_element_has_inverse() {
        for a in 1..=255u8 {
            let inv = Gf256.inv(a).unwrap();
            assert_eq!(Gf256.mul(a, inv), 1);
        }
        assert!(matches!(Gf256.inv(0), Err(Error::DivisionByZero)));
    }

    #[test]
    fn test_pow() {
        // 2 generates the multiplicative group, so 2^255 = 1
        assert_eq!(Gf256.pow(2, 255), 1);
        assert_eq!(Gf256.pow(2, 8), 0x1d);
        assert_eq!(Gf256.pow(0, 0), 1);
    }

    #[test]
    fn test_from_u64_bounds() {
        assert_eq!(Gf256.from_u64(255).unwrap(), 255);
        assert!(Gf256.from_u64(256).is_err());
    }
}

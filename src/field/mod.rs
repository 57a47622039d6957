//! Finite field arithmetic
//!
//! Two fields back the engine:
//! - [`PrimeField`] - integers modulo a 64-bit prime, used for secret sharing
//! - [`Gf256`] - GF(2^8), used by the byte-oriented erasure codecs
//!
//! Both implement [`Field`], so polynomial evaluation and Lagrange
//! interpolation in [`crate::poly`] are written once.

mod gf256;
mod prime;

pub use gf256::Gf256;
pub use prime::PrimeField;

use crate::error::{Error, Result};

/// Arithmetic over a fixed finite field
pub trait Field {
    /// Field element representation
    type Elem: Copy + Eq + std::fmt::Debug;

    /// Additive identity
    fn zero(&self) -> Self::Elem;

    /// Multiplicative identity
    fn one(&self) -> Self::Elem;

    /// Maps a small integer (an evaluation point) into the field
    ///
    /// # Errors
    /// Returns `InvalidParameters` if the value is not a field element
    fn from_u64(&self, value: u64) -> Result<Self::Elem>;

    fn add(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;

    fn sub(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;

    fn mul(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;

    /// Multiplicative inverse
    ///
    /// # Errors
    /// Returns `DivisionByZero` for the zero element
    fn inv(&self, a: Self::Elem) -> Result<Self::Elem>;

    /// Computes `a / b`
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `b` is zero
    fn div(&self, a: Self::Elem, b: Self::Elem) -> Result<Self::Elem> {
        Ok(self.mul(a, self.inv(b)?))
    }

    /// Raises `base` to `exp` by repeated squaring
    fn pow(&self, base: Self::Elem, mut exp: u64) -> Self::Elem {
        let mut result = self.one();
        let mut square = base;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, square);
            }
            square = self.mul(square, square);
            exp >>= 1;
        }
        result
    }
}

/// Field identifier carried in canonical encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FieldKind {
    /// Integers modulo a prime
    Prime = 0x01,
    /// GF(2^8)
    Binary8 = 0x02,
}

impl FieldKind {
    /// Wire tag for this field
    #[must_use]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Parses a wire tag
    ///
    /// # Errors
    /// Returns an encoding error for unknown tags
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0x01 => Ok(Self::Prime),
            0x02 => Ok(Self::Binary8),
            other => Err(Error::encoding(format!("unknown field tag 0x{other:02x}"))),
        }
    }
}

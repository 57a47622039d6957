//! Prime field arithmetic over 64-bit moduli

use rand::{CryptoRng, Rng, RngCore};

use super::Field;
use crate::error::{Error, Result};

/// Witnesses that make Miller-Rabin deterministic for every `u64`
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Integers modulo a prime `p < 2^64`
///
/// Invariant: `modulus` is prime and at least 3 (enforced at construction).
/// Elements are plain `u64` values in `[0, p)`; products use 128-bit
/// intermediates so no modulus in range can overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: u64,
}

impl PrimeField {
    /// The Mersenne prime `2^61 - 1`, the default sharing field
    pub const MERSENNE_61: u64 = (1 << 61) - 1;

    /// Creates a prime field
    ///
    /// # Errors
    /// Returns `InvalidParameters` if `modulus` is not a prime of at least 3
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharevault::field::PrimeField;
    ///
    /// let field = PrimeField::new(257).unwrap();
    /// assert_eq!(field.modulus(), 257);
    ///
    /// assert!(PrimeField::new(256).is_err());
    /// assert!(PrimeField::new(2).is_err());
    /// ```
    pub fn new(modulus: u64) -> Result<Self> {
        if modulus < 3 {
            return Err(Error::invalid(format!(
                "field modulus must be at least 3 (got {modulus})"
            )));
        }
        if !is_prime(modulus) {
            return Err(Error::invalid(format!("field modulus {modulus} is not prime")));
        }
        Ok(Self { modulus })
    }

    /// The default field, modulo `2^61 - 1`
    #[must_use]
    pub fn mersenne61() -> Self {
        Self {
            modulus: Self::MERSENNE_61,
        }
    }

    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Checks that `value` is a canonical element
    ///
    /// # Errors
    /// Returns `InvalidParameters` if `value >= modulus`
    pub fn element(&self, value: u64) -> Result<u64> {
        if value >= self.modulus {
            return Err(Error::invalid(format!(
                "value must be below the field modulus {}",
                self.modulus
            )));
        }
        Ok(value)
    }

    /// Draws a uniformly random element
    pub fn random<R: RngCore + CryptoRng>(&self, rng: &mut R) -> u64 {
        rng.gen_range(0..self.modulus)
    }
}

impl Default for PrimeField {
    fn default() -> Self {
        Self::mersenne61()
    }
}

impl Field for PrimeField {
    type Elem = u64;

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn from_u64(&self, value: u64) -> Result<u64> {
        self.element(value)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "result is reduced modulo a u64 modulus"
    )]
    fn add(&self, a: u64, b: u64) -> u64 {
        ((u128::from(a) + u128::from(b)) % u128::from(self.modulus)) as u64
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "result is reduced modulo a u64 modulus"
    )]
    fn sub(&self, a: u64, b: u64) -> u64 {
        let p = u128::from(self.modulus);
        ((u128::from(a) + p - u128::from(b) % p) % p) as u64
    }

    fn mul(&self, a: u64, b: u64) -> u64 {
        mul_mod(a, b, self.modulus)
    }

    fn inv(&self, a: u64) -> Result<u64> {
        if a % self.modulus == 0 {
            return Err(Error::DivisionByZero);
        }
        // Fermat: a^(p-2) = a^-1 for prime p
        Ok(self.pow(a, self.modulus - 2))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "result is reduced modulo a u64 modulus"
)]
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin primality test for 64-bit integers
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &MILLER_RABIN_BASES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &MILLER_RABIN_BASES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

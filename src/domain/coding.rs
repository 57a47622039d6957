//! Configuration validation for erasure coding

use crate::error::{Error, Result};

/// Validated data and total symbol counts for an erasure-coded block
///
/// Invariant: `1 <= data_symbols <= total_symbols <= 256`. The upper bound
/// is the number of distinct evaluation points in GF(2^8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodingConfig {
    data_symbols: u16,
    total_symbols: u16,
}

impl CodingConfig {
    /// Largest block GF(2^8) can address
    pub const MAX_SYMBOLS: u16 = 256;

    /// Creates a new coding configuration
    ///
    /// # Errors
    /// Returns `InvalidParameters` unless `1 <= k <= n <= 256`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharevault::domain::CodingConfig;
    ///
    /// let config = CodingConfig::new(4, 6).unwrap();
    /// assert_eq!(config.data_symbols(), 4);
    /// assert_eq!(config.parity_symbols(), 2);
    ///
    /// assert!(CodingConfig::new(0, 6).is_err());
    /// assert!(CodingConfig::new(7, 6).is_err());
    /// assert!(CodingConfig::new(4, 257).is_err());
    /// ```
    pub fn new(data_symbols: u16, total_symbols: u16) -> Result<Self> {
        if data_symbols == 0 {
            return Err(Error::invalid("data symbol count must be at least 1"));
        }
        if data_symbols > total_symbols {
            return Err(Error::invalid(format!(
                "data symbol count {data_symbols} cannot exceed total symbol count {total_symbols}"
            )));
        }
        if total_symbols > Self::MAX_SYMBOLS {
            return Err(Error::invalid(format!(
                "total symbol count {total_symbols} exceeds GF(2^8) limit of {}",
                Self::MAX_SYMBOLS
            )));
        }
        Ok(Self {
            data_symbols,
            total_symbols,
        })
    }

    /// Number of symbols any decode needs (`k`)
    #[must_use]
    pub fn data_symbols(&self) -> u16 {
        self.data_symbols
    }

    /// Number of symbols an encode emits (`n`)
    #[must_use]
    pub fn total_symbols(&self) -> u16 {
        self.total_symbols
    }

    /// Redundant symbols (`n - k`)
    #[must_use]
    pub fn parity_symbols(&self) -> u16 {
        self.total_symbols - self.data_symbols
    }

    /// Checks that a symbol position belongs to this block
    ///
    /// # Errors
    /// Returns `InvalidParameters` if `position >= n`
    pub fn check_position(&self, position: u16) -> Result<()> {
        if position >= self.total_symbols {
            return Err(Error::invalid(format!(
                "symbol position {position} is outside a block of {} symbols",
                self.total_symbols
            )));
        }
        Ok(())
    }
}

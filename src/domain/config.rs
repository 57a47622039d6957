//! Configuration validation for threshold secret sharing

use crate::error::{Error, Result};
use crate::field::PrimeField;

use super::{ShareCount, ShareIndex, Threshold};

/// Validated field, threshold and share count
///
/// Enforces two invariants at the type level:
/// - threshold <= `share_count`, so no split asks for more shares than exist
/// - `share_count` < modulus, so indices `1..=n` are distinct non-zero
///   field elements
///
/// Every split, commitment and reconstruction takes this struct, so the
/// field parameters have a single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SharingConfig {
    field: PrimeField,
    threshold: Threshold,
    share_count: ShareCount,
}

impl SharingConfig {
    /// Creates a new sharing configuration
    ///
    /// # Errors
    /// Returns `InvalidParameters` if threshold exceeds share count, or if the
    /// share count does not fit below the field modulus
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharevault::domain::{SharingConfig, Threshold, ShareCount};
    /// use sharevault::field::PrimeField;
    ///
    /// // Valid: threshold <= share_count
    /// let config = SharingConfig::new(
    ///     PrimeField::mersenne61(),
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap()
    /// ).unwrap();
    ///
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    ///
    /// // Invalid: threshold > share_count
    /// let result = SharingConfig::new(
    ///     PrimeField::mersenne61(),
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(3).unwrap()
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(field: PrimeField, threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold > *share_count {
            return Err(Error::invalid(format!(
                "threshold {} cannot exceed share count {}",
                *threshold, *share_count
            )));
        }
        if u64::from(*share_count) >= field.modulus() {
            return Err(Error::invalid(format!(
                "share count {} must be below the field modulus {}",
                *share_count,
                field.modulus()
            )));
        }
        Ok(Self {
            field,
            threshold,
            share_count,
        })
    }

    /// Shorthand for the default field from raw `(t, n)` values
    ///
    /// # Errors
    /// Returns `InvalidParameters` unless `2 <= t <= n`
    pub fn with_defaults(threshold: u16, share_count: u16) -> Result<Self> {
        Self::new(
            PrimeField::default(),
            Threshold::new(threshold)?,
            ShareCount::new(share_count)?,
        )
    }

    /// Gets the sharing field
    #[must_use]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Gets the threshold value
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Gets the share count value
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }

    /// Share indices issued by a split, `1..=n`
    pub fn indices(&self) -> impl Iterator<Item = ShareIndex> {
        (1..=*self.share_count).map(ShareIndex::new_unchecked)
    }

    /// Checks that a share index was issued under this configuration
    ///
    /// # Errors
    /// Returns `InvalidParameters` if the index exceeds the share count
    pub fn check_index(&self, index: ShareIndex) -> Result<()> {
        if *index > *self.share_count {
            return Err(Error::invalid(format!(
                "share index {} exceeds share count {}",
                *index, *self.share_count
            )));
        }
        Ok(())
    }
}

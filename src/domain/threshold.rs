//! Threshold newtype for threshold secret sharing

use crate::error::{Error, Result};

/// Minimum number of shares required for reconstruction (2..)
///
/// Invariant: threshold >= 2 (enforced at construction)
/// A threshold of 1 provides no security benefit since any single share can recover the entire secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u16);

impl Threshold {
    /// Minimum valid threshold
    pub const MIN: u16 = 2;

    /// Creates a new threshold, returning an error if value < 2
    ///
    /// # Errors
    /// Returns `InvalidParameters` if the threshold is less than 2
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharevault::domain::Threshold;
    ///
    /// // Valid threshold (2 or greater)
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// // Invalid: threshold must be at least 2
    /// assert!(Threshold::new(1).is_err());
    /// assert!(Threshold::new(0).is_err());
    /// ```
    pub fn new(value: u16) -> Result<Self> {
        if value < Self::MIN {
            return Err(Error::invalid(format!(
                "threshold must be at least 2 (got {value})"
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for Threshold {
    type Target = u16;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

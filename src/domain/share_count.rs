//! `ShareCount` newtype for threshold secret sharing

use crate::error::{Error, Result};

/// Number of shares to create (2..)
///
/// Every split needs at least as many shares as its threshold, and the
/// smallest valid threshold is 2. The upper bound depends on the field:
/// [`super::SharingConfig`] requires the count to stay below the modulus
/// so every share gets a distinct non-zero evaluation point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareCount(u16);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u16 = 2;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns `InvalidParameters` if count is below 2
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharevault::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(1).is_err());
    /// ```
    pub fn new(value: u16) -> Result<Self> {
        if value < Self::MIN {
            return Err(Error::invalid(format!(
                "share count must be at least 2 (got {value})"
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u16;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

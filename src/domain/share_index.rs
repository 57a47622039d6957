//! `ShareIndex` newtype for threshold secret sharing

use crate::error::{Error, Result};

/// Share index (1..)
///
/// The index is the x-coordinate the polynomial is evaluated at.
/// Index 0 is rejected: the evaluation at zero is the secret itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShareIndex(u16);

impl ShareIndex {
    /// Creates a new share index
    ///
    /// # Errors
    /// Returns `InvalidParameters` if index is 0
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sharevault::domain::ShareIndex;
    ///
    /// let index = ShareIndex::new(1).unwrap();
    /// assert_eq!(*index, 1);
    ///
    /// // Invalid: 0 would evaluate the polynomial at the secret
    /// assert!(ShareIndex::new(0).is_err());
    /// ```
    pub fn new(value: u16) -> Result<Self> {
        if value == 0 {
            return Err(Error::invalid("share index 0 is reserved for the secret"));
        }
        Ok(Self(value))
    }

    /// Creates a share index without validation
    ///
    /// Used for indices generated by the engine itself, which start at 1.
    pub(crate) fn new_unchecked(value: u16) -> Self {
        debug_assert!(value != 0, "share index 0 is reserved");
        Self(value)
    }
}

impl std::ops::Deref for ShareIndex {
    type Target = u16;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ShareIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

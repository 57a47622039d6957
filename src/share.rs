//! Secrets and the shares they are split into

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::ShareIndex;

/// A field element to be shared
///
/// The value is zeroized when dropped and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret(u64);

impl Secret {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Reads the secret value
    #[must_use]
    pub fn expose(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// One evaluation `(index, f(index))` of a sharing polynomial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Share {
    index: ShareIndex,
    value: u64,
}

impl Share {
    #[must_use]
    pub fn new(index: ShareIndex, value: u64) -> Self {
        Self { index, value }
    }

    #[must_use]
    pub fn index(&self) -> ShareIndex {
        self.index
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.value
    }
}

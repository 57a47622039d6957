//! Error taxonomy shared by every engine operation

use thiserror::Error;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Canonical error type exposed by the sharing, commitment and erasure layers.
///
/// Every variant is recoverable at the caller's boundary. None of the
/// operations return a partial result once a check has failed.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed `n`/`t`/`k`, an out-of-range secret or a non-prime modulus.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A field inverse of zero was requested.
    #[error("division by zero in field arithmetic")]
    DivisionByZero,

    /// Two supplied shares (or symbols) carry the same evaluation point.
    #[error("duplicate index {0} in supplied input")]
    DuplicateIndex(u16),

    /// Fewer shares than the threshold were supplied.
    #[error("insufficient shares: need at least {required}, but only {provided} provided")]
    InsufficientShares { provided: usize, required: usize },

    /// Fewer symbols than the data symbol count were supplied.
    #[error("insufficient symbols: need at least {required}, but only {provided} provided")]
    InsufficientSymbols { provided: usize, required: usize },

    /// Surplus shares disagree with the polynomial fixed by the others.
    #[error("supplied shares are inconsistent; at least one share is corrupted")]
    InconsistentShares,

    /// A surplus symbol does not match the codeword fixed by the others.
    #[error("symbol at position {position} is inconsistent with the codeword")]
    SymbolMismatch { position: u16 },

    /// Erasure data could not be decoded into a valid payload.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// A share or symbol failed verification against its commitment.
    #[error("commitment mismatch for index {index}")]
    CommitmentMismatch { index: u16 },

    /// Too few inputs survived commitment verification.
    #[error(
        "quorum not met: {verified} verified, {rejected} rejected, {required} required"
    )]
    QuorumNotMet {
        verified: usize,
        rejected: usize,
        required: usize,
    },

    /// Canonical bytes or armored text are malformed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Failure reported by the Reed–Solomon backend.
    #[error("reed-solomon error: {0}")]
    ReedSolomon(#[from] reed_solomon_erasure::Error),
}

impl Error {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters(msg.into())
    }

    pub(crate) fn encoding<S: Into<String>>(msg: S) -> Self {
        Self::Encoding(msg.into())
    }

    pub(crate) fn decode<S: Into<String>>(msg: S) -> Self {
        Self::DecodeFailure(msg.into())
    }
}

//! Threshold secret sharing, share commitments and erasure coding
//!
//! - [`shamir`] splits a field element into `n` shares, any `t` of which
//!   reconstruct it
//! - [`commitment`] binds shares and symbols to published hashes
//! - [`erasure`] codes payloads so any `k` of `n` symbols recover them
//! - [`recovery`] ties the three together into verify-then-rebuild workflows
//!
//! Parameters always travel as an explicit [`domain::SharingConfig`] or
//! [`domain::CodingConfig`].

pub mod armor;
#[cfg(feature = "cli")]
pub mod cli;
pub mod commands;
pub mod commitment;
pub mod domain;
pub mod erasure;
pub mod error;
pub mod field;
pub mod poly;
pub mod recovery;
pub mod shamir;
pub mod share;
pub mod wire;

pub use error::{Error, Result};
pub use share::{Secret, Share};

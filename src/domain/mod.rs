//! Domain types for threshold secret sharing and erasure coding
//!
//! This module contains validated newtypes and configuration:
//! - [`Threshold`] - Minimum shares required for reconstruction (2..)
//! - [`ShareIndex`] - Share identifier and evaluation point (1..)
//! - [`ShareCount`] - Total number of shares to create (2..)
//! - [`SharingConfig`] - Validated field, threshold and share count
//! - [`CodingConfig`] - Validated data and total symbol counts

mod coding;
mod config;
mod share_count;
mod share_index;
mod threshold;

pub use coding::CodingConfig;
pub use config::SharingConfig;
pub use share_count::ShareCount;
pub use share_index::ShareIndex;
pub use threshold::Threshold;

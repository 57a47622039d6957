//! Property-based tests for sharevault
//!
//! This test suite uses quickcheck to verify correctness across random inputs,
//! including random secrets, thresholds, payloads and share or symbol selections.
//!
//! Run with: cargo test --test proptests

#[path = "proptests/armor.rs"]
mod armor;

#[path = "proptests/erasure.rs"]
mod erasure;

#[path = "proptests/split_combine.rs"]
mod split_combine;

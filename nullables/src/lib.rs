//! Nullable infrastructure for deterministic testing.
//!
//! The only external dependency of a voting session is its source of
//! randomness. This crate provides a test-friendly implementation that:
//! - Returns scripted values
//! - Can be controlled programmatically
//! - Never touches OS entropy
//!
//! Usage: swap the seeded branch source for a nullable one in tests.

pub mod random;

pub use random::NullBranchSource;

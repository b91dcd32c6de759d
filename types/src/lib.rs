//! Fundamental types for the FFG checkpoint-voting simulator.
//!
//! This crate defines the identifiers shared across every other crate in the
//! workspace: validator ids, deposit weights, round indices, checkpoint ids
//! and the left/right branch choice.

pub mod checkpoint;
pub mod validator;

pub use checkpoint::{Branch, CheckpointId, RoundIndex};
pub use validator::{ValidatorId, Weight};

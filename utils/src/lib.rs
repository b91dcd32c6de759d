//! Shared utilities for the FFG checkpoint-voting simulator.

pub mod logging;

pub use logging::{init_logging, LogFormat};

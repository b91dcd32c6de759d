//! FFG simulation runner — wires configuration, the voting session and
//! reporting together.
//!
//! - [`config`] — TOML-backed [`SimulationConfig`] (defaults to the reference run).
//! - [`simulation`] — Builds and runs a session from a config.
//! - [`report`] — [`ChainReport`] and its text / JSON renderings.
//! - [`shutdown`] — Signal-driven cancellation.
//! - [`tracing_spans`] — Shared span constructors.

pub mod config;
pub mod error;
pub mod report;
pub mod shutdown;
pub mod simulation;
pub mod tracing_spans;

pub use config::{SimulationConfig, ValidatorEntry};
pub use error::SimError;
pub use report::{ChainReport, OutputFormat};
pub use shutdown::ShutdownController;
pub use simulation::Simulation;

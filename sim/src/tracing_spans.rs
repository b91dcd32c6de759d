//! Pre-built [`tracing::Span`] constructors for simulation operations.
//!
//! Using consistent span names and field sets makes it easy to filter and
//! correlate the per-round events emitted by the consensus crate.

use tracing::{info_span, Span};

pub use ffg_consensus::tracing_spans::round_span;

/// Span covering one full voting session.
pub fn session_span(validators: usize, total_checkpoints: u64, seed: Option<u64>) -> Span {
    info_span!(
        "session",
        validators = validators,
        checkpoints = total_checkpoints,
        seed = ?seed,
    )
}

/// Span covering the rendering of a report.
pub fn report_span(format: &str, links: usize) -> Span {
    info_span!("report", format = %format, links = links)
}

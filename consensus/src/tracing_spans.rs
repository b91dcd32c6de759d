//! [`tracing::Span`] constructors for session operations.

use ffg_types::RoundIndex;
use tracing::{info_span, Span};

/// Span covering one checkpoint round: vote casting, aggregation and link
/// recording.
pub fn round_span(round: RoundIndex) -> Span {
    info_span!("round", round = round)
}

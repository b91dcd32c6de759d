//! Consensus — supermajority checkpoint links from weighted validator votes.
//!
//! A fixed set of validators, each with a deposit weight, votes once per
//! checkpoint round for one of the round's two candidate checkpoints. A
//! candidate becomes a link of the finalized chain when the validators voting
//! for it hold strictly more than half of the total deposit weight.
//!
//! ## Module overview
//!
//! - [`validator`] — Validator identity, weight and append-only vote history.
//! - [`aggregator`] — Single-pass tally and supermajority resolution.
//! - [`session`] — Session state machine (Uninitialized → Configured → Running → Completed).
//! - [`random`] — Injectable branch source with a seeded implementation.
//! - [`link`] — Recorded links and the finalized-link report data.
//! - [`cancel`] — Round-boundary cancellation token.
//! - [`tracing_spans`] — Per-round span constructor.
//! - [`error`] — Session error types.

pub mod aggregator;
pub mod cancel;
pub mod error;
pub mod link;
pub mod random;
pub mod session;
pub mod tracing_spans;
pub mod validator;

pub use aggregator::{RoundTally, RoundVote, VoteAggregator};
pub use cancel::CancelToken;
pub use error::SessionError;
pub use link::{CheckpointLink, FinalizedLink, RunSummary};
pub use random::{BranchSource, SeededBranchSource};
pub use session::{SessionState, VotingSession};
pub use validator::Validator;

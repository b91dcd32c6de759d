//! Resolved checkpoint links and the data handed to reporters.

use ffg_types::{CheckpointId, RoundIndex, ValidatorId, Weight};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A supermajority link recorded for one round. Immutable once recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointLink {
    pub round: RoundIndex,
    pub target: CheckpointId,
    /// Summed deposit weight behind `target` in that round.
    pub weight: Weight,
}

/// A recorded link together with the validators whose vote matched it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedLink {
    pub round: RoundIndex,
    pub target: CheckpointId,
    pub weight: Weight,
    pub supporting_validators: BTreeSet<ValidatorId>,
}

/// Outcome of a call to `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub rounds_completed: u64,
    pub links_recorded: usize,
    /// Whether the run stopped early on a cancellation request.
    pub cancelled: bool,
}

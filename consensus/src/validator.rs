//! Validator — a weighted voter with an append-only vote history.

use crate::random::BranchSource;
use ffg_types::{Branch, CheckpointId, RoundIndex, ValidatorId, Weight};
use serde::{Deserialize, Serialize};

/// A staked validator taking part in a voting session.
///
/// Holds one vote per completed round, in round order. The history is only
/// ever appended to, and only through [`Validator::cast_vote`] or
/// [`Validator::record_vote`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Validator {
    id: ValidatorId,
    deposit_weight: Weight,
    votes: Vec<CheckpointId>,
}

impl Validator {
    pub(crate) fn new(id: ValidatorId, deposit_weight: Weight) -> Self {
        Self {
            id,
            deposit_weight,
            votes: Vec::new(),
        }
    }

    pub fn id(&self) -> ValidatorId {
        self.id
    }

    pub fn deposit_weight(&self) -> Weight {
        self.deposit_weight
    }

    /// Every vote cast so far; entry `r` is the vote for round `r`.
    pub fn votes(&self) -> &[CheckpointId] {
        &self.votes
    }

    /// The vote cast in `round`, if that round has been played.
    pub fn vote_for_round(&self, round: RoundIndex) -> Option<CheckpointId> {
        usize::try_from(round)
            .ok()
            .and_then(|idx| self.votes.get(idx).copied())
    }

    /// Draw a branch from `source` and vote for the matching child of `round`.
    pub fn cast_vote(&mut self, round: RoundIndex, source: &mut dyn BranchSource) -> CheckpointId {
        let branch = source.next_branch();
        self.record_vote(round, branch)
    }

    /// Vote for `branch` in `round` using a branch drawn earlier.
    pub fn record_vote(&mut self, round: RoundIndex, branch: Branch) -> CheckpointId {
        debug_assert_eq!(
            self.votes.len() as u64,
            round,
            "validator {} voting out of round order",
            self.id
        );
        let target = branch.target(round);
        tracing::trace!(
            validator = %self.id,
            round,
            branch = branch.as_str(),
            target = %target,
            "vote recorded"
        );
        self.votes.push(target);
        target
    }
}

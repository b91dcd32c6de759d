//! Vote aggregation — resolves one round's votes into at most one link.
//!
//! A target wins a round when the summed deposit weight of the validators
//! voting for it is strictly greater than half of the total weight taking
//! part in that round. Comparison is exact integer arithmetic:
//! `weight > total / 2` with floor division is equivalent to the real-valued
//! test for integer weights.
//!
//! With one vote per validator at most one target can pass. Equal-weight
//! winners are still resolved towards the lowest target id.

use ffg_types::{CheckpointId, ValidatorId, Weight};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A single validator's vote in one round, carrying its deposit weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundVote {
    pub validator: ValidatorId,
    pub target: CheckpointId,
    pub weight: Weight,
}

impl RoundVote {
    pub fn new(validator: ValidatorId, target: CheckpointId, weight: Weight) -> Self {
        Self {
            validator,
            target,
            weight,
        }
    }
}

/// Per-target weight totals for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundTally {
    /// target → summed weight of the validators voting for it.
    weights: BTreeMap<CheckpointId, Weight>,
    /// Summed weight of every participating validator.
    total_weight: Weight,
}

impl RoundTally {
    pub fn weight_for(&self, target: &CheckpointId) -> Weight {
        self.weights.get(target).copied().unwrap_or(0)
    }

    pub fn weights(&self) -> &BTreeMap<CheckpointId, Weight> {
        &self.weights
    }

    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Weight a target must strictly exceed to win.
    pub fn threshold(&self) -> Weight {
        self.total_weight / 2
    }

    pub fn passes(&self, weight: Weight) -> bool {
        weight > self.threshold()
    }

    /// The heaviest target above the threshold, with its weight.
    pub fn supermajority(&self) -> Option<(CheckpointId, Weight)> {
        let mut best: Option<(CheckpointId, Weight)> = None;
        for (&target, &weight) in &self.weights {
            if !self.passes(weight) {
                continue;
            }
            // Ascending key order plus a strict `>` keeps the lowest id on ties.
            if best.map_or(true, |(_, best_weight)| weight > best_weight) {
                best = Some((target, weight));
            }
        }
        best
    }
}

/// Stateless resolver for a round's supermajority link.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoteAggregator;

impl VoteAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Group `votes` by target in a single pass.
    ///
    /// A validator appearing more than once only counts with its first vote,
    /// so weight is never split or double-counted.
    pub fn tally(&self, votes: &[RoundVote]) -> RoundTally {
        let mut seen = HashSet::with_capacity(votes.len());
        let mut tally = RoundTally::default();

        for vote in votes {
            if !seen.insert(vote.validator) {
                tracing::warn!(
                    validator = %vote.validator,
                    target = %vote.target,
                    "ignoring duplicate vote in round"
                );
                continue;
            }
            let entry = tally.weights.entry(vote.target).or_insert(0);
            *entry = entry.saturating_add(vote.weight);
            tally.total_weight = tally.total_weight.saturating_add(vote.weight);
        }

        tally
    }

    /// The winning target for this round, or `None` when no target has a
    /// strict majority of the participating weight.
    pub fn resolve(&self, votes: &[RoundVote]) -> Option<CheckpointId> {
        self.tally(votes).supermajority().map(|(target, _)| target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(validator: u64, target: u64, weight: Weight) -> RoundVote {
        RoundVote::new(ValidatorId::new(validator), CheckpointId::new(target), weight)
    }

    fn cp(id: u64) -> CheckpointId {
        CheckpointId::new(id)
    }

    #[test]
    fn unanimous_vote_wins() {
        let votes = [vote(0, 1, 60), vote(1, 1, 40)];
        assert_eq!(VoteAggregator::new().resolve(&votes), Some(cp(1)));
    }

    #[test]
    fn heavier_side_wins_split_vote() {
        // 60 > 50, 40 <= 50
        let votes = [vote(0, 1, 60), vote(1, 2, 40)];
        assert_eq!(VoteAggregator::new().resolve(&votes), Some(cp(1)));
    }

    #[test]
    fn three_validator_scenario() {
        // group 1 = 100, group 2 = 50, total = 150, half = 75
        let votes = [vote(0, 1, 60), vote(1, 1, 40), vote(2, 2, 50)];
        let tally = VoteAggregator::new().tally(&votes);

        assert_eq!(tally.total_weight(), 150);
        assert_eq!(tally.threshold(), 75);
        assert_eq!(tally.weight_for(&cp(1)), 100);
        assert_eq!(tally.weight_for(&cp(2)), 50);
        assert_eq!(tally.supermajority(), Some((cp(1), 100)));
    }

    #[test]
    fn exact_half_does_not_pass() {
        let votes = [vote(0, 1, 50), vote(1, 2, 50)];
        assert_eq!(VoteAggregator::new().resolve(&votes), None);
    }

    #[test]
    fn odd_total_uses_exact_comparison() {
        // total 151: 76 > 75.5 passes, 75 does not
        let tally = VoteAggregator::new().tally(&[vote(0, 1, 76), vote(1, 2, 75)]);
        assert!(tally.passes(76));
        assert!(!tally.passes(75));
        assert_eq!(tally.supermajority(), Some((cp(1), 76)));
    }

    #[test]
    fn reference_weights_threshold() {
        let weights = [500, 100, 300, 250, 150, 500, 600, 350, 200, 150];
        // 500 + 600 + 350 + 100 = 1550: exactly half, no link
        let left = [0usize, 6, 7, 1];
        let votes: Vec<RoundVote> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| vote(i as u64, if left.contains(&i) { 1 } else { 2 }, w))
            .collect();
        let tally = VoteAggregator::new().tally(&votes);
        assert_eq!(tally.total_weight(), 3100);
        assert_eq!(tally.threshold(), 1550);
        assert_eq!(tally.weight_for(&cp(1)), 1550);
        assert_eq!(tally.weight_for(&cp(2)), 1550);
        assert_eq!(tally.supermajority(), None);

        // Moving validator 4 (150) to the left tips it over.
        let mut votes = votes;
        votes[4].target = cp(1);
        assert_eq!(VoteAggregator::new().resolve(&votes), Some(cp(1)));
    }

    #[test]
    fn empty_round_has_no_link() {
        let tally = VoteAggregator::new().tally(&[]);
        assert_eq!(tally.total_weight(), 0);
        assert_eq!(tally.supermajority(), None);
    }

    #[test]
    fn duplicate_validator_counts_once() {
        let votes = [vote(0, 1, 60), vote(0, 2, 60), vote(1, 2, 40)];
        let tally = VoteAggregator::new().tally(&votes);
        assert_eq!(tally.total_weight(), 100);
        assert_eq!(tally.weight_for(&cp(1)), 60);
        assert_eq!(tally.weight_for(&cp(2)), 40);
    }

    // Built by hand: once duplicate votes are dropped, two targets cannot both
    // exceed half the total, so `tally` never yields this tie.
    #[test]
    fn tie_break_prefers_lowest_target() {
        let tally = RoundTally {
            weights: BTreeMap::from([(cp(4), 10), (cp(3), 10)]),
            total_weight: 10,
        };
        assert_eq!(tally.supermajority(), Some((cp(3), 10)));
    }

    #[test]
    fn resolve_is_idempotent() {
        let aggregator = VoteAggregator::new();
        let votes = [vote(0, 5, 10), vote(1, 6, 30), vote(2, 6, 5)];
        let first = aggregator.resolve(&votes);
        assert_eq!(aggregator.resolve(&votes), first);
        assert_eq!(first, Some(cp(6)));
    }
}

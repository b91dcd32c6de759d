//! Voting session — drives validators through checkpoint rounds.
//!
//! Lifecycle: `Uninitialized → Configured → Running → Completed`.
//! Validators may only be registered before the session runs, and a session
//! runs exactly once. Each round:
//!
//! 1. every validator casts one vote for the round's two candidates,
//! 2. the round's votes are collected (the round barrier),
//! 3. the [`VoteAggregator`] resolves them,
//! 4. a [`CheckpointLink`] is recorded if a target won.
//!
//! Rounds are independent: a round never looks at an earlier round's link.

use crate::aggregator::{RoundVote, VoteAggregator};
use crate::cancel::CancelToken;
use crate::error::SessionError;
use crate::link::{CheckpointLink, FinalizedLink, RunSummary};
use crate::random::{BranchSource, SeededBranchSource};
use crate::tracing_spans::round_span;
use crate::validator::Validator;
use ffg_types::{Branch, RoundIndex, ValidatorId, Weight};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The lifecycle state of a voting session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No validators registered yet.
    Uninitialized,
    /// At least one validator registered; ready to run.
    Configured,
    /// Rounds in progress.
    Running,
    /// All rounds played (or cancelled). Terminal, read-only.
    Completed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Configured => "configured",
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }
}

/// Owns the validator registry, the branch source and the recorded links.
pub struct VotingSession {
    state: SessionState,
    /// Registry in insertion order; votes are cast in this order.
    validators: Vec<Validator>,
    /// validator id → position in `validators`.
    index: HashMap<ValidatorId, usize>,
    /// round → recorded link. Entries are only ever added.
    links: BTreeMap<RoundIndex, CheckpointLink>,
    source: Box<dyn BranchSource>,
    aggregator: VoteAggregator,
    parallel_voting: bool,
    rounds_completed: u64,
}

impl VotingSession {
    /// Create a session drawing every validator's branch from `source`.
    pub fn new(source: impl BranchSource + 'static) -> Self {
        Self {
            state: SessionState::Uninitialized,
            validators: Vec::new(),
            index: HashMap::new(),
            links: BTreeMap::new(),
            source: Box::new(source),
            aggregator: VoteAggregator::new(),
            parallel_voting: false,
            rounds_completed: 0,
        }
    }

    /// Create a session with a reproducible [`SeededBranchSource`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(SeededBranchSource::from_seed(seed))
    }

    /// Apply each round's votes across validators in parallel.
    ///
    /// Branches are still drawn from the single session source in registry
    /// order, so results match the sequential path for the same source.
    pub fn with_parallel_voting(mut self, parallel: bool) -> Self {
        self.parallel_voting = parallel;
        self
    }

    /// Register a validator.
    ///
    /// Fails without touching the registry if the session has already run,
    /// the id is taken, or the weight is zero.
    pub fn add_validator(
        &mut self,
        id: ValidatorId,
        deposit_weight: Weight,
    ) -> Result<(), SessionError> {
        match self.state {
            SessionState::Uninitialized | SessionState::Configured => {}
            SessionState::Running | SessionState::Completed => {
                return Err(SessionError::SessionAlreadyCompleted)
            }
        }
        if self.index.contains_key(&id) {
            return Err(SessionError::DuplicateValidatorId(id));
        }
        if deposit_weight == 0 {
            return Err(SessionError::InvalidWeight {
                validator: id,
                weight: 0,
            });
        }

        self.index.insert(id, self.validators.len());
        self.validators.push(Validator::new(id, deposit_weight));
        self.state = SessionState::Configured;
        tracing::debug!(validator = %id, deposit_weight, "validator registered");
        Ok(())
    }

    /// Play `total_checkpoints` rounds, then complete the session.
    pub fn run(&mut self, total_checkpoints: u64) -> Result<RunSummary, SessionError> {
        self.run_with_cancel(total_checkpoints, &CancelToken::new())
    }

    /// Like [`run`](Self::run), but stops at the next round boundary once
    /// `cancel` is tripped. The session completes either way.
    pub fn run_with_cancel(
        &mut self,
        total_checkpoints: u64,
        cancel: &CancelToken,
    ) -> Result<RunSummary, SessionError> {
        match self.state {
            SessionState::Configured => {}
            SessionState::Uninitialized => return Err(SessionError::NoValidators),
            SessionState::Running | SessionState::Completed => {
                return Err(SessionError::SessionAlreadyCompleted)
            }
        }

        self.state = SessionState::Running;
        tracing::info!(
            validators = self.validators.len(),
            total_weight = self.total_weight(),
            total_checkpoints,
            parallel = self.parallel_voting,
            "voting session started"
        );

        let mut cancelled = false;
        for round in 0..total_checkpoints {
            if cancel.is_cancelled() {
                tracing::warn!(round, "voting session cancelled before round");
                cancelled = true;
                break;
            }
            let _round = round_span(round).entered();
            let votes = self.cast_round(round);
            self.resolve_round(round, &votes);
            self.rounds_completed = round + 1;
        }

        self.state = SessionState::Completed;
        let summary = RunSummary {
            rounds_completed: self.rounds_completed,
            links_recorded: self.links.len(),
            cancelled,
        };
        tracing::info!(
            rounds = summary.rounds_completed,
            links = summary.links_recorded,
            cancelled,
            "voting session completed"
        );
        Ok(summary)
    }

    /// Every validator votes once for `round`; returns the complete round.
    fn cast_round(&mut self, round: RoundIndex) -> Vec<RoundVote> {
        let votes: Vec<RoundVote> = if self.parallel_voting {
            let branches: Vec<Branch> = (0..self.validators.len())
                .map(|_| self.source.next_branch())
                .collect();
            self.validators
                .par_iter_mut()
                .zip(branches.into_par_iter())
                .map(|(validator, branch)| {
                    let target = validator.record_vote(round, branch);
                    RoundVote::new(validator.id(), target, validator.deposit_weight())
                })
                .collect()
        } else {
            let source = self.source.as_mut();
            self.validators
                .iter_mut()
                .map(|validator| {
                    let target = validator.cast_vote(round, &mut *source);
                    RoundVote::new(validator.id(), target, validator.deposit_weight())
                })
                .collect()
        };
        tracing::debug!(round, votes = votes.len(), "round votes cast");
        votes
    }

    fn resolve_round(&mut self, round: RoundIndex, votes: &[RoundVote]) {
        let tally = self.aggregator.tally(votes);
        match tally.supermajority() {
            Some((target, weight)) => {
                tracing::info!(
                    round,
                    target = %target,
                    weight,
                    threshold = tally.threshold(),
                    "supermajority link recorded"
                );
                self.links.insert(
                    round,
                    CheckpointLink {
                        round,
                        target,
                        weight,
                    },
                );
            }
            None => {
                tracing::debug!(
                    round,
                    threshold = tally.threshold(),
                    "no supermajority this round"
                );
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Registered validators in insertion order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn validator(&self, id: ValidatorId) -> Option<&Validator> {
        self.index.get(&id).map(|&idx| &self.validators[idx])
    }

    pub fn links(&self) -> &BTreeMap<RoundIndex, CheckpointLink> {
        &self.links
    }

    /// Sum of all registered deposit weights.
    pub fn total_weight(&self) -> Weight {
        self.validators
            .iter()
            .fold(0, |acc: Weight, v| acc.saturating_add(v.deposit_weight()))
    }

    pub fn rounds_completed(&self) -> u64 {
        self.rounds_completed
    }

    /// Each recorded link with the validators whose vote in that round
    /// matched the chosen target, in round order.
    pub fn finalized_links(&self) -> Vec<FinalizedLink> {
        self.links
            .values()
            .map(|link| FinalizedLink {
                round: link.round,
                target: link.target,
                weight: link.weight,
                supporting_validators: self
                    .validators
                    .iter()
                    .filter(|v| v.vote_for_round(link.round) == Some(link.target))
                    .map(Validator::id)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffg_types::CheckpointId;
    use tracing_test::traced_test;

    struct AlwaysLeft;

    impl BranchSource for AlwaysLeft {
        fn next_branch(&mut self) -> Branch {
            Branch::Left
        }
    }

    fn id(n: u64) -> ValidatorId {
        ValidatorId::new(n)
    }

    fn reference_session(seed: u64) -> VotingSession {
        let mut session = VotingSession::seeded(seed);
        for (i, w) in [500, 100, 300, 250, 150, 500, 600, 350, 200, 150]
            .into_iter()
            .enumerate()
        {
            session.add_validator(id(i as u64), w).unwrap();
        }
        session
    }

    #[test]
    fn new_session_is_uninitialized() {
        let session = VotingSession::new(AlwaysLeft);
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(session.validators().is_empty());
        assert!(session.links().is_empty());
        assert_eq!(session.total_weight(), 0);
    }

    #[test]
    fn add_validator_configures_session() {
        let mut session = VotingSession::new(AlwaysLeft);
        session.add_validator(id(1), 60).unwrap();
        session.add_validator(id(2), 40).unwrap();

        assert_eq!(session.state(), SessionState::Configured);
        assert_eq!(session.total_weight(), 100);
        assert_eq!(session.validator(id(2)).unwrap().deposit_weight(), 40);
    }

    #[test]
    fn duplicate_validator_rejected_without_side_effects() {
        let mut session = VotingSession::new(AlwaysLeft);
        session.add_validator(id(1), 60).unwrap();

        let err = session.add_validator(id(1), 99).unwrap_err();

        assert_eq!(err, SessionError::DuplicateValidatorId(id(1)));
        assert_eq!(session.validators().len(), 1);
        assert_eq!(session.total_weight(), 60);
    }

    #[test]
    fn zero_weight_rejected() {
        let mut session = VotingSession::new(AlwaysLeft);
        let err = session.add_validator(id(1), 0).unwrap_err();
        assert!(matches!(err, SessionError::InvalidWeight { weight: 0, .. }));
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn run_without_validators_fails() {
        let mut session = VotingSession::new(AlwaysLeft);
        assert_eq!(session.run(3), Err(SessionError::NoValidators));
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn unanimous_rounds_all_link() {
        let mut session = VotingSession::new(AlwaysLeft);
        session.add_validator(id(0), 60).unwrap();
        session.add_validator(id(1), 40).unwrap();

        let summary = session.run(3).unwrap();

        assert_eq!(summary.rounds_completed, 3);
        assert_eq!(summary.links_recorded, 3);
        assert!(!summary.cancelled);
        assert_eq!(session.state(), SessionState::Completed);
        for round in 0..3 {
            let link = session.links()[&round];
            assert_eq!(link.target, CheckpointId::left_child(round));
            assert_eq!(link.weight, 100);
        }
    }

    #[test]
    fn second_run_fails() {
        let mut session = VotingSession::new(AlwaysLeft);
        session.add_validator(id(0), 10).unwrap();
        session.run(1).unwrap();

        assert_eq!(session.run(1), Err(SessionError::SessionAlreadyCompleted));
        assert_eq!(
            session.add_validator(id(9), 10),
            Err(SessionError::SessionAlreadyCompleted)
        );
        assert_eq!(session.rounds_completed(), 1);
    }

    #[test]
    fn zero_checkpoints_completes_without_links() {
        let mut session = VotingSession::new(AlwaysLeft);
        session.add_validator(id(0), 10).unwrap();
        let summary = session.run(0).unwrap();
        assert_eq!(summary.rounds_completed, 0);
        assert!(session.links().is_empty());
        assert_eq!(session.state(), SessionState::Completed);
    }

    #[test]
    fn histories_grow_one_vote_per_round() {
        let mut session = reference_session(11);
        session.run(10).unwrap();

        for validator in session.validators() {
            assert_eq!(validator.votes().len(), 10);
            for (round, vote) in validator.votes().iter().enumerate() {
                assert!(vote.is_candidate_of(round as u64));
            }
        }
    }

    #[test]
    fn recorded_links_exceed_half_of_total() {
        let mut session = reference_session(3);
        session.run(10).unwrap();
        assert_eq!(session.total_weight(), 3100);

        for link in session.finalized_links() {
            let support: Weight = link
                .supporting_validators
                .iter()
                .map(|v| session.validator(*v).unwrap().deposit_weight())
                .sum();
            assert_eq!(support, link.weight);
            assert!(support > 1550);
        }
    }

    #[test]
    fn same_seed_same_links() {
        let mut a = reference_session(2024);
        let mut b = reference_session(2024);
        a.run(25).unwrap();
        b.run(25).unwrap();
        assert_eq!(a.links(), b.links());
    }

    #[test]
    fn parallel_voting_matches_sequential() {
        let mut sequential = reference_session(99);
        let mut parallel = reference_session(99).with_parallel_voting(true);
        sequential.run(20).unwrap();
        parallel.run(20).unwrap();

        assert_eq!(sequential.links(), parallel.links());
        for (s, p) in sequential.validators().iter().zip(parallel.validators()) {
            assert_eq!(s.votes(), p.votes());
        }
    }

    #[test]
    fn cancelled_token_stops_before_first_round() {
        let mut session = reference_session(5);
        let cancel = CancelToken::new();
        cancel.cancel();

        let summary = session.run_with_cancel(10, &cancel).unwrap();

        assert!(summary.cancelled);
        assert_eq!(summary.rounds_completed, 0);
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.validators().iter().all(|v| v.votes().is_empty()));
    }

    #[test]
    #[traced_test]
    fn round_events_are_scoped_to_round_span() {
        let mut session = VotingSession::new(AlwaysLeft);
        session.add_validator(id(0), 10).unwrap();
        session.run(3).unwrap();

        assert!(logs_contain("round{round=0}"));
        assert!(logs_contain("round{round=2}"));
        assert!(logs_contain("supermajority link recorded"));
        assert!(!logs_contain("round{round=3}"));
    }
}

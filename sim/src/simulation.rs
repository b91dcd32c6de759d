//! Simulation — builds a voting session from configuration and runs it.

use ffg_consensus::{BranchSource, CancelToken, SeededBranchSource, SessionError, VotingSession};
use ffg_types::{ValidatorId, Weight};

use crate::config::SimulationConfig;
use crate::report::ChainReport;
use crate::tracing_spans::session_span;
use crate::SimError;

/// A configured, not-yet-run voting session.
pub struct Simulation {
    config: SimulationConfig,
    session: VotingSession,
}

impl Simulation {
    /// Build from `config`, seeding the branch source from `config.seed`
    /// (or OS entropy when unset).
    pub fn from_config(config: SimulationConfig) -> Result<Self, SimError> {
        let source = match config.seed {
            Some(seed) => SeededBranchSource::from_seed(seed),
            None => SeededBranchSource::from_entropy(),
        };
        Self::with_source(config, source)
    }

    /// Build from `config` with an explicit branch source.
    pub fn with_source(
        config: SimulationConfig,
        source: impl BranchSource + 'static,
    ) -> Result<Self, SimError> {
        let mut session = VotingSession::new(source).with_parallel_voting(config.parallel_voting);
        for entry in &config.validators {
            let id = ValidatorId::new(entry.id);
            let weight = Weight::try_from(entry.deposit)
                .ok()
                .filter(|&w| w > 0)
                .ok_or(SessionError::InvalidWeight {
                    validator: id,
                    weight: i128::from(entry.deposit),
                })?;
            session.add_validator(id, weight)?;
        }
        Ok(Self { config, session })
    }

    /// Play every configured round, stopping early if `cancel` is tripped.
    pub fn run(&mut self, cancel: &CancelToken) -> Result<ChainReport, SimError> {
        let span = session_span(
            self.session.validators().len(),
            self.config.total_checkpoints,
            self.config.seed,
        );
        let _enter = span.enter();

        let summary = self
            .session
            .run_with_cancel(self.config.total_checkpoints, cancel)?;
        tracing::debug!(state = self.session.state().as_str(), "simulation finished");
        Ok(ChainReport::from_session(&self.session, summary, self.config.seed))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn session(&self) -> &VotingSession {
        &self.session
    }
}

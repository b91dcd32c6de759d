//! Chain report — the finalized links of a completed session, ready to print.

use ffg_consensus::{FinalizedLink, RunSummary, VotingSession};
use ffg_types::Weight;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::str::FromStr;

use crate::SimError;

/// How a [`ChainReport`] is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SimError::Config(format!(
                "unknown output format {other:?}, expected \"text\" or \"json\""
            ))),
        }
    }
}

/// The data handed to presentation: one entry per round that produced a link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainReport {
    pub total_weight: Weight,
    pub rounds_completed: u64,
    pub cancelled: bool,
    pub seed: Option<u64>,
    pub links: Vec<FinalizedLink>,
}

impl ChainReport {
    pub fn from_session(session: &VotingSession, summary: RunSummary, seed: Option<u64>) -> Self {
        Self {
            total_weight: session.total_weight(),
            rounds_completed: summary.rounds_completed,
            cancelled: summary.cancelled,
            seed,
            links: session.finalized_links(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, SimError> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => self.to_json(),
        }
    }

    /// Two sections: the chain of links, then who finalized each one.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Blockchain formed by supermajority links:");
        for link in &self.links {
            let _ = writeln!(out, "Checkpoint {}: {}", link.round, link.target);
        }

        let _ = writeln!(out, "\nFinalized checkpoints by validators:");
        for link in &self.links {
            let ids: Vec<String> = link
                .supporting_validators
                .iter()
                .map(ToString::to_string)
                .collect();
            let _ = writeln!(
                out,
                "Checkpoint {} finalized by validators: {}",
                link.round,
                ids.join(", ")
            );
        }

        if self.cancelled {
            let _ = writeln!(
                out,
                "\nRun cancelled after {} rounds.",
                self.rounds_completed
            );
        }
        out
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        serde_json::to_string_pretty(self).map_err(|e| SimError::Serialization(e.to_string()))
    }
}

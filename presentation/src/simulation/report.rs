//! Serializable results of `generate` and `simulate`

use groupgo_application::StartConsensusOutput;
use groupgo_domain::{
    Consensus, ItineraryOption, OptionId, OptionLetter, OptionSource, Resolution, VoteOutcome,
    VotingStatus,
};
use serde::Serialize;

/// The slate a round opened with
#[derive(Debug, Clone, Serialize)]
pub struct SlateView {
    pub consensus: Consensus,
    pub source: OptionSource,
    pub dropped_inventory: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub options: Vec<ItineraryOption>,
}

impl From<&StartConsensusOutput> for SlateView {
    fn from(output: &StartConsensusOutput) -> Self {
        Self {
            consensus: output.ballot.consensus().clone(),
            source: output.source,
            dropped_inventory: output.dropped_inventory,
            fallback_reason: output.fallback_reason.clone(),
            options: output.ballot.options().into_iter().cloned().collect(),
        }
    }
}

/// What a step did
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Voted {
        letter: OptionLetter,
        outcome: VoteOutcome,
    },
    Resolved {
        letter: OptionLetter,
        resolution: Resolution,
    },
    Failed {
        error: String,
        /// The group must change preferences or inventory before a new round helps
        needs_new_input: bool,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Everything a simulation did, in order
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub slate: SlateView,
    pub steps: Vec<StepRecord>,
    /// Options as they stand after the last step
    pub options: Vec<ItineraryOption>,
    pub status: VotingStatus,
    pub winner: Option<ItineraryOption>,
}

impl SimulationReport {
    /// Letter of an option in the final state, including synthesized ones
    pub fn letter_of(&self, option: OptionId) -> Option<OptionLetter> {
        self.options
            .iter()
            .find(|o| o.id == option)
            .map(|o| o.letter)
    }
}

//! Option drafts: generator output before an option joins a consensus

use super::candidate::{NightCount, PairKey};
use crate::core::ids::InventoryId;
use crate::core::letter::OptionLetter;
use crate::inventory::{Flight, Hotel};
use serde::{Deserialize, Serialize};

/// Where an option came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSource {
    /// Deterministic slate from the candidate generator
    Generated,
    /// Validated proposal from the recommendation service
    Recommended,
    /// Single option created on demand after the pending queue ran out
    Synthesized,
}

impl std::fmt::Display for OptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionSource::Generated => write!(f, "generated"),
            OptionSource::Recommended => write!(f, "recommended"),
            OptionSource::Synthesized => write!(f, "synthesized"),
        }
    }
}

/// A fully priced itinerary ready to become an option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDraft {
    pub letter: OptionLetter,
    pub title: String,
    pub description: String,
    pub destination: String,
    pub flight: Flight,
    pub hotel: Hotel,
    pub activity_ids: Vec<InventoryId>,
    /// Activities are priced separately and not part of `total_cost`
    pub activity_cost: f64,
    pub total_cost: f64,
    pub cost_per_person: f64,
    pub nights: NightCount,
    /// Whether `cost_per_person` fits the median member budget, if any budgets were given
    pub within_budget: Option<bool>,
    pub source: OptionSource,
}

impl OptionDraft {
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.flight.id, &self.hotel.id)
    }
}

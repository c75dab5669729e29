//! Options: candidate itineraries a group votes on

use super::vote::Tally;
use crate::core::ids::{ConsensusId, InventoryId, OptionId};
use crate::core::letter::OptionLetter;
use crate::generation::{NightCount, OptionDraft, OptionSource, PairKey};
use crate::inventory::{Flight, Hotel};
use serde::{Deserialize, Serialize};

/// Option lifecycle: `pending -> active -> accepted | rejected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStatus {
    Pending,
    Active,
    Accepted,
    Rejected,
}

impl OptionStatus {
    /// Accepted and rejected options never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, OptionStatus::Accepted | OptionStatus::Rejected)
    }
}

impl std::fmt::Display for OptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionStatus::Pending => write!(f, "pending"),
            OptionStatus::Active => write!(f, "active"),
            OptionStatus::Accepted => write!(f, "accepted"),
            OptionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One proposed itinerary within a consensus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryOption {
    pub id: OptionId,
    pub consensus_id: ConsensusId,
    pub letter: OptionLetter,
    pub title: String,
    pub description: String,
    pub destination: String,
    pub flight: Flight,
    pub hotel: Hotel,
    pub activity_ids: Vec<InventoryId>,
    pub activity_cost: f64,
    pub total_cost: f64,
    pub cost_per_person: f64,
    pub nights: NightCount,
    pub within_budget: Option<bool>,
    pub status: OptionStatus,
    /// Live votes currently pointing at this option
    pub vote_count: usize,
    /// Activation order; zero until the option is first activated
    pub display_order: u32,
    pub is_winner: bool,
    pub source: OptionSource,
    /// Votes as they stood when the option was resolved
    pub final_tally: Option<Tally>,
}

impl ItineraryOption {
    /// A pending option from a generator draft
    pub fn from_draft(consensus_id: ConsensusId, draft: OptionDraft) -> Self {
        Self {
            id: OptionId::generate(),
            consensus_id,
            letter: draft.letter,
            title: draft.title,
            description: draft.description,
            destination: draft.destination,
            flight: draft.flight,
            hotel: draft.hotel,
            activity_ids: draft.activity_ids,
            activity_cost: draft.activity_cost,
            total_cost: draft.total_cost,
            cost_per_person: draft.cost_per_person,
            nights: draft.nights,
            within_budget: draft.within_budget,
            status: OptionStatus::Pending,
            vote_count: 0,
            display_order: 0,
            is_winner: false,
            source: draft.source,
            final_tally: None,
        }
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(&self.flight.id, &self.hotel.id)
    }

    pub fn is_active(&self) -> bool {
        self.status == OptionStatus::Active
    }

    pub fn is_pending(&self) -> bool {
        self.status == OptionStatus::Pending
    }
}

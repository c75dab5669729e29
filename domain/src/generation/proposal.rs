//! Untrusted option proposals from a recommendation service
//!
//! Proposals reference inventory by id. Anything that does not resolve
//! against the snapshot the proposals were made from is dropped, as is a
//! flight and hotel pair bound for different destinations. Costs are always
//! recomputed here rather than taken from the service.

use super::candidate::{Candidate, PairKey};
use super::draft::{OptionDraft, OptionSource};
use super::generator::{CandidateGenerator, Drafter, GenerationInput, MAX_OPTIONS};
use super::tier::tier_name;
use crate::core::ids::InventoryId;
use crate::core::letter::OptionLetter;
use crate::core::money::round_cents;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One proposed itinerary as returned by a recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedOption {
    /// Ignored: letters are reassigned in returned order
    #[serde(default)]
    pub letter: Option<char>,
    #[serde(default)]
    pub title: String,
    pub flight_id: InventoryId,
    pub hotel_id: InventoryId,
    #[serde(default)]
    pub activity_ids: Vec<InventoryId>,
    #[serde(default)]
    pub reasoning: String,
}

impl ProposedOption {
    pub fn new(flight_id: impl Into<InventoryId>, hotel_id: impl Into<InventoryId>) -> Self {
        Self {
            letter: None,
            title: String::new(),
            flight_id: flight_id.into(),
            hotel_id: hotel_id.into(),
            activity_ids: Vec::new(),
            reasoning: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_activities(mut self, ids: Vec<InventoryId>) -> Self {
        self.activity_ids = ids;
        self
    }
}

/// Result of validating a batch of proposals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdoptedProposals {
    pub drafts: Vec<OptionDraft>,
    /// Proposals discarded for unknown ids, mismatched destinations, repeated
    /// pairs or overflow
    pub dropped: usize,
}

impl CandidateGenerator {
    /// Validate proposals against the inventory snapshot and price them.
    ///
    /// An empty `drafts` list means the caller should use [`CandidateGenerator::generate`].
    pub fn adopt_proposals(
        &self,
        proposals: &[ProposedOption],
        input: &GenerationInput<'_>,
    ) -> AdoptedProposals {
        let drafter = Drafter::new(self.settings(), input);
        let matcher = self.settings().match_strategy.matcher();
        let mut used: HashSet<PairKey> = HashSet::new();
        let mut adopted = AdoptedProposals::default();

        for proposal in proposals {
            let rank = adopted.drafts.len();
            let Some(letter) = OptionLetter::from_index(rank).filter(|_| rank < MAX_OPTIONS) else {
                adopted.dropped += 1;
                continue;
            };
            let (Some(flight), Some(hotel)) = (
                input.inventory.flight(&proposal.flight_id),
                input.inventory.hotel(&proposal.hotel_id),
            ) else {
                adopted.dropped += 1;
                continue;
            };
            if !matcher.matches(&flight.destination, &hotel.destination) {
                adopted.dropped += 1;
                continue;
            }
            let candidate = Candidate::new(
                hotel.destination.clone(),
                flight.clone(),
                hotel.clone(),
                self.settings().nights,
            );
            if !used.insert(candidate.key()) {
                adopted.dropped += 1;
                continue;
            }

            let activities: Vec<_> = proposal
                .activity_ids
                .iter()
                .filter_map(|id| input.inventory.activity(id))
                .cloned()
                .collect();

            let mut draft = drafter.draft(candidate, letter, rank, OptionSource::Recommended);
            draft.title = proposal_title(&proposal.title, rank, &draft.destination);
            if !proposal.reasoning.trim().is_empty() {
                draft.description = proposal.reasoning.trim().to_string();
            }
            draft.activity_ids = activities.iter().map(|a| a.id.clone()).collect();
            draft.activity_cost = round_cents(activities.iter().map(|a| a.price).sum());
            adopted.drafts.push(draft);
        }

        adopted
    }
}

fn proposal_title(proposed: &str, rank: usize, destination: &str) -> String {
    let proposed = proposed.trim();
    let base = if proposed.is_empty() {
        tier_name(rank)
    } else {
        proposed
    };
    if base.to_lowercase().contains(&destination.to_lowercase()) {
        base.to_string()
    } else {
        format!("{} – {}", base, destination)
    }
}

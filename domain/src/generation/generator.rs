//! CandidateGenerator - deterministic option slate from preferences and inventory
//!
//! This is the mandatory generation path. A recommendation service may
//! propose options instead (see [`super::proposal`]), but the voting engine
//! only ever relies on this generator, including when it needs a single
//! replacement option after rotation.

use super::candidate::{Candidate, NightCount, PairKey};
use super::draft::{OptionDraft, OptionSource};
use super::tier::tier_title;
use crate::core::letter::OptionLetter;
use crate::core::money::{per_person, round_cents};
use crate::group::{BudgetStats, Preference, preference_destinations, summarize_names};
use crate::inventory::{Activity, Flight, Hotel, Inventory, InventoryIndex, MatchStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Upper bound on options per consensus (letters A..H)
pub const MAX_OPTIONS: usize = 8;

/// Knobs for one generation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Target slate size, clamped to `1..=MAX_OPTIONS`
    pub option_count: usize,
    pub nights: NightCount,
    pub activities_per_option: usize,
    pub match_strategy: MatchStrategy,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            option_count: 3,
            nights: NightCount::default(),
            activities_per_option: 2,
            match_strategy: MatchStrategy::default(),
        }
    }
}

/// Everything a generation pass reads
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    pub preferences: &'a [Preference],
    pub inventory: &'a Inventory,
    /// Divisor for `cost_per_person`
    pub member_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateGenerator {
    settings: GenerationSettings,
}

impl CandidateGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    fn target_count(&self) -> usize {
        self.settings.option_count.clamp(1, MAX_OPTIONS)
    }

    /// Full slate for a new consensus, lettered A.. in ascending cost.
    ///
    /// Returns an empty list when no destination has both a flight and a hotel.
    pub fn generate(&self, input: &GenerationInput<'_>) -> Vec<OptionDraft> {
        let candidates = self.candidates(input, &HashSet::new());
        let selected = select_spread(&candidates, self.target_count());
        let drafter = Drafter::new(&self.settings, input);

        selected
            .into_iter()
            .enumerate()
            .filter_map(|(rank, candidate)| {
                let letter = OptionLetter::from_index(rank)?;
                Some(drafter.draft(candidate, letter, rank, OptionSource::Generated))
            })
            .collect()
    }

    /// Single replacement option: the cheapest pairing not in `exclude`.
    ///
    /// The letter is chosen by the caller; the tier follows the letter.
    pub fn synthesize_one(
        &self,
        input: &GenerationInput<'_>,
        exclude: &HashSet<PairKey>,
        letter: OptionLetter,
    ) -> Option<OptionDraft> {
        let candidates = self.candidates(input, exclude);
        let candidate = select_spread(&candidates, 1).into_iter().next()?;
        let drafter = Drafter::new(&self.settings, input);
        Some(drafter.draft(candidate, letter, letter.index(), OptionSource::Synthesized))
    }

    /// All priced pairings for the valid destinations, sorted ascending by cost.
    ///
    /// Pairs already in `exclude` and pairs seen earlier in the pass are skipped.
    pub fn candidates(
        &self,
        input: &GenerationInput<'_>,
        exclude: &HashSet<PairKey>,
    ) -> Vec<Candidate> {
        let wanted = preference_destinations(input.preferences);
        let flights = InventoryIndex::build(&input.inventory.flights);
        let hotels = InventoryIndex::build(&input.inventory.hotels);

        let mut used = exclude.clone();
        let mut candidates = Vec::new();
        for destination in self.valid_destinations(&wanted, &flights, &hotels) {
            let destination_flights = flights.get(&destination);
            let destination_hotels = hotels.get(&destination);
            if destination_flights.is_empty() || destination_hotels.is_empty() {
                continue;
            }
            for flight in destination_flights {
                for hotel in destination_hotels {
                    if !used.insert(PairKey::new(&flight.id, &hotel.id)) {
                        continue;
                    }
                    candidates.push(Candidate::new(
                        destination.clone(),
                        flight.clone(),
                        hotel.clone(),
                        self.settings.nights,
                    ));
                }
            }
        }

        candidates.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        candidates
    }

    /// Inventory destinations matching any wanted destination.
    ///
    /// Falls back to every inventory destination when nothing matches, so a
    /// naming mismatch alone never empties the slate.
    pub fn valid_destinations(
        &self,
        wanted: &[String],
        flights: &InventoryIndex<Flight>,
        hotels: &InventoryIndex<Hotel>,
    ) -> Vec<String> {
        let available: BTreeSet<&str> = flights.destinations().chain(hotels.destinations()).collect();
        let matcher = self.settings.match_strategy.matcher();

        let matched: Vec<String> = available
            .iter()
            .filter(|destination| wanted.iter().any(|w| matcher.matches(destination, w)))
            .map(|destination| destination.to_string())
            .collect();

        if matched.is_empty() {
            available.into_iter().map(str::to_string).collect()
        } else {
            matched
        }
    }
}

/// Indices giving a low/middle/high spread over `len` sorted candidates.
///
/// With three picks this is `[0, len / 2, len - 1]`. Fewer candidates than
/// picks means all of them.
pub fn spread_indices(len: usize, count: usize) -> Vec<usize> {
    if len == 0 || count == 0 {
        return Vec::new();
    }
    if len <= count {
        return (0..len).collect();
    }
    if count == 1 {
        return vec![0];
    }
    (0..count)
        .map(|k| {
            if k == count - 1 {
                len - 1
            } else {
                k * len / (count - 1)
            }
        })
        .collect()
}

/// Spread selection, deduplicated by pair and backfilled from the cheapest untaken candidates.
///
/// The result keeps ascending cost order.
pub fn select_spread(candidates: &[Candidate], count: usize) -> Vec<Candidate> {
    let target = count.min(candidates.len());
    let mut taken = vec![false; candidates.len()];
    let mut keys = HashSet::new();
    let mut picked = Vec::with_capacity(target);

    for index in spread_indices(candidates.len(), count) {
        if !taken[index] && keys.insert(candidates[index].key()) {
            taken[index] = true;
            picked.push(index);
        }
    }

    let mut next = 0;
    while picked.len() < target && next < candidates.len() {
        if !taken[next] && keys.insert(candidates[next].key()) {
            taken[next] = true;
            picked.push(next);
        }
        next += 1;
    }

    picked.sort_unstable();
    picked.into_iter().map(|i| candidates[i].clone()).collect()
}

/// Turns candidates into drafts: tiers, activities, per-person cost, budget fit
pub(crate) struct Drafter<'a> {
    settings: &'a GenerationSettings,
    member_count: usize,
    activities: InventoryIndex<Activity>,
    budget: Option<BudgetStats>,
    members: String,
}

impl<'a> Drafter<'a> {
    pub(crate) fn new(settings: &'a GenerationSettings, input: &GenerationInput<'_>) -> Self {
        let mut seen = BTreeSet::new();
        let names: Vec<&str> = input
            .preferences
            .iter()
            .filter(|p| p.completed)
            .map(|p| p.member_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect();

        Self {
            settings,
            member_count: input.member_count,
            activities: InventoryIndex::build(&input.inventory.activities),
            budget: BudgetStats::from_preferences(input.preferences),
            members: summarize_names(&names),
        }
    }

    pub(crate) fn draft(
        &self,
        candidate: Candidate,
        letter: OptionLetter,
        rank: usize,
        source: OptionSource,
    ) -> OptionDraft {
        let activities = self.activity_slice(&candidate.destination, rank);
        let description = self.describe(&candidate, activities);
        let activity_cost = round_cents(activities.iter().map(|a| a.price).sum());
        let cost_per_person = per_person(candidate.total_cost, self.member_count);

        OptionDraft {
            letter,
            title: tier_title(rank, &candidate.destination),
            description,
            destination: candidate.destination,
            activity_ids: activities.iter().map(|a| a.id.clone()).collect(),
            activity_cost,
            total_cost: candidate.total_cost,
            cost_per_person,
            nights: self.settings.nights,
            within_budget: self.budget.map(|b| cost_per_person <= b.median),
            flight: candidate.flight,
            hotel: candidate.hotel,
            source,
        }
    }

    /// The `rank`-th run of `activities_per_option` activities, cheapest first
    pub(crate) fn activity_slice(&self, destination: &str, rank: usize) -> &[Activity] {
        let all = self.activities.get(destination);
        let per_option = self.settings.activities_per_option;
        let start = rank.saturating_mul(per_option);
        if per_option == 0 || start >= all.len() {
            return &[];
        }
        &all[start..(start + per_option).min(all.len())]
    }

    pub(crate) fn describe(&self, candidate: &Candidate, activities: &[Activity]) -> String {
        let nights = self.settings.nights;
        let mut text = format!(
            "{} to {} with {} {} at {}",
            candidate.flight.label(),
            candidate.destination,
            nights.nights,
            if nights.nights == 1 { "night" } else { "nights" },
            candidate.hotel.label(),
        );
        if !activities.is_empty() {
            let names: Vec<String> = activities
                .iter()
                .map(|a| a.name.clone().unwrap_or_else(|| a.id.to_string()))
                .collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            text.push_str(&format!(", including {}", summarize_names(&names)));
        }
        text.push_str(&format!(". Picked for {}.", self.members));
        if nights.estimated {
            text.push_str(&format!(
                " Hotel price assumes {} nights until travel dates are known.",
                nights.nights
            ));
        }
        text
    }
}

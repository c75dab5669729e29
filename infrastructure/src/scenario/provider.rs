//! Provider ports backed by a loaded scenario

use super::file::ScenarioFile;
use async_trait::async_trait;
use groupgo_application::ports::provider::{
    GroupDirectory, InventoryProvider, PreferenceProvider, ProviderError,
};
use groupgo_application::ports::recommendation::{RecommendationError, RecommendationService};
use groupgo_domain::inventory::{InventoryItem, fuzzy_contains};
use groupgo_domain::{
    Activity, Flight, GroupId, Hotel, Inventory, Member, Preference, ProposedOption,
};
use tracing::debug;

/// Preferences, roster and inventory of the scenario's single group
pub struct ScenarioProvider {
    scenario: ScenarioFile,
}

impl ScenarioProvider {
    pub fn new(scenario: ScenarioFile) -> Self {
        Self { scenario }
    }

    pub fn group_id(&self) -> &GroupId {
        &self.scenario.group_id
    }

    pub fn scenario(&self) -> &ScenarioFile {
        &self.scenario
    }

    fn check_group(&self, group: &GroupId) -> Result<(), ProviderError> {
        if group == &self.scenario.group_id {
            Ok(())
        } else {
            Err(ProviderError::GroupNotFound(group.clone()))
        }
    }
}

/// Items serving any of the requested destinations; no destinations means all
fn for_destinations<T: InventoryItem + Clone>(items: &[T], destinations: &[String]) -> Vec<T> {
    items
        .iter()
        .filter(|item| {
            destinations.is_empty()
                || destinations
                    .iter()
                    .any(|wanted| fuzzy_contains(item.destination(), wanted))
        })
        .cloned()
        .collect()
}

#[async_trait]
impl PreferenceProvider for ScenarioProvider {
    async fn completed_preferences(
        &self,
        group: &GroupId,
    ) -> Result<Vec<Preference>, ProviderError> {
        self.check_group(group)?;
        Ok(self
            .scenario
            .preferences
            .iter()
            .filter(|p| p.completed)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl GroupDirectory for ScenarioProvider {
    async fn members(&self, group: &GroupId) -> Result<Vec<Member>, ProviderError> {
        self.check_group(group)?;
        Ok(self.scenario.members.clone())
    }
}

#[async_trait]
impl InventoryProvider for ScenarioProvider {
    async fn flights(&self, destinations: &[String]) -> Result<Vec<Flight>, ProviderError> {
        let flights = for_destinations(&self.scenario.inventory.flights, destinations);
        debug!("Scenario flights for {:?}: {}", destinations, flights.len());
        Ok(flights)
    }

    async fn hotels(&self, destinations: &[String]) -> Result<Vec<Hotel>, ProviderError> {
        let hotels = for_destinations(&self.scenario.inventory.hotels, destinations);
        debug!("Scenario hotels for {:?}: {}", destinations, hotels.len());
        Ok(hotels)
    }

    async fn activities(&self, destinations: &[String]) -> Result<Vec<Activity>, ProviderError> {
        Ok(for_destinations(
            &self.scenario.inventory.activities,
            destinations,
        ))
    }
}

/// Recommendation service that replays the scenario's canned proposals
pub struct ScenarioRecommendations {
    proposals: Vec<ProposedOption>,
}

impl ScenarioRecommendations {
    /// `None` when the scenario carries no proposals
    pub fn from_scenario(scenario: &ScenarioFile) -> Option<Self> {
        scenario.proposals.clone().map(|proposals| Self { proposals })
    }
}

#[async_trait]
impl RecommendationService for ScenarioRecommendations {
    async fn propose_options(
        &self,
        _preferences: &[Preference],
        _inventory: &Inventory,
    ) -> Result<Vec<ProposedOption>, RecommendationError> {
        Ok(self.proposals.clone())
    }
}

//! Start Consensus use case
//!
//! Opens one voting round for a group: gathers completed preferences,
//! fetches inventory, generates the option slate (recommendation service
//! first when enabled, built-in generator otherwise) and activates the first
//! option.

use super::error::ConsensusError;
use super::shared::EngineContext;
use groupgo_domain::group::preference_destinations;
use groupgo_domain::{
    Ballot, CandidateGenerator, DateRange, DomainError, GenerationInput, GroupId, Inventory,
    NightCount, OptionDraft, OptionSource, Preference,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for the StartConsensus use case
#[derive(Debug, Clone)]
pub struct StartConsensusInput {
    pub group_id: GroupId,
    /// Actual travel window, if the caller knows it
    pub date_range: Option<DateRange>,
}

impl StartConsensusInput {
    pub fn new(group_id: impl Into<GroupId>) -> Self {
        Self {
            group_id: group_id.into(),
            date_range: None,
        }
    }

    pub fn with_dates(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }
}

/// What a started round looks like
#[derive(Debug, Clone)]
pub struct StartConsensusOutput {
    pub ballot: Ballot,
    /// Where the slate came from
    pub source: OptionSource,
    /// Inventory records discarded as unusable
    pub dropped_inventory: usize,
    /// Why recommendations were not used, when they were attempted
    pub fallback_reason: Option<String>,
}

/// Use case for opening a new consensus round
pub struct StartConsensusUseCase {
    ctx: Arc<EngineContext>,
}

impl StartConsensusUseCase {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        Self { ctx }
    }

    pub async fn execute(
        &self,
        input: StartConsensusInput,
    ) -> Result<StartConsensusOutput, ConsensusError> {
        let group = input.group_id;
        let _guard = self.ctx.locks.acquire(&group).await;
        let config = &self.ctx.config;

        let preferences: Vec<Preference> = self
            .ctx
            .preferences
            .completed_preferences(&group)
            .await?
            .into_iter()
            .filter(|p| p.completed)
            .collect();
        let required = config.required_preferences();
        if preferences.len() < required {
            info!(
                "Group {} has {} completed preferences, need {}",
                group,
                preferences.len(),
                required
            );
            return Err(DomainError::InsufficientPreferences {
                found: preferences.len(),
                required,
            }
            .into());
        }

        let members = self.ctx.directory.members(&group).await?;
        let (inventory, dropped_inventory) = self.fetch_inventory(&preferences).await?;

        let nights = NightCount::for_trip(
            input
                .date_range
                .or_else(|| preferences.iter().find_map(|p| p.date_range)),
            config.default_nights,
        );
        if nights.estimated {
            debug!(
                "No travel dates for group {}, pricing {} nights",
                group, nights.nights
            );
        }
        let settings = config.generation_settings(nights);
        let generator = CandidateGenerator::new(settings);

        let (drafts, source, fallback_reason) = {
            let generation = GenerationInput {
                preferences: &preferences,
                inventory: &inventory,
                member_count: members.len(),
            };
            self.draft_options(&generator, &generation).await
        };

        let mut ballot = Ballot::open(group.clone(), preferences, inventory, settings, drafts);

        if ballot.options().is_empty() {
            self.ctx.ballots.open(&ballot).await?;
            self.ctx.emit(
                "consensus_started",
                json!({
                    "group_id": group,
                    "consensus_id": ballot.id(),
                    "option_count": 0,
                }),
            );
            warn!("No options could be generated for group {}", group);
            return Err(DomainError::NoCandidatesGenerated {
                consensus_id: ballot.id(),
            }
            .into());
        }

        let active = self.ctx.with_rng(|rng| ballot.activate_initial(rng));
        self.ctx.ballots.open(&ballot).await?;

        info!(
            "Opened consensus {} for group {} with {} {} options",
            ballot.id(),
            group,
            ballot.options().len(),
            source
        );
        self.ctx.emit(
            "consensus_started",
            json!({
                "group_id": group,
                "consensus_id": ballot.id(),
                "option_count": ballot.options().len(),
                "source": source,
                "nights": nights.nights,
                "nights_estimated": nights.estimated,
            }),
        );
        if let Some(option) = active.and_then(|id| ballot.option(id)) {
            self.ctx.emit(
                "option_activated",
                json!({
                    "consensus_id": ballot.id(),
                    "option_id": option.id,
                    "letter": option.letter,
                    "title": option.title,
                }),
            );
        }

        Ok(StartConsensusOutput {
            ballot,
            source,
            dropped_inventory,
            fallback_reason,
        })
    }

    /// Fetch and sanitize inventory for the preferred destinations
    async fn fetch_inventory(
        &self,
        preferences: &[Preference],
    ) -> Result<(Inventory, usize), ConsensusError> {
        let destinations = preference_destinations(preferences);
        let provider = &self.ctx.inventory;

        let flights = provider.flights(&destinations).await?;
        let hotels = provider.hotels(&destinations).await?;
        let activities = match provider.activities(&destinations).await {
            Ok(activities) => activities,
            Err(e) => {
                warn!("Activities unavailable, continuing without them: {}", e);
                Vec::new()
            }
        };

        let (inventory, dropped) = Inventory::new(flights, hotels, activities).sanitized();
        if dropped > 0 {
            warn!("Dropped {} unusable inventory records", dropped);
        }
        debug!(
            "Inventory: {} flights, {} hotels, {} activities",
            inventory.flights.len(),
            inventory.hotels.len(),
            inventory.activities.len()
        );
        Ok((inventory, dropped))
    }

    /// Recommended slate when available and usable, generated slate otherwise
    async fn draft_options(
        &self,
        generator: &CandidateGenerator,
        input: &GenerationInput<'_>,
    ) -> (Vec<OptionDraft>, OptionSource, Option<String>) {
        let Some(service) = self
            .ctx
            .recommendations
            .as_ref()
            .filter(|_| self.ctx.config.use_recommendations)
        else {
            return (generator.generate(input), OptionSource::Generated, None);
        };

        let reason = match service
            .propose_options(input.preferences, input.inventory)
            .await
        {
            Ok(proposals) if proposals.is_empty() => "no proposals returned".to_string(),
            Ok(proposals) => {
                let adopted = generator.adopt_proposals(&proposals, input);
                if adopted.dropped > 0 {
                    warn!(
                        "Discarded {} of {} proposed options",
                        adopted.dropped,
                        proposals.len()
                    );
                }
                if !adopted.drafts.is_empty() {
                    return (adopted.drafts, OptionSource::Recommended, None);
                }
                "no proposal matched the inventory".to_string()
            }
            Err(e) => e.to_string(),
        };

        warn!("Falling back to generated options: {}", reason);
        self.ctx
            .emit("recommendation_fallback", json!({ "reason": reason }));
        (generator.generate(input), OptionSource::Generated, Some(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::recommendation::RecommendationError;
    use crate::use_cases::test_support::*;
    use crate::EngineConfig;
    use groupgo_domain::{Flight, Hotel, OptionLetter, OptionStatus, ProposedOption, VoteChoice};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_paris_scenario_yields_two_options() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben", "cy"], "Paris", paris_tokyo()));
        let harness = Harness::new(group, EngineConfig::default());

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        let options = output.ballot.options();
        assert_eq!(options.len(), 2);
        assert_eq!(output.source, OptionSource::Generated);
        let a = output.ballot.option_by_letter(OptionLetter::A).unwrap();
        let b = output.ballot.option_by_letter(OptionLetter::B).unwrap();
        assert!(a.total_cost < b.total_cost);
        assert!(options.iter().all(|o| o.destination == "Paris"));

        // exactly one active, and it is stored
        assert_eq!(
            options
                .iter()
                .filter(|o| o.status == OptionStatus::Active)
                .count(),
            1
        );
        let stored = harness.ballots.active_for(GROUP).await.unwrap();
        assert_eq!(stored.id(), output.ballot.id());
        assert_eq!(
            harness.events.types(),
            vec!["consensus_started", "option_activated"]
        );
    }

    #[tokio::test]
    async fn test_insufficient_preferences_creates_nothing() {
        let group = Arc::new(FakeGroup::new(&["ana"], "Paris", paris_tokyo()));
        let harness = Harness::new(group, EngineConfig::default());

        let err = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_domain(),
            Some(DomainError::InsufficientPreferences {
                found: 1,
                required: 2
            })
        ));
        assert_eq!(harness.ballots.count().await, 0);
        assert!(harness.events.types().is_empty());
    }

    #[tokio::test]
    async fn test_lowered_min_preferences_keeps_group_floor() {
        let group = Arc::new(FakeGroup::new(&["ana"], "Paris", paris_tokyo()));
        let harness = Harness::new(group, EngineConfig::default().with_min_preferences(1));

        let err = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_domain(),
            Some(DomainError::InsufficientPreferences {
                found: 1,
                required: 2
            })
        ));
        assert_eq!(harness.ballots.count().await, 0);
    }

    #[tokio::test]
    async fn test_incomplete_preferences_do_not_count() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        group.set_preferences(vec![
            Preference::new("ana", "Paris"),
            Preference::new("ben", "Paris").incomplete(),
        ]);
        let harness = Harness::new(group, EngineConfig::default());

        let err = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_domain(),
            Some(DomainError::InsufficientPreferences { found: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_no_candidates_stores_empty_consensus() {
        let inventory = Inventory::new(
            vec![Flight::new("f1", "Paris", 300.0)],
            vec![Hotel::new("h1", "Rome", 100.0)],
            vec![],
        );
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", inventory));
        let harness = Harness::new(group, EngineConfig::default());

        let err = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap_err();

        let Some(DomainError::NoCandidatesGenerated { consensus_id }) = err.as_domain() else {
            panic!("unexpected error: {}", err);
        };
        let stored = harness.ballots.active_for(GROUP).await.unwrap();
        assert_eq!(stored.id(), *consensus_id);
        assert!(stored.options().is_empty());
    }

    #[tokio::test]
    async fn test_recommendations_preferred_when_valid() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        let proposals = FixedProposals::ok(vec![
            ProposedOption::new("pf2", "ph1").with_title("Late Flight Special"),
        ]);
        let harness = Harness::with_recommendations(group, EngineConfig::default(), proposals);

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.source, OptionSource::Recommended);
        assert_eq!(output.ballot.options().len(), 1);
        let option = output.ballot.active_option().unwrap();
        assert_eq!(option.letter, OptionLetter::A);
        assert_eq!(option.title, "Late Flight Special – Paris");
        assert_eq!(option.total_cost, 1200.0);
        assert!(output.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn test_recommendation_failure_falls_back() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        let proposals = FixedProposals::err(RecommendationError::Timeout);
        let harness = Harness::with_recommendations(group, EngineConfig::default(), proposals);

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.source, OptionSource::Generated);
        assert_eq!(output.ballot.options().len(), 2);
        assert_eq!(output.fallback_reason.as_deref(), Some("Timeout"));
        assert_eq!(harness.events.types()[0], "recommendation_fallback");
    }

    #[tokio::test]
    async fn test_unusable_proposals_fall_back() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        let proposals = FixedProposals::ok(vec![ProposedOption::new("ghost", "ph1")]);
        let harness = Harness::with_recommendations(group, EngineConfig::default(), proposals);

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.source, OptionSource::Generated);
        assert!(output.fallback_reason.is_some());
    }

    #[tokio::test]
    async fn test_cross_destination_proposal_is_not_adopted() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        let proposals = FixedProposals::ok(vec![ProposedOption::new("tf1", "ph1")]);
        let harness = Harness::with_recommendations(group, EngineConfig::default(), proposals);

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.source, OptionSource::Generated);
        assert!(
            output
                .ballot
                .options()
                .iter()
                .all(|o| o.flight.id.as_str() != "tf1")
        );
    }

    #[tokio::test]
    async fn test_recommendations_disabled_by_config() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        let proposals = FixedProposals::ok(vec![ProposedOption::new("pf2", "ph1")]);
        let config = EngineConfig::default().with_recommendations(false);
        let harness = Harness::with_recommendations(group, config, proposals);

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.source, OptionSource::Generated);
        assert!(output.fallback_reason.is_none());
    }

    #[tokio::test]
    async fn test_unusable_inventory_is_dropped() {
        let mut inventory = paris_tokyo();
        inventory.flights.push(Flight::new("bad", "Paris", -1.0));
        inventory.hotels.push(Hotel::new("nowhere", "", 10.0));
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", inventory));
        let harness = Harness::new(group, EngineConfig::default());

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.dropped_inventory, 2);
        assert!(
            output
                .ballot
                .options()
                .iter()
                .all(|o| o.flight.id.as_str() != "bad")
        );
    }

    #[tokio::test]
    async fn test_activity_failure_is_tolerated() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        group.fail_activities();
        let harness = Harness::new(group, EngineConfig::default());

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        assert_eq!(output.ballot.options().len(), 2);
    }

    #[tokio::test]
    async fn test_preference_dates_give_exact_nights() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Tokyo", paris_tokyo()));
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 6).unwrap(),
        );
        group.set_preferences(vec![
            Preference::new("ana", "Tokyo").with_dates(range),
            Preference::new("ben", "Tokyo"),
        ]);
        let harness = Harness::new(group, EngineConfig::default());

        let output = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        let option = output.ballot.active_option().unwrap();
        assert_eq!(option.nights, NightCount::exact(4));
        assert_eq!(option.total_cost, 1500.0);
    }

    #[tokio::test]
    async fn test_new_round_replaces_previous() {
        let group = Arc::new(FakeGroup::new(&["ana", "ben"], "Paris", paris_tokyo()));
        let harness = Harness::new(group, EngineConfig::default());

        let first = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();
        let option = first.ballot.active_option().unwrap().id;
        harness
            .vote
            .cast_vote(vote_input("ana", option, VoteChoice::Yes))
            .await
            .unwrap();

        let second = harness
            .start
            .execute(StartConsensusInput::new(GROUP))
            .await
            .unwrap();

        let history = harness.ballots.all_for(GROUP).await;
        assert_eq!(history.len(), 2);
        assert!(!history[0].is_active());
        assert_eq!(history[0].votes().count(), 0);
        assert_eq!(
            harness.ballots.active_for(GROUP).await.unwrap().id(),
            second.ballot.id()
        );
    }
}

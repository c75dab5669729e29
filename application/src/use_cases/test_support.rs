//! Hand-written port doubles for the use case tests

use super::cast_vote::{CastVoteInput, CastVoteUseCase};
use super::query::ConsensusQuery;
use super::shared::EngineContext;
use super::start_consensus::StartConsensusUseCase;
use crate::config::EngineConfig;
use crate::ports::ballot_repository::{BallotRepository, RepositoryError};
use crate::ports::event_logger::{ConsensusEvent, ConsensusEventLogger};
use crate::ports::provider::{GroupDirectory, InventoryProvider, PreferenceProvider, ProviderError};
use crate::ports::recommendation::{RecommendationError, RecommendationService};
use async_trait::async_trait;
use groupgo_domain::{
    Activity, Ballot, Flight, GroupId, Hotel, Inventory, Member, OptionId, Preference,
    ProposedOption, RandomSource, VoteChoice,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const GROUP: &str = "trip-club";

/// Always picks the first candidate
pub(crate) struct FirstPick;

impl RandomSource for FirstPick {
    fn pick_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// Paris: flights $300/$500, hotel $100/night. Tokyo: flight $900, hotel $150/night.
pub(crate) fn paris_tokyo() -> Inventory {
    Inventory::new(
        vec![
            Flight::new("pf1", "Paris", 300.0),
            Flight::new("pf2", "Paris", 500.0),
            Flight::new("tf1", "Tokyo", 900.0),
        ],
        vec![
            Hotel::new("ph1", "Paris", 100.0),
            Hotel::new("th1", "Tokyo", 150.0),
        ],
        vec![],
    )
}

pub(crate) fn vote_input(member: &str, option: OptionId, choice: VoteChoice) -> CastVoteInput {
    CastVoteInput::new(GROUP, member, option, choice)
}

/// One group's preferences, roster and inventory
pub(crate) struct FakeGroup {
    preferences: Mutex<Vec<Preference>>,
    members: Mutex<Vec<Member>>,
    inventory: Inventory,
    fail_activities: AtomicBool,
}

impl FakeGroup {
    /// Every member wants `destination`
    pub(crate) fn new(members: &[&str], destination: &str, inventory: Inventory) -> Self {
        Self {
            preferences: Mutex::new(
                members
                    .iter()
                    .map(|m| Preference::new(*m, destination))
                    .collect(),
            ),
            members: Mutex::new(members.iter().map(|m| Member::new(*m, *m)).collect()),
            inventory,
            fail_activities: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_preferences(&self, preferences: Vec<Preference>) {
        *self.preferences.lock().unwrap() = preferences;
    }

    pub(crate) fn set_members(&self, members: &[&str]) {
        *self.members.lock().unwrap() = members.iter().map(|m| Member::new(*m, *m)).collect();
    }

    pub(crate) fn fail_activities(&self) {
        self.fail_activities.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PreferenceProvider for FakeGroup {
    async fn completed_preferences(
        &self,
        _group: &GroupId,
    ) -> Result<Vec<Preference>, ProviderError> {
        Ok(self.preferences.lock().unwrap().clone())
    }
}

#[async_trait]
impl GroupDirectory for FakeGroup {
    async fn members(&self, _group: &GroupId) -> Result<Vec<Member>, ProviderError> {
        Ok(self.members.lock().unwrap().clone())
    }
}

#[async_trait]
impl InventoryProvider for FakeGroup {
    async fn flights(&self, _destinations: &[String]) -> Result<Vec<Flight>, ProviderError> {
        Ok(self.inventory.flights.clone())
    }

    async fn hotels(&self, _destinations: &[String]) -> Result<Vec<Hotel>, ProviderError> {
        Ok(self.inventory.hotels.clone())
    }

    async fn activities(&self, _destinations: &[String]) -> Result<Vec<Activity>, ProviderError> {
        if self.fail_activities.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable("activities".into()));
        }
        Ok(self.inventory.activities.clone())
    }
}

/// Vec-backed ballot store
#[derive(Default)]
pub(crate) struct MemoryBallots {
    ballots: tokio::sync::Mutex<Vec<Ballot>>,
}

impl MemoryBallots {
    pub(crate) async fn active_for(&self, group: &str) -> Option<Ballot> {
        self.active(&GroupId::new(group)).await.unwrap()
    }

    pub(crate) async fn all_for(&self, group: &str) -> Vec<Ballot> {
        self.history(&GroupId::new(group)).await.unwrap()
    }

    pub(crate) async fn count(&self) -> usize {
        self.ballots.lock().await.len()
    }
}

#[async_trait]
impl BallotRepository for MemoryBallots {
    async fn active(&self, group: &GroupId) -> Result<Option<Ballot>, RepositoryError> {
        let ballots = self.ballots.lock().await;
        Ok(ballots
            .iter()
            .rev()
            .find(|b| b.group_id() == group && b.is_active())
            .cloned())
    }

    async fn open(&self, ballot: &Ballot) -> Result<(), RepositoryError> {
        let mut ballots = self.ballots.lock().await;
        for previous in ballots.iter_mut().filter(|b| b.group_id() == ballot.group_id()) {
            previous.deactivate();
        }
        ballots.push(ballot.clone());
        Ok(())
    }

    async fn save(&self, ballot: &Ballot) -> Result<(), RepositoryError> {
        let mut ballots = self.ballots.lock().await;
        let slot = ballots
            .iter_mut()
            .find(|b| b.id() == ballot.id())
            .ok_or_else(|| RepositoryError::UnknownConsensus(ballot.id().to_string()))?;
        *slot = ballot.clone();
        Ok(())
    }

    async fn history(&self, group: &GroupId) -> Result<Vec<Ballot>, RepositoryError> {
        let ballots = self.ballots.lock().await;
        Ok(ballots
            .iter()
            .filter(|b| b.group_id() == group)
            .cloned()
            .collect())
    }
}

/// Event logger that keeps every event type in order
#[derive(Default)]
pub(crate) struct RecordingEvents {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingEvents {
    pub(crate) fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConsensusEventLogger for RecordingEvents {
    fn log(&self, event: ConsensusEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}

/// Recommendation service with a canned answer
pub(crate) struct FixedProposals {
    answer: Mutex<Option<Result<Vec<ProposedOption>, RecommendationError>>>,
}

impl FixedProposals {
    pub(crate) fn ok(proposals: Vec<ProposedOption>) -> Self {
        Self {
            answer: Mutex::new(Some(Ok(proposals))),
        }
    }

    pub(crate) fn err(error: RecommendationError) -> Self {
        Self {
            answer: Mutex::new(Some(Err(error))),
        }
    }
}

#[async_trait]
impl RecommendationService for FixedProposals {
    async fn propose_options(
        &self,
        _preferences: &[Preference],
        _inventory: &Inventory,
    ) -> Result<Vec<ProposedOption>, RecommendationError> {
        self.answer.lock().unwrap().take().unwrap_or(Ok(Vec::new()))
    }
}

/// Use cases wired to the doubles above, with first-pick randomness
pub(crate) struct Harness {
    pub(crate) start: StartConsensusUseCase,
    pub(crate) vote: CastVoteUseCase,
    pub(crate) query: ConsensusQuery,
    pub(crate) ballots: Arc<MemoryBallots>,
    pub(crate) events: Arc<RecordingEvents>,
}

impl Harness {
    pub(crate) fn new(group: Arc<FakeGroup>, config: EngineConfig) -> Self {
        Self::build(group, config, None)
    }

    pub(crate) fn with_recommendations(
        group: Arc<FakeGroup>,
        config: EngineConfig,
        service: FixedProposals,
    ) -> Self {
        Self::build(group, config, Some(Arc::new(service)))
    }

    fn build(
        group: Arc<FakeGroup>,
        config: EngineConfig,
        service: Option<Arc<dyn RecommendationService>>,
    ) -> Self {
        let ballots = Arc::new(MemoryBallots::default());
        let events = Arc::new(RecordingEvents::default());
        let mut ctx = EngineContext::new(
            group.clone(),
            group.clone(),
            group,
            ballots.clone(),
            config,
        )
        .with_event_logger(events.clone())
        .with_random(Box::new(FirstPick));
        if let Some(service) = service {
            ctx = ctx.with_recommendations(service);
        }
        let ctx = Arc::new(ctx);

        Self {
            start: StartConsensusUseCase::new(ctx.clone()),
            vote: CastVoteUseCase::new(ctx.clone()),
            query: ConsensusQuery::new(ctx),
            ballots,
            events,
        }
    }

    pub(crate) async fn active_option_id(&self) -> OptionId {
        self.ballots
            .active_for(GROUP)
            .await
            .and_then(|b| b.active_option().map(|o| o.id))
            .expect("an active option")
    }
}

//! Shared wiring for the consensus use cases.
//!
//! All use cases of one engine hold the same [`EngineContext`], so they
//! share the per-group locks that serialize every read-modify-write of a
//! ballot, and the injected random source.

use super::error::ConsensusError;
use crate::config::EngineConfig;
use crate::ports::ballot_repository::BallotRepository;
use crate::ports::event_logger::{ConsensusEvent, ConsensusEventLogger, NoEventLogger};
use crate::ports::provider::{GroupDirectory, InventoryProvider, PreferenceProvider};
use crate::ports::recommendation::RecommendationService;
use groupgo_domain::{Ballot, DomainError, GroupId, MemberId, RandomSource, SeededRandom};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

/// One async mutex per group, created on first use.
///
/// Entries only the map still references are pruned on the next acquire, so
/// the map holds groups that are locked or being waited on.
#[derive(Default)]
pub(crate) struct GroupLocks {
    inner: Mutex<HashMap<GroupId, Arc<tokio::sync::Mutex<()>>>>,
}

impl GroupLocks {
    pub(crate) async fn acquire(&self, group: &GroupId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(group.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Collaborators and configuration shared by the use cases
pub struct EngineContext {
    pub(crate) preferences: Arc<dyn PreferenceProvider>,
    pub(crate) directory: Arc<dyn GroupDirectory>,
    pub(crate) inventory: Arc<dyn InventoryProvider>,
    pub(crate) ballots: Arc<dyn BallotRepository>,
    pub(crate) recommendations: Option<Arc<dyn RecommendationService>>,
    pub(crate) events: Arc<dyn ConsensusEventLogger>,
    pub(crate) config: EngineConfig,
    pub(crate) locks: GroupLocks,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl EngineContext {
    pub fn new(
        preferences: Arc<dyn PreferenceProvider>,
        directory: Arc<dyn GroupDirectory>,
        inventory: Arc<dyn InventoryProvider>,
        ballots: Arc<dyn BallotRepository>,
        config: EngineConfig,
    ) -> Self {
        let rng = SeededRandom::from_optional_seed(config.seed);
        Self {
            preferences,
            directory,
            inventory,
            ballots,
            recommendations: None,
            events: Arc::new(NoEventLogger),
            config,
            locks: GroupLocks::default(),
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn with_recommendations(mut self, service: Arc<dyn RecommendationService>) -> Self {
        self.recommendations = Some(service);
        self
    }

    pub fn with_event_logger(mut self, events: Arc<dyn ConsensusEventLogger>) -> Self {
        self.events = events;
        self
    }

    /// Replace the random source (tests pin picks this way)
    pub fn with_random(self, rng: Box<dyn RandomSource>) -> Self {
        Self {
            rng: Mutex::new(rng),
            ..self
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run a synchronous ballot transition with the shared random source
    pub(crate) fn with_rng<R>(&self, f: impl FnOnce(&mut dyn RandomSource) -> R) -> R {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **rng)
    }

    pub(crate) fn emit(&self, event_type: &'static str, payload: Value) {
        self.events.log(ConsensusEvent::new(event_type, payload));
    }

    /// Current member ids of the group
    pub(crate) async fn roster(&self, group: &GroupId) -> Result<Vec<MemberId>, ConsensusError> {
        let members = self.directory.members(group).await?;
        Ok(members.into_iter().map(|m| m.id).collect())
    }

    pub(crate) async fn active_ballot(&self, group: &GroupId) -> Result<Ballot, ConsensusError> {
        self.ballots
            .active(group)
            .await?
            .ok_or_else(|| DomainError::NoActiveConsensus.into())
    }
}

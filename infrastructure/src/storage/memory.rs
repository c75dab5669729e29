//! Process-local ballot store
//!
//! Rounds are kept per group in creation order. The last active entry is
//! the group's authoritative ballot.

use async_trait::async_trait;
use groupgo_application::ports::ballot_repository::{BallotRepository, RepositoryError};
use groupgo_domain::{Ballot, GroupId};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct InMemoryBallotRepository {
    rounds: RwLock<HashMap<GroupId, Vec<Ballot>>>,
}

impl InMemoryBallotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BallotRepository for InMemoryBallotRepository {
    async fn active(&self, group: &GroupId) -> Result<Option<Ballot>, RepositoryError> {
        let rounds = self.rounds.read().await;
        Ok(rounds
            .get(group)
            .and_then(|ballots| ballots.iter().rev().find(|b| b.is_active()))
            .cloned())
    }

    async fn open(&self, ballot: &Ballot) -> Result<(), RepositoryError> {
        let mut rounds = self.rounds.write().await;
        let ballots = rounds.entry(ballot.group_id().clone()).or_default();
        for previous in ballots.iter_mut().filter(|b| b.is_active()) {
            debug!("Closing consensus {} for group {}", previous.id(), ballot.group_id());
            previous.deactivate();
        }
        ballots.push(ballot.clone());
        Ok(())
    }

    async fn save(&self, ballot: &Ballot) -> Result<(), RepositoryError> {
        let mut rounds = self.rounds.write().await;
        let slot = rounds
            .get_mut(ballot.group_id())
            .and_then(|ballots| ballots.iter_mut().find(|b| b.id() == ballot.id()))
            .ok_or_else(|| RepositoryError::UnknownConsensus(ballot.id().to_string()))?;
        *slot = ballot.clone();
        Ok(())
    }

    async fn history(&self, group: &GroupId) -> Result<Vec<Ballot>, RepositoryError> {
        let rounds = self.rounds.read().await;
        Ok(rounds.get(group).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupgo_domain::{
        CandidateGenerator, Flight, GenerationInput, GenerationSettings, Hotel, Inventory,
        Preference,
    };

    fn ballot(group: &str) -> Ballot {
        let preferences = vec![Preference::new("ana", "Rome"), Preference::new("ben", "Rome")];
        let inventory = Inventory::new(
            vec![Flight::new("f1", "Rome", 200.0)],
            vec![Hotel::new("h1", "Rome", 80.0)],
            vec![],
        );
        let settings = GenerationSettings::default();
        let drafts = CandidateGenerator::new(settings).generate(&GenerationInput {
            preferences: &preferences,
            inventory: &inventory,
            member_count: 2,
        });
        Ballot::open(GroupId::new(group), preferences, inventory, settings, drafts)
    }

    #[tokio::test]
    async fn test_open_deactivates_previous_round() {
        let repo = InMemoryBallotRepository::new();
        let group = GroupId::new("crew");
        let first = ballot("crew");
        let second = ballot("crew");

        repo.open(&first).await.unwrap();
        repo.open(&second).await.unwrap();

        let active = repo.active(&group).await.unwrap().unwrap();
        assert_eq!(active.id(), second.id());
        let history = repo.history(&group).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(!history[0].is_active());
    }

    #[tokio::test]
    async fn test_groups_are_isolated() {
        let repo = InMemoryBallotRepository::new();
        repo.open(&ballot("crew")).await.unwrap();
        repo.open(&ballot("other")).await.unwrap();

        assert_eq!(repo.history(&GroupId::new("crew")).await.unwrap().len(), 1);
        assert!(repo.active(&GroupId::new("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_stored_round() {
        let repo = InMemoryBallotRepository::new();
        let mut round = ballot("crew");
        repo.open(&round).await.unwrap();

        round.deactivate();
        repo.save(&round).await.unwrap();

        assert!(repo.active(&GroupId::new("crew")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_unknown_round_fails() {
        let repo = InMemoryBallotRepository::new();
        let err = repo.save(&ballot("crew")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownConsensus(_)));
    }
}

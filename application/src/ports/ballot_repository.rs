//! Ballot persistence port
//!
//! The engine is storage agnostic. It only needs to load the group's
//! current ballot, write it back whole, and open a new round.
//! Serializing writers per group is the use cases' job, not the store's.

use async_trait::async_trait;
use groupgo_domain::{Ballot, GroupId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Consensus {0} is not stored")]
    UnknownConsensus(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

#[async_trait]
pub trait BallotRepository: Send + Sync {
    /// The group's authoritative (most recent, active) ballot
    async fn active(&self, group: &GroupId) -> Result<Option<Ballot>, RepositoryError>;

    /// Store a new round, deactivating the group's previous one
    async fn open(&self, ballot: &Ballot) -> Result<(), RepositoryError>;

    /// Replace a stored ballot with its updated state
    async fn save(&self, ballot: &Ballot) -> Result<(), RepositoryError>;

    /// Every round of the group, oldest first
    async fn history(&self, group: &GroupId) -> Result<Vec<Ballot>, RepositoryError>;
}

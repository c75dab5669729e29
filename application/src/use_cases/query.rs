//! Consensus read models
//!
//! Read-only views over the stored ballots. Reads take no group lock; each
//! one sees a whole stored ballot.

use super::error::ConsensusError;
use super::shared::EngineContext;
use groupgo_domain::{
    Ballot, Consensus, GroupId, ItineraryOption, OptionId, Vote, VotingStatus,
};
use std::sync::Arc;

pub struct ConsensusQuery {
    ctx: Arc<EngineContext>,
}

impl ConsensusQuery {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        Self { ctx }
    }

    /// The group's current round
    pub async fn ballot(&self, group: &GroupId) -> Result<Ballot, ConsensusError> {
        self.ctx.active_ballot(group).await
    }

    pub async fn active_option(
        &self,
        group: &GroupId,
    ) -> Result<Option<ItineraryOption>, ConsensusError> {
        Ok(self.ballot(group).await?.active_option().cloned())
    }

    /// Every option of the current round with its status, by display order
    pub async fn options(&self, group: &GroupId) -> Result<Vec<ItineraryOption>, ConsensusError> {
        let ballot = self.ballot(group).await?;
        Ok(ballot.options().into_iter().cloned().collect())
    }

    pub async fn votes_for(
        &self,
        group: &GroupId,
        option: OptionId,
    ) -> Result<Vec<Vote>, ConsensusError> {
        let ballot = self.ballot(group).await?;
        Ok(ballot.votes_for(option).into_iter().cloned().collect())
    }

    pub async fn voting_status(&self, group: &GroupId) -> Result<VotingStatus, ConsensusError> {
        let ballot = self.ballot(group).await?;
        let roster = self.ctx.roster(group).await?;
        Ok(ballot.voting_status(&roster))
    }

    pub async fn winner(&self, group: &GroupId) -> Result<Option<ItineraryOption>, ConsensusError> {
        Ok(self.ballot(group).await?.winner().cloned())
    }

    /// Every round the group has run, oldest first
    pub async fn history(&self, group: &GroupId) -> Result<Vec<Consensus>, ConsensusError> {
        let ballots = self.ctx.ballots.history(group).await?;
        Ok(ballots.into_iter().map(|b| b.consensus().clone()).collect())
    }
}

//! Cast Vote use case
//!
//! Every transition of an open round goes through here: votes, explicit
//! "roll again", re-resolution and the administrative advance. Each call
//! loads the group's ballot, applies one transition and stores it again
//! while holding the group's lock, so two concurrent last voters cannot
//! both miss (or both trigger) resolution.

use super::error::ConsensusError;
use super::shared::EngineContext;
use groupgo_domain::{
    Ballot, DomainError, GroupId, MemberId, OptionId, Resolution, VoteChoice, VoteOutcome,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for a single vote
#[derive(Debug, Clone)]
pub struct CastVoteInput {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub option_id: OptionId,
    pub choice: VoteChoice,
    pub comment: Option<String>,
}

impl CastVoteInput {
    pub fn new(
        group_id: impl Into<GroupId>,
        member_id: impl Into<MemberId>,
        option_id: OptionId,
        choice: VoteChoice,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            member_id: member_id.into(),
            option_id,
            choice,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Use case for voting transitions on the active round
pub struct CastVoteUseCase {
    ctx: Arc<EngineContext>,
}

impl CastVoteUseCase {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        Self { ctx }
    }

    /// Record a vote and resolve the option once every member has voted
    pub async fn cast_vote(&self, input: CastVoteInput) -> Result<VoteOutcome, ConsensusError> {
        let group = input.group_id;
        let _guard = self.ctx.locks.acquire(&group).await;

        let mut ballot = self.ctx.active_ballot(&group).await?;
        let roster = self.ctx.roster(&group).await?;

        let outcome = self.ctx.with_rng(|rng| {
            ballot.cast_vote(
                &input.member_id,
                input.option_id,
                input.choice,
                input.comment,
                &roster,
                rng,
            )
        })?;

        if outcome.changed {
            debug!(
                "{} voted {} on option {}",
                outcome.vote.member_id, outcome.vote.choice, outcome.vote.option_id
            );
            self.ctx.emit(
                "vote_cast",
                json!({
                    "group_id": group,
                    "consensus_id": ballot.id(),
                    "member_id": outcome.vote.member_id,
                    "option_id": outcome.vote.option_id,
                    "choice": outcome.vote.choice,
                    "comment": outcome.vote.comment,
                }),
            );
        }

        self.finish(&ballot, &outcome.resolution, outcome.changed)
            .await?;
        Ok(outcome)
    }

    /// Explicitly reject the active option on behalf of `member`
    pub async fn roll_again(
        &self,
        group: impl Into<GroupId>,
        member: impl Into<MemberId>,
        option: OptionId,
    ) -> Result<VoteOutcome, ConsensusError> {
        self.cast_vote(CastVoteInput::new(
            group,
            member,
            option,
            VoteChoice::RollAgain,
        ))
        .await
    }

    /// Re-check an option against the current roster
    pub async fn resolve(
        &self,
        group: &GroupId,
        option: OptionId,
    ) -> Result<Resolution, ConsensusError> {
        let _guard = self.ctx.locks.acquire(group).await;

        let mut ballot = self.ctx.active_ballot(group).await?;
        let roster = self.ctx.roster(group).await?;

        let resolution = self
            .ctx
            .with_rng(|rng| ballot.resolve(option, &roster, rng))?;

        self.finish(&ballot, &resolution, false).await?;
        Ok(resolution)
    }

    /// Skip the active option after a completed, non-unanimous vote
    pub async fn advance_to_next(&self, group: &GroupId) -> Result<Resolution, ConsensusError> {
        let _guard = self.ctx.locks.acquire(group).await;

        let mut ballot = self.ctx.active_ballot(group).await?;
        let roster = self.ctx.roster(group).await?;

        let resolution = self
            .ctx
            .with_rng(|rng| ballot.advance_to_next(&roster, rng))?;

        info!("Advanced past the active option of group {}", group);
        self.finish(&ballot, &resolution, false).await?;
        Ok(resolution)
    }

    /// Persist the ballot if it changed, report the resolution, and turn
    /// exhaustion into an error once the rejection is stored.
    async fn finish(
        &self,
        ballot: &Ballot,
        resolution: &Resolution,
        vote_changed: bool,
    ) -> Result<(), ConsensusError> {
        let mutated = match resolution {
            Resolution::AlreadyResolved { .. } => false,
            Resolution::Incomplete { .. } => vote_changed,
            _ => true,
        };
        if mutated {
            self.ctx.ballots.save(ballot).await?;
        }

        self.report(ballot, resolution);

        if let Resolution::Exhausted { rejected } = resolution {
            return Err(DomainError::ExhaustedOptions {
                rejected: Some(*rejected),
            }
            .into());
        }
        Ok(())
    }

    fn report(&self, ballot: &Ballot, resolution: &Resolution) {
        let consensus_id = ballot.id();
        match resolution {
            Resolution::Incomplete {
                votes_cast,
                total_members,
            } => {
                debug!("{} of {} members have voted", votes_cast, total_members);
            }
            Resolution::AlreadyResolved { option, status } => {
                debug!("Option {} already {}", option, status);
            }
            Resolution::Accepted { option } => {
                let title = ballot.option(*option).map(|o| o.title.as_str());
                info!("Group {} accepted option {:?}", ballot.group_id(), title);
                self.ctx.emit(
                    "option_accepted",
                    json!({
                        "consensus_id": consensus_id,
                        "option_id": option,
                        "title": title,
                    }),
                );
            }
            Resolution::Rotated {
                rejected,
                next,
                synthesized,
            } => {
                self.report_rejection(ballot, *rejected);
                if let Some(option) = ballot.option(*next) {
                    if *synthesized {
                        info!("Synthesized option {} ({})", option.letter, option.title);
                        self.ctx.emit(
                            "option_synthesized",
                            json!({
                                "consensus_id": consensus_id,
                                "option_id": option.id,
                                "letter": option.letter,
                                "title": option.title,
                            }),
                        );
                    }
                    self.ctx.emit(
                        "option_activated",
                        json!({
                            "consensus_id": consensus_id,
                            "option_id": option.id,
                            "letter": option.letter,
                            "title": option.title,
                        }),
                    );
                }
            }
            Resolution::Exhausted { rejected } => {
                self.report_rejection(ballot, *rejected);
                warn!("Group {} has no options left", ballot.group_id());
                self.ctx.emit(
                    "options_exhausted",
                    json!({
                        "group_id": ballot.group_id(),
                        "consensus_id": consensus_id,
                    }),
                );
            }
        }
    }

    fn report_rejection(&self, ballot: &Ballot, rejected: OptionId) {
        let Some(option) = ballot.option(rejected) else {
            return;
        };
        info!("Option {} ({}) rejected", option.letter, option.title);
        self.ctx.emit(
            "option_rejected",
            json!({
                "consensus_id": ballot.id(),
                "option_id": option.id,
                "letter": option.letter,
                "tally": option.final_tally,
            }),
        );
    }
}

//! Drives the use cases through a scripted vote sequence

use super::report::{SimulationReport, SlateView, StepOutcome, StepRecord};
use super::step::SimulationStep;
use groupgo_application::{
    CastVoteInput, CastVoteUseCase, ConsensusError, ConsensusQuery, EngineContext,
    StartConsensusInput, StartConsensusUseCase,
};
use groupgo_domain::{DomainError, GroupId, ItineraryOption};
use std::sync::Arc;
use tracing::info;

/// Runs `generate` and `simulate` against one engine
pub struct SimulationRunner {
    start: StartConsensusUseCase,
    vote: CastVoteUseCase,
    query: ConsensusQuery,
}

impl SimulationRunner {
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        Self {
            start: StartConsensusUseCase::new(ctx.clone()),
            vote: CastVoteUseCase::new(ctx.clone()),
            query: ConsensusQuery::new(ctx),
        }
    }

    /// Open a round and return its slate
    pub async fn generate(&self, input: StartConsensusInput) -> Result<SlateView, ConsensusError> {
        let output = self.start.execute(input).await?;
        Ok(SlateView::from(&output))
    }

    /// Open a round, replay `steps` on it and report the final state.
    ///
    /// A failing step is recorded and the replay continues; only failing to
    /// open the round aborts.
    pub async fn run(
        &self,
        input: StartConsensusInput,
        steps: &[SimulationStep],
    ) -> Result<SimulationReport, ConsensusError> {
        let group = input.group_id.clone();
        let slate = self.generate(input).await?;

        let mut records = Vec::with_capacity(steps.len());
        for step in steps {
            let outcome = match self.apply(&group, step).await {
                Ok(outcome) => outcome,
                Err(e) => StepOutcome::Failed {
                    error: e.to_string(),
                    needs_new_input: e.as_domain().is_some_and(DomainError::needs_new_input),
                },
            };
            info!("Step '{}' done", step);
            records.push(StepRecord {
                step: step.to_string(),
                outcome,
            });
        }

        Ok(SimulationReport {
            slate,
            steps: records,
            options: self.query.options(&group).await?,
            status: self.query.voting_status(&group).await?,
            winner: self.query.winner(&group).await?,
        })
    }

    async fn apply(
        &self,
        group: &GroupId,
        step: &SimulationStep,
    ) -> Result<StepOutcome, ConsensusError> {
        let active = self.active(group).await?;
        match step {
            SimulationStep::Vote { member, choice } => {
                let outcome = self
                    .vote
                    .cast_vote(CastVoteInput::new(
                        group.clone(),
                        member.clone(),
                        active.id,
                        *choice,
                    ))
                    .await?;
                Ok(StepOutcome::Voted {
                    letter: active.letter,
                    outcome,
                })
            }
            SimulationStep::Advance => {
                let resolution = self.vote.advance_to_next(group).await?;
                Ok(StepOutcome::Resolved {
                    letter: active.letter,
                    resolution,
                })
            }
            SimulationStep::Resolve => {
                let resolution = self.vote.resolve(group, active.id).await?;
                Ok(StepOutcome::Resolved {
                    letter: active.letter,
                    resolution,
                })
            }
        }
    }

    async fn active(&self, group: &GroupId) -> Result<ItineraryOption, ConsensusError> {
        self.query
            .active_option(group)
            .await?
            .ok_or_else(|| DomainError::NoActiveOption.into())
    }
}

//! Ballot - one consensus round with its options and live votes
//!
//! The ballot is the only place option statuses change and votes are
//! deleted. Every transition takes the current member roster and an
//! injected [`RandomSource`], so callers serialize access per group and
//! tests can pin every random pick.
//!
//! # Transitions
//!
//! ```text
//! open ──▶ activate_initial ──▶ cast_vote* ──▶ accepted (winner)
//!                                   │
//!                                   └──▶ rejected ──▶ next pending | synthesized | exhausted
//! ```

use super::consensus::Consensus;
use super::option::{ItineraryOption, OptionStatus};
use super::vote::{Tally, Vote, VoteChoice};
use crate::core::error::DomainError;
use crate::core::ids::{ConsensusId, GroupId, MemberId, OptionId};
use crate::core::letter::OptionLetter;
use crate::core::random::RandomSource;
use crate::generation::{
    CandidateGenerator, GenerationInput, GenerationSettings, OptionDraft, PairKey,
};
use crate::group::Preference;
use crate::inventory::Inventory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How the next pending option is picked after a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// Lowest display order, then letter. Used after a completed vote.
    InOrder,
    /// Uniformly at random. Used by the explicit advance.
    Random,
}

/// What a transition did to the ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Still waiting on votes
    Incomplete {
        votes_cast: usize,
        total_members: usize,
    },
    Accepted {
        option: OptionId,
    },
    /// The option was rejected and another one is now active
    Rotated {
        rejected: OptionId,
        next: OptionId,
        synthesized: bool,
    },
    /// The option was rejected and nothing could replace it
    Exhausted {
        rejected: OptionId,
    },
    /// The option had already reached a terminal state; nothing changed
    AlreadyResolved {
        option: OptionId,
        status: OptionStatus,
    },
}

impl Resolution {
    pub fn is_final(&self) -> bool {
        matches!(self, Resolution::Accepted { .. } | Resolution::Exhausted { .. })
    }
}

/// Result of a cast vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub vote: Vote,
    /// False when the same stance was already recorded
    pub changed: bool,
    pub resolution: Resolution,
}

/// Read model for "where is the group in the vote"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingStatus {
    pub active_option: Option<OptionId>,
    pub votes_cast: usize,
    pub yes_votes: usize,
    pub total_members: usize,
    pub pending_count: usize,
    pub rejected_count: usize,
    /// Every member has voted on the active option
    pub all_voted: bool,
    pub winner: Option<OptionId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    consensus: Consensus,
    preferences: Vec<Preference>,
    inventory: Inventory,
    settings: GenerationSettings,
    options: Vec<ItineraryOption>,
    votes: BTreeMap<MemberId, Vote>,
}

impl Ballot {
    /// New active round with every draft as a pending option
    pub fn open(
        group_id: impl Into<GroupId>,
        preferences: Vec<Preference>,
        inventory: Inventory,
        settings: GenerationSettings,
        drafts: Vec<OptionDraft>,
    ) -> Self {
        let consensus = Consensus::new(group_id);
        let options = drafts
            .into_iter()
            .map(|draft| ItineraryOption::from_draft(consensus.id, draft))
            .collect();
        Self {
            consensus,
            preferences,
            inventory,
            settings,
            options,
            votes: BTreeMap::new(),
        }
    }

    // ==================== Reads ====================

    pub fn consensus(&self) -> &Consensus {
        &self.consensus
    }

    pub fn id(&self) -> ConsensusId {
        self.consensus.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.consensus.group_id
    }

    pub fn is_active(&self) -> bool {
        self.consensus.is_active
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Activated options in activation order, then pending ones by letter
    pub fn options(&self) -> Vec<&ItineraryOption> {
        let mut options: Vec<&ItineraryOption> = self.options.iter().collect();
        options.sort_by_key(|o| (o.display_order == 0, o.display_order, o.letter));
        options
    }

    pub fn option(&self, id: OptionId) -> Option<&ItineraryOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn option_by_letter(&self, letter: OptionLetter) -> Option<&ItineraryOption> {
        self.options.iter().find(|o| o.letter == letter)
    }

    pub fn active_option(&self) -> Option<&ItineraryOption> {
        self.options.iter().find(|o| o.is_active())
    }

    pub fn winner(&self) -> Option<&ItineraryOption> {
        self.options.iter().find(|o| o.is_winner)
    }

    pub fn votes(&self) -> impl Iterator<Item = &Vote> {
        self.votes.values()
    }

    pub fn vote_of(&self, member: &MemberId) -> Option<&Vote> {
        self.votes.get(member)
    }

    pub fn votes_for(&self, option: OptionId) -> Vec<&Vote> {
        self.votes.values().filter(|v| v.option_id == option).collect()
    }

    /// Votes on `option` from current roster members only
    pub fn tally(&self, option: OptionId, roster: &[MemberId]) -> Tally {
        Tally::from_votes(
            self.votes
                .values()
                .filter(|v| v.option_id == option && roster.contains(&v.member_id)),
        )
    }

    pub fn voting_status(&self, roster: &[MemberId]) -> VotingStatus {
        let active = self.active_option().map(|o| o.id);
        let tally = active
            .map(|id| self.tally(id, roster))
            .unwrap_or_default();
        VotingStatus {
            active_option: active,
            votes_cast: tally.cast(),
            yes_votes: tally.yes,
            total_members: roster.len(),
            pending_count: self.count_with(OptionStatus::Pending),
            rejected_count: self.count_with(OptionStatus::Rejected),
            all_voted: active.is_some() && tally.is_complete(roster.len()),
            winner: self.winner().map(|o| o.id),
        }
    }

    fn count_with(&self, status: OptionStatus) -> usize {
        self.options.iter().filter(|o| o.status == status).count()
    }

    // ==================== Transitions ====================

    /// Promote one pending option, chosen uniformly at random.
    ///
    /// Returns the active option id, or `None` if the ballot has no options.
    pub fn activate_initial(&mut self, rng: &mut dyn RandomSource) -> Option<OptionId> {
        if let Some(active) = self.active_option() {
            return Some(active.id);
        }
        let pending: Vec<usize> = self.indices_with(OptionStatus::Pending);
        if pending.is_empty() {
            return None;
        }
        let index = pending[rng.pick_index(pending.len())];
        Some(self.activate(index))
    }

    /// Record `member`'s vote on the active option, then resolve if everyone has voted.
    ///
    /// A member's earlier vote, on any option, is overwritten.
    pub fn cast_vote(
        &mut self,
        member: &MemberId,
        option: OptionId,
        choice: VoteChoice,
        comment: Option<String>,
        roster: &[MemberId],
        rng: &mut dyn RandomSource,
    ) -> Result<VoteOutcome, DomainError> {
        self.ensure_open()?;
        let index = self.index_of(option)?;
        if !roster.contains(member) {
            return Err(DomainError::NotAMember(member.clone()));
        }

        let mut vote = Vote::new(self.consensus.group_id.clone(), member.clone(), option, choice);
        if let Some(comment) = comment {
            vote = vote.with_comment(comment);
        }

        let target = &self.options[index];
        if target.status.is_terminal()
            && let Some(existing) = self.votes.get(member)
            && existing.same_stance(&vote)
        {
            return Ok(VoteOutcome {
                vote: existing.clone(),
                changed: false,
                resolution: Resolution::AlreadyResolved {
                    option,
                    status: target.status,
                },
            });
        }
        if !target.is_active() {
            return Err(DomainError::invalid_transition(
                option,
                target.status,
                "only the active option accepts votes",
            ));
        }

        let changed = match self.votes.get(member) {
            Some(existing) if existing.same_stance(&vote) => false,
            _ => {
                self.votes.insert(member.clone(), vote.clone());
                self.recount();
                true
            }
        };
        let vote = self.votes.get(member).cloned().unwrap_or(vote);

        let resolution = self.evaluate(index, roster, rng, RotationPolicy::InOrder);
        Ok(VoteOutcome {
            vote,
            changed,
            resolution,
        })
    }

    /// Explicit "roll again" on the active option
    pub fn roll_again(
        &mut self,
        member: &MemberId,
        option: OptionId,
        roster: &[MemberId],
        rng: &mut dyn RandomSource,
    ) -> Result<VoteOutcome, DomainError> {
        self.cast_vote(member, option, VoteChoice::RollAgain, None, roster, rng)
    }

    /// Re-check an option against the current roster.
    ///
    /// Terminal options report their state without changing anything.
    pub fn resolve(
        &mut self,
        option: OptionId,
        roster: &[MemberId],
        rng: &mut dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        let index = self.index_of(option)?;
        let target = &self.options[index];
        if target.status.is_terminal() {
            return Ok(Resolution::AlreadyResolved {
                option,
                status: target.status,
            });
        }
        self.ensure_open()?;
        if !target.is_active() {
            return Err(DomainError::invalid_transition(
                option,
                target.status,
                "only the active option can be resolved",
            ));
        }
        Ok(self.evaluate(index, roster, rng, RotationPolicy::InOrder))
    }

    /// Skip the active option after a completed, non-unanimous vote.
    ///
    /// The replacement is picked at random among pending options.
    pub fn advance_to_next(
        &mut self,
        roster: &[MemberId],
        rng: &mut dyn RandomSource,
    ) -> Result<Resolution, DomainError> {
        self.ensure_open()?;
        let active = self.active_option().ok_or(DomainError::NoActiveOption)?;
        let (id, status) = (active.id, active.status);
        let tally = self.tally(id, roster);

        if !tally.is_complete(roster.len()) {
            return Err(DomainError::invalid_transition(
                id,
                status,
                format!(
                    "only {} of {} members have voted",
                    tally.cast(),
                    roster.len()
                ),
            ));
        }
        if tally.is_unanimous(roster.len()) {
            return Err(DomainError::invalid_transition(
                id,
                status,
                "the vote is unanimous",
            ));
        }

        let index = self.index_of(id)?;
        Ok(self.reject_and_rotate(index, tally, roster, rng, RotationPolicy::Random))
    }

    /// Retire this round; a newer consensus takes over the group
    pub fn deactivate(&mut self) {
        self.consensus.is_active = false;
        self.votes.clear();
        self.recount();
    }

    // ==================== Internals ====================

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.consensus.is_active {
            Ok(())
        } else {
            Err(DomainError::NoActiveConsensus)
        }
    }

    fn index_of(&self, option: OptionId) -> Result<usize, DomainError> {
        self.options
            .iter()
            .position(|o| o.id == option)
            .ok_or(DomainError::OptionNotFound(option))
    }

    fn indices_with(&self, status: OptionStatus) -> Vec<usize> {
        (0..self.options.len())
            .filter(|&i| self.options[i].status == status)
            .collect()
    }

    fn next_display_order(&self) -> u32 {
        self.options
            .iter()
            .map(|o| o.display_order)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn activate(&mut self, index: usize) -> OptionId {
        let order = self.next_display_order();
        let option = &mut self.options[index];
        option.status = OptionStatus::Active;
        option.display_order = order;
        option.id
    }

    fn recount(&mut self) {
        for option in &mut self.options {
            option.vote_count = self
                .votes
                .values()
                .filter(|v| v.option_id == option.id)
                .count();
        }
    }

    fn evaluate(
        &mut self,
        index: usize,
        roster: &[MemberId],
        rng: &mut dyn RandomSource,
        policy: RotationPolicy,
    ) -> Resolution {
        let id = self.options[index].id;
        let tally = self.tally(id, roster);

        if !tally.is_complete(roster.len()) {
            return Resolution::Incomplete {
                votes_cast: tally.cast(),
                total_members: roster.len(),
            };
        }
        if tally.is_unanimous(roster.len()) {
            let option = &mut self.options[index];
            option.status = OptionStatus::Accepted;
            option.is_winner = true;
            option.final_tally = Some(tally);
            return Resolution::Accepted { option: id };
        }
        self.reject_and_rotate(index, tally, roster, rng, policy)
    }

    fn reject_and_rotate(
        &mut self,
        index: usize,
        tally: Tally,
        roster: &[MemberId],
        rng: &mut dyn RandomSource,
        policy: RotationPolicy,
    ) -> Resolution {
        let rejected = self.options[index].id;
        {
            let option = &mut self.options[index];
            option.status = OptionStatus::Rejected;
            option.final_tally = Some(tally);
        }
        self.votes.retain(|_, v| v.option_id != rejected);
        self.recount();

        if let Some(next) = self.promote_pending(rng, policy) {
            return Resolution::Rotated {
                rejected,
                next,
                synthesized: false,
            };
        }
        match self.synthesize(roster, rng) {
            Some(next) => Resolution::Rotated {
                rejected,
                next,
                synthesized: true,
            },
            None => Resolution::Exhausted { rejected },
        }
    }

    fn promote_pending(
        &mut self,
        rng: &mut dyn RandomSource,
        policy: RotationPolicy,
    ) -> Option<OptionId> {
        let pending = self.indices_with(OptionStatus::Pending);
        if pending.is_empty() {
            return None;
        }
        let index = match policy {
            RotationPolicy::InOrder => *pending.iter().min_by_key(|&&i| {
                let option = &self.options[i];
                (option.display_order, option.letter)
            })?,
            RotationPolicy::Random => pending[rng.pick_index(pending.len())],
        };
        Some(self.activate(index))
    }

    /// One fresh option from the round's own preferences and inventory
    fn synthesize(&mut self, roster: &[MemberId], rng: &mut dyn RandomSource) -> Option<OptionId> {
        let used_letters: Vec<OptionLetter> = self.options.iter().map(|o| o.letter).collect();
        let exclude: HashSet<PairKey> = self.options.iter().map(ItineraryOption::key).collect();
        let letter = OptionLetter::next_or_random(&used_letters, rng);

        let input = GenerationInput {
            preferences: &self.preferences,
            inventory: &self.inventory,
            member_count: roster.len(),
        };
        let draft = CandidateGenerator::new(self.settings).synthesize_one(&input, &exclude, letter)?;

        let mut option = ItineraryOption::from_draft(self.consensus.id, draft);
        option.status = OptionStatus::Active;
        option.display_order = self.next_display_order();
        let id = option.id;
        self.options.push(option);
        Some(id)
    }
}

//! Vote types for itinerary consensus
//!
//! A member holds at most one live vote per group. Casting again re-points
//! that vote instead of adding a second one.

use crate::core::ids::{GroupId, MemberId, OptionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member's stance on the active option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Yes,
    /// Explicit non-affirmative vote; rejects the option once everyone has voted
    RollAgain,
}

impl VoteChoice {
    pub fn is_yes(&self) -> bool {
        matches!(self, VoteChoice::Yes)
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteChoice::Yes => write!(f, "yes"),
            VoteChoice::RollAgain => write!(f, "roll again"),
        }
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(VoteChoice::Yes),
            "roll" | "roll_again" | "roll-again" | "no" | "n" => Ok(VoteChoice::RollAgain),
            other => Err(format!("Unknown vote: {}. Valid: yes, roll", other)),
        }
    }
}

/// One member's current vote
///
/// # Example
///
/// ```
/// use groupgo_domain::voting::{Vote, VoteChoice};
/// use groupgo_domain::core::ids::OptionId;
///
/// let vote = Vote::new("trip-club", "alice", OptionId::generate(), VoteChoice::Yes)
///     .with_comment("Love the hotel");
/// assert!(vote.choice.is_yes());
/// assert_eq!(vote.comment.as_deref(), Some("Love the hotel"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub option_id: OptionId,
    pub choice: VoteChoice,
    /// Free text, independent of the choice
    pub comment: Option<String>,
    pub cast_at: DateTime<Utc>,
}

impl Vote {
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
            cast_at: Utc::now(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = (!comment.trim().is_empty()).then_some(comment);
        self
    }

    /// Same option, choice and comment; the timestamp is ignored
    pub fn same_stance(&self, other: &Vote) -> bool {
        self.option_id == other.option_id
            && self.choice == other.choice
            && self.comment == other.comment
    }
}

/// Counted votes on one option
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub yes: usize,
    pub roll_again: usize,
}

impl Tally {
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Self {
        votes.into_iter().fold(Self::default(), |mut tally, vote| {
            match vote.choice {
                VoteChoice::Yes => tally.yes += 1,
                VoteChoice::RollAgain => tally.roll_again += 1,
            }
            tally
        })
    }

    pub fn cast(&self) -> usize {
        self.yes + self.roll_again
    }

    /// Everyone has voted
    pub fn is_complete(&self, total_members: usize) -> bool {
        total_members > 0 && self.cast() >= total_members
    }

    /// Everyone has voted yes
    pub fn is_unanimous(&self, total_members: usize) -> bool {
        self.is_complete(total_members) && self.yes == total_members && self.roll_again == 0
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} yes / {} roll again", self.yes, self.roll_again)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(member: &str, choice: VoteChoice) -> Vote {
        Vote::new("g1", member, OptionId::generate(), choice)
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!("YES".parse::<VoteChoice>(), Ok(VoteChoice::Yes));
        assert_eq!("roll".parse::<VoteChoice>(), Ok(VoteChoice::RollAgain));
        assert_eq!("roll_again".parse::<VoteChoice>(), Ok(VoteChoice::RollAgain));
        assert!("maybe".parse::<VoteChoice>().is_err());
    }

    #[test]
    fn test_blank_comment_is_none() {
        let v = vote("a", VoteChoice::Yes).with_comment("   ");
        assert!(v.comment.is_none());
    }

    #[test]
    fn test_same_stance_ignores_timestamp() {
        let a = vote("a", VoteChoice::Yes);
        let mut b = a.clone();
        b.cast_at = a.cast_at + chrono::Duration::seconds(5);
        assert!(a.same_stance(&b));
        b.choice = VoteChoice::RollAgain;
        assert!(!a.same_stance(&b));
    }

    #[test]
    fn test_tally_unanimity() {
        let votes = vec![
            vote("a", VoteChoice::Yes),
            vote("b", VoteChoice::Yes),
            vote("c", VoteChoice::RollAgain),
        ];
        let tally = Tally::from_votes(&votes);
        assert_eq!(tally.cast(), 3);
        assert!(tally.is_complete(3));
        assert!(!tally.is_unanimous(3));
        assert!(!tally.is_complete(4));

        let all_yes = Tally::from_votes(&votes[..2]);
        assert!(all_yes.is_unanimous(2));
    }

    #[test]
    fn test_empty_roster_never_complete() {
        assert!(!Tally::default().is_complete(0));
        assert!(!Tally::default().is_unanimous(0));
    }
}

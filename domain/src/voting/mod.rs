//! Voting: options, votes and the ballot state machine.

pub mod ballot;
pub mod consensus;
pub mod option;
pub mod vote;

pub use ballot::{Ballot, Resolution, RotationPolicy, VoteOutcome, VotingStatus};
pub use consensus::Consensus;
pub use option::{ItineraryOption, OptionStatus};
pub use vote::{Tally, Vote, VoteChoice};

//! Domain layer for groupgo
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Generation
//!
//! Member [`Preference`]s and provider [`Inventory`] go into the
//! [`CandidateGenerator`], which prices every (flight, hotel) pairing for
//! the matching destinations and keeps a low/middle/high spread of them as
//! lettered option drafts.
//!
//! ## Voting
//!
//! A [`Ballot`] holds one consensus round. Exactly one option is active at
//! a time; it is accepted only when every member votes yes. Any
//! "roll again" rejects it once everyone has voted, and the ballot moves
//! on to the next pending option or synthesizes a fresh one.

pub mod config;
pub mod core;
pub mod generation;
pub mod group;
pub mod inventory;
pub mod voting;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    ids::{ConsensusId, GroupId, InventoryId, MemberId, OptionId},
    letter::OptionLetter,
    random::{RandomSource, SeededRandom},
};
pub use generation::{
    AdoptedProposals, CandidateGenerator, GenerationInput, GenerationSettings, NightCount,
    OptionDraft, OptionSource, PairKey, ProposedOption,
};
pub use group::{BudgetStats, DateRange, MIN_GROUP_PREFERENCES, Member, Preference};
pub use inventory::{Activity, Flight, Hotel, Inventory, InventoryIndex, MatchStrategy};
pub use voting::{
    Ballot, Consensus, ItineraryOption, OptionStatus, Resolution, RotationPolicy, Tally, Vote,
    VoteChoice, VoteOutcome, VotingStatus,
};

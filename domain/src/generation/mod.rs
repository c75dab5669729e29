//! Option generation: candidates, tiers and the deterministic generator.

pub mod candidate;
pub mod draft;
pub mod generator;
pub mod proposal;
pub mod tier;

pub use candidate::{Candidate, DEFAULT_NIGHTS, NightCount, PairKey};
pub use draft::{OptionDraft, OptionSource};
pub use generator::{
    CandidateGenerator, GenerationInput, GenerationSettings, MAX_OPTIONS, select_spread,
    spread_indices,
};
pub use proposal::{AdoptedProposals, ProposedOption};
pub use tier::{TIER_NAMES, tier_name, tier_title};

//! Application layer for groupgo
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::{
    ballot_repository::{BallotRepository, RepositoryError},
    event_logger::{ConsensusEvent, ConsensusEventLogger, NoEventLogger},
    provider::{GroupDirectory, InventoryProvider, PreferenceProvider, ProviderError},
    recommendation::{RecommendationError, RecommendationService},
};
pub use use_cases::cast_vote::{CastVoteInput, CastVoteUseCase};
pub use use_cases::error::ConsensusError;
pub use use_cases::query::ConsensusQuery;
pub use use_cases::shared::EngineContext;
pub use use_cases::start_consensus::{
    StartConsensusInput, StartConsensusOutput, StartConsensusUseCase,
};

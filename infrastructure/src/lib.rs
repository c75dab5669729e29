//! Infrastructure layer for groupgo
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod scenario;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGenerationConfig, FileLoggingConfig, FileOutputConfig,
    FileVotingConfig,
};
pub use logging::JsonlConsensusLogger;
pub use scenario::{ScenarioError, ScenarioFile, ScenarioProvider, ScenarioRecommendations};
pub use storage::InMemoryBallotRepository;

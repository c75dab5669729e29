//! Recommendation service port
//!
//! An optional generative service that proposes ranked itineraries. The
//! engine never depends on it: errors and empty answers fall back to the
//! built-in generator.

use async_trait::async_trait;
use groupgo_domain::{Inventory, Preference, ProposedOption};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendationError {
    #[error("Recommendation service unavailable: {0}")]
    Unavailable(String),

    #[error("Unreadable proposal: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

#[async_trait]
pub trait RecommendationService: Send + Sync {
    async fn propose_options(
        &self,
        preferences: &[Preference],
        inventory: &Inventory,
    ) -> Result<Vec<ProposedOption>, RecommendationError>;
}

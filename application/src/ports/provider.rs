//! Provider ports
//!
//! Preferences, the member roster and travel inventory all come from
//! collaborators the engine does not own. Implementations live in the
//! infrastructure layer.

use async_trait::async_trait;
use groupgo_domain::{Activity, Flight, GroupId, Hotel, Member, Preference};
use thiserror::Error;

/// Errors reported by preference, roster and inventory providers
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed provider data: {0}")]
    Malformed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Source of member trip preferences
#[async_trait]
pub trait PreferenceProvider: Send + Sync {
    /// Completed preferences of the group, at most one per member
    async fn completed_preferences(&self, group: &GroupId)
    -> Result<Vec<Preference>, ProviderError>;
}

/// Source of the current member roster
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    async fn members(&self, group: &GroupId) -> Result<Vec<Member>, ProviderError>;
}

/// Source of flights, hotels and activities.
///
/// `destinations` is a hint; providers may return records for other
/// destinations and the engine filters them itself.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    async fn flights(&self, destinations: &[String]) -> Result<Vec<Flight>, ProviderError>;

    async fn hotels(&self, destinations: &[String]) -> Result<Vec<Hotel>, ProviderError>;

    /// Activities are optional; providers without them return nothing
    async fn activities(&self, _destinations: &[String]) -> Result<Vec<Activity>, ProviderError> {
        Ok(Vec::new())
    }
}

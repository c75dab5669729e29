//! Errors surfaced by the consensus use cases

use crate::ports::ballot_repository::RepositoryError;
use crate::ports::provider::ProviderError;
use groupgo_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ConsensusError {
    /// The domain error, if this is one
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            ConsensusError::Domain(e) => Some(e),
            _ => None,
        }
    }
}

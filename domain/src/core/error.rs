//! Domain error types

use crate::core::ids::{ConsensusId, MemberId, OptionId};
use crate::voting::option::OptionStatus;
use thiserror::Error;

/// Domain-level errors
///
/// Every variant is recoverable: the engine reports it and leaves retry
/// policy to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Need at least {required} completed preferences to generate options, found {found}")]
    InsufficientPreferences { found: usize, required: usize },

    #[error("No destination has both flight and hotel inventory (consensus {consensus_id})")]
    NoCandidatesGenerated { consensus_id: ConsensusId },

    #[error("Option {option} is {status}: {reason}")]
    InvalidTransition {
        option: OptionId,
        status: OptionStatus,
        reason: String,
    },

    #[error("No pending options remain and no new option could be synthesized")]
    ExhaustedOptions { rejected: Option<OptionId> },

    #[error("Option not found: {0}")]
    OptionNotFound(OptionId),

    #[error("{0} is not a member of this group")]
    NotAMember(MemberId),

    #[error("No option is currently open for voting")]
    NoActiveOption,

    #[error("No active consensus for this group")]
    NoActiveConsensus,
}

impl DomainError {
    /// Build an `InvalidTransition` error
    pub fn invalid_transition(
        option: OptionId,
        status: OptionStatus,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            option,
            status,
            reason: reason.into(),
        }
    }

    /// Whether the group has to supply new preferences or inventory before
    /// another round can succeed
    pub fn needs_new_input(&self) -> bool {
        matches!(
            self,
            DomainError::InsufficientPreferences { .. }
                | DomainError::NoCandidatesGenerated { .. }
                | DomainError::ExhaustedOptions { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_preferences_display() {
        let error = DomainError::InsufficientPreferences {
            found: 1,
            required: 2,
        };
        assert_eq!(
            error.to_string(),
            "Need at least 2 completed preferences to generate options, found 1"
        );
    }

    #[test]
    fn test_invalid_transition_display() {
        let option = OptionId::generate();
        let error = DomainError::invalid_transition(
            option.clone(),
            OptionStatus::Rejected,
            "voting is closed",
        );
        assert_eq!(
            error.to_string(),
            format!("Option {} is rejected: voting is closed", option)
        );
    }

    #[test]
    fn test_needs_new_input() {
        assert!(DomainError::ExhaustedOptions { rejected: None }.needs_new_input());
        assert!(
            DomainError::InsufficientPreferences {
                found: 0,
                required: 2
            }
            .needs_new_input()
        );
        assert!(!DomainError::NoActiveOption.needs_new_input());
        assert!(!DomainError::NotAMember(MemberId::new("mallory")).needs_new_input());
    }
}

//! Voting configuration from TOML (`[voting]` section)

use serde::{Deserialize, Serialize};

/// Raw voting configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Seed for activation and rotation picks; unset means OS entropy
    pub seed: Option<u64>,
}

//! Scenario document format

use groupgo_domain::{GroupId, Inventory, Member, Preference, ProposedOption};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Could not read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One group's trip planning inputs
///
/// # Example
///
/// ```
/// use groupgo_infrastructure::scenario::ScenarioFile;
///
/// let scenario = ScenarioFile::from_json(r#"{
///     "group_id": "crew",
///     "members": [{ "id": "ana", "display_name": "Ana" }],
///     "preferences": [{ "member_id": "ana", "destination": "Lisbon" }],
///     "inventory": { "flights": [{ "id": "f1", "destination": "Lisbon", "price": 180.0 }] }
/// }"#).unwrap();
///
/// assert_eq!(scenario.group_id.as_str(), "crew");
/// assert!(scenario.preferences[0].completed);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub group_id: GroupId,
    pub members: Vec<Member>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub inventory: Inventory,
    /// Canned recommendation service answer; absent means no service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposals: Option<Vec<ProposedOption>>,
}

impl ScenarioFile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ScenarioError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

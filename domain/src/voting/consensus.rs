//! Consensus: one voting round for a group

use crate::core::ids::{ConsensusId, GroupId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope for one round. Only the latest active consensus of a group is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consensus {
    pub id: ConsensusId,
    pub group_id: GroupId,
    pub generated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Consensus {
    pub fn new(group_id: impl Into<GroupId>) -> Self {
        Self {
            id: ConsensusId::generate(),
            group_id: group_id.into(),
            generated_at: Utc::now(),
            is_active: true,
        }
    }
}

//! Group members

use crate::core::ids::MemberId;
use serde::{Deserialize, Serialize};

/// One participant of a travel group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Human-friendly list of names: "alice", "alice and bob", "alice, bob, and carol"
pub fn summarize_names(names: &[&str]) -> String {
    match names {
        [] => "the group".to_string(),
        [one] => (*one).to_string(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

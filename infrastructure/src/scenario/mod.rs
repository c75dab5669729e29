//! Scenario files: a whole group, its preferences and a provider inventory
//! in one JSON document.
//!
//! The CLI runs against these instead of live provider APIs.

mod file;
mod provider;

pub use file::{ScenarioError, ScenarioFile};
pub use provider::{ScenarioProvider, ScenarioRecommendations};

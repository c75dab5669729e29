//! Generation configuration from TOML (`[generation]` section)

use groupgo_domain::MatchStrategy;
use groupgo_domain::generation::DEFAULT_NIGHTS;
use serde::{Deserialize, Serialize};

/// Raw generation configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Options generated per round (1..=8)
    pub option_count: usize,
    /// Nights priced when no date range is known
    pub default_nights: u32,
    /// Completed preferences required to start a round
    pub min_preferences: usize,
    /// "fuzzy" (substring, case-insensitive) or "exact"
    pub match_strategy: MatchStrategy,
    pub activities_per_option: usize,
    /// Ask the recommendation service first when one is available
    pub use_recommendations: bool,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            option_count: 3,
            default_nights: DEFAULT_NIGHTS,
            min_preferences: 2,
            match_strategy: MatchStrategy::Fuzzy,
            activities_per_option: 2,
            use_recommendations: true,
        }
    }
}

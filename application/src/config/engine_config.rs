//! Engine configuration - generation and voting knobs.
//!
//! [`EngineConfig`] groups the parameters the use cases read on every
//! round. It is built by the infrastructure config loader from the merged
//! TOML/env configuration, or directly in tests.

use groupgo_domain::generation::DEFAULT_NIGHTS;
use groupgo_domain::{GenerationSettings, MIN_GROUP_PREFERENCES, MatchStrategy, NightCount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Options generated per round (clamped to 1..=8).
    pub option_count: usize,
    /// Nights priced when neither the caller nor any preference gives dates.
    pub default_nights: u32,
    /// Completed preferences required to start a round. Values below two
    /// are raised to two, see [`EngineConfig::required_preferences`].
    pub min_preferences: usize,
    pub match_strategy: MatchStrategy,
    pub activities_per_option: usize,
    /// Ask the recommendation service (if one is wired) before generating.
    pub use_recommendations: bool,
    /// Seed for activation and rotation picks; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            option_count: 3,
            default_nights: DEFAULT_NIGHTS,
            min_preferences: 2,
            match_strategy: MatchStrategy::Fuzzy,
            activities_per_option: 2,
            use_recommendations: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    // ==================== Builder Methods ====================

    pub fn with_option_count(mut self, count: usize) -> Self {
        self.option_count = count;
        self
    }

    pub fn with_default_nights(mut self, nights: u32) -> Self {
        self.default_nights = nights;
        self
    }

    pub fn with_min_preferences(mut self, min: usize) -> Self {
        self.min_preferences = min;
        self
    }

    pub fn with_match_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.match_strategy = strategy;
        self
    }

    pub fn with_activities_per_option(mut self, count: usize) -> Self {
        self.activities_per_option = count;
        self
    }

    pub fn with_recommendations(mut self, enabled: bool) -> Self {
        self.use_recommendations = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Completed preferences a round actually needs, never fewer than two
    pub fn required_preferences(&self) -> usize {
        self.min_preferences.max(MIN_GROUP_PREFERENCES)
    }

    /// Settings for one generation pass priced for `nights`
    pub fn generation_settings(&self, nights: NightCount) -> GenerationSettings {
        GenerationSettings {
            option_count: self.option_count,
            nights,
            activities_per_option: self.activities_per_option,
            match_strategy: self.match_strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert_eq!(config.option_count, 3);
        assert_eq!(config.default_nights, 7);
        assert_eq!(config.min_preferences, 2);
        assert_eq!(config.match_strategy, MatchStrategy::Fuzzy);
        assert!(config.use_recommendations);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_option_count(5)
            .with_match_strategy(MatchStrategy::Exact)
            .with_seed(42);

        assert_eq!(config.option_count, 5);
        assert_eq!(config.match_strategy, MatchStrategy::Exact);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_required_preferences_has_floor() {
        assert_eq!(EngineConfig::default().with_min_preferences(0).required_preferences(), 2);
        assert_eq!(EngineConfig::default().with_min_preferences(1).required_preferences(), 2);
        assert_eq!(EngineConfig::default().with_min_preferences(3).required_preferences(), 3);
    }

    #[test]
    fn test_generation_settings() {
        let config = EngineConfig::default().with_activities_per_option(1);
        let settings = config.generation_settings(NightCount::exact(4));
        assert_eq!(settings.nights, NightCount::exact(4));
        assert_eq!(settings.activities_per_option, 1);
        assert_eq!(settings.option_count, 3);
    }
}

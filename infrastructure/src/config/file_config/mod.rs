//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generation;
mod logging;
mod output;
mod voting;

pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use voting::FileVotingConfig;

use groupgo_application::EngineConfig;
use groupgo_domain::config::validation::validate_generation;
use groupgo_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Candidate generation settings
    pub generation: FileGenerationConfig,
    /// Voting settings
    pub voting: FileVotingConfig,
    /// Event trail and diagnostic log files
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        validate_generation(
            self.generation.option_count,
            self.generation.default_nights,
            self.generation.min_preferences,
        )
    }

    /// Engine settings for the use cases
    pub fn to_engine_config(&self) -> EngineConfig {
        let generation = &self.generation;
        let mut config = EngineConfig::default()
            .with_option_count(generation.option_count)
            .with_default_nights(generation.default_nights)
            .with_min_preferences(generation.min_preferences)
            .with_match_strategy(generation.match_strategy)
            .with_activities_per_option(generation.activities_per_option)
            .with_recommendations(generation.use_recommendations);
        if let Some(seed) = self.voting.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupgo_domain::{ConfigIssueCode, MatchStrategy, OutputFormat, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[generation]
option_count = 4
default_nights = 5
min_preferences = 3
match_strategy = "exact"
activities_per_option = 1
use_recommendations = false

[voting]
seed = 42

[logging]
event_log = "events.jsonl"
file = "groupgo.log"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.option_count, 4);
        assert_eq!(config.generation.default_nights, 5);
        assert_eq!(config.generation.match_strategy, MatchStrategy::Exact);
        assert!(!config.generation.use_recommendations);
        assert_eq!(config.voting.seed, Some(42));
        assert!(config.logging.file.is_some());
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[voting]
seed = 7
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voting.seed, Some(7));
        // Defaults should apply
        assert_eq!(config.generation, FileGenerationConfig::default());
        assert!(config.logging.event_log.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_generation_issues() {
        let mut config = FileConfig::default();
        config.generation.option_count = 10;
        config.generation.min_preferences = 1;

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].code, ConfigIssueCode::OptionCountOutOfRange);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[1].code, ConfigIssueCode::TooFewPreferences);
        assert_eq!(issues[1].severity, Severity::Error);
    }

    #[test]
    fn test_to_engine_config() {
        let mut config = FileConfig::default();
        config.generation.option_count = 5;
        config.generation.match_strategy = MatchStrategy::Exact;
        config.voting.seed = Some(9);

        let engine = config.to_engine_config();
        assert_eq!(engine.option_count, 5);
        assert_eq!(engine.match_strategy, MatchStrategy::Exact);
        assert_eq!(engine.seed, Some(9));
        assert_eq!(engine.default_nights, 7);
        assert!(engine.use_recommendations);
    }
}

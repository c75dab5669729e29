//! Registry of configuration keys.
//!
//! Used by `--show-config` to describe each setting next to its value.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    /// Dotted key path (e.g., `"generation.option_count"`).
    pub key: &'static str,
    pub description: &'static str,
    /// Valid string values (empty if freeform).
    pub valid_values: &'static [&'static str],
}

/// All known config keys, in file order.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up a config key by its dotted path.
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.key == key)
}

static KNOWN_KEYS: [ConfigKeyInfo; 9] = [
    // ==================== Generation ====================
    ConfigKeyInfo {
        key: "generation.option_count",
        description: "Options generated per round (1-8)",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "generation.default_nights",
        description: "Nights priced when no travel dates are known",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "generation.min_preferences",
        description: "Completed preferences required to start a round",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "generation.match_strategy",
        description: "How member destinations match inventory destinations",
        valid_values: &["fuzzy", "exact"],
    },
    ConfigKeyInfo {
        key: "generation.activities_per_option",
        description: "Activities attached to each option",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "generation.use_recommendations",
        description: "Ask the recommendation service before the built-in generator",
        valid_values: &["true", "false"],
    },
    // ==================== Voting ====================
    ConfigKeyInfo {
        key: "voting.seed",
        description: "Seed for activation and rotation picks (unset = random)",
        valid_values: &[],
    },
    // ==================== Logging ====================
    ConfigKeyInfo {
        key: "logging.event_log",
        description: "JSONL file receiving consensus events",
        valid_values: &[],
    },
    ConfigKeyInfo {
        key: "logging.file",
        description: "File receiving diagnostic logs",
        valid_values: &[],
    },
];

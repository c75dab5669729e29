//! Validation of generation settings.
//!
//! Problems are reported as [`ConfigIssue`]s rather than failing outright,
//! so the caller decides whether warnings are worth printing and errors
//! worth aborting over.

use crate::generation::MAX_OPTIONS;
use crate::group::MIN_GROUP_PREFERENCES;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the engine cannot run with this value.
    Error,
    /// Non-fatal: the value is adjusted or works poorly.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `option_count` outside 1..=8; it will be clamped.
    OptionCountOutOfRange,
    /// `default_nights` is zero.
    ZeroNights,
    /// `default_nights` is implausibly long for a group trip.
    LongStay,
    /// `min_preferences` below two lets a single member decide alone.
    TooFewPreferences,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Whether any issue is fatal
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Check the generation knobs that have hard limits
pub fn validate_generation(
    option_count: usize,
    default_nights: u32,
    min_preferences: usize,
) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if option_count == 0 || option_count > MAX_OPTIONS {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::OptionCountOutOfRange,
            format!(
                "generation.option_count = {} is outside 1..={}; it will be clamped",
                option_count, MAX_OPTIONS
            ),
        ));
    }
    if default_nights == 0 {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::ZeroNights,
            "generation.default_nights must be at least 1",
        ));
    } else if default_nights > 60 {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::LongStay,
            format!(
                "generation.default_nights = {} prices a very long stay",
                default_nights
            ),
        ));
    }
    if min_preferences < MIN_GROUP_PREFERENCES {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::TooFewPreferences,
            format!(
                "generation.min_preferences = {} but a group round needs at least {}",
                min_preferences, MIN_GROUP_PREFERENCES
            ),
        ));
    }

    issues
}

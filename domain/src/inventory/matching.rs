//! Destination matching strategies
//!
//! Inventory destinations and member destinations are both free text
//! ("Paris" vs "Paris, France"), so the generator asks a
//! [`DestinationMatcher`] rather than comparing strings itself.

use serde::{Deserialize, Serialize};

/// Decides whether an inventory destination satisfies a member's destination
pub trait DestinationMatcher: Send + Sync {
    fn matches(&self, available: &str, wanted: &str) -> bool;
}

/// Case-insensitive substring match in either direction. Empty strings never match.
pub fn fuzzy_contains(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Matcher backed by [`fuzzy_contains`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyContains;

impl DestinationMatcher for FuzzyContains {
    fn matches(&self, available: &str, wanted: &str) -> bool {
        fuzzy_contains(available, wanted)
    }
}

/// Case-insensitive equality after trimming
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl DestinationMatcher for ExactMatch {
    fn matches(&self, available: &str, wanted: &str) -> bool {
        let available = available.trim();
        !available.is_empty() && available.eq_ignore_ascii_case(wanted.trim())
    }
}

/// Configurable choice of matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    #[default]
    Fuzzy,
    Exact,
}

impl MatchStrategy {
    pub fn matcher(&self) -> &'static dyn DestinationMatcher {
        match self {
            MatchStrategy::Fuzzy => &FuzzyContains,
            MatchStrategy::Exact => &ExactMatch,
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::Fuzzy => write!(f, "fuzzy"),
            MatchStrategy::Exact => write!(f, "exact"),
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fuzzy" => Ok(MatchStrategy::Fuzzy),
            "exact" => Ok(MatchStrategy::Exact),
            other => Err(format!(
                "Unknown match strategy: {}. Valid: fuzzy, exact",
                other
            )),
        }
    }
}

//! Price tiers
//!
//! An option's tier is its rank by cost among its siblings. The first three
//! names cover the usual slate; the rest exist for larger slates and for
//! options synthesized after rotation.

/// Tier names by rank, cheapest first
pub const TIER_NAMES: [&str; 8] = [
    "Budget-Friendly",
    "Balanced",
    "Premium",
    "Comfort Plus",
    "Explorer",
    "Signature",
    "Luxury",
    "Ultimate",
];

/// Tier name for a zero-based rank; ranks past the table reuse the last entry
pub fn tier_name(rank: usize) -> &'static str {
    TIER_NAMES[rank.min(TIER_NAMES.len() - 1)]
}

/// Title shown for an option: tier name plus destination
pub fn tier_title(rank: usize, destination: &str) -> String {
    format!("{} – {}", tier_name(rank), destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_names() {
        assert_eq!(tier_name(0), "Budget-Friendly");
        assert_eq!(tier_name(1), "Balanced");
        assert_eq!(tier_name(2), "Premium");
        assert_eq!(tier_name(7), "Ultimate");
        assert_eq!(tier_name(42), "Ultimate");
    }

    #[test]
    fn test_tier_title() {
        assert_eq!(tier_title(0, "Paris"), "Budget-Friendly – Paris");
    }
}

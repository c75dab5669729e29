//! Money helpers for inventory prices and member budgets

/// Round to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Whether a provider price is usable (finite and not negative)
pub fn is_valid_price(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Parse a free-form amount such as `"$1,700"` or `" 950.50 "`.
///
/// Returns `None` for empty, unparsable or non-positive input.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Split `total` evenly, leaving it whole when there is nobody to split it between
pub fn per_person(total: f64, members: usize) -> f64 {
    if members == 0 {
        return round_cents(total);
    }
    round_cents(total / members as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.005_f64 + 0.0001), 10.01);
        assert_eq!(round_cents(3.333333), 3.33);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,700"), Some(1700.0));
        assert_eq!(parse_amount(" 950.50 "), Some(950.5));
        assert_eq!(parse_amount("flexible"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-20"), None);
    }

    #[test]
    fn test_per_person_zero_members() {
        assert_eq!(per_person(1000.0, 0), 1000.0);
        assert_eq!(per_person(1000.0, 3), 333.33);
    }

    #[test]
    fn test_is_valid_price() {
        assert!(is_valid_price(0.0));
        assert!(!is_valid_price(-1.0));
        assert!(!is_valid_price(f64::NAN));
    }
}

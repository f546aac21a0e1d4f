//! Quantity Parsing
//!
//! Inventory quantities are free-form strings ("3", "x2", "beaucoup").
//! A leading integer, with an optional `x`/`X` prefix, counts; anything
//! else is explicitly unbounded rather than silently infinite, so callers
//! can tell "no number" apart from a real count.

/// Parsed form of a quantity string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Count(u32),
    /// No leading number; treated as never-low and not nudgeable
    Unbounded,
}

impl Quantity {
    pub fn count(self) -> Option<u32> {
        match self {
            Quantity::Count(n) => Some(n),
            Quantity::Unbounded => None,
        }
    }
}

/// Parse "x3"/"X3"/"3 boîtes" to a count; everything else is unbounded
pub fn parse_quantity(raw: &str) -> Quantity {
    let rest = raw
        .trim()
        .strip_prefix(['x', 'X'])
        .unwrap_or_else(|| raw.trim());
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u32>() {
        Ok(n) => Quantity::Count(n),
        Err(_) => Quantity::Unbounded,
    }
}

/// Below the alert threshold; items without a threshold or without a
/// parseable count never qualify
pub fn is_low_stock(quantity: &str, alert_threshold: Option<u32>) -> bool {
    match (parse_quantity(quantity), alert_threshold) {
        (Quantity::Count(n), Some(threshold)) => n < threshold,
        _ => false,
    }
}

/// New quantity string after a −/+ nudge, minimum zero; `None` when the
/// current value has no count to nudge
pub fn nudge_quantity(raw: &str, delta: i32) -> Option<String> {
    let current = parse_quantity(raw).count()? as i32;
    let next = (current + delta).max(0);
    Some(next.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_prefixed_numbers_parse() {
        assert_eq!(parse_quantity("3"), Quantity::Count(3));
        assert_eq!(parse_quantity("x12"), Quantity::Count(12));
        assert_eq!(parse_quantity("X2"), Quantity::Count(2));
        assert_eq!(parse_quantity("2 boîtes"), Quantity::Count(2));
    }

    #[test]
    fn words_are_unbounded_not_zero() {
        assert_eq!(parse_quantity("beaucoup"), Quantity::Unbounded);
        assert_eq!(parse_quantity(""), Quantity::Unbounded);
        assert_eq!(parse_quantity("x trois"), Quantity::Unbounded);
    }

    #[test]
    fn low_stock_needs_count_and_threshold() {
        assert!(is_low_stock("1", Some(2)));
        assert!(!is_low_stock("2", Some(2)));
        assert!(!is_low_stock("beaucoup", Some(2)));
        assert!(!is_low_stock("1", None));
    }

    #[test]
    fn nudge_clamps_at_zero_and_skips_unbounded() {
        assert_eq!(nudge_quantity("3", 1).as_deref(), Some("4"));
        assert_eq!(nudge_quantity("0", -1).as_deref(), Some("0"));
        assert_eq!(nudge_quantity("x2", -1).as_deref(), Some("1"));
        assert_eq!(nudge_quantity("plein", 1), None);
    }
}

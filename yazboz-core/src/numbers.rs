//! Parsing helpers for the text the table types into score and price fields.

use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d+$").ok());
static CENTS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d*\.?\d{0,2}$").ok());

fn matches(pattern: &Lazy<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Whether `text` may sit in a score field: empty, or digits only.
#[must_use]
pub fn is_score_entry(text: &str) -> bool {
    text.is_empty() || matches(&DIGITS, text)
}

/// Read the integer at the start of `text`: optional sign, then digits.
/// Trailing junk is ignored (`"12ab"` reads as 12); no digits reads as `None`.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Score field value as written into a round; unreadable text counts as 0.
#[must_use]
pub fn parse_score(text: &str) -> i64 {
    parse_leading_int(text).unwrap_or(0)
}

/// Strictly positive integer, or `None`.
#[must_use]
pub fn parse_positive(text: &str) -> Option<i64> {
    parse_leading_int(text).filter(|value| *value > 0)
}

/// Drink price text. Whole numbers only unless `fractional`, which allows up
/// to two decimal places. An empty field is a price of zero.
#[must_use]
pub fn parse_price(text: &str, fractional: bool) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    let valid = if fractional {
        matches(&CENTS, text)
    } else {
        matches(&DIGITS, text)
    };
    if !valid {
        return None;
    }
    // "." passes the pattern but carries no number.
    Some(text.parse::<f64>().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_entries_accept_digits_only() {
        assert!(is_score_entry(""));
        assert!(is_score_entry("120"));
        assert!(!is_score_entry("-5"));
        assert!(!is_score_entry("1.5"));
        assert!(!is_score_entry("12a"));
    }

    #[test]
    fn leading_int_reads_sign_and_prefix() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  -100"), Some(-100));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("12ab"), Some(12));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn score_defaults_to_zero() {
        assert_eq!(parse_score("x"), 0);
        assert_eq!(parse_score("15"), 15);
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-4"), None);
        assert_eq!(parse_positive("11"), Some(11));
    }

    #[test]
    fn prices_follow_variant_precision() {
        assert_eq!(parse_price("", false), Some(0.0));
        assert_eq!(parse_price("15", false), Some(15.0));
        assert_eq!(parse_price("7.5", false), None);
        assert_eq!(parse_price("7.50", true), Some(7.5));
        assert_eq!(parse_price("7.505", true), None);
        assert_eq!(parse_price(".", true), Some(0.0));
        assert_eq!(parse_price("-1", true), None);
    }
}

//! Lenient numeric cell coercion.
//!
//! Source exports mix plain numbers with display formatting: percent
//! signs, thousands separators, and Chinese magnitude suffixes
//! (`3.2万`/`3.2w` = 32000, `4千`/`4k` = 4000). Unparsable cells degrade
//! to `None`; a malformed cell never aborts a batch.

use crate::model::RawCell;

/// Coerce a raw cell to `f64`. `None` marks a missing value.
#[must_use]
pub fn parse_numeric_cell(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(v) if v.is_finite() => Some(*v),
        RawCell::Number(_) | RawCell::Empty => None,
        RawCell::Text(s) => parse_numeric_str(s),
    }
}

/// Coerce a display string to `f64`.
#[must_use]
pub fn parse_numeric_str(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(percent) = trimmed.strip_suffix('%') {
        return bare_number(percent).map(|v| v / 100.0);
    }

    for (suffixes, scale) in [
        (["万", "w", "W"].as_slice(), 10_000.0),
        (["千", "k", "K"].as_slice(), 1_000.0),
    ] {
        for suffix in suffixes {
            if let Some(head) = trimmed.strip_suffix(suffix) {
                return bare_number(head).map(|v| v * scale);
            }
        }
    }

    bare_number(trimmed)
}

/// Parse a number after stripping thousands separators.
fn bare_number(input: &str) -> Option<f64> {
    let cleaned = input.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_numeric_str("42"), Some(42.0));
        assert_eq!(parse_numeric_str(" 3.25 "), Some(3.25));
        assert_eq!(parse_numeric_str("-1.5"), Some(-1.5));
    }

    #[test]
    fn test_percent() {
        assert_eq!(parse_numeric_str("12.5%"), Some(0.125));
        assert_eq!(parse_numeric_str("100%"), Some(1.0));
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(parse_numeric_str("1,234"), Some(1234.0));
        assert_eq!(parse_numeric_str("12,345,678.5"), Some(12_345_678.5));
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert_eq!(parse_numeric_str("3.2w"), Some(32_000.0));
        assert_eq!(parse_numeric_str("3.2万"), Some(32_000.0));
        assert_eq!(parse_numeric_str("4k"), Some(4_000.0));
        assert_eq!(parse_numeric_str("4千"), Some(4_000.0));
        assert_eq!(parse_numeric_str("1.5W"), Some(15_000.0));
    }

    #[test]
    fn test_unparsable_degrades_to_missing() {
        assert_eq!(parse_numeric_str(""), None);
        assert_eq!(parse_numeric_str("n/a"), None);
        assert_eq!(parse_numeric_str("-"), None);
        assert_eq!(parse_numeric_str("abc%"), None);
    }

    #[test]
    fn test_cell_variants() {
        assert_eq!(parse_numeric_cell(&RawCell::Number(7.0)), Some(7.0));
        assert_eq!(parse_numeric_cell(&RawCell::Number(f64::NAN)), None);
        assert_eq!(parse_numeric_cell(&RawCell::Empty), None);
        assert_eq!(parse_numeric_cell(&"2.5w".into()), Some(25_000.0));
    }
}

//! Holiday calendar and batch-date handling.
//!
//! The scoring core never consults the wall clock: the representative
//! batch date is always supplied by the caller, and lead-time computation
//! is a pure function of that date and a fixed calendar.

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, ScoreError};

/// Fixed promotional holiday calendar as `(month, day)` pairs:
/// New Year, Valentine's Day, Women's Day, Children's Day, Mid-Autumn,
/// National Day, Christmas.
pub const HOLIDAYS: [(u32, u32); 7] = [
    (1, 1),
    (2, 14),
    (3, 8),
    (6, 1),
    (9, 15),
    (10, 1),
    (12, 25),
];

/// Day distance from `date` to the next occurrence of any calendar
/// holiday, checking this year's and next year's dates and taking the
/// soonest. A holiday falling on `date` itself is distance 0.
#[must_use]
pub fn days_to_next_holiday(date: NaiveDate) -> i64 {
    let mut min_days = i64::MAX;
    for (month, day) in HOLIDAYS {
        for year in [date.year(), date.year() + 1] {
            if let Some(holiday) = NaiveDate::from_ymd_opt(year, month, day) {
                if holiday >= date {
                    min_days = min_days.min((holiday - date).num_days());
                }
            }
        }
    }
    min_days
}

fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2})\s*(?:至|to|\.\.)\s*(\d{4}-\d{2}-\d{2})$")
            .unwrap_or_else(|e| panic!("invalid date-range pattern: {e}"))
    })
}

/// Parse a representative batch date.
///
/// Accepts a single `YYYY-MM-DD` date, or a `YYYY-MM-DD至YYYY-MM-DD`
/// range (also `to` / `..` separators) which resolves to the range
/// midpoint, matching how source exports label their snapshot window.
pub fn parse_batch_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Some(caps) = range_pattern().captures(input) {
        let start = parse_single_date(&caps[1])?;
        let end = parse_single_date(&caps[2])?;
        if end < start {
            return Err(ScoreError::input(format!(
                "date range ends before it starts: '{input}'"
            )));
        }
        return Ok(start + Duration::days((end - start).num_days() / 2));
    }
    parse_single_date(input)
}

fn parse_single_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| ScoreError::input(format!("unparsable batch date '{input}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_holiday_distance_same_day() {
        assert_eq!(days_to_next_holiday(date(2025, 10, 1)), 0);
    }

    #[test]
    fn test_holiday_distance_forward_only() {
        // Oct 2: National Day is behind, Christmas is the next occurrence
        assert_eq!(days_to_next_holiday(date(2025, 10, 2)), 84);
    }

    #[test]
    fn test_holiday_distance_wraps_to_next_year() {
        // Dec 26: nearest is next year's Jan 1
        assert_eq!(days_to_next_holiday(date(2025, 12, 26)), 6);
    }

    #[test]
    fn test_lead_time_boundary_45_vs_46() {
        // Mid-Autumn (Sep 15) sits after the longest holiday gap, so the
        // 45/46-day lead boundary is observable there.
        assert_eq!(days_to_next_holiday(date(2025, 8, 1)), 45);
        assert_eq!(days_to_next_holiday(date(2025, 7, 31)), 46);
    }

    #[test]
    fn test_parse_single_date() {
        assert_eq!(
            parse_batch_date("2025-04-27").expect("parse"),
            date(2025, 4, 27)
        );
        assert!(parse_batch_date("27/04/2025").is_err());
        assert!(parse_batch_date("").is_err());
    }

    #[test]
    fn test_parse_range_midpoint() {
        // 29-day window from the original export naming convention
        assert_eq!(
            parse_batch_date("2025-04-27至2025-05-26").expect("parse"),
            date(2025, 5, 11)
        );
        assert_eq!(
            parse_batch_date("2025-01-01 to 2025-01-11").expect("parse"),
            date(2025, 1, 6)
        );
        assert_eq!(
            parse_batch_date("2025-01-01..2025-01-01").expect("parse"),
            date(2025, 1, 1)
        );
    }

    #[test]
    fn test_parse_reversed_range_rejected() {
        assert!(parse_batch_date("2025-05-26至2025-04-27").is_err());
    }
}

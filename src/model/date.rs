//! Calendar-day arithmetic. Every date on the board is a plain local calendar
//! day; there is no time-of-day or timezone component anywhere in the geometry.

use chrono::{Days, NaiveDate};

const WIRE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date `{input}`: expected YYYY-MM-DD")]
pub struct DateError {
    pub input: String,
}

/// The calendar date `n` days after `date` (before it for negative `n`).
///
/// Saturates at chrono's representable range rather than panicking.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Whole calendar days from `b` to `a`; positive when `a` is after `b`.
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}

pub fn parse_date(input: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(input.trim(), WIRE_FORMAT).map_err(|_| DateError {
        input: input.to_string(),
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// `MM-DD`, used on task glyphs where the year is noise.
pub fn format_short(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn add_days_crosses_month_and_year() {
        assert_eq!(add_days(d("2024-01-30"), 3), d("2024-02-02"));
        assert_eq!(add_days(d("2024-12-31"), 1), d("2025-01-01"));
        assert_eq!(add_days(d("2024-03-01"), -1), d("2024-02-29"));
    }

    #[test]
    fn diff_inverts_add_for_a_range_of_offsets() {
        let base = d("2024-02-27");
        for n in -400..=400 {
            assert_eq!(diff_days(add_days(base, n), base), n, "offset {n}");
        }
    }

    #[test]
    fn diff_is_signed() {
        assert_eq!(diff_days(d("2024-01-05"), d("2024-01-01")), 4);
        assert_eq!(diff_days(d("2024-01-01"), d("2024-01-05")), -4);
        assert_eq!(diff_days(d("2024-01-01"), d("2024-01-01")), 0);
    }

    #[test]
    fn add_days_saturates_instead_of_panicking() {
        assert_eq!(add_days(NaiveDate::MAX, 10), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -10), NaiveDate::MIN);
    }

    #[test]
    fn parse_rejects_other_formats() {
        assert!(parse_date("01/02/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert_eq!(format_date(d(" 2024-07-04 ")), "2024-07-04");
        assert_eq!(format_short(d("2024-07-04")), "07-04");
    }
}

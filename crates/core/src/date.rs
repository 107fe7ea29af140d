// Calendar date parsing
//
// Every date crossing the API boundary is a plain calendar date in
// YYYY-MM-DD form. Times and offsets are rejected.

use chrono::NaiveDate;
use thiserror::Error;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A value that is not a YYYY-MM-DD calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{input}': expected YYYY-MM-DD")]
pub struct DateParseError {
    pub input: String,
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// Surrounding whitespace is ignored. The year must have four digits, so
/// values such as `24-01-10` or `2024-1-10T00:00` are rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    let err = || DateParseError {
        input: input.to_string(),
    };

    let mut parts = trimmed.splitn(3, '-');
    let year = parts.next().ok_or_else(err)?;
    let month = parts.next().ok_or_else(err)?;
    let day = parts.next().ok_or_else(err)?;

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if year.len() != 4
        || !all_digits(year)
        || !(1..=2).contains(&month.len())
        || !all_digits(month)
        || !(1..=2).contains(&day.len())
        || !all_digits(day)
    {
        return Err(err());
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| err())
}

//! Calendar date helpers
//!
//! Dates travel as `YYYY-MM-DD` strings everywhere; these helpers parse,
//! shift and format them.

use chrono::{Duration, NaiveDate, Utc};

/// Storage and wire format for dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string
pub fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", date))
}

/// Today's date (UTC calendar day)
pub fn today() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Shift a date by a number of days, crossing month, year and leap-day boundaries
pub fn offset(date: &str, days: i64) -> Result<String, String> {
    let parsed = parse_date(date)?;
    let shifted = parsed
        .checked_add_signed(Duration::days(days))
        .ok_or_else(|| format!("Date offset out of range: {} {:+} days", date, days))?;
    Ok(shifted.format(DATE_FORMAT).to_string())
}

/// Long display form: "Monday, January 15, 2024"
pub fn format_display(date: &str) -> Result<String, String> {
    let parsed = parse_date(date)?;
    Ok(parsed.format("%A, %B %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_leap_year_boundary() {
        assert_eq!(offset("2024-03-01", -1).unwrap(), "2024-02-29");
        assert_eq!(offset("2023-03-01", -1).unwrap(), "2023-02-28");
    }

    #[test]
    fn test_offset_year_boundary() {
        assert_eq!(offset("2024-01-01", -1).unwrap(), "2023-12-31");
        assert_eq!(offset("2023-12-31", 1).unwrap(), "2024-01-01");
    }

    #[test]
    fn test_offset_zero_normalizes() {
        assert_eq!(offset(" 2024-05-09 ", 0).unwrap(), "2024-05-09");
    }

    #[test]
    fn test_parse_rejects_bad_dates() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("").is_err());
        assert!(offset("yesterday", -1).is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display("2024-01-15").unwrap(), "Monday, January 15, 2024");
        assert_eq!(format_display("2024-02-29").unwrap(), "Thursday, February 29, 2024");
    }

    #[test]
    fn test_today_is_utc_day() {
        let before = Utc::now().date_naive();
        let day = parse_date(&today()).unwrap();
        let after = Utc::now().date_naive();
        assert!(day == before || day == after);
    }
}

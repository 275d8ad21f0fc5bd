use chrono::NaiveDate;

use crate::error::CoreError;

/// Pattern identifiers are human-assigned strings such as `PTN001`.
pub type PatternId = String;

/// Maintenance log identifiers are `LOG` followed by a zero-padded ordinal.
pub type LogId = String;

/// Calendar dates are timezone-free; "today" comes from a [`Clock`](crate::clock::Clock).
pub type Date = NaiveDate;

/// Wire format for calendar dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<Date, CoreError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|e| {
        CoreError::Validation(format!("Invalid date '{value}' (expected YYYY-MM-DD): {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let date = parse_iso_date("2024-01-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert!(parse_iso_date(" 2024-01-10\n").is_ok());
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_iso_date("10/01/2024").is_err());
        assert!(parse_iso_date("2024-13-01").is_err());
        assert!(parse_iso_date("").is_err());
    }
}

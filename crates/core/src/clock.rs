//! Source of "today" for status derivation and log stamping.
//!
//! The registry never reads the system time directly so that callers (and
//! tests) can pin the calendar date.

use chrono::Utc;

use crate::types::Date;

pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> Date;
}

/// Reads the UTC calendar date from the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Utc::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn system_clock_is_not_before_2024() {
        let floor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(SystemClock.today() >= floor);
    }
}

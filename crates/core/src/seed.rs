//! Static data set loaded into a fresh registry.

use std::num::NonZeroU32;

use crate::error::CoreError;
use crate::maintenance::{MaintenanceLog, MaintenanceType};
use crate::pattern::Pattern;
use crate::types::{parse_iso_date, Date};

/// `(id, part number, usage count, threshold, last maintenance)`
const SEED_PATTERNS: &[(&str, &str, u32, u32, &str)] = &[
    ("PTN001", "ENG-V8-001", 45, 50, "2024-01-15"),
    ("PTN002", "GEAR-TR-002", 52, 50, "2024-01-10"),
    ("PTN003", "BLOCK-CYL-003", 75, 60, "2023-12-20"),
    ("PTN004", "VALVE-HEAD-004", 30, 40, "2024-01-20"),
    ("PTN005", "PISTON-STD-005", 38, 45, "2024-01-18"),
    ("PTN006", "HOUSING-PUMP-006", 42, 40, "2024-01-12"),
    ("PTN007", "FLANGE-PIPE-007", 25, 35, "2024-01-22"),
    ("PTN008", "BRACKET-MOUNT-008", 55, 50, "2024-01-05"),
    ("PTN009", "COVER-ENGINE-009", 18, 30, "2024-01-25"),
    ("PTN010", "SHAFT-DRIVE-010", 68, 55, "2023-12-15"),
];

/// `(id, pattern id, type, remarks, date, technician)`, newest first.
const SEED_LOGS: &[(&str, &str, MaintenanceType, &str, &str, &str)] = &[
    (
        "LOG001",
        "PTN001",
        MaintenanceType::RoutineInspection,
        "Pattern in good condition, no issues found",
        "2024-01-15",
        "John Smith",
    ),
    (
        "LOG002",
        "PTN002",
        MaintenanceType::MinorRepair,
        "Small crack repaired, pattern ready for use",
        "2024-01-10",
        "Sarah Johnson",
    ),
    (
        "LOG003",
        "PTN003",
        MaintenanceType::MajorOverhaul,
        "Complete restoration needed due to excessive wear",
        "2023-12-20",
        "Mike Wilson",
    ),
];

/// Build the seed patterns, deriving each status as of `today`.
pub fn seed_patterns(today: Date) -> Result<Vec<Pattern>, CoreError> {
    SEED_PATTERNS
        .iter()
        .map(|&(id, part_number, usage, threshold, last)| {
            let threshold = NonZeroU32::new(threshold).ok_or_else(|| {
                CoreError::Internal(format!("Seed pattern {id} has a zero threshold"))
            })?;
            Ok(Pattern::new(
                id,
                part_number,
                usage,
                threshold,
                seed_date(last)?,
                today,
            ))
        })
        .collect()
}

/// Build the seed maintenance logs, most recent first.
pub fn seed_logs() -> Result<Vec<MaintenanceLog>, CoreError> {
    SEED_LOGS
        .iter()
        .map(|&(id, pattern_id, kind, remarks, date, technician)| {
            Ok(MaintenanceLog::new(
                id,
                pattern_id,
                kind,
                remarks,
                seed_date(date)?,
                technician,
            ))
        })
        .collect()
}

fn seed_date(value: &str) -> Result<Date, CoreError> {
    parse_iso_date(value).map_err(|e| CoreError::Internal(format!("Bad seed date: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::PatternStatus;
    use chrono::NaiveDate;

    #[test]
    fn ten_patterns_with_unique_ids() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let patterns = seed_patterns(today).unwrap();
        assert_eq!(patterns.len(), 10);

        let mut ids: Vec<_> = patterns.iter().map(|p| p.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn statuses_match_mock_data_near_its_date() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let statuses: Vec<_> = seed_patterns(today)
            .unwrap()
            .iter()
            .map(|p| p.status())
            .collect();
        use PatternStatus::*;
        assert_eq!(
            statuses,
            vec![Good, Warning, Overdue, Good, Good, Warning, Good, Warning, Good, Overdue]
        );
    }

    #[test]
    fn logs_are_newest_first_and_reference_seed_patterns() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
        let patterns = seed_patterns(today).unwrap();
        let logs = seed_logs().unwrap();

        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].id(), "LOG001");
        for log in &logs {
            assert!(patterns.iter().any(|p| p.id() == log.pattern_id()));
        }
    }
}

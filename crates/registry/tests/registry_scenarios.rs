//! End-to-end registry scenarios over the seed data.
//!
//! Each test pins "today" with a [`FixedClock`] so status derivation is
//! deterministic.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;

use foundrytrack_core::clock::FixedClock;
use foundrytrack_core::error::CoreError;
use foundrytrack_core::status::{days_since, PatternStatus, OVERDUE_AFTER_DAYS};
use foundrytrack_registry::PatternRegistry;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn registry_on(today: NaiveDate) -> PatternRegistry {
    PatternRegistry::seeded(Arc::new(FixedClock(today))).expect("seed data is valid")
}

// ---------------------------------------------------------------------------
// Status derivation holds for every pattern
// ---------------------------------------------------------------------------

#[test]
fn every_status_follows_the_derivation_rule() {
    for today in [date(2024, 1, 25), date(2024, 2, 12), date(2026, 10, 18)] {
        let mut registry = registry_on(today);
        registry.increment_usage("PTN001");
        registry.increment_usage("PTN006");

        for pattern in registry.patterns() {
            let expected = if pattern.usage_count() < pattern.threshold().get() {
                PatternStatus::Good
            } else if days_since(pattern.last_maintenance(), today) > OVERDUE_AFTER_DAYS {
                PatternStatus::Overdue
            } else {
                PatternStatus::Warning
            };
            assert_eq!(pattern.status(), expected, "{} on {today}", pattern.id());
        }
    }
}

// ---------------------------------------------------------------------------
// PTN002: 52 uses of 50, maintained 2024-01-10
// ---------------------------------------------------------------------------

#[test]
fn ptn002_is_warning_within_thirty_days() {
    let mut registry = registry_on(date(2024, 2, 9));
    let pattern = registry.find_pattern("PTN002").unwrap();
    assert_eq!(pattern.usage_count(), 52);
    assert_eq!(pattern.status(), PatternStatus::Warning);

    registry.increment_usage("PTN002");

    let pattern = registry.find_pattern("PTN002").unwrap();
    assert_eq!(pattern.usage_count(), 53);
    assert_eq!(pattern.status(), PatternStatus::Warning);
}

#[test]
fn ptn002_is_overdue_after_thirty_days() {
    let mut registry = registry_on(date(2024, 2, 10));
    assert_eq!(
        registry.find_pattern("PTN002").unwrap().status(),
        PatternStatus::Overdue
    );

    registry.increment_usage("PTN002");

    let pattern = registry.find_pattern("PTN002").unwrap();
    assert_eq!(pattern.usage_count(), 53);
    assert_eq!(pattern.status(), PatternStatus::Overdue);
}

// ---------------------------------------------------------------------------
// Maintenance log on a registry with three logs
// ---------------------------------------------------------------------------

#[test]
fn fourth_log_gets_log004_dated_today() {
    let today = date(2026, 10, 18);
    let mut registry = registry_on(today);
    assert_eq!(registry.maintenance_logs().len(), 3);

    let id = registry
        .add_maintenance_log("PTN001", "Routine Inspection", "checked ok")
        .unwrap();

    assert_eq!(id, "LOG004");
    let first = &registry.maintenance_logs()[0];
    assert_eq!(first.id(), "LOG004");
    assert_eq!(first.pattern_id(), "PTN001");
    assert_eq!(first.remarks(), "checked ok");
    assert_eq!(first.date(), today);

    let ids: Vec<_> = registry.maintenance_logs().iter().map(|l| l.id()).collect();
    assert_eq!(ids, vec!["LOG004", "LOG001", "LOG002", "LOG003"]);
}

#[test]
fn successive_logs_get_unique_ids() {
    let mut registry = registry_on(date(2024, 3, 1));
    let mut ids: Vec<_> = (0..12)
        .map(|i| {
            registry
                .add_maintenance_log("PTN008", "Cleaning", &format!("pass {i}"))
                .unwrap()
        })
        .collect();
    assert_eq!(ids.first().map(String::as_str), Some("LOG004"));
    assert_eq!(ids.last().map(String::as_str), Some("LOG015"));

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 12);
}

// ---------------------------------------------------------------------------
// Preserved inconsistencies
// ---------------------------------------------------------------------------

/// Unknown ids are silently ignored by `increment_usage` but rejected by
/// `add_maintenance_log`.
#[test]
fn unknown_id_policy_differs_between_operations() {
    let mut registry = registry_on(date(2024, 3, 1));
    let before = registry.patterns().to_vec();

    registry.increment_usage("PTN999");
    assert_eq!(registry.patterns(), before.as_slice());

    assert_matches!(
        registry.add_maintenance_log("PTN999", "Cleaning", "x"),
        Err(CoreError::NotFound { id, .. }) if id == "PTN999"
    );
}

/// Recording maintenance does not bring a pattern back to `Good`.
#[test]
fn maintenance_does_not_reset_an_overdue_pattern() {
    let mut registry = registry_on(date(2024, 6, 1));
    registry
        .add_maintenance_log("PTN010", "Replacement", "new shaft fitted")
        .unwrap();
    registry.increment_usage("PTN010");

    let pattern = registry.find_pattern("PTN010").unwrap();
    assert_eq!(pattern.last_maintenance(), date(2023, 12, 15));
    assert_eq!(pattern.status(), PatternStatus::Overdue);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_is_case_insensitive_and_ordered() {
    let registry = registry_on(date(2024, 1, 25));

    let all = registry.search_patterns("");
    assert_eq!(all.as_slice(), registry.patterns());

    let ids: Vec<_> = registry
        .search_patterns("PIPE")
        .iter()
        .map(|p| p.id().to_string())
        .collect();
    assert_eq!(ids, vec!["PTN007"]);

    let lower: Vec<_> = registry.search_patterns("ptn01");
    let upper: Vec<_> = registry.search_patterns("PTN01");
    assert_eq!(lower, upper);
    assert_eq!(lower.len(), 1);
}

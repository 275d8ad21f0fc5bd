//! Analytics derived from a pattern snapshot.
//!
//! Everything here is a pure function of the patterns passed in; the same
//! summary backs the dashboard cards and the footer of a filtered list.

use chrono::Datelike;
use serde::Serialize;

use crate::maintenance::{MaintenanceLog, MaintenanceType};
use crate::pattern::{Pattern, UsageBand};
use crate::status::PatternStatus;
use crate::types::Date;

/// Number of patterns shown under "recent activity".
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Categories broken out in the maintenance activity summary.
pub const SUMMARY_TYPE_LIMIT: usize = 4;

/// Per-status counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub good: usize,
    /// Patterns in `Warning`, i.e. needing validation.
    pub needing_validation: usize,
    pub overdue: usize,
}

impl StatusSummary {
    pub fn from_patterns<'a, I>(patterns: I) -> Self
    where
        I: IntoIterator<Item = &'a Pattern>,
    {
        patterns
            .into_iter()
            .fold(Self::default(), |mut acc, pattern| {
                acc.total += 1;
                match pattern.status() {
                    PatternStatus::Good => acc.good += 1,
                    PatternStatus::Warning => acc.needing_validation += 1,
                    PatternStatus::Overdue => acc.overdue += 1,
                }
                acc
            })
    }
}

/// Rounded percentage of `part` in `total`; 0 when there is nothing to count.
fn percent_of(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// The "system health" card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    /// Share of patterns in `Good`.
    pub operational_percent: u32,
    /// Share in `Warning` or `Overdue`.
    pub attention_percent: u32,
    pub overdue_to_schedule: usize,
    pub validations_to_review: usize,
}

impl SystemHealth {
    pub fn from_summary(summary: &StatusSummary) -> Self {
        Self {
            operational_percent: percent_of(summary.good, summary.total),
            attention_percent: percent_of(
                summary.needing_validation + summary.overdue,
                summary.total,
            ),
            overdue_to_schedule: summary.overdue,
            validations_to_review: summary.needing_validation,
        }
    }
}

/// One row of the recent-activity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternActivity {
    pub id: String,
    pub part_number: String,
    pub usage_count: u32,
    pub threshold: u32,
    pub status: PatternStatus,
    pub usage_percent: u32,
    pub usage_band: UsageBand,
}

impl From<&Pattern> for PatternActivity {
    fn from(pattern: &Pattern) -> Self {
        Self {
            id: pattern.id().to_string(),
            part_number: pattern.part_number().to_string(),
            usage_count: pattern.usage_count(),
            threshold: pattern.threshold().get(),
            status: pattern.status(),
            usage_percent: pattern.usage_percent(),
            usage_band: pattern.usage_band(),
        }
    }
}

/// The first [`RECENT_ACTIVITY_LIMIT`] patterns in registry order.
pub fn recent_activity(patterns: &[Pattern]) -> Vec<PatternActivity> {
    patterns
        .iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(PatternActivity::from)
        .collect()
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: StatusSummary,
    pub health: SystemHealth,
    pub recent_activity: Vec<PatternActivity>,
}

impl Dashboard {
    pub fn build(patterns: &[Pattern]) -> Self {
        let summary = StatusSummary::from_patterns(patterns);
        Self {
            summary,
            health: SystemHealth::from_summary(&summary),
            recent_activity: recent_activity(patterns),
        }
    }
}

// ---------------------------------------------------------------------------
// Maintenance statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub count: usize,
}

/// Quick stats and per-type activity shown beside the maintenance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStats {
    pub total_logs: usize,
    /// Logs dated in the same calendar month and year as `today`.
    pub this_month: usize,
    /// Highest count wins; ties go to the earlier category. `None` without logs.
    pub most_common: Option<MaintenanceType>,
    /// The first [`SUMMARY_TYPE_LIMIT`] categories, zero counts included.
    pub by_type: Vec<TypeCount>,
}

impl MaintenanceStats {
    pub fn build(logs: &[MaintenanceLog], today: Date) -> Self {
        let count_of = |wanted: MaintenanceType| {
            logs.iter()
                .filter(|log| log.maintenance_type() == wanted)
                .count()
        };

        let mut most_common: Option<TypeCount> = None;
        for maintenance_type in MaintenanceType::ALL {
            let count = count_of(maintenance_type);
            if count > 0 && most_common.map_or(true, |best| count > best.count) {
                most_common = Some(TypeCount {
                    maintenance_type,
                    count,
                });
            }
        }

        Self {
            total_logs: logs.len(),
            this_month: logs
                .iter()
                .filter(|log| {
                    log.date().year() == today.year() && log.date().month() == today.month()
                })
                .count(),
            most_common: most_common.map(|best| best.maintenance_type),
            by_type: MaintenanceType::ALL
                .iter()
                .take(SUMMARY_TYPE_LIMIT)
                .map(|&maintenance_type| TypeCount {
                    maintenance_type,
                    count: count_of(maintenance_type),
                })
                .collect(),
        }
    }
}

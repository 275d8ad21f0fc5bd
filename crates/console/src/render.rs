//! Plain-text rendering of registry snapshots.

use std::fmt::Write as _;

use foundrytrack_core::auth::{initials, User, DEPARTMENTS};
use foundrytrack_core::dashboard::{Dashboard, MaintenanceStats, StatusSummary};
use foundrytrack_core::maintenance::{MaintenanceLog, VALID_MAINTENANCE_TYPES};
use foundrytrack_core::pattern::{Pattern, UsageBand};
use foundrytrack_core::status::PatternStatus;

use crate::command::HELP;

/// Width of the textual usage bar.
const BAR_WIDTH: usize = 20;

pub fn help() -> String {
    let width = HELP.iter().map(|(usage, _)| usage.len()).max().unwrap_or(0);
    let mut out = String::from("Commands:\n");
    for (usage, description) in HELP {
        let _ = writeln!(out, "  {usage:<width$}  {description}");
    }
    out
}

pub fn home(user: Option<&User>) -> String {
    let name = user.map(|u| u.name.as_str()).unwrap_or("there");
    let mut out = format!("Welcome back, {name}!\n");
    out.push_str("Manage your foundry patterns efficiently with FoundryTrack.\n\n");
    for (command, description) in [
        ("dashboard", "View analytics and overview"),
        ("scan", "QR scan and update usage"),
        ("patterns", "Browse all patterns"),
        ("logs", "Track maintenance history"),
    ] {
        let _ = writeln!(out, "  {command:<10} {description}");
    }
    out
}

pub fn profile(user: Option<&User>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}]", initials(user.map(|u| u.name.as_str())));
    match user {
        Some(user) => {
            let _ = writeln!(out, "Name:  {}", user.name);
            let _ = writeln!(out, "Email: {}", user.email);
        }
        None => out.push_str("Not signed in\n"),
    }
    let _ = writeln!(out, "Departments: {}", DEPARTMENTS.join(", "));
    out
}

fn status_marker(status: PatternStatus) -> &'static str {
    match status {
        PatternStatus::Good => "OK",
        PatternStatus::Warning => "!!",
        PatternStatus::Overdue => "XX",
    }
}

/// `[#########-----------]  45/50  90%`
pub fn usage_bar(pattern: &Pattern) -> String {
    let filled = (pattern.usage_bar_percent() as usize * BAR_WIDTH) / 100;
    let fill = match pattern.usage_band() {
        UsageBand::Normal => '#',
        UsageBand::Approaching => '=',
        UsageBand::Exceeded => '!',
    };
    let bar: String = std::iter::repeat(fill)
        .take(filled)
        .chain(std::iter::repeat('-').take(BAR_WIDTH - filled))
        .collect();
    format!(
        "[{bar}] {:>4}/{:<4} {:>3}%",
        pattern.usage_count(),
        pattern.threshold(),
        pattern.usage_percent()
    )
}

pub fn summary(summary: &StatusSummary) -> String {
    format!(
        "Total: {}  Good: {}  Warning: {}  Overdue: {}",
        summary.total, summary.good, summary.needing_validation, summary.overdue
    )
}

pub fn pattern_table(patterns: &[Pattern]) -> String {
    if patterns.is_empty() {
        return "No patterns found. Try adjusting your search or filter.\n".to_string();
    }
    let mut out = String::new();
    for pattern in patterns {
        let _ = writeln!(
            out,
            "{} {:<7} {:<18} {:<8} {}  last maintained {}",
            status_marker(pattern.status()),
            pattern.id(),
            pattern.part_number(),
            pattern.status(),
            usage_bar(pattern),
            pattern.last_maintenance()
        );
    }
    let _ = writeln!(out, "{}", summary(&StatusSummary::from_patterns(patterns)));
    out
}

pub fn pattern_detail(pattern: &Pattern) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", pattern.id(), pattern.part_number());
    let _ = writeln!(out, "Status:           {}", pattern.status());
    let _ = writeln!(out, "Usage:            {}", usage_bar(pattern));
    let _ = writeln!(out, "Last maintenance: {}", pattern.last_maintenance());
    let note = if pattern.usage_count() >= pattern.threshold().get() {
        "This pattern has reached its usage threshold and requires validation.".to_string()
    } else {
        format!(
            "{} uses remaining before validation is required.",
            pattern.remaining_uses()
        )
    };
    let _ = writeln!(out, "{note}");
    out
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let s = &dashboard.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Total patterns:      {}", s.total);
    let _ = writeln!(out, "Needing validation:  {}", s.needing_validation);
    let _ = writeln!(out, "Overdue:             {}", s.overdue);
    let _ = writeln!(out, "In good condition:   {}", s.good);

    let h = &dashboard.health;
    out.push_str("\nSystem health:\n");
    let _ = writeln!(out, "  Operational patterns:  {:>3}%", h.operational_percent);
    let _ = writeln!(out, "  Requiring attention:   {:>3}%", h.attention_percent);
    let _ = writeln!(out, "  - Schedule maintenance for {} overdue patterns", h.overdue_to_schedule);
    let _ = writeln!(out, "  - Review {} patterns requiring validation", h.validations_to_review);
    let _ = writeln!(out, "  - System efficiency: {}%", h.operational_percent);
    out.push_str("\nRecent activity:\n");
    for row in &dashboard.recent_activity {
        let _ = writeln!(
            out,
            "  {:<7} {:<18} {:>4}/{:<4} {:>3}%  {}",
            row.id, row.part_number, row.usage_count, row.threshold, row.usage_percent, row.status
        );
    }
    out
}

pub fn log_table(logs: &[MaintenanceLog], patterns: &[Pattern], stats: &MaintenanceStats) -> String {
    let mut out = String::new();
    if logs.is_empty() {
        out.push_str("No maintenance logs yet.\n");
    }
    for log in logs {
        let status = patterns
            .iter()
            .find(|p| p.id() == log.pattern_id())
            .map(|p| p.status().as_str())
            .unwrap_or("Unknown");
        let _ = writeln!(
            out,
            "{} {} {:<7} ({:<7}) {:<18} by {}: {}",
            log.id(),
            log.date(),
            log.pattern_id(),
            status,
            log.maintenance_type(),
            log.technician(),
            log.remarks()
        );
    }
    out.push('\n');
    out.push_str(&maintenance_stats(stats));
    out
}

pub fn maintenance_stats(stats: &MaintenanceStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total logs: {}  This month: {}", stats.total_logs, stats.this_month);
    if let Some(most_common) = stats.most_common {
        let _ = writeln!(out, "Most common: {most_common}");
    }
    let by_type: Vec<String> = stats
        .by_type
        .iter()
        .map(|c| format!("{}: {}", c.maintenance_type, c.count))
        .collect();
    let _ = writeln!(out, "{}", by_type.join("  "));
    out
}

pub fn maintenance_types() -> String {
    let mut out = String::new();
    for name in VALID_MAINTENANCE_TYPES {
        let _ = writeln!(out, "  {name}");
    }
    out
}

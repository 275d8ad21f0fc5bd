//! Pattern health classification and the rule that derives it.
//!
//! A pattern is `Good` while its usage count is below its threshold. Once the
//! threshold is reached it needs validation: `Warning` while the last
//! maintenance is recent, `Overdue` once more than
//! [`OVERDUE_AFTER_DAYS`] days have passed.

use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Usage below threshold.
pub const STATUS_GOOD: &str = "Good";
/// Threshold reached, maintained within the grace window.
pub const STATUS_WARNING: &str = "Warning";
/// Threshold reached and the grace window has elapsed.
pub const STATUS_OVERDUE: &str = "Overdue";

/// All valid status names, in display order.
pub const VALID_STATUSES: &[&str] = &[STATUS_GOOD, STATUS_WARNING, STATUS_OVERDUE];

/// Days since last maintenance after which a pattern at threshold is overdue.
pub const OVERDUE_AFTER_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// PatternStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternStatus {
    Good,
    Warning,
    Overdue,
}

impl PatternStatus {
    /// Return the display string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => STATUS_GOOD,
            Self::Warning => STATUS_WARNING,
            Self::Overdue => STATUS_OVERDUE,
        }
    }

    /// Parse a status name case-insensitively.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "warning" => Ok(Self::Warning),
            "overdue" => Ok(Self::Overdue),
            _ => Err(CoreError::Validation(format!(
                "Unknown status: '{s}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Whether the pattern has reached its threshold and needs attention.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, Self::Good)
    }
}

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Whole days elapsed from `since` to `today`. Negative if `since` is in the future.
pub fn days_since(since: Date, today: Date) -> i64 {
    (today - since).num_days()
}

/// Derive the status of a pattern from its counters and maintenance date.
pub fn derive_status(
    usage_count: u32,
    threshold: NonZeroU32,
    last_maintenance: Date,
    today: Date,
) -> PatternStatus {
    if usage_count < threshold.get() {
        return PatternStatus::Good;
    }
    if days_since(last_maintenance, today) > OVERDUE_AFTER_DAYS {
        PatternStatus::Overdue
    } else {
        PatternStatus::Warning
    }
}

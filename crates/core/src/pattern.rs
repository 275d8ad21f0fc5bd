//! The tracked foundry tool and its usage counters.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::status::{derive_status, PatternStatus};
use crate::types::{Date, PatternId};

/// Usage percentage at which a pattern is flagged as approaching its threshold.
pub const APPROACHING_PERCENT: u64 = 80;

/// A physical foundry pattern whose usage drives revalidation.
///
/// The status is derived, never assigned: it is computed on construction and
/// recomputed by [`Pattern::record_use`]. Fields are read through accessors so
/// that a snapshot cannot drift from the derivation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    id: PatternId,
    part_number: String,
    usage_count: u32,
    threshold: NonZeroU32,
    last_maintenance: Date,
    status: PatternStatus,
}

impl Pattern {
    /// Create a pattern and derive its status as of `today`.
    pub fn new(
        id: impl Into<PatternId>,
        part_number: impl Into<String>,
        usage_count: u32,
        threshold: NonZeroU32,
        last_maintenance: Date,
        today: Date,
    ) -> Self {
        Self {
            id: id.into(),
            part_number: part_number.into(),
            usage_count,
            threshold,
            last_maintenance,
            status: derive_status(usage_count, threshold, last_maintenance, today),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn part_number(&self) -> &str {
        &self.part_number
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn threshold(&self) -> NonZeroU32 {
        self.threshold
    }

    pub fn last_maintenance(&self) -> Date {
        self.last_maintenance
    }

    pub fn status(&self) -> PatternStatus {
        self.status
    }

    /// Count one use and re-derive the status. Returns the previous status.
    ///
    /// The counter saturates at `u32::MAX` rather than wrapping.
    pub fn record_use(&mut self, today: Date) -> PatternStatus {
        let previous = self.status;
        self.usage_count = self.usage_count.saturating_add(1);
        self.status = derive_status(
            self.usage_count,
            self.threshold,
            self.last_maintenance,
            today,
        );
        previous
    }

    /// Case-insensitive substring match on id or part number.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.id.to_lowercase().contains(needle) || self.part_number.to_lowercase().contains(needle)
    }

    /// Usage as a rounded percentage of the threshold (may exceed 100).
    pub fn usage_percent(&self) -> u32 {
        let ratio = f64::from(self.usage_count) / f64::from(self.threshold.get());
        (ratio * 100.0).round() as u32
    }

    /// Usage percentage clamped to 100, for progress bars.
    pub fn usage_bar_percent(&self) -> u32 {
        self.usage_percent().min(100)
    }

    pub fn usage_band(&self) -> UsageBand {
        UsageBand::classify(self.usage_count, self.threshold)
    }

    /// Uses left before the threshold is reached (zero once reached).
    pub fn remaining_uses(&self) -> u32 {
        self.threshold.get().saturating_sub(self.usage_count)
    }
}

/// Coarse position of usage relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageBand {
    Normal,
    Approaching,
    Exceeded,
}

impl UsageBand {
    pub fn classify(usage_count: u32, threshold: NonZeroU32) -> Self {
        let usage = u64::from(usage_count) * 100;
        let threshold = u64::from(threshold.get());
        if usage >= threshold * 100 {
            Self::Exceeded
        } else if usage >= threshold * APPROACHING_PERCENT {
            Self::Approaching
        } else {
            Self::Normal
        }
    }
}

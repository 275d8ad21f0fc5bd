use std::sync::Arc;

use rand::Rng;
use serde_json::json;

use foundrytrack_core::clock::Clock;
use foundrytrack_core::dashboard::{Dashboard, MaintenanceStats};
use foundrytrack_core::error::CoreError;
use foundrytrack_core::maintenance::{
    format_log_id, MaintenanceLog, NewMaintenanceLog, DEFAULT_TECHNICIAN,
};
use foundrytrack_core::pattern::Pattern;
use foundrytrack_core::scan;
use foundrytrack_core::search::{self, StatusFilter};
use foundrytrack_core::seed;
use foundrytrack_core::types::{Date, LogId};
use foundrytrack_events::bus::{
    EVENT_MAINTENANCE_LOGGED, EVENT_STATUS_CHANGED, EVENT_USAGE_INCREMENTED,
};
use foundrytrack_events::{EventBus, RegistryEvent};

/// Owner of all patterns and maintenance logs.
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    /// Most recent first.
    logs: Vec<MaintenanceLog>,
    clock: Arc<dyn Clock>,
    technician: String,
    events: Option<Arc<EventBus>>,
}

impl PatternRegistry {
    /// A registry holding the static seed data, statuses derived as of the
    /// clock's current date.
    pub fn seeded(clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let patterns = seed::seed_patterns(clock.today())?;
        let logs = seed::seed_logs()?;
        Ok(Self::with_data(patterns, logs, clock))
    }

    /// A registry over caller-supplied data. `logs` must be most recent first.
    pub fn with_data(
        patterns: Vec<Pattern>,
        logs: Vec<MaintenanceLog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        tracing::debug!(
            patterns = patterns.len(),
            logs = logs.len(),
            "Pattern registry created"
        );
        Self {
            patterns,
            logs,
            clock,
            technician: DEFAULT_TECHNICIAN.to_string(),
            events: None,
        }
    }

    /// Name stamped on maintenance logs created from now on.
    pub fn with_technician(mut self, technician: impl Into<String>) -> Self {
        self.technician = technician.into();
        self
    }

    /// Publish change events on `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }

    pub fn technician(&self) -> &str {
        &self.technician
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// All patterns in registry order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// All maintenance logs, most recent first.
    pub fn maintenance_logs(&self) -> &[MaintenanceLog] {
        &self.logs
    }

    /// Exact-id lookup.
    pub fn find_pattern(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id() == id)
    }

    /// Case-insensitive search over id and part number; blank returns all.
    pub fn search_patterns(&self, query: &str) -> Vec<Pattern> {
        search::search_patterns(&self.patterns, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Search, then keep only patterns accepted by `filter`.
    pub fn search_filtered(&self, query: &str, filter: StatusFilter) -> Vec<Pattern> {
        search::filter_by_status(search::search_patterns(&self.patterns, query), filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(&self.patterns)
    }

    /// Log totals as of the registry's today.
    pub fn maintenance_stats(&self) -> MaintenanceStats {
        MaintenanceStats::build(&self.logs, self.today())
    }

    /// Manual scan: case-insensitive id lookup.
    pub fn scan(&self, input: &str) -> Result<&Pattern, CoreError> {
        scan::scan(&self.patterns, input)
    }

    /// Simulated QR scan: a random registered pattern.
    pub fn simulate_qr_scan<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&Pattern, CoreError> {
        let pattern = scan::simulate_qr_scan(&self.patterns, rng)?;
        tracing::debug!(pattern_id = %pattern.id(), "Simulated QR scan");
        Ok(pattern)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Count one use of the pattern with exactly this id and re-derive its
    /// status. Unknown ids are ignored without error.
    pub fn increment_usage(&mut self, pattern_id: &str) {
        let today = self.clock.today();
        let Some(pattern) = self.patterns.iter_mut().find(|p| p.id() == pattern_id) else {
            tracing::debug!(pattern_id, "Usage increment for unknown pattern ignored");
            return;
        };

        let previous = pattern.record_use(today);
        let current = pattern.status();
        let usage_count = pattern.usage_count();
        tracing::info!(
            pattern_id,
            usage_count,
            status = %current,
            "Pattern usage incremented"
        );

        self.publish(
            RegistryEvent::new(EVENT_USAGE_INCREMENTED)
                .for_pattern(pattern_id)
                .with_payload(json!({ "usageCount": usage_count, "status": current })),
        );
        if previous != current {
            self.publish(
                RegistryEvent::new(EVENT_STATUS_CHANGED)
                    .for_pattern(pattern_id)
                    .with_payload(json!({ "from": previous, "to": current })),
            );
        }
    }

    /// Validate and record a maintenance log, returning its id.
    ///
    /// The pattern is matched case-insensitively and the log stores its
    /// canonical id. The pattern itself is left untouched.
    pub fn add_maintenance_log(
        &mut self,
        pattern_id: &str,
        maintenance_type: &str,
        remarks: &str,
    ) -> Result<LogId, CoreError> {
        self.submit_maintenance_log(&NewMaintenanceLog::new(
            pattern_id,
            maintenance_type,
            remarks,
        ))
    }

    pub fn submit_maintenance_log(&mut self, form: &NewMaintenanceLog) -> Result<LogId, CoreError> {
        let maintenance_type = form.check().inspect_err(|e| {
            tracing::warn!(error = %e, "Maintenance log rejected");
        })?;

        let wanted = form.pattern_id.trim();
        let pattern_id = self
            .patterns
            .iter()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .map(|p| p.id().to_string())
            .ok_or_else(|| {
                tracing::warn!(pattern_id = wanted, "Maintenance log for unknown pattern");
                CoreError::NotFound {
                    entity: "pattern",
                    id: wanted.to_string(),
                }
            })?;

        let id = format_log_id(self.logs.len() + 1);
        let log = MaintenanceLog::new(
            id.clone(),
            pattern_id.clone(),
            maintenance_type,
            form.remarks.trim(),
            self.clock.today(),
            self.technician.clone(),
        );
        self.logs.insert(0, log);

        tracing::info!(
            log_id = %id,
            pattern_id = %pattern_id,
            maintenance_type = %maintenance_type,
            "Maintenance log recorded"
        );
        self.publish(
            RegistryEvent::new(EVENT_MAINTENANCE_LOGGED)
                .for_pattern(pattern_id)
                .with_payload(json!({ "logId": id, "type": maintenance_type })),
        );
        Ok(id)
    }

    fn publish(&self, event: RegistryEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

//! Maintenance categories, log records, and submission validation.
//!
//! Logs are immutable once created. Identifiers are `LOG` plus the log's
//! ordinal zero-padded to three digits.

use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::types::{Date, LogId, PatternId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TYPE_ROUTINE_INSPECTION: &str = "Routine Inspection";
pub const TYPE_MINOR_REPAIR: &str = "Minor Repair";
pub const TYPE_MAJOR_OVERHAUL: &str = "Major Overhaul";
pub const TYPE_CLEANING: &str = "Cleaning";
pub const TYPE_CALIBRATION: &str = "Calibration";
pub const TYPE_REPLACEMENT: &str = "Replacement";
pub const TYPE_EMERGENCY_REPAIR: &str = "Emergency Repair";

/// All maintenance categories, in the order offered to users.
pub const VALID_MAINTENANCE_TYPES: &[&str] = &[
    TYPE_ROUTINE_INSPECTION,
    TYPE_MINOR_REPAIR,
    TYPE_MAJOR_OVERHAUL,
    TYPE_CLEANING,
    TYPE_CALIBRATION,
    TYPE_REPLACEMENT,
    TYPE_EMERGENCY_REPAIR,
];

/// Technician recorded on new logs until real identities exist.
pub const DEFAULT_TECHNICIAN: &str = "Current User";

/// Prefix of every maintenance log id.
pub const LOG_ID_PREFIX: &str = "LOG";

// ---------------------------------------------------------------------------
// MaintenanceType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MaintenanceType {
    #[serde(rename = "Routine Inspection")]
    RoutineInspection,
    #[serde(rename = "Minor Repair")]
    MinorRepair,
    #[serde(rename = "Major Overhaul")]
    MajorOverhaul,
    Cleaning,
    Calibration,
    Replacement,
    #[serde(rename = "Emergency Repair")]
    EmergencyRepair,
}

impl MaintenanceType {
    /// Return the display string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoutineInspection => TYPE_ROUTINE_INSPECTION,
            Self::MinorRepair => TYPE_MINOR_REPAIR,
            Self::MajorOverhaul => TYPE_MAJOR_OVERHAUL,
            Self::Cleaning => TYPE_CLEANING,
            Self::Calibration => TYPE_CALIBRATION,
            Self::Replacement => TYPE_REPLACEMENT,
            Self::EmergencyRepair => TYPE_EMERGENCY_REPAIR,
        }
    }

    /// Parse a category name, ignoring case and surrounding whitespace.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        let wanted = s.trim();
        VALID_MAINTENANCE_TYPES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(wanted))
            .map(|idx| Self::ALL[idx])
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown maintenance type: '{s}'. Valid types: {}",
                    VALID_MAINTENANCE_TYPES.join(", ")
                ))
            })
    }

    /// Every category, index-aligned with [`VALID_MAINTENANCE_TYPES`].
    pub const ALL: [Self; 7] = [
        Self::RoutineInspection,
        Self::MinorRepair,
        Self::MajorOverhaul,
        Self::Cleaning,
        Self::Calibration,
        Self::Replacement,
        Self::EmergencyRepair,
    ];
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MaintenanceLog
// ---------------------------------------------------------------------------

/// An immutable record of maintenance performed on a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    id: LogId,
    pattern_id: PatternId,
    #[serde(rename = "type")]
    maintenance_type: MaintenanceType,
    remarks: String,
    date: Date,
    technician: String,
}

impl MaintenanceLog {
    pub fn new(
        id: impl Into<LogId>,
        pattern_id: impl Into<PatternId>,
        maintenance_type: MaintenanceType,
        remarks: impl Into<String>,
        date: Date,
        technician: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern_id: pattern_id.into(),
            maintenance_type,
            remarks: remarks.into(),
            date,
            technician: technician.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern_id(&self) -> &str {
        &self.pattern_id
    }

    pub fn maintenance_type(&self) -> MaintenanceType {
        self.maintenance_type
    }

    pub fn remarks(&self) -> &str {
        &self.remarks
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn technician(&self) -> &str {
        &self.technician
    }
}

/// Format the id of the `ordinal`-th log (1-based): `LOG001`, `LOG042`, `LOG1234`.
pub fn format_log_id(ordinal: usize) -> LogId {
    format!("{LOG_ID_PREFIX}{ordinal:03}")
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A maintenance log as submitted from the form, before acceptance.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewMaintenanceLog {
    #[validate(custom(function = "validate_not_blank"))]
    pub pattern_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub maintenance_type: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub remarks: String,
}

impl NewMaintenanceLog {
    pub fn new(
        pattern_id: impl Into<String>,
        maintenance_type: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            maintenance_type: maintenance_type.into(),
            remarks: remarks.into(),
        }
    }

    /// Check required fields and resolve the category.
    ///
    /// Does not check that the pattern exists; that needs the registry.
    pub fn check(&self) -> Result<MaintenanceType, CoreError> {
        self.validate().map_err(missing_fields_error)?;
        MaintenanceType::from_str(&self.maintenance_type)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn missing_fields_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<&'static str> = errors
        .field_errors()
        .keys()
        .map(|key| match key.to_string().as_str() {
            "pattern_id" => "patternId",
            "maintenance_type" => "type",
            _ => "remarks",
        })
        .collect();
    fields.sort_unstable();
    CoreError::Validation(format!(
        "Please fill in all required fields (missing: {})",
        fields.join(", ")
    ))
}

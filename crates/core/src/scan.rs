//! Pattern lookup by scanned or typed id.
//!
//! There is no optical decoding: a "QR scan" picks a pattern at random, and a
//! manual scan is a case-insensitive id lookup.

use rand::Rng;

use crate::error::CoreError;
use crate::pattern::Pattern;

/// Look up a pattern by id as typed on the scan screen.
pub fn scan<'a>(patterns: &'a [Pattern], input: &str) -> Result<&'a Pattern, CoreError> {
    let wanted = input.trim();
    if wanted.is_empty() {
        return Err(CoreError::Validation(
            "Please enter a pattern ID".to_string(),
        ));
    }
    patterns
        .iter()
        .find(|p| p.id().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CoreError::NotFound {
            entity: "pattern",
            id: wanted.to_string(),
        })
}

/// Stand-in for camera decoding: choose a pattern uniformly at random.
pub fn simulate_qr_scan<'a, R>(patterns: &'a [Pattern], rng: &mut R) -> Result<&'a Pattern, CoreError>
where
    R: Rng + ?Sized,
{
    if patterns.is_empty() {
        return Err(CoreError::NotFound {
            entity: "pattern",
            id: "<any>".to_string(),
        });
    }
    let idx = rng.random_range(0..patterns.len());
    Ok(&patterns[idx])
}

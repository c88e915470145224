//! Capability detection

use serde::{Deserialize, Serialize};

use super::normalize::NormalizedRecord;

/// Optional capabilities available in a record.
///
/// Always derived from the record's current arrays, never stored alongside
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    /// Temperature, humidity and pressure columns are all present
    pub has_environmental_data: bool,
    /// Drag-area reference present with at least one valid sample
    pub has_cda_reference: bool,
    /// Lap column present
    pub has_lap_data: bool,
    /// Wind-angle column present and non-empty
    pub has_wind_angle: bool,
}

impl FeatureFlags {
    /// Inspect a record
    pub fn detect(record: &NormalizedRecord) -> Self {
        Self {
            has_environmental_data: record.temperature().is_some()
                && record.humidity().is_some()
                && record.pressure().is_some(),
            has_cda_reference: record
                .cda_reference()
                .is_some_and(|v| v.iter().any(|x| !x.is_nan())),
            has_lap_data: record.lap_number().is_some(),
            has_wind_angle: record.wind_angle().is_some_and(|v| !v.is_empty()),
        }
    }
}

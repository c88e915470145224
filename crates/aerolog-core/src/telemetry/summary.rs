//! Per-file summary for display

use serde::{Deserialize, Serialize};

use super::features::FeatureFlags;
use super::intervals::IntervalStats;
use super::normalize::NormalizedRecord;

/// What the UI shows about an ingested file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    /// Samples in the final record
    pub data_point_count: usize,
    /// Last minus first timestamp of the final record
    pub time_range_seconds: f64,
    /// Capability flags of the final record
    #[serde(flatten)]
    pub features: FeatureFlags,
    /// Gap statistics before resampling
    pub intervals: IntervalStats,
    /// Whether the record was resampled to 1 Hz
    pub resampled: bool,
}

impl RecordSummary {
    /// Summarize a record
    pub fn new(record: &NormalizedRecord, intervals: IntervalStats, resampled: bool) -> Self {
        Self {
            data_point_count: record.data_point_count(),
            time_range_seconds: record.time_range_seconds(),
            features: record.features(),
            intervals,
            resampled,
        }
    }
}

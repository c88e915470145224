//! Telemetry Ingestion
//!
//! Normalizes CSV sensor exports into a unified per-second record:
//! column validation, raw extraction, unit normalization, capability
//! detection, interval analysis and, when gaps are irregular, 1 Hz
//! resampling.
//!
//! ```rust,ignore
//! use aerolog_core::{config::IngestConfig, telemetry::parse_csv_path};
//!
//! let ingested = parse_csv_path("ride.csv", &IngestConfig::default())?;
//! println!("{} samples", ingested.record.data_point_count());
//! ```

mod columns;
mod error;
mod extract;
mod features;
mod format;
mod intervals;
mod normalize;
mod resample;
mod summary;

pub use columns::{validate_columns, Column};
pub use error::IngestError;
pub use extract::{extract, parse_cell, ColumnPlan, RawTable, RawTableBuilder};
pub use features::FeatureFlags;
pub use format::{write_csv, write_csv_file, InputFormat};
pub use intervals::IntervalStats;
pub use normalize::{normalize, NormalizedRecord, Series};
pub use resample::{resample_record, resample_series, uniform_grid};
pub use summary::RecordSummary;

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use crate::config::IngestConfig;

/// Result of ingesting one file
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    /// Final record, resampled if needed
    pub record: NormalizedRecord,
    /// Gap statistics of the source timestamps
    pub intervals: IntervalStats,
    /// Whether `record` is a resampled copy
    pub resampled: bool,
}

impl Ingested {
    /// Summary for display
    pub fn summary(&self) -> RecordSummary {
        RecordSummary::new(&self.record, self.intervals, self.resampled)
    }
}

/// Run the pipeline on normalized data: interval analysis, then resampling
/// if the configuration calls for it
pub fn finalize(record: NormalizedRecord, config: &IngestConfig) -> Ingested {
    let intervals = IntervalStats::from_timestamps(record.timestamps());
    let resampled = config.should_resample(&intervals);
    debug!(
        "Interval std-dev {:.4} s (threshold {} s), resample: {}",
        intervals.standard_deviation, config.uniformity_threshold_s, resampled
    );

    let record = if resampled {
        resample_record(&record)
    } else {
        record
    };

    Ingested {
        record,
        intervals,
        resampled,
    }
}

/// Ingest an already tokenized header and data rows
pub fn ingest_rows<H, R, S>(
    header: &[H],
    rows: &[R],
    config: &IngestConfig,
) -> Result<Ingested, IngestError>
where
    H: AsRef<str>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    config.validate()?;
    validate_columns(header)?;
    if rows.is_empty() {
        return Err(IngestError::EmptyInput);
    }
    let record = normalize(extract(header, rows), config)?;
    Ok(finalize(record, config))
}

/// Ingest CSV text
pub fn parse_csv_str(text: &str, config: &IngestConfig) -> Result<Ingested, IngestError> {
    config.validate()?;
    if text.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(IngestError::EmptyInput);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    validate_columns(&header)?;

    let mut builder = RawTableBuilder::new(ColumnPlan::resolve(&header));
    for result in reader.records() {
        let record = result?;
        let cells: Vec<&str> = record.iter().collect();
        builder.push_row(&cells);
    }
    let raw = builder.finish();
    if raw.row_count() == 0 {
        return Err(IngestError::EmptyInput);
    }

    let ingested = finalize(normalize(raw, config)?, config);
    info!(
        "Ingested {} samples over {:.1} s{}",
        ingested.record.data_point_count(),
        ingested.record.time_range_seconds(),
        if ingested.resampled { " (resampled to 1 Hz)" } else { "" }
    );
    Ok(ingested)
}

/// Ingest a telemetry file.
///
/// FIT files are decoded elsewhere and are rejected with `UnsupportedFormat`.
pub fn parse_csv_path<P: AsRef<Path>>(
    path: P,
    config: &IngestConfig,
) -> Result<Ingested, IngestError> {
    let path = path.as_ref();
    if let Some(format @ InputFormat::Fit) = InputFormat::from_extension(path) {
        warn!(
            "Refusing {}: .{} files go through the FIT decoder",
            path.display(),
            format.extension()
        );
        return Err(IngestError::UnsupportedFormat(format!(
            "{} is a .{} file; use the FIT decoder",
            path.display(),
            format.extension()
        )));
    }
    let text = fs::read_to_string(path)?;
    parse_csv_str(&text, config)
}

//! # Aerolog Core Library
//!
//! Core functionality for Aerolog aerodynamic field testing.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - CSV telemetry ingestion with column validation
//! - Unit normalization of sensor exports
//! - Capability detection (environment, CdA reference, laps, wind angle)
//! - Sample interval analysis and 1 Hz resampling
//!
//! ## Example
//!
//! ```rust,ignore
//! use aerolog_core::prelude::*;
//!
//! let ingested = parse_csv_path("ride.csv", &IngestConfig::default())?;
//! let flags = ingested.record.features();
//! println!("environmental data: {}", flags.has_environmental_data);
//! ```

pub mod config;
pub mod telemetry;
pub mod unit_conversion;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{IngestConfig, ResampleMode};
    pub use crate::telemetry::{
        parse_csv_path, parse_csv_str, FeatureFlags, IngestError, Ingested, IntervalStats,
        NormalizedRecord, RecordSummary,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

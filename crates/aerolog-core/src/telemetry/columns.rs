//! Recognized source columns and header validation
//!
//! Column names are matched exactly (case and whitespace sensitive) against
//! the export format of the sensor head unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::IngestError;

/// A source column the extractor knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Millisecond timer
    Timer,
    /// Ground speed in cm/s
    GroundSpeed,
    /// Power in watts
    Power,
    /// Apparent wind magnitude in km/h
    WindSpeed,
    /// Latitude, fixed-point integer
    Latitude,
    /// Longitude, fixed-point integer
    Longitude,
    /// GPS altitude in millimeters
    GpsAltitude,
    /// Air temperature in °C
    Temperature,
    /// Relative humidity in %
    Humidity,
    /// Barometric pressure in Pa
    Pressure,
    /// Apparent wind angle in degrees
    WindAngle,
    /// Sensor-supplied drag-area reference
    CdaReference,
    /// Lap number
    Lap,
}

impl Column {
    /// Columns every file must carry, in reporting order
    pub const REQUIRED: [Column; 7] = [
        Column::Timer,
        Column::GroundSpeed,
        Column::Power,
        Column::WindSpeed,
        Column::Latitude,
        Column::Longitude,
        Column::GpsAltitude,
    ];

    /// Columns that enable extra features when present
    pub const OPTIONAL: [Column; 6] = [
        Column::Temperature,
        Column::Humidity,
        Column::Pressure,
        Column::WindAngle,
        Column::CdaReference,
        Column::Lap,
    ];

    /// Exact header text for this column
    pub fn name(self) -> &'static str {
        match self {
            Column::Timer => "timer (ms)",
            Column::GroundSpeed => "speed (cm/s)",
            Column::Power => "power (W)",
            Column::WindSpeed => "wind speed (km/h)",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::GpsAltitude => "gps altitude (mm)",
            Column::Temperature => "temperature (C)",
            Column::Humidity => "humidity (%)",
            Column::Pressure => "pressure (Pa)",
            Column::WindAngle => "wind angle (deg)",
            Column::CdaReference => "CdA",
            Column::Lap => "lap",
        }
    }

    /// Look up a column by its exact header text
    pub fn from_name(name: &str) -> Option<Self> {
        Self::recognized().find(|c| c.name() == name)
    }

    /// Whether the column belongs to the required set
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// All recognized columns, required first
    pub fn recognized() -> impl Iterator<Item = Column> {
        Self::REQUIRED.into_iter().chain(Self::OPTIONAL)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip the byte-order mark spreadsheet tools prepend to the first header cell
pub(crate) fn clean_header_cell(cell: &str) -> &str {
    cell.trim_start_matches('\u{feff}')
}

/// Verify every required column appears in `header`.
///
/// Missing names are reported in required-set order.
pub fn validate_columns<S: AsRef<str>>(header: &[S]) -> Result<(), IngestError> {
    let missing: Vec<String> = Column::REQUIRED
        .iter()
        .filter(|col| {
            !header
                .iter()
                .any(|h| clean_header_cell(h.as_ref()) == col.name())
        })
        .map(|col| col.name().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns { missing })
    }
}

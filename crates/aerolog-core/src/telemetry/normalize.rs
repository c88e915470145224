//! Unit normalization
//!
//! Converts a [`RawTable`] into a [`NormalizedRecord`] in SI/display units.

use serde::Serialize;

use super::columns::Column;
use super::error::IngestError;
use super::extract::RawTable;
use super::features::FeatureFlags;
use crate::config::IngestConfig;
use crate::unit_conversion::{
    cm_per_s_to_m_per_s, fixed_point_to_degrees, kmh_to_m_per_s, mm_to_m, ms_to_s, pa_to_hpa,
};

/// A named series of the unified record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    /// Seconds
    Timestamps,
    /// Ground speed, m/s
    Velocity,
    /// Watts
    Power,
    /// Apparent wind speed, m/s
    AirSpeed,
    /// Meters
    Altitude,
    /// Decimal degrees
    PositionLat,
    /// Decimal degrees
    PositionLong,
    /// Degrees
    WindAngle,
    /// °C
    Temperature,
    /// %RH
    Humidity,
    /// hPa
    Pressure,
    /// Dimensionless drag area
    CdaReference,
    /// Lap grouping key
    LapNumber,
}

impl Series {
    /// Field name as exposed to downstream consumers
    pub fn key(self) -> &'static str {
        match self {
            Series::Timestamps => "timestamps",
            Series::Velocity => "velocity",
            Series::Power => "power",
            Series::AirSpeed => "airSpeed",
            Series::Altitude => "altitude",
            Series::PositionLat => "positionLat",
            Series::PositionLong => "positionLong",
            Series::WindAngle => "windAngle",
            Series::Temperature => "temperature",
            Series::Humidity => "humidity",
            Series::Pressure => "pressure",
            Series::CdaReference => "cdaReference",
            Series::LapNumber => "lapNumber",
        }
    }

    /// Column header used when exporting to CSV
    pub fn csv_header(self) -> &'static str {
        match self {
            Series::Timestamps => "time (s)",
            Series::Velocity => "velocity (m/s)",
            Series::Power => "power (W)",
            Series::AirSpeed => "air speed (m/s)",
            Series::Altitude => "altitude (m)",
            Series::PositionLat => "latitude (deg)",
            Series::PositionLong => "longitude (deg)",
            Series::WindAngle => "wind angle (deg)",
            Series::Temperature => "temperature (C)",
            Series::Humidity => "humidity (%)",
            Series::Pressure => "pressure (hPa)",
            Series::CdaReference => "CdA",
            Series::LapNumber => "lap",
        }
    }
}

/// The unified per-sample telemetry record.
///
/// All present arrays share one length. Optional arrays are either `None` or
/// full length; capability flags are computed from them on demand via
/// [`NormalizedRecord::features`]. Missing samples are `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub(crate) timestamps: Vec<f64>,
    pub(crate) velocity: Vec<f64>,
    pub(crate) power: Vec<f64>,
    pub(crate) air_speed: Vec<f64>,
    pub(crate) altitude: Vec<f64>,
    pub(crate) position_lat: Vec<f64>,
    pub(crate) position_long: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) wind_angle: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) temperature: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) humidity: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pressure: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cda_reference: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) lap_number: Option<Vec<f64>>,
}

impl NormalizedRecord {
    /// Sample times in seconds
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Ground speed in m/s
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Power in W
    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// Apparent wind speed in m/s
    pub fn air_speed(&self) -> &[f64] {
        &self.air_speed
    }

    /// GPS altitude in m
    pub fn altitude(&self) -> &[f64] {
        &self.altitude
    }

    /// Latitude in decimal degrees
    pub fn position_lat(&self) -> &[f64] {
        &self.position_lat
    }

    /// Longitude in decimal degrees
    pub fn position_long(&self) -> &[f64] {
        &self.position_long
    }

    /// Apparent wind angle in degrees
    pub fn wind_angle(&self) -> Option<&[f64]> {
        self.wind_angle.as_deref()
    }

    /// Air temperature in °C
    pub fn temperature(&self) -> Option<&[f64]> {
        self.temperature.as_deref()
    }

    /// Relative humidity in %
    pub fn humidity(&self) -> Option<&[f64]> {
        self.humidity.as_deref()
    }

    /// Barometric pressure in hPa
    pub fn pressure(&self) -> Option<&[f64]> {
        self.pressure.as_deref()
    }

    /// Sensor drag-area reference
    pub fn cda_reference(&self) -> Option<&[f64]> {
        self.cda_reference.as_deref()
    }

    /// Lap numbers
    pub fn lap_number(&self) -> Option<&[f64]> {
        self.lap_number.as_deref()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the record has no samples
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of samples, as shown to users
    pub fn data_point_count(&self) -> usize {
        self.len()
    }

    /// Last minus first timestamp, zero for fewer than two samples
    pub fn time_range_seconds(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) if self.timestamps.len() > 1 => last - first,
            _ => 0.0,
        }
    }

    /// Capability flags derived from the current contents
    pub fn features(&self) -> FeatureFlags {
        FeatureFlags::detect(self)
    }

    /// Every present series, required first
    pub fn arrays(&self) -> Vec<(Series, &[f64])> {
        let mut arrays: Vec<(Series, &[f64])> = vec![
            (Series::Timestamps, self.timestamps.as_slice()),
            (Series::Velocity, self.velocity.as_slice()),
            (Series::Power, self.power.as_slice()),
            (Series::AirSpeed, self.air_speed.as_slice()),
            (Series::Altitude, self.altitude.as_slice()),
            (Series::PositionLat, self.position_lat.as_slice()),
            (Series::PositionLong, self.position_long.as_slice()),
        ];
        let optional = [
            (Series::WindAngle, &self.wind_angle),
            (Series::Temperature, &self.temperature),
            (Series::Humidity, &self.humidity),
            (Series::Pressure, &self.pressure),
            (Series::CdaReference, &self.cda_reference),
            (Series::LapNumber, &self.lap_number),
        ];
        arrays.extend(
            optional
                .into_iter()
                .filter_map(|(series, values)| values.as_deref().map(|v| (series, v))),
        );
        arrays
    }

    /// Build a new record on `timestamps` by transforming every value series.
    ///
    /// Optional series stay absent if they were absent.
    pub(crate) fn map_values<F>(&self, timestamps: Vec<f64>, mut f: F) -> Self
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        Self {
            velocity: f(&self.velocity),
            power: f(&self.power),
            air_speed: f(&self.air_speed),
            altitude: f(&self.altitude),
            position_lat: f(&self.position_lat),
            position_long: f(&self.position_long),
            wind_angle: self.wind_angle.as_deref().map(&mut f),
            temperature: self.temperature.as_deref().map(&mut f),
            humidity: self.humidity.as_deref().map(&mut f),
            pressure: self.pressure.as_deref().map(&mut f),
            cda_reference: self.cda_reference.as_deref().map(&mut f),
            lap_number: self.lap_number.as_deref().map(&mut f),
            timestamps,
        }
    }
}

fn convert(values: Vec<f64>, f: impl Fn(f64) -> f64) -> Vec<f64> {
    values.into_iter().map(f).collect()
}

/// Convert a raw table into a normalized record.
///
/// Fails with `MissingColumns` if any required column is absent from the
/// table.
pub fn normalize(mut raw: RawTable, config: &IngestConfig) -> Result<NormalizedRecord, IngestError> {
    let missing: Vec<String> = Column::REQUIRED
        .iter()
        .filter(|col| !raw.contains(**col))
        .map(|col| col.name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns { missing });
    }

    let mut required = |column: Column| raw.take(column).unwrap_or_default();
    let divisor = config.coordinate_divisor;

    let timestamps = convert(required(Column::Timer), ms_to_s);
    let velocity = convert(required(Column::GroundSpeed), cm_per_s_to_m_per_s);
    let power = required(Column::Power);
    let air_speed = convert(required(Column::WindSpeed), kmh_to_m_per_s);
    let altitude = convert(required(Column::GpsAltitude), mm_to_m);
    let position_lat = convert(required(Column::Latitude), |v| fixed_point_to_degrees(v, divisor));
    let position_long = convert(required(Column::Longitude), |v| fixed_point_to_degrees(v, divisor));

    Ok(NormalizedRecord {
        timestamps,
        velocity,
        power,
        air_speed,
        altitude,
        position_lat,
        position_long,
        wind_angle: raw.take(Column::WindAngle),
        temperature: raw.take(Column::Temperature),
        humidity: raw.take(Column::Humidity),
        pressure: raw.take(Column::Pressure).map(|v| convert(v, pa_to_hpa)),
        cda_reference: raw.take(Column::CdaReference),
        lap_number: raw.take(Column::Lap),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::extract::extract;

    const HEADER: [&str; 9] = [
        "timer (ms)",
        "speed (cm/s)",
        "power (W)",
        "wind speed (km/h)",
        "latitude",
        "longitude",
        "gps altitude (mm)",
        "pressure (Pa)",
        "lap",
    ];

    fn sample_record() -> NormalizedRecord {
        let rows = vec![
            vec!["0", "750", "250", "36", "433858622", "-7654321", "123456", "101325", "1"],
            vec!["1000", "", "NaN", "18", "433858700", "-7654300", "123500", "101300", "1"],
        ];
        normalize(extract(&HEADER, &rows), &IngestConfig::default()).unwrap()
    }

    #[test]
    fn test_conversion_table() {
        let record = sample_record();
        assert_eq!(record.timestamps(), &[0.0, 1.0]);
        assert!((record.velocity()[0] - 7.5).abs() < 1e-12);
        assert_eq!(record.power()[0], 250.0);
        assert!((record.air_speed()[0] - 10.0).abs() < 1e-12);
        assert!((record.altitude()[0] - 123.456).abs() < 1e-9);
        assert!((record.position_lat()[0] - 43.3858622).abs() < 1e-9);
        assert!((record.position_long()[0] + 0.7654321).abs() < 1e-9);
        assert!((record.pressure().unwrap()[0] - 1013.25).abs() < 1e-9);
        assert_eq!(record.lap_number(), Some(&[1.0, 1.0][..]));
    }

    #[test]
    fn test_sentinels_preserved() {
        let record = sample_record();
        assert!(record.velocity()[1].is_nan());
        assert!(record.power()[1].is_nan());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_absent_optionals_unset() {
        let record = sample_record();
        assert!(record.temperature().is_none());
        assert!(record.humidity().is_none());
        assert!(record.wind_angle().is_none());
        assert!(record.cda_reference().is_none());
        let keys: Vec<&str> = record.arrays().iter().map(|(s, _)| s.key()).collect();
        assert_eq!(
            keys,
            vec![
                "timestamps",
                "velocity",
                "power",
                "airSpeed",
                "altitude",
                "positionLat",
                "positionLong",
                "pressure",
                "lapNumber"
            ]
        );
    }

    #[test]
    fn test_custom_coordinate_divisor() {
        let rows = vec![vec!["0", "0", "0", "0", "43385862", "0", "0", "0", "0"]];
        let config = IngestConfig {
            coordinate_divisor: 1e6,
            ..IngestConfig::default()
        };
        let record = normalize(extract(&HEADER, &rows), &config).unwrap();
        assert!((record.position_lat()[0] - 43.385862).abs() < 1e-9);
    }

    #[test]
    fn test_missing_required_column() {
        let header = ["timer (ms)", "power (W)"];
        let rows = vec![vec!["0", "100"]];
        let err = normalize(extract(&header, &rows), &IngestConfig::default()).unwrap_err();
        assert_eq!(err.missing_columns().unwrap().len(), 5);
    }

    #[test]
    fn test_time_range() {
        assert_eq!(sample_record().time_range_seconds(), 1.0);
    }

    #[test]
    fn test_serializes_camel_case_without_absent_fields() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("airSpeed").is_some());
        assert!(json.get("positionLat").is_some());
        assert!(json.get("temperature").is_none());
    }
}

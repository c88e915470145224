//! Unit Conversion Functions
//!
//! Conversions between the sensor head's export units and the SI/display
//! units used by the rest of the system:
//! - Time: ms → s
//! - Speed: cm/s → m/s, km/h ↔ m/s
//! - Length: mm → m
//! - Position: fixed-point integer → decimal degrees
//! - Pressure: Pa ↔ hPa
//! - Temperature: °C → °F
//!
//! All functions are plain arithmetic, so `NaN` inputs stay `NaN`.

/// Default scale of fixed-point latitude/longitude values
pub const DEFAULT_COORDINATE_DIVISOR: f64 = 1e7;

/// Convert milliseconds to seconds
pub fn ms_to_s(ms: f64) -> f64 {
    ms / 1000.0
}

/// Convert cm/s to m/s
pub fn cm_per_s_to_m_per_s(cm_per_s: f64) -> f64 {
    cm_per_s / 100.0
}

/// Convert km/h to m/s
pub fn kmh_to_m_per_s(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Convert m/s to km/h
pub fn m_per_s_to_kmh(m_per_s: f64) -> f64 {
    m_per_s * 3.6
}

/// Convert millimeters to meters
pub fn mm_to_m(mm: f64) -> f64 {
    mm / 1000.0
}

/// Convert a fixed-point coordinate to decimal degrees
///
/// # Arguments
/// * `raw` - Integer coordinate as stored by the sensor firmware
/// * `divisor` - Fixed-point scale (`1e7` for current firmware)
pub fn fixed_point_to_degrees(raw: f64, divisor: f64) -> f64 {
    raw / divisor
}

/// Convert Pascals to hectopascals
pub fn pa_to_hpa(pa: f64) -> f64 {
    pa / 100.0
}

/// Convert hectopascals to Pascals
pub fn hpa_to_pa(hpa: f64) -> f64 {
    hpa * 100.0
}

/// Convert Celsius to Fahrenheit
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

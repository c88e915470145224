//! Telemetry file formats
//!
//! Detects input formats and writes normalized records back out as CSV.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::normalize::NormalizedRecord;

/// Supported telemetry input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values exported by the sensor head
    Csv,
    /// Binary FIT activity file, decoded outside this crate
    Fit,
}

impl InputFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(InputFormat::Csv),
            "fit" => Some(InputFormat::Fit),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Csv => "csv",
            InputFormat::Fit => "fit",
        }
    }
}

/// Write a record as CSV, one row per sample.
///
/// Absent optional series are left out; missing samples are written as `NaN`.
pub fn write_csv<W: Write>(writer: W, record: &NormalizedRecord) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    let arrays = record.arrays();

    let header: Vec<&str> = arrays.iter().map(|(series, _)| series.csv_header()).collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in 0..record.len() {
        for (col, (_, values)) in arrays.iter().enumerate() {
            if col > 0 {
                write!(writer, ",")?;
            }
            write!(writer, "{}", values[row])?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a record to a CSV file
pub fn write_csv_file<P: AsRef<Path>>(path: P, record: &NormalizedRecord) -> io::Result<()> {
    write_csv(File::create(path)?, record)
}

//! Resampler behavior through the public API

use aerolog_core::config::{IngestConfig, ResampleMode};
use aerolog_core::telemetry::{
    parse_csv_str, resample_record, resample_series, uniform_grid, IntervalStats,
};

const HEADER: &str =
    "timer (ms),speed (cm/s),power (W),wind speed (km/h),latitude,longitude,gps altitude (mm),temperature (C)";

#[test]
fn test_interpolates_between_neighbours() {
    let out = resample_series(&[0.0, 2.0], &[10.0, 20.0], &[0.0, 1.0, 2.0]);
    assert_eq!(out, vec![10.0, 15.0, 20.0]);
}

#[test]
fn test_flat_outside_source_range() {
    let times: Vec<f64> = (5..=15).map(f64::from).collect();
    let values: Vec<f64> = times.iter().map(|t| t * 2.0).collect();
    let out = resample_series(&times, &values, &[0.0, 100.0]);
    assert_eq!(out, vec![10.0, 30.0]);
}

#[test]
fn test_resampling_uniform_record_is_identity() {
    let mut csv = format!("{HEADER}\n");
    for i in 0..8 {
        csv.push_str(&format!(
            "{},{},{},{},433858622,-7654321,{},{}\n",
            i * 1000,
            700 + 13 * i,
            180 + 7 * i,
            30 + i,
            250_000 - 25 * i,
            18.0 + 0.1 * i as f64
        ));
    }
    let ingested = parse_csv_str(&csv, &IngestConfig::default()).unwrap();
    assert!(!ingested.resampled);

    let again = resample_record(&ingested.record);
    assert_eq!(again.timestamps(), ingested.record.timestamps());
    for ((series, a), (_, b)) in again.arrays().iter().zip(ingested.record.arrays().iter()) {
        assert_eq!(a.len(), b.len(), "{} length", series.key());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-9, "{} differs: {} vs {}", series.key(), x, y);
        }
    }
}

#[test]
fn test_resampled_arrays_share_length() {
    let csv = format!(
        "{HEADER}\n\
         100,1000,100,36,0,0,0,20\n\
         1300,1000,200,36,0,0,0,\n\
         1900,1000,300,36,0,0,0,22\n\
         4700,1000,400,36,0,0,0,23\n"
    );
    let ingested = parse_csv_str(&csv, &IngestConfig::default()).unwrap();
    assert!(ingested.resampled);

    let record = &ingested.record;
    let expected = uniform_grid(&[0.1, 4.7]);
    assert_eq!(record.timestamps(), expected.as_slice());
    for (series, values) in record.arrays() {
        assert_eq!(values.len(), expected.len(), "{}", series.key());
    }

    // 1 s falls between 0.1 s (20) and 1.3 s (missing): take the valid side
    assert_eq!(record.temperature().unwrap()[1], 20.0);
    // 2 s falls between 1.9 s (22) and 4.7 s (23)
    let t2 = record.temperature().unwrap()[2];
    assert!((t2 - (22.0 + 0.1 / 2.8)).abs() < 1e-9);

    assert_eq!(
        IntervalStats::from_timestamps(record.timestamps()).standard_deviation,
        0.0
    );
}

#[test]
fn test_blank_timer_cell_only_drops_that_sample() {
    let csv = format!(
        "{HEADER}\n\
         0,1000,100,36,0,0,0,20\n\
         500,1000,200,36,0,0,0,20\n\
         ,1000,300,36,0,0,0,20\n\
         2500,1000,400,36,0,0,0,20\n\
         3200,1000,500,36,0,0,0,20\n"
    );
    let ingested = parse_csv_str(&csv, &IngestConfig::default()).unwrap();

    assert!(ingested.intervals.standard_deviation.is_finite());
    assert!(ingested.resampled);

    let record = &ingested.record;
    assert_eq!(record.timestamps(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    let power = record.power();
    assert_eq!(power[0], 100.0);
    assert!((power[1] - 250.0).abs() < 1e-9);
    assert!((power[2] - 350.0).abs() < 1e-9);
    assert!((power[3] - (400.0 + 50.0 / 0.7)).abs() < 1e-6);
    assert_eq!(power[4], 500.0);
}

#[test]
fn test_blank_timer_cell_with_forced_resample() {
    let csv = format!(
        "{HEADER}\n\
         0,1000,100,36,0,0,0,20\n\
         1000,1000,200,36,0,0,0,20\n\
         NaN,1000,300,36,0,0,0,20\n\
         3000,1000,400,36,0,0,0,20\n\
         4000,1000,500,36,0,0,0,20\n"
    );
    let config = IngestConfig {
        resample: ResampleMode::Always,
        ..IngestConfig::default()
    };
    let ingested = parse_csv_str(&csv, &config).unwrap();
    assert_eq!(ingested.record.timestamps(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(ingested.record.power(), &[100.0, 200.0, 300.0, 400.0, 500.0]);
}

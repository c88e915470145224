//! Uniform 1 Hz resampling
//!
//! Projects irregular samples onto every whole second between
//! `floor(first)` and `ceil(last)` by linear interpolation, holding the end
//! values flat outside the source range.

use tracing::{debug, warn};

use super::normalize::NormalizedRecord;

/// Indices of the first and last finite timestamps
fn finite_bounds(times: &[f64]) -> Option<(usize, usize)> {
    let first = times.iter().position(|t| t.is_finite())?;
    let last = times.iter().rposition(|t| t.is_finite())?;
    Some((first, last))
}

/// Next index at or after `from` with a finite timestamp
fn next_finite(times: &[f64], from: usize) -> Option<usize> {
    times
        .get(from..)?
        .iter()
        .position(|t| t.is_finite())
        .map(|offset| from + offset)
}

/// Every whole second from `floor(first)` to `ceil(last)` inclusive, taking
/// the first and last finite timestamps.
///
/// Empty if no timestamp is finite.
pub fn uniform_grid(timestamps: &[f64]) -> Vec<f64> {
    let Some((first, last)) = finite_bounds(timestamps) else {
        return Vec::new();
    };
    let start = timestamps[first].floor();
    let end = timestamps[last].ceil();
    if end < start {
        return Vec::new();
    }
    let len = (end - start) as usize + 1;
    (0..len).map(|step| start + step as f64).collect()
}

/// Interpolate between two samples, preferring whichever side is valid
fn interpolate(t0: f64, v0: f64, t1: f64, v1: f64, target: f64) -> f64 {
    match (v0.is_nan(), v1.is_nan()) {
        (true, true) => f64::NAN,
        (true, false) => v1,
        (false, true) => v0,
        (false, false) => v0 + (target - t0) * (v1 - v0) / (t1 - t0),
    }
}

/// Resample one series onto `targets`.
///
/// `targets` must be non-decreasing: the bracketing cursor only moves
/// forward. Samples with a non-finite timestamp are skipped. A series whose
/// length differs from `source_times` is returned unchanged.
pub fn resample_series(source_times: &[f64], values: &[f64], targets: &[f64]) -> Vec<f64> {
    let n = source_times.len();
    if n == 0 || values.len() != n {
        return values.to_vec();
    }
    let Some((first_idx, last_idx)) = finite_bounds(source_times) else {
        return vec![f64::NAN; targets.len()];
    };

    let first = source_times[first_idx];
    let last = source_times[last_idx];
    let mut cursor = first_idx;

    targets
        .iter()
        .map(|&target| {
            if target <= first {
                return values[first_idx];
            }
            if target >= last {
                return values[last_idx];
            }
            while let Some(next) = next_finite(source_times, cursor + 1) {
                if source_times[next] > target {
                    break;
                }
                cursor = next;
            }
            // first < target < last, so a finite sample above target exists
            let Some(upper) = next_finite(source_times, cursor + 1) else {
                return values[last_idx];
            };
            interpolate(
                source_times[cursor],
                values[cursor],
                source_times[upper],
                values[upper],
                target,
            )
        })
        .collect()
}

/// Produce a new record on the uniform 1 Hz grid.
///
/// Every present series is resampled the same way. If no grid can be built
/// (no finite timestamp) the record is returned as is.
pub fn resample_record(record: &NormalizedRecord) -> NormalizedRecord {
    let source = record.timestamps();
    let grid = uniform_grid(source);
    if grid.is_empty() {
        if !source.is_empty() {
            warn!("No finite timestamps to build a 1 Hz grid from, skipping resample");
        }
        return record.clone();
    }

    debug!(
        "Resampling {} samples onto {} grid points ({}..{} s)",
        source.len(),
        grid.len(),
        grid[0],
        grid[grid.len() - 1]
    );

    record.map_values(grid.clone(), |values| resample_series(source, values, &grid))
}

//! Sample interval statistics
//!
//! Summarizes the gaps between consecutive timestamps. The standard
//! deviation of those gaps decides whether a series needs resampling.

use serde::{Deserialize, Serialize};

/// Distribution of consecutive timestamp gaps, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalStats {
    /// Smallest gap
    pub min: f64,
    /// Largest gap
    pub max: f64,
    /// Mean gap
    pub mean: f64,
    /// Gap at index `count / 2` of the sorted gaps (upper median for even counts)
    pub median: f64,
    /// Population standard deviation of the gaps
    pub standard_deviation: f64,
}

impl IntervalStats {
    /// Compute gap statistics. Fewer than two timestamps yields all zeros.
    ///
    /// Non-finite timestamps are skipped; gaps are taken between consecutive
    /// finite ones.
    pub fn from_timestamps(timestamps: &[f64]) -> Self {
        let finite: Vec<f64> = timestamps.iter().copied().filter(|t| t.is_finite()).collect();
        if finite.len() < 2 {
            return Self::default();
        }

        let mut gaps: Vec<f64> = finite.windows(2).map(|w| w[1] - w[0]).collect();
        let count = gaps.len() as f64;

        let mean = gaps.iter().sum::<f64>() / count;
        let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / count;

        gaps.sort_by(f64::total_cmp);
        let median = gaps[gaps.len() / 2];

        Self {
            min: gaps[0],
            max: gaps[gaps.len() - 1],
            mean,
            median,
            standard_deviation: variance.sqrt(),
        }
    }

    /// Whether gaps vary more than `threshold` seconds (standard deviation)
    pub fn is_irregular(&self, threshold: f64) -> bool {
        self.standard_deviation > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_stats() {
        let stats = IntervalStats::from_timestamps(&[0.0, 1.0, 2.0, 4.0, 5.0]);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 2.0);
        assert!((stats.mean - 1.25).abs() < 1e-12);
        // sorted gaps [1, 1, 1, 2], index 2
        assert_eq!(stats.median, 1.0);
        assert!((stats.standard_deviation - 0.1875_f64.sqrt()).abs() < 1e-12);
        assert!(stats.is_irregular(0.1));
    }

    #[test]
    fn test_upper_median_for_even_count() {
        let stats = IntervalStats::from_timestamps(&[0.0, 1.0, 3.0]);
        // gaps [1, 2]: index 1, not the average 1.5
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn test_short_sequences_are_zero() {
        assert_eq!(IntervalStats::from_timestamps(&[]), IntervalStats::default());
        assert_eq!(IntervalStats::from_timestamps(&[42.0]), IntervalStats::default());
    }

    #[test]
    fn test_blank_timestamps_skipped() {
        let stats = IntervalStats::from_timestamps(&[0.0, 0.5, f64::NAN, 2.5, 3.2]);
        assert_eq!(stats.min, 0.5);
        assert_eq!(stats.max, 2.0);
        assert!(stats.standard_deviation.is_finite());
        assert!(stats.is_irregular(0.1));

        let stats = IntervalStats::from_timestamps(&[f64::NAN, 4.0, f64::NAN]);
        assert_eq!(stats, IntervalStats::default());
    }

    #[test]
    fn test_uniform_series() {
        let ts: Vec<f64> = (0..10).map(f64::from).collect();
        let stats = IntervalStats::from_timestamps(&ts);
        assert_eq!(stats.standard_deviation, 0.0);
        assert!(!stats.is_irregular(0.1));
    }
}

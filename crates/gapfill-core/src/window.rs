//! Weighted moving-window imputation.

use std::str::FromStr;

use statrs::statistics::{Data, Median, Statistics};

use crate::error::{ImputeError, Result};
use crate::gaps::{eligible, gap_index};

/// Neighbor weighting scheme.
///
/// Distances are 1-indexed outward from the position being filled, counted
/// over observed neighbors only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// Plain moving average; every neighbor weighs the same.
    Simple,
    /// Neighbor at distance `d` weighs `1 / (d + 1)`.
    Linear,
    /// Neighbor at distance `d` weighs `(1/2)^d`.
    Exponential,
}

impl FromStr for Weighting {
    type Err = ImputeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "simple" | "none" => Ok(Weighting::Simple),
            "linear" => Ok(Weighting::Linear),
            "exponential" => Ok(Weighting::Exponential),
            other => Err(ImputeError::InvalidWeighting(other.to_string())),
        }
    }
}

/// Reduction applied to the collected window under [`Weighting::Simple`].
#[derive(Debug, Clone, Copy)]
pub enum Aggregator {
    Mean,
    Median,
    /// Arbitrary reducer over the window values, ordered left neighbors
    /// (ascending position) then right neighbors.
    Custom(fn(&[f64]) -> f64),
}

/// Fill each eligible missing position from a window of up to `k/2` observed
/// neighbors on either side.
///
/// The window shrinks near the series boundaries: whatever observations are
/// available on a side are used, possibly none. A position with no observed
/// neighbor on either side is left missing.
///
/// Weighted modes bake the weight into each neighbor value and then take a
/// plain arithmetic mean of the weighted values; they compose only with
/// [`Aggregator::Mean`], any other combination fails with
/// [`ImputeError::IncompatibleOptions`].
pub fn window_fill(
    series: &[f64],
    k: usize,
    aggregator: Aggregator,
    weighting: Weighting,
    maxgap: Option<usize>,
) -> Result<Vec<f64>> {
    if !matches!(aggregator, Aggregator::Mean) && weighting != Weighting::Simple {
        return Err(ImputeError::IncompatibleOptions(
            "weighted modes require the mean aggregator".to_string(),
        ));
    }
    if k == 0 {
        return Err(ImputeError::InvalidOption {
            param: "k".to_string(),
            value: "0".to_string(),
            reason: "window size must be at least 1".to_string(),
        });
    }

    let index = gap_index(series);
    let targets = eligible(&index, maxgap);
    let mut out = series.to_vec();

    if targets.is_empty() {
        return Ok(out);
    }

    let half = k / 2;
    for &p in &targets {
        // Observed positions strictly before and after p, capped per side.
        let split = index.present.partition_point(|&q| q < p);
        let before = &index.present[split.saturating_sub(half)..split];
        let after = &index.present[split..(split + half).min(index.present.len())];

        if before.is_empty() && after.is_empty() {
            continue;
        }

        out[p] = match weighting {
            Weighting::Simple => {
                let window: Vec<f64> = before.iter().chain(after).map(|&q| series[q]).collect();
                reduce(aggregator, &window)
            }
            Weighting::Linear => {
                weighted_mean(series, before, after, |d| 1.0 / (d as f64 + 1.0))
            }
            Weighting::Exponential => {
                weighted_mean(series, before, after, |d| 0.5f64.powi(d as i32))
            }
        };
    }

    Ok(out)
}

fn reduce(aggregator: Aggregator, window: &[f64]) -> f64 {
    match aggregator {
        Aggregator::Mean => window.iter().mean(),
        Aggregator::Median => Data::new(window.to_vec()).median(),
        Aggregator::Custom(f) => f(window),
    }
}

/// Plain arithmetic mean of the weight-scaled neighbor values. The weights
/// are not normalized out.
fn weighted_mean(
    series: &[f64],
    before: &[usize],
    after: &[usize],
    weight: impl Fn(usize) -> f64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    // `before` is ascending, so the nearest neighbor is its last element.
    for (rank, &q) in before.iter().rev().enumerate() {
        sum += series[q] * weight(rank + 1);
        count += 1;
    }
    for (rank, &q) in after.iter().enumerate() {
        sum += series[q] * weight(rank + 1);
        count += 1;
    }

    sum / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_window_fill_simple_mean() {
        let series = vec![1.0, f64::NAN, 3.0];
        let result = window_fill(&series, 2, Aggregator::Mean, Weighting::Simple, None).unwrap();
        assert_relative_eq!(result[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_window_fill_linear_weights() {
        let series = vec![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let result = window_fill(&series, 4, Aggregator::Mean, Weighting::Linear, None).unwrap();

        // Neighbors of position 1: value 1 at distance 1 (weight 1/2),
        // values 3 and 4 at distances 1 and 2 (weights 1/2 and 1/3).
        // mean(0.5, 1.5, 4/3) = 10/9.
        assert_relative_eq!(result[1], 10.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_window_fill_exponential_weights() {
        let series = vec![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let result =
            window_fill(&series, 4, Aggregator::Mean, Weighting::Exponential, None).unwrap();

        // mean(1 * 0.5, 3 * 0.5, 4 * 0.25) = 3.0 / 3
        assert_relative_eq!(result[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_window_fill_median_aggregator() {
        let series = vec![1.0, 2.0, f64::NAN, 9.0, 10.0];
        let result = window_fill(&series, 4, Aggregator::Median, Weighting::Simple, None).unwrap();
        assert_relative_eq!(result[2], 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_window_fill_custom_aggregator() {
        fn max(window: &[f64]) -> f64 {
            window.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b))
        }

        let series = vec![1.0, f64::NAN, 3.0];
        let result =
            window_fill(&series, 2, Aggregator::Custom(max), Weighting::Simple, None).unwrap();
        assert_eq!(result[1], 3.0);
    }

    #[test]
    fn test_window_fill_shrinks_at_boundary() {
        let series = vec![f64::NAN, 2.0, 3.0];
        let result = window_fill(&series, 4, Aggregator::Mean, Weighting::Simple, None).unwrap();

        // No observation precedes position 0; only the right side contributes.
        assert_relative_eq!(result[0], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_window_fill_skips_observed_gaps_in_window() {
        // The window counts observed neighbors, not raw offsets.
        let series = vec![1.0, f64::NAN, f64::NAN, 4.0];
        let result = window_fill(&series, 2, Aggregator::Mean, Weighting::Simple, None).unwrap();
        assert_relative_eq!(result[1], 2.5, epsilon = 1e-12);
        assert_relative_eq!(result[2], 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_window_fill_no_observations_leaves_missing() {
        let series = vec![f64::NAN, f64::NAN];
        let result = window_fill(&series, 4, Aggregator::Mean, Weighting::Simple, None).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_window_fill_incompatible_options() {
        let series = vec![1.0, f64::NAN, 3.0];
        let err =
            window_fill(&series, 4, Aggregator::Median, Weighting::Linear, None).unwrap_err();
        assert!(matches!(err, ImputeError::IncompatibleOptions(_)));
    }

    #[test]
    fn test_window_fill_zero_width_window() {
        let series = vec![1.0, f64::NAN, 3.0];
        let err = window_fill(&series, 0, Aggregator::Mean, Weighting::Simple, None).unwrap_err();
        assert!(matches!(err, ImputeError::InvalidOption { .. }));
    }

    #[test]
    fn test_window_fill_respects_maxgap() {
        let series = vec![1.0, f64::NAN, f64::NAN, 4.0, f64::NAN, 6.0];
        let result =
            window_fill(&series, 2, Aggregator::Mean, Weighting::Simple, Some(1)).unwrap();

        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_relative_eq!(result[4], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weighting_parsing() {
        assert_eq!("simple".parse::<Weighting>().unwrap(), Weighting::Simple);
        assert_eq!("none".parse::<Weighting>().unwrap(), Weighting::Simple);
        assert_eq!("linear".parse::<Weighting>().unwrap(), Weighting::Linear);
        assert_eq!(
            "exponential".parse::<Weighting>().unwrap(),
            Weighting::Exponential
        );

        let err = "triangular".parse::<Weighting>().unwrap_err();
        assert!(matches!(err, ImputeError::InvalidWeighting(_)));
    }
}

//! Carry-based imputation (LOCF / NOCB).

use std::str::FromStr;

use statrs::statistics::Statistics;

use crate::error::{ImputeError, Result};
use crate::gaps::{eligible, gap_index};

/// Fallback applied when the primary carry search runs off the series
/// boundary (e.g. a leading gap under LOCF).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Leave the position missing.
    Keep,
    /// Fill with the mean of all observed values.
    Mean,
    /// Carry from the opposite direction instead.
    Reverse,
}

impl FromStr for BoundaryPolicy {
    type Err = ImputeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "keep" => Ok(BoundaryPolicy::Keep),
            "mean" => Ok(BoundaryPolicy::Mean),
            "rev" | "reverse" => Ok(BoundaryPolicy::Reverse),
            other => Err(ImputeError::InvalidBoundaryPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn opposite(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Nearest observed position on the given side of `pos`, if any.
/// `present` is ascending, so both lookups are binary searches.
fn nearest(present: &[usize], pos: usize, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Forward => {
            let i = present.partition_point(|&q| q <= pos);
            present.get(i).copied()
        }
        Direction::Backward => {
            let i = present.partition_point(|&q| q < pos);
            i.checked_sub(1).map(|j| present[j])
        }
    }
}

/// Last Observation Carried Forward.
///
/// Each eligible missing position takes the nearest observed value before it.
/// When no earlier observation exists (a leading gap), `policy` decides:
/// keep the gap, fill with the overall observed mean, or carry from the
/// nearest later observation instead.
///
/// Sources are always resolved against the original observed positions;
/// values written earlier in the pass are never reused as carry sources.
pub fn carry_forward(
    series: &[f64],
    policy: BoundaryPolicy,
    maxgap: Option<usize>,
) -> Result<Vec<f64>> {
    carry(series, policy, maxgap, Direction::Backward)
}

/// Next Observation Carried Backward.
///
/// Mirror image of [`carry_forward`]: each eligible missing position takes
/// the nearest observed value after it, with `policy` deciding trailing gaps.
pub fn carry_backward(
    series: &[f64],
    policy: BoundaryPolicy,
    maxgap: Option<usize>,
) -> Result<Vec<f64>> {
    carry(series, policy, maxgap, Direction::Forward)
}

fn carry(
    series: &[f64],
    policy: BoundaryPolicy,
    maxgap: Option<usize>,
    source_side: Direction,
) -> Result<Vec<f64>> {
    let index = gap_index(series);
    let targets = eligible(&index, maxgap);
    let mut out = series.to_vec();

    if targets.is_empty() {
        return Ok(out);
    }

    // The mean fallback aggregates the observed values once, up front.
    let observed_mean = match policy {
        BoundaryPolicy::Mean if !index.present.is_empty() => {
            Some(index.present.iter().map(|&q| series[q]).mean())
        }
        _ => None,
    };

    for &p in &targets {
        let value = match nearest(&index.present, p, source_side) {
            Some(q) => Some(series[q]),
            None => match policy {
                BoundaryPolicy::Keep => None,
                BoundaryPolicy::Mean => observed_mean,
                BoundaryPolicy::Reverse => {
                    nearest(&index.present, p, source_side.opposite()).map(|q| series[q])
                }
            },
        };

        if let Some(v) = value {
            out[p] = v;
        }
    }

    Ok(out)
}

//! Central-tendency imputation.

use std::str::FromStr;

use statrs::statistics::{Data, Median, Statistics};

use crate::error::{ImputeError, Result};
use crate::gaps::{eligible, gap_index};

/// Aggregate computed over the observed values and written to every eligible
/// missing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentralTendency {
    Mean,
    Median,
    Mode,
    Harmonic,
    Geometric,
}

impl FromStr for CentralTendency {
    type Err = ImputeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mean" => Ok(CentralTendency::Mean),
            "median" => Ok(CentralTendency::Median),
            "mode" => Ok(CentralTendency::Mode),
            "harmonic" => Ok(CentralTendency::Harmonic),
            "geometric" => Ok(CentralTendency::Geometric),
            other => Err(ImputeError::InvalidOption {
                param: "metric".to_string(),
                value: other.to_string(),
                reason: "expected one of mean, median, mode, harmonic, geometric".to_string(),
            }),
        }
    }
}

/// Fill every eligible missing position with a single aggregate of the
/// observed values.
///
/// Harmonic and geometric means require strictly positive observations and
/// fail with [`ImputeError::InvalidDomain`] otherwise. A series with missing
/// positions but no observed value at all also fails, before any output is
/// produced.
pub fn central_fill(
    series: &[f64],
    metric: CentralTendency,
    maxgap: Option<usize>,
) -> Result<Vec<f64>> {
    let index = gap_index(series);
    let targets = eligible(&index, maxgap);
    let mut out = series.to_vec();

    if targets.is_empty() {
        return Ok(out);
    }

    let observed: Vec<f64> = index.present.iter().map(|&q| series[q]).collect();
    if observed.is_empty() {
        return Err(ImputeError::InvalidDomain(
            "no observed values to aggregate".to_string(),
        ));
    }

    let fill = match metric {
        CentralTendency::Mean => observed.iter().mean(),
        CentralTendency::Median => Data::new(observed.clone()).median(),
        CentralTendency::Mode => mode(&observed),
        CentralTendency::Harmonic => {
            require_positive(&observed, "harmonic mean")?;
            observed.iter().harmonic_mean()
        }
        CentralTendency::Geometric => {
            require_positive(&observed, "geometric mean")?;
            observed.iter().geometric_mean()
        }
    };

    for &p in &targets {
        out[p] = fill;
    }

    Ok(out)
}

fn require_positive(observed: &[f64], metric: &str) -> Result<()> {
    if observed.iter().any(|&v| v <= 0.0) {
        return Err(ImputeError::InvalidDomain(format!(
            "{} is undefined for values <= 0",
            metric
        )));
    }
    Ok(())
}

/// Most frequent observed value. Ties resolve to the smallest value.
fn mode(observed: &[f64]) -> f64 {
    let mut sorted = observed.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best_value = sorted[0];
    let mut best_count = 0usize;
    let mut run_value = sorted[0];
    let mut run_count = 0usize;

    for &v in &sorted {
        if v == run_value {
            run_count += 1;
        } else {
            if run_count > best_count {
                best_value = run_value;
                best_count = run_count;
            }
            run_value = v;
            run_count = 1;
        }
    }
    if run_count > best_count {
        best_value = run_value;
    }

    best_value
}

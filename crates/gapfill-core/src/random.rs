//! Random-sample imputation.

use rand::Rng;

use crate::error::{ImputeError, Result};
use crate::gaps::{eligible, gap_index};

/// Fill each eligible missing position with an independent draw from a
/// uniform distribution on `[lower, upper]`.
///
/// Unset bounds default to the observed minimum and maximum. The caller
/// supplies the random source; pass a seeded `StdRng` for reproducible
/// output.
pub fn random_fill<R: Rng + ?Sized>(
    series: &[f64],
    lower: Option<f64>,
    upper: Option<f64>,
    maxgap: Option<usize>,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let index = gap_index(series);
    let targets = eligible(&index, maxgap);
    let mut out = series.to_vec();

    if targets.is_empty() {
        return Ok(out);
    }

    if (lower.is_none() || upper.is_none()) && index.present.is_empty() {
        // Nothing to derive default bounds from.
        return Err(ImputeError::InsufficientPoints { needed: 1, got: 0 });
    }

    let observed = || index.present.iter().map(|&q| series[q]);
    let lower = lower.unwrap_or_else(|| observed().fold(f64::INFINITY, f64::min));
    let upper = upper.unwrap_or_else(|| observed().fold(f64::NEG_INFINITY, f64::max));

    if lower > upper {
        return Err(ImputeError::InvalidDomain(format!(
            "lower bound {} exceeds upper bound {}",
            lower, upper
        )));
    }

    for &p in &targets {
        out[p] = rng.gen_range(lower..=upper);
    }

    Ok(out)
}

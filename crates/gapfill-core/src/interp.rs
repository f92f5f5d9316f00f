//! Interpolation-based imputation.

use std::str::FromStr;

use crate::error::{ImputeError, Result};
use crate::gaps::{eligible, gap_index};

/// Interpolant fitted through the observed (position, value) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMethod {
    /// Piecewise-linear between observations.
    Linear,
    /// Natural cubic spline; continuous first and second derivatives.
    Cubic,
    /// Fritsch-Carlson monotone piecewise cubic. Preserves the shape of the
    /// data and never overshoots between observations.
    ShapePreserving,
}

impl FromStr for InterpolationMethod {
    type Err = ImputeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(InterpolationMethod::Linear),
            "cubic" | "spline" => Ok(InterpolationMethod::Cubic),
            "shape-preserving" | "stineman" => Ok(InterpolationMethod::ShapePreserving),
            other => Err(ImputeError::InvalidOption {
                param: "method".to_string(),
                value: other.to_string(),
                reason: "expected one of linear, cubic, shape-preserving".to_string(),
            }),
        }
    }
}

/// Fill each eligible missing position by evaluating an interpolant built
/// from the observed values only.
///
/// Positions outside the observed range clamp to the first/last observation.
/// Fails with [`ImputeError::InsufficientPoints`] when fewer than 2 (linear,
/// cubic) or 3 (shape-preserving) observations exist.
pub fn interpolate_fill(
    series: &[f64],
    method: InterpolationMethod,
    maxgap: Option<usize>,
) -> Result<Vec<f64>> {
    let index = gap_index(series);
    let targets = eligible(&index, maxgap);
    let mut out = series.to_vec();

    if targets.is_empty() {
        return Ok(out);
    }

    let needed = match method {
        InterpolationMethod::Linear | InterpolationMethod::Cubic => 2,
        InterpolationMethod::ShapePreserving => 3,
    };
    if index.present.len() < needed {
        return Err(ImputeError::InsufficientPoints {
            needed,
            got: index.present.len(),
        });
    }

    let xs: Vec<f64> = index.present.iter().map(|&q| q as f64).collect();
    let ys: Vec<f64> = index.present.iter().map(|&q| series[q]).collect();

    match method {
        InterpolationMethod::Linear => {
            for &p in &targets {
                out[p] = eval_linear(&xs, &ys, p as f64);
            }
        }
        InterpolationMethod::Cubic => {
            let moments = natural_spline_moments(&xs, &ys);
            for &p in &targets {
                out[p] = eval_cubic(&xs, &ys, &moments, p as f64);
            }
        }
        InterpolationMethod::ShapePreserving => {
            let slopes = fritsch_carlson_slopes(&xs, &ys);
            for &p in &targets {
                out[p] = eval_hermite(&xs, &ys, &slopes, p as f64);
            }
        }
    }

    Ok(out)
}

/// Index of the knot interval containing `x`, clamped to valid intervals.
fn interval(xs: &[f64], x: f64) -> usize {
    let i = xs.partition_point(|&q| q <= x);
    i.saturating_sub(1).min(xs.len() - 2)
}

fn eval_linear(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    let i = interval(xs, x);
    let t = (x - xs[i]) / (xs[i + 1] - xs[i]);
    ys[i] + t * (ys[i + 1] - ys[i])
}

/// Second derivatives of the natural cubic spline through `(xs, ys)`,
/// computed with the Thomas algorithm. Free ends pin the first and last
/// moments to zero; with two knots the spline degenerates to a line.
fn natural_spline_moments(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut moments = vec![0.0; n];
    if n < 3 {
        return moments;
    }

    let mut upper = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = xs[i] - xs[i - 1];
        let h1 = xs[i + 1] - xs[i];
        let diag = 2.0 * (h0 + h1);
        let d = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);

        let w = diag - h0 * upper[i - 1];
        upper[i] = h1 / w;
        rhs[i] = (d - h0 * rhs[i - 1]) / w;
    }
    for i in (1..n - 1).rev() {
        moments[i] = rhs[i] - upper[i] * moments[i + 1];
    }

    moments
}

fn eval_cubic(xs: &[f64], ys: &[f64], moments: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    let i = interval(xs, x);
    let h = xs[i + 1] - xs[i];
    let a = (xs[i + 1] - x) / h;
    let b = (x - xs[i]) / h;
    a * ys[i]
        + b * ys[i + 1]
        + ((a * a * a - a) * moments[i] + (b * b * b - b) * moments[i + 1]) * h * h / 6.0
}

/// First-derivative values for the Fritsch-Carlson monotone cubic. Interior
/// slopes are a weighted harmonic mean of the adjacent secants and drop to
/// zero at local extrema, which is what prevents overshoot.
fn fritsch_carlson_slopes(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let secants: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let mut slopes = vec![0.0; n];
    slopes[0] = secants[0];
    slopes[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        if secants[i - 1] * secants[i] <= 0.0 {
            slopes[i] = 0.0;
        } else {
            let w1 = 2.0 * h[i] + h[i - 1];
            let w2 = h[i] + 2.0 * h[i - 1];
            slopes[i] = (w1 + w2) / (w1 / secants[i - 1] + w2 / secants[i]);
        }
    }

    slopes
}

fn eval_hermite(xs: &[f64], ys: &[f64], slopes: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }

    let i = interval(xs, x);
    let h = xs[i + 1] - xs[i];
    let t = (x - xs[i]) / h;

    let h00 = (1.0 + 2.0 * t) * (1.0 - t) * (1.0 - t);
    let h10 = t * (1.0 - t) * (1.0 - t);
    let h01 = t * t * (3.0 - 2.0 * t);
    let h11 = t * t * (t - 1.0);

    h00 * ys[i] + h10 * h * slopes[i] + h01 * ys[i + 1] + h11 * h * slopes[i + 1]
}

//! Gap-aware missing value imputation for univariate time series.
//!
//! Every strategy shares the same machinery: missing positions (NaN) are
//! detected, grouped into contiguous runs, and optionally limited by the
//! maxgap policy before any value is written. Strategies return a fresh
//! buffer of the same length, never mutate the caller's data, and never
//! alter observed values.

pub mod carry;
pub mod central;
pub mod error;
pub mod gaps;
pub mod interp;
pub mod random;
pub mod series;
pub mod window;

// Re-exports for convenience
pub use carry::{carry_backward, carry_forward, BoundaryPolicy};
pub use central::{central_fill, CentralTendency};
pub use error::{ImputeError, Result};
pub use gaps::{eligible, gap_index, GapIndex, GapRun};
pub use interp::{interpolate_fill, InterpolationMethod};
pub use random::random_fill;
pub use series::{normalize, SeriesSource};
pub use window::{window_fill, Aggregator, Weighting};

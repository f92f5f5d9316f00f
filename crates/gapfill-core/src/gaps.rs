//! Gap detection and the maxgap eligibility policy.

/// Maximal contiguous block of missing positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapRun {
    /// First missing position in the run.
    pub start: usize,
    /// Number of consecutive missing positions.
    pub len: usize,
}

impl GapRun {
    /// One past the last missing position in the run.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Positions covered by the run, in order.
    pub fn positions(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }
}

/// Missing and present positions of a series, plus the run partition of
/// `missing`.
#[derive(Debug, Clone, Default)]
pub struct GapIndex {
    /// Positions holding the missing sentinel, ascending.
    pub missing: Vec<usize>,
    /// Positions holding an observed value, ascending.
    pub present: Vec<usize>,
    /// Contiguous runs partitioning `missing`, ordered by position.
    pub runs: Vec<GapRun>,
}

/// Compute the gap index of a series. NaN is the missing sentinel.
pub fn gap_index(series: &[f64]) -> GapIndex {
    let mut missing = Vec::new();
    let mut present = Vec::new();

    for (i, v) in series.iter().enumerate() {
        if v.is_nan() {
            missing.push(i);
        } else {
            present.push(i);
        }
    }

    // Split `missing` wherever consecutive positions are not adjacent.
    let mut runs: Vec<GapRun> = Vec::new();
    for &pos in &missing {
        match runs.last_mut() {
            Some(run) if run.end() == pos => run.len += 1,
            _ => runs.push(GapRun { start: pos, len: 1 }),
        }
    }

    GapIndex {
        missing,
        present,
        runs,
    }
}

/// Positions eligible for imputation under the maxgap policy.
///
/// Runs longer than `maxgap` are excluded wholesale; a run is all-in or
/// all-out, never partially imputed. With `maxgap` unset every missing
/// position is eligible.
pub fn eligible(index: &GapIndex, maxgap: Option<usize>) -> Vec<usize> {
    match maxgap {
        None => index.missing.clone(),
        Some(limit) => index
            .runs
            .iter()
            .filter(|run| run.len <= limit)
            .flat_map(GapRun::positions)
            .collect(),
    }
}

//! Input normalization into a uniform numeric buffer.

use crate::error::{ImputeError, Result};

/// One-dimensional input accepted by the strategies.
///
/// Each variant materializes to the same owned buffer where `f64::NAN` marks
/// a missing observation. The caller's data is copied, never aliased.
#[derive(Debug, Clone, Copy)]
pub enum SeriesSource<'a> {
    /// Raw numeric buffer; NaN entries are treated as missing.
    Buffer(&'a [f64]),
    /// Ordered sequence with explicit nulls; `None` becomes NaN.
    Optional(&'a [Option<f64>]),
    /// Tabular input. Exactly one column is accepted.
    Table(&'a [Vec<f64>]),
}

/// Materialize an input into an owned numeric buffer.
///
/// Multi-column (or empty) tabular input fails with
/// [`ImputeError::UnsupportedInputKind`].
pub fn normalize(input: SeriesSource<'_>) -> Result<Vec<f64>> {
    match input {
        SeriesSource::Buffer(values) => Ok(values.to_vec()),
        SeriesSource::Optional(values) => {
            Ok(values.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        }
        SeriesSource::Table(columns) => match columns {
            [column] => Ok(column.clone()),
            _ => Err(ImputeError::UnsupportedInputKind(format!(
                "expected a single column, got {}",
                columns.len()
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_buffer() {
        let values = vec![1.0, f64::NAN, 3.0];
        let result = normalize(SeriesSource::Buffer(&values)).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[0], 1.0);
        assert!(result[1].is_nan());
        assert_eq!(result[2], 3.0);
    }

    #[test]
    fn test_normalize_optional() {
        let values = vec![Some(1.0), None, Some(3.0)];
        let result = normalize(SeriesSource::Optional(&values)).unwrap();
        assert_eq!(result[0], 1.0);
        assert!(result[1].is_nan());
        assert_eq!(result[2], 3.0);
    }

    #[test]
    fn test_normalize_single_column() {
        let columns = vec![vec![1.0, 2.0]];
        let result = normalize(SeriesSource::Table(&columns)).unwrap();
        assert_eq!(result, vec![1.0, 2.0]);
    }

    #[test]
    fn test_normalize_rejects_multi_column() {
        let columns = vec![vec![1.0], vec![2.0]];
        let err = normalize(SeriesSource::Table(&columns)).unwrap_err();
        assert!(matches!(err, ImputeError::UnsupportedInputKind(_)));
    }

    #[test]
    fn test_normalize_copies_input() {
        let values = vec![1.0, 2.0];
        let mut result = normalize(SeriesSource::Buffer(&values)).unwrap();
        result[0] = 9.0;
        assert_eq!(values[0], 1.0);
    }
}

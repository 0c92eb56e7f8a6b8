//! Dense travel-cost matrix.

use crate::error::ConfigurationError;

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Costs are not assumed symmetric. The diagonal always reads as zero,
/// whatever the source data holds.
///
/// # Examples
///
/// ```
/// use shift_routing::distance::CostMatrix;
///
/// let m = CostMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![6.0, 0.0, 3.0],
///     vec![8.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(m.get(0, 1), 5.0);
/// assert_eq!(m.get(1, 0), 6.0);
/// assert_eq!(m.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// Fails if the rows do not form a non-empty square, or if any entry is
    /// negative or non-finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ConfigurationError> {
        let size = rows.len();
        if size == 0 {
            return Err(ConfigurationError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(size * size);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(ConfigurationError::NotSquare {
                    row: from,
                    expected: size,
                    actual: row.len(),
                });
            }
            for (to, value) in row.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigurationError::InvalidCost { from, to, value });
                }
                data.push(if from == to { 0.0 } else { value });
            }
        }

        Ok(Self { data, size })
    }

    /// Builds a matrix by evaluating `f` on every ordered pair.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(if i == j { 0.0 } else { f(i, j) });
            }
        }
        Self { data, size }
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the candidate reachable from `from` at the lowest cost.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.get(from, a).total_cmp(&self.get(from, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0.0, 5.0, 8.0],
            vec![5.0, 0.0, 3.0],
            vec![8.0, 3.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let m = sample();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(0, 2), 8.0);
        assert_eq!(m.get(2, 0), 8.0);
    }

    #[test]
    fn test_diagonal_is_zero() {
        let m = CostMatrix::from_rows(vec![vec![7.0, 1.0], vec![1.0, 9.0]]).expect("valid");
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(
            CostMatrix::from_rows(vec![]).unwrap_err(),
            ConfigurationError::EmptyMatrix
        );
    }

    #[test]
    fn test_ragged_rejected() {
        let err = CostMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::NotSquare {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(matches!(
            CostMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(ConfigurationError::InvalidCost { from: 0, to: 1, .. })
        ));
        assert!(matches!(
            CostMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::NAN, 0.0]]),
            Err(ConfigurationError::InvalidCost { from: 1, to: 0, .. })
        ));
    }

    #[test]
    fn test_asymmetric_matrix() {
        let m = CostMatrix::from_rows(vec![vec![0.0, 10.0], vec![15.0, 0.0]]).expect("valid");
        assert_eq!(m.get(0, 1), 10.0);
        assert_eq!(m.get(1, 0), 15.0);
    }

    #[test]
    fn test_from_fn_skips_diagonal() {
        let m = CostMatrix::from_fn(3, |i, j| (i * 10 + j) as f64);
        assert_eq!(m.get(1, 2), 12.0);
        assert_eq!(m.get(2, 2), 0.0);
    }

    #[test]
    fn test_nearest_neighbor() {
        let m = sample();
        assert_eq!(m.nearest_neighbor(0, &[1, 2]), Some(1));
        assert_eq!(m.nearest_neighbor(2, &[0, 1]), Some(1));
        assert_eq!(m.nearest_neighbor(0, &[]), None);
    }
}

//! Item×feature matrix with a sparse or dense backing.

use super::{Matrix, SparseMatrix, Vector};
use crate::error::{RecError, Result};

/// Encoded item features, one row per item.
///
/// Row `i` always belongs to item `i`; no transform reorders rows. The
/// backing representation only affects memory use, never numeric results.
///
/// # Examples
///
/// ```
/// use gamerec::primitives::{FeatureMatrix, SparseMatrix, Vector};
///
/// let sparse = SparseMatrix::from_rows(2, vec![vec![(0, 1.0)], vec![(1, 1.0)]])
///     .expect("valid rows");
/// let features = FeatureMatrix::Sparse(sparse);
/// let mean = features.weighted_row_mean(&[0, 1], &[1.0, 1.0]).expect("valid rows");
/// assert_eq!(mean, Vector::from_slice(&[0.5, 0.5]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureMatrix {
    /// Row-major dense storage.
    Dense(Matrix<f64>),
    /// Compressed sparse rows.
    Sparse(SparseMatrix),
}

impl FeatureMatrix {
    /// Number of items.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        match self {
            Self::Dense(m) => m.n_rows(),
            Self::Sparse(m) => m.n_rows(),
        }
    }

    /// Feature dimensionality.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        match self {
            Self::Dense(m) => m.n_cols(),
            Self::Sparse(m) => m.n_cols(),
        }
    }

    /// Whether the backing storage is sparse.
    #[must_use]
    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    /// Returns row `i` as a dense vector.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> Vector<f64> {
        match self {
            Self::Dense(m) => m.row(i),
            Self::Sparse(m) => {
                let mut out = vec![0.0; m.n_cols()];
                let (cols, vals) = m.row_entries(i);
                for (&c, &v) in cols.iter().zip(vals) {
                    out[c] = v;
                }
                Vector::from_vec(out)
            }
        }
    }

    /// Dot product of row `i` with a dense query.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or `query` has the wrong length.
    #[must_use]
    pub fn dot_row(&self, i: usize, query: &[f64]) -> f64 {
        match self {
            Self::Dense(m) => m
                .row_slice(i)
                .iter()
                .zip(query)
                .map(|(a, b)| a * b)
                .sum(),
            Self::Sparse(m) => {
                let (cols, vals) = m.row_entries(i);
                cols.iter().zip(vals).map(|(&c, &v)| v * query[c]).sum()
            }
        }
    }

    /// L2 norm of row `i`.
    #[must_use]
    pub fn row_norm(&self, i: usize) -> f64 {
        match self {
            Self::Dense(m) => m.row_slice(i).iter().map(|x| x * x).sum::<f64>().sqrt(),
            Self::Sparse(m) => m.row_entries(i).1.iter().map(|x| x * x).sum::<f64>().sqrt(),
        }
    }

    /// Weighted mean of the selected rows: `Σ w_i·x_i / Σ w_i`.
    ///
    /// Rows are accumulated in the order given, so sparse and dense backings
    /// produce bit-identical results.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` is empty, lengths differ, a row index is out
    /// of bounds, or the weights sum to zero.
    pub fn weighted_row_mean(&self, rows: &[usize], weights: &[f64]) -> Result<Vector<f64>> {
        if rows.is_empty() {
            return Err(RecError::empty_input("rows for mean"));
        }
        if rows.len() != weights.len() {
            return Err(RecError::dimension_mismatch(
                "weights",
                rows.len(),
                weights.len(),
            ));
        }
        let total: f64 = weights.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Err(RecError::Other(format!(
                "row weights must have a finite non-zero sum, got {total}"
            )));
        }

        let n = self.n_rows();
        let mut acc = vec![0.0; self.n_cols()];
        for (&r, &w) in rows.iter().zip(weights) {
            if r >= n {
                return Err(RecError::index_out_of_bounds(r, n));
            }
            match self {
                Self::Dense(m) => {
                    for (a, &v) in acc.iter_mut().zip(m.row_slice(r)) {
                        *a += w * v;
                    }
                }
                Self::Sparse(m) => {
                    let (cols, vals) = m.row_entries(r);
                    for (&c, &v) in cols.iter().zip(vals) {
                        acc[c] += w * v;
                    }
                }
            }
        }

        Ok(Vector::from_vec(acc.into_iter().map(|a| a / total).collect()))
    }

    /// Converts to dense storage (no-op if already dense).
    #[must_use]
    pub fn into_dense(self) -> Matrix<f64> {
        match self {
            Self::Dense(m) => m,
            Self::Sparse(m) => m.to_dense(),
        }
    }

    /// Scales every row to unit L2 norm.
    pub fn normalize_rows(&mut self) {
        match self {
            Self::Dense(m) => m.normalize_rows(),
            Self::Sparse(m) => m.normalize_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sparse() -> SparseMatrix {
        SparseMatrix::from_rows(
            3,
            vec![
                vec![(0, 1.0), (2, 1.0)],
                vec![(1, 0.5)],
                vec![(0, 0.25), (1, 2.0)],
            ],
        )
        .expect("valid rows")
    }

    #[test]
    fn test_sparse_and_dense_means_are_identical() {
        let sparse = FeatureMatrix::Sparse(sample_sparse());
        let dense = FeatureMatrix::Dense(sample_sparse().to_dense());
        let rows = [2, 0];
        let weights = [0.3, 0.9];
        assert_eq!(
            sparse.weighted_row_mean(&rows, &weights).expect("valid"),
            dense.weighted_row_mean(&rows, &weights).expect("valid")
        );
    }

    #[test]
    fn test_dot_row_matches_dense() {
        let sparse = FeatureMatrix::Sparse(sample_sparse());
        let dense = FeatureMatrix::Dense(sample_sparse().to_dense());
        let q = [0.1, 0.7, 0.3];
        for i in 0..3 {
            assert_eq!(sparse.dot_row(i, &q), dense.dot_row(i, &q));
            assert_eq!(sparse.row_norm(i), dense.row_norm(i));
            assert_eq!(sparse.row(i), dense.row(i));
        }
    }

    #[test]
    fn test_weighted_mean_rejects_empty() {
        let m = FeatureMatrix::Sparse(sample_sparse());
        assert!(m.weighted_row_mean(&[], &[]).is_err());
    }

    #[test]
    fn test_weighted_mean_rejects_zero_weights() {
        let m = FeatureMatrix::Sparse(sample_sparse());
        assert!(m.weighted_row_mean(&[0, 1], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_weighted_mean_out_of_bounds() {
        let m = FeatureMatrix::Sparse(sample_sparse());
        assert!(m.weighted_row_mean(&[7], &[1.0]).is_err());
    }

    #[test]
    fn test_plain_mean() {
        let m = FeatureMatrix::Dense(sample_sparse().to_dense());
        let mean = m.weighted_row_mean(&[0, 1], &[1.0, 1.0]).expect("valid");
        assert_eq!(mean.as_slice(), &[0.5, 0.25, 0.5]);
    }
}

//! Compressed sparse row (CSR) storage for multi-hot feature matrices.

use super::Matrix;
use crate::error::{RecError, Result};

/// Row-compressed sparse matrix.
///
/// Column indices within each row are strictly ascending, so dot products
/// and row sums visit entries in the same order as a dense scan would.
///
/// # Examples
///
/// ```
/// use gamerec::primitives::SparseMatrix;
///
/// let m = SparseMatrix::from_rows(3, vec![vec![(0, 1.0), (2, 1.0)], vec![(1, 1.0)]])
///     .expect("valid rows");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.nnz(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
    cols: usize,
}

impl SparseMatrix {
    /// Builds a matrix from per-row `(column, value)` entries.
    ///
    /// Entries are sorted by column; explicit zeros are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is out of range or appears twice in a row.
    pub fn from_rows(cols: usize, rows: Vec<Vec<(usize, f64)>>) -> Result<Self> {
        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);

        for mut row in rows {
            row.sort_by_key(|&(c, _)| c);
            for window in row.windows(2) {
                if window[0].0 == window[1].0 {
                    return Err(RecError::Other(format!(
                        "duplicate column {} in sparse row",
                        window[0].0
                    )));
                }
            }
            for (c, v) in row {
                if c >= cols {
                    return Err(RecError::index_out_of_bounds(c, cols));
                }
                if v != 0.0 {
                    indices.push(c);
                    values.push(v);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            indptr,
            indices,
            values,
            cols,
        })
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.cols)
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Column indices and values of one row.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row_entries(&self, row: usize) -> (&[usize], &[f64]) {
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        (&self.indices[start..end], &self.values[start..end])
    }

    /// Number of rows with a non-zero entry in each column.
    #[must_use]
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.cols];
        for &c in &self.indices {
            counts[c] += 1;
        }
        counts
    }

    /// Applies `f(column, value)` to every stored entry.
    pub fn map_values(&mut self, mut f: impl FnMut(usize, f64) -> f64) {
        for (v, &c) in self.values.iter_mut().zip(self.indices.iter()) {
            *v = f(c, *v);
        }
    }

    /// Scales every row to unit L2 norm; empty rows are left untouched.
    pub fn normalize_rows(&mut self) {
        for r in 0..self.n_rows() {
            let (start, end) = (self.indptr[r], self.indptr[r + 1]);
            let row = &mut self.values[start..end];
            let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|x| *x /= norm);
            }
        }
    }

    /// Expands into a dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> Matrix<f64> {
        let mut dense = Matrix::zeros(self.n_rows(), self.cols);
        for r in 0..self.n_rows() {
            let (cols, vals) = self.row_entries(r);
            for (&c, &v) in cols.iter().zip(vals) {
                dense.set(r, c, v);
            }
        }
        dense
    }
}

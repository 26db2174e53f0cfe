//! Feature transforms applied to the encoded item matrix.
//!
//! The encoder runs these in a fixed order: term weighting
//! ([`TfidfTransformer`]), dimensionality reduction ([`PCA`] or
//! [`TruncatedSVD`]), then row normalization ([`Normalizer`]).
//!
//! # Example
//!
//! ```
//! use gamerec::preprocessing::{TermWeighting, TfidfTransformer};
//! use gamerec::primitives::{FeatureMatrix, SparseMatrix};
//! use gamerec::traits::Transformer;
//!
//! let tags = SparseMatrix::from_rows(3, vec![
//!     vec![(0, 1.0), (1, 1.0)],
//!     vec![(0, 1.0), (2, 1.0)],
//! ]).expect("valid rows");
//!
//! let mut tfidf = TfidfTransformer::new(TermWeighting::Smooth);
//! let weighted = tfidf.fit_transform(&FeatureMatrix::Sparse(tags)).expect("fit_transform should succeed");
//! assert_eq!(weighted.n_rows(), 2);
//! ```

mod reduction;
mod tfidf;

pub use reduction::{DimReduction, TruncatedSVD, PCA};
pub use tfidf::{TermWeighting, TfidfTransformer};

use crate::error::{RecError, Result};
use crate::primitives::{FeatureMatrix, Vector};
use crate::traits::Transformer;

/// Scales each row to unit L2 norm.
///
/// Stateless apart from the feature width recorded at fit time, which is
/// used to validate query vectors normalized with the same instance.
///
/// # Example
///
/// ```
/// use gamerec::preprocessing::Normalizer;
/// use gamerec::primitives::{FeatureMatrix, Matrix, Vector};
/// use gamerec::traits::Transformer;
///
/// let x = FeatureMatrix::Dense(Matrix::from_vec(2, 2, vec![3.0, 4.0, 0.0, 2.0]).expect("valid"));
/// let mut normalizer = Normalizer::new();
/// normalizer.fit(&x).expect("fit should succeed");
///
/// let q = normalizer.transform_vector(&Vector::from_slice(&[0.0, 5.0])).expect("same width");
/// assert_eq!(q.as_slice(), &[0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    n_features: Option<usize>,
}

impl Normalizer {
    /// Creates a new L2 row normalizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `fit` has been called.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.n_features.is_some()
    }

    /// Normalizes a single query vector.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted or the vector width differs from the
    /// fitted matrix.
    pub fn transform_vector(&self, v: &Vector<f64>) -> Result<Vector<f64>> {
        let n_features = self.n_features.ok_or(RecError::NotFitted {
            component: "Normalizer",
        })?;
        if v.len() != n_features {
            return Err(RecError::dimension_mismatch("features", n_features, v.len()));
        }
        Ok(v.l2_normalized())
    }
}

impl Transformer for Normalizer {
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()> {
        self.n_features = Some(x.n_cols());
        Ok(())
    }

    fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        let n_features = self.n_features.ok_or(RecError::NotFitted {
            component: "Normalizer",
        })?;
        if x.n_cols() != n_features {
            return Err(RecError::dimension_mismatch("features", n_features, x.n_cols()));
        }
        let mut out = x.clone();
        out.normalize_rows();
        Ok(out)
    }
}

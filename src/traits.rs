//! Core traits for feature transforms.
//!
//! Every stage of the feature pipeline (term weighting, dimensionality
//! reduction, row normalization) is a [`Transformer`]: it learns its state
//! from the full item matrix in `fit`, then applies it in `transform`.

use crate::error::Result;
use crate::primitives::FeatureMatrix;

/// Trait for fit-then-apply feature transformers.
///
/// # Examples
///
/// ```
/// use gamerec::preprocessing::Normalizer;
/// use gamerec::primitives::{FeatureMatrix, Matrix};
/// use gamerec::traits::Transformer;
///
/// let x = FeatureMatrix::Dense(Matrix::from_vec(1, 2, vec![3.0, 4.0]).expect("valid"));
/// let mut normalizer = Normalizer::new();
/// let y = normalizer.fit_transform(&x).expect("fit_transform should succeed");
/// assert!((y.row_norm(0) - 1.0).abs() < 1e-12);
/// ```
pub trait Transformer {
    /// Fits the transformer to data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()>;

    /// Transforms data using fitted parameters.
    ///
    /// Row order is preserved: output row `i` is derived from input row `i`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformer is not fitted or shapes differ.
    fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        self.fit(x)?;
        self.transform(x)
    }
}

//! Dimensionality reduction of item features into a dense space.

use crate::error::{RecError, Result};
use crate::primitives::{FeatureMatrix, Matrix};
use crate::traits::Transformer;
use nalgebra::{DMatrix, SymmetricEigen, SVD};
use serde::{Deserialize, Serialize};

/// Configured reduction algorithm.
///
/// Deserializes from a table tagged by `algorithm`:
///
/// ```toml
/// [encoder.dim_reduction]
/// algorithm = "truncated_svd"
/// n_components = 32
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum DimReduction {
    /// Principal component analysis on mean-centered features.
    Pca {
        /// Output dimensionality.
        n_components: usize,
    },
    /// Truncated singular value decomposition (no centering).
    TruncatedSvd {
        /// Output dimensionality.
        n_components: usize,
    },
}

impl DimReduction {
    /// Output dimensionality.
    #[must_use]
    pub fn n_components(self) -> usize {
        match self {
            Self::Pca { n_components } | Self::TruncatedSvd { n_components } => n_components,
        }
    }

    /// Rejects configurations that can never fit.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_components` is zero.
    pub fn validate(self) -> Result<()> {
        if self.n_components() == 0 {
            return Err(RecError::invalid_config(
                "dim_reduction.n_components",
                0,
                ">0",
            ));
        }
        Ok(())
    }

    /// Creates an unfitted transformer for this configuration.
    #[must_use]
    pub fn build(self) -> Box<dyn Transformer + Send + Sync> {
        match self {
            Self::Pca { n_components } => Box::new(PCA::new(n_components)),
            Self::TruncatedSvd { n_components } => Box::new(TruncatedSVD::new(n_components)),
        }
    }
}

/// Principal Component Analysis (PCA) for dimensionality reduction.
///
/// PCA reduces dimensionality by projecting data onto principal components
/// (directions of maximum variance).
///
/// # Example
///
/// ```
/// use gamerec::preprocessing::PCA;
/// use gamerec::primitives::{FeatureMatrix, Matrix};
/// use gamerec::traits::Transformer;
///
/// let data = FeatureMatrix::Dense(Matrix::from_vec(4, 3, vec![
///     1.0, 0.0, 1.0,
///     1.0, 1.0, 0.0,
///     0.0, 1.0, 1.0,
///     1.0, 1.0, 1.0,
/// ]).expect("valid matrix dimensions"));
///
/// let mut pca = PCA::new(2);
/// let transformed = pca.fit_transform(&data).expect("fit_transform should succeed");
/// assert_eq!((transformed.n_rows(), transformed.n_cols()), (4, 2));
/// ```
#[derive(Debug, Clone)]
pub struct PCA {
    /// Number of components to keep.
    n_components: usize,
    /// Mean of each feature (computed during fit).
    mean: Option<Vec<f64>>,
    /// Principal components (eigenvectors), one per row.
    components: Option<Matrix<f64>>,
    /// Ratio of variance explained by each component.
    explained_variance_ratio: Option<Vec<f64>>,
}

impl PCA {
    /// Creates a new PCA transformer.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            mean: None,
            components: None,
            explained_variance_ratio: None,
        }
    }

    /// Returns the ratio of variance explained by each component.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> Option<&[f64]> {
        self.explained_variance_ratio.as_deref()
    }
}

impl Transformer for PCA {
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()> {
        let x = x.clone().into_dense();
        let (n_samples, n_features) = x.shape();

        if self.n_components > n_features {
            return Err(RecError::invalid_config(
                "dim_reduction.n_components",
                self.n_components,
                &format!("<= number of features ({n_features})"),
            ));
        }
        if n_samples < 2 {
            return Err(RecError::empty_input("PCA needs at least 2 items"));
        }

        let mut mean = vec![0.0; n_features];
        for i in 0..n_samples {
            for (m, &v) in mean.iter_mut().zip(x.row_slice(i)) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n_samples as f64);

        // Covariance: Σ = (X - μ)ᵀ(X - μ) / (n - 1)
        let mut cov = vec![0.0; n_features * n_features];
        for k in 0..n_samples {
            let row = x.row_slice(k);
            for i in 0..n_features {
                let ci = row[i] - mean[i];
                if ci == 0.0 {
                    continue;
                }
                for j in 0..n_features {
                    cov[i * n_features + j] += ci * (row[j] - mean[j]);
                }
            }
        }
        let denom = (n_samples - 1) as f64;
        cov.iter_mut().for_each(|c| *c /= denom);

        let eigen = SymmetricEigen::new(DMatrix::from_row_slice(n_features, n_features, &cov));
        let eigenvalues = eigen.eigenvalues;
        let eigenvectors = eigen.eigenvectors;

        let mut indices: Vec<usize> = (0..n_features).collect();
        indices.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]).then(a.cmp(&b)));

        let mut components = Matrix::zeros(self.n_components, n_features);
        let mut explained = Vec::with_capacity(self.n_components);
        for (i, &idx) in indices.iter().take(self.n_components).enumerate() {
            explained.push(eigenvalues[idx]);
            for j in 0..n_features {
                components.set(i, j, eigenvectors[(j, idx)]);
            }
        }

        let total: f64 = eigenvalues.iter().sum();
        self.explained_variance_ratio = Some(
            explained
                .iter()
                .map(|&v| if total > 0.0 { v / total } else { 0.0 })
                .collect(),
        );
        self.mean = Some(mean);
        self.components = Some(components);
        Ok(())
    }

    fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        let components = self
            .components
            .as_ref()
            .ok_or(RecError::NotFitted { component: "PCA" })?;
        let mean = self
            .mean
            .as_ref()
            .ok_or(RecError::NotFitted { component: "PCA" })?;

        if x.n_cols() != mean.len() {
            return Err(RecError::dimension_mismatch("features", mean.len(), x.n_cols()));
        }

        // X_pca = (X - mean) @ componentsᵀ
        let mut out = Matrix::zeros(x.n_rows(), self.n_components);
        for i in 0..x.n_rows() {
            let centered: Vec<f64> = x
                .row(i)
                .as_slice()
                .iter()
                .zip(mean)
                .map(|(v, m)| v - m)
                .collect();
            for j in 0..self.n_components {
                let value = centered
                    .iter()
                    .zip(components.row_slice(j))
                    .map(|(a, b)| a * b)
                    .sum();
                out.set(i, j, value);
            }
        }
        Ok(FeatureMatrix::Dense(out))
    }
}

/// Truncated SVD (latent semantic analysis) for tf-idf matrices.
///
/// Projects rows onto the top right-singular vectors without centering,
/// so sparse inputs keep their zero structure meaningful.
///
/// # Example
///
/// ```
/// use gamerec::preprocessing::TruncatedSVD;
/// use gamerec::primitives::{FeatureMatrix, SparseMatrix};
/// use gamerec::traits::Transformer;
///
/// let x = FeatureMatrix::Sparse(SparseMatrix::from_rows(3, vec![
///     vec![(0, 1.0), (1, 1.0)],
///     vec![(1, 1.0), (2, 1.0)],
///     vec![(0, 1.0)],
/// ]).expect("valid rows"));
///
/// let mut svd = TruncatedSVD::new(2);
/// let reduced = svd.fit_transform(&x).expect("fit_transform should succeed");
/// assert!(!reduced.is_sparse());
/// assert_eq!(reduced.n_cols(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TruncatedSVD {
    n_components: usize,
    /// Right-singular vectors, one per row (`n_components × n_features`).
    components: Option<Matrix<f64>>,
    singular_values: Option<Vec<f64>>,
}

impl TruncatedSVD {
    /// Creates a new truncated SVD transformer.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            components: None,
            singular_values: None,
        }
    }

    /// Singular values of the kept components, largest first.
    #[must_use]
    pub fn singular_values(&self) -> Option<&[f64]> {
        self.singular_values.as_deref()
    }
}

impl Transformer for TruncatedSVD {
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()> {
        let dense = x.clone().into_dense();
        let (n_samples, n_features) = dense.shape();
        let rank_bound = n_samples.min(n_features);

        if self.n_components > rank_bound {
            return Err(RecError::invalid_config(
                "dim_reduction.n_components",
                self.n_components,
                &format!("<= min(items, features) ({rank_bound})"),
            ));
        }

        let svd = SVD::new(
            DMatrix::from_row_slice(n_samples, n_features, dense.as_slice()),
            false,
            true,
        );
        let v_t = svd
            .v_t
            .ok_or_else(|| RecError::Other("SVD did not produce right-singular vectors".into()))?;
        let sigma = svd.singular_values;

        let mut order: Vec<usize> = (0..sigma.len()).collect();
        order.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]).then(a.cmp(&b)));

        let mut components = Matrix::zeros(self.n_components, n_features);
        let mut kept = Vec::with_capacity(self.n_components);
        for (i, &idx) in order.iter().take(self.n_components).enumerate() {
            kept.push(sigma[idx]);
            for j in 0..n_features {
                components.set(i, j, v_t[(idx, j)]);
            }
        }

        self.components = Some(components);
        self.singular_values = Some(kept);
        Ok(())
    }

    fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        let components = self.components.as_ref().ok_or(RecError::NotFitted {
            component: "TruncatedSVD",
        })?;
        if x.n_cols() != components.n_cols() {
            return Err(RecError::dimension_mismatch(
                "features",
                components.n_cols(),
                x.n_cols(),
            ));
        }

        let mut out = Matrix::zeros(x.n_rows(), self.n_components);
        for j in 0..self.n_components {
            let axis = components.row_slice(j);
            for i in 0..x.n_rows() {
                out.set(i, j, x.dot_row(i, axis));
            }
        }
        Ok(FeatureMatrix::Dense(out))
    }
}

//! Document-frequency term weighting for multi-hot tag matrices.

use crate::error::{RecError, Result};
use crate::primitives::{FeatureMatrix, Matrix};
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Term-weighting mode.
///
/// Two independent toggles give four weighted modes:
///
/// ```text
/// idf(t) = ln(N / df(t)) + 1                 (default, sublinear)
/// idf(t) = ln((1 + N) / (1 + df(t))) + 1     (smooth, smooth_sublinear)
/// tf'    = 1 + ln(tf)  for tf > 0            (sublinear, smooth_sublinear)
/// ```
///
/// # Examples
///
/// ```
/// use gamerec::preprocessing::TermWeighting;
///
/// let mode: TermWeighting = "smooth_sublinear".parse().expect("known mode");
/// assert!(mode.smooth_idf() && mode.sublinear_tf());
/// assert!("bm25".parse::<TermWeighting>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermWeighting {
    /// Raw multi-hot values.
    None,
    /// Plain idf.
    #[default]
    Default,
    /// Add-one smoothed idf.
    Smooth,
    /// Plain idf with logarithmic tf.
    Sublinear,
    /// Smoothed idf with logarithmic tf.
    SmoothSublinear,
}

impl TermWeighting {
    /// Whether idf uses add-one smoothing.
    #[must_use]
    pub fn smooth_idf(self) -> bool {
        matches!(self, Self::Smooth | Self::SmoothSublinear)
    }

    /// Whether term frequencies are log-dampened.
    #[must_use]
    pub fn sublinear_tf(self) -> bool {
        matches!(self, Self::Sublinear | Self::SmoothSublinear)
    }

    /// Whether any weighting is applied.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Default => "default",
            Self::Smooth => "smooth",
            Self::Sublinear => "sublinear",
            Self::SmoothSublinear => "smooth_sublinear",
        }
    }
}

impl fmt::Display for TermWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermWeighting {
    type Err = RecError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "default" => Ok(Self::Default),
            "smooth" => Ok(Self::Smooth),
            "sublinear" => Ok(Self::Sublinear),
            "smooth_sublinear" => Ok(Self::SmoothSublinear),
            other => Err(RecError::invalid_config(
                "term_weighting",
                other,
                "one of none|default|smooth|sublinear|smooth_sublinear",
            )),
        }
    }
}

/// TF-IDF reweighting of an item×tag matrix.
///
/// Rows are L2-normalized after weighting (the usual tf-idf output), which
/// can be disabled with [`TfidfTransformer::with_l2_norm`].
///
/// # Examples
///
/// ```
/// use gamerec::preprocessing::{TermWeighting, TfidfTransformer};
/// use gamerec::primitives::{FeatureMatrix, SparseMatrix};
/// use gamerec::traits::Transformer;
///
/// // Tag 0 is on every item, tag 1 on one item
/// let x = FeatureMatrix::Sparse(SparseMatrix::from_rows(2, vec![
///     vec![(0, 1.0), (1, 1.0)],
///     vec![(0, 1.0)],
/// ]).expect("valid rows"));
///
/// let mut tfidf = TfidfTransformer::new(TermWeighting::Default).with_l2_norm(false);
/// tfidf.fit(&x).expect("fit should succeed");
/// let idf = tfidf.idf_values().expect("fitted");
/// assert!(idf[0] < idf[1]); // common tags are downweighted
/// ```
#[derive(Debug, Clone)]
pub struct TfidfTransformer {
    mode: TermWeighting,
    l2_norm: bool,
    idf: Option<Vec<f64>>,
}

impl TfidfTransformer {
    /// Creates a transformer for the given mode.
    #[must_use]
    pub fn new(mode: TermWeighting) -> Self {
        Self {
            mode,
            l2_norm: true,
            idf: None,
        }
    }

    /// Enable or disable L2 row normalization of the weighted output.
    #[must_use]
    pub fn with_l2_norm(mut self, enable: bool) -> Self {
        self.l2_norm = enable;
        self
    }

    /// Weighting mode.
    #[must_use]
    pub fn mode(&self) -> TermWeighting {
        self.mode
    }

    /// Learned inverse document frequencies, one per column.
    #[must_use]
    pub fn idf_values(&self) -> Option<&[f64]> {
        self.idf.as_deref()
    }

    fn tf(&self, raw: f64) -> f64 {
        if self.mode.sublinear_tf() && raw > 0.0 {
            1.0 + raw.ln()
        } else {
            raw
        }
    }
}

impl Transformer for TfidfTransformer {
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()> {
        let n_docs = x.n_rows();
        if n_docs == 0 {
            return Err(RecError::empty_input("item matrix for tf-idf"));
        }

        let doc_freq: Vec<usize> = match x {
            FeatureMatrix::Sparse(m) => m.column_counts(),
            FeatureMatrix::Dense(m) => {
                let mut counts = vec![0; m.n_cols()];
                for r in 0..m.n_rows() {
                    for (c, &v) in m.row_slice(r).iter().enumerate() {
                        if v != 0.0 {
                            counts[c] += 1;
                        }
                    }
                }
                counts
            }
        };

        let smooth = if self.mode.smooth_idf() { 1.0 } else { 0.0 };
        let n = n_docs as f64 + smooth;
        self.idf = Some(
            doc_freq
                .into_iter()
                .map(|df| {
                    let df = df as f64 + smooth;
                    // A column with no documents never contributes a value.
                    if df == 0.0 {
                        1.0
                    } else {
                        (n / df).ln() + 1.0
                    }
                })
                .collect(),
        );
        Ok(())
    }

    fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix> {
        let idf = self.idf.as_ref().ok_or(RecError::NotFitted {
            component: "TfidfTransformer",
        })?;
        if x.n_cols() != idf.len() {
            return Err(RecError::dimension_mismatch("vocabulary", idf.len(), x.n_cols()));
        }

        let mut out = match x {
            FeatureMatrix::Sparse(m) => {
                let mut m = m.clone();
                m.map_values(|c, v| self.tf(v) * idf[c]);
                FeatureMatrix::Sparse(m)
            }
            FeatureMatrix::Dense(m) => {
                let cols = m.n_cols();
                let data = m
                    .as_slice()
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| if v == 0.0 { 0.0 } else { self.tf(v) * idf[i % cols] })
                    .collect();
                FeatureMatrix::Dense(Matrix::from_vec(m.n_rows(), cols, data)?)
            }
        };

        if self.l2_norm {
            out.normalize_rows();
        }
        Ok(out)
    }
}

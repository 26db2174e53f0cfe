//! Multi-hot encoding of tag sets.

use crate::error::{RecError, Result};
use crate::primitives::SparseMatrix;
use std::collections::{BTreeSet, HashMap};

/// Maps tag sets to multi-hot rows over a sorted vocabulary.
///
/// Column `j` corresponds to `classes()[j]`; classes are sorted
/// lexicographically so the vocabulary does not depend on item order.
///
/// # Examples
///
/// ```
/// use gamerec::features::MultiLabelBinarizer;
///
/// let docs = vec![vec!["rpg", "indie"], vec!["shooter"]];
/// let mut mlb = MultiLabelBinarizer::new();
/// let m = mlb.fit_transform(&docs).expect("fit_transform should succeed");
///
/// assert_eq!(mlb.classes(), &["indie", "rpg", "shooter"]);
/// assert_eq!(m.row_entries(0).0, &[0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiLabelBinarizer {
    classes: Vec<String>,
    index: HashMap<String, usize>,
    fitted: bool,
}

impl MultiLabelBinarizer {
    /// Create a new binarizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn the vocabulary from tag sets.
    ///
    /// # Errors
    ///
    /// Returns an error if `docs` is empty.
    pub fn fit<D, S>(&mut self, docs: &[D]) -> Result<()>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        if docs.is_empty() {
            return Err(RecError::empty_input("tag sets"));
        }
        let vocab: BTreeSet<&str> = docs
            .iter()
            .flat_map(|d| d.as_ref().iter().map(AsRef::as_ref))
            .collect();
        self.classes = vocab.into_iter().map(str::to_string).collect();
        self.index = self
            .classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        self.fitted = true;
        Ok(())
    }

    /// Encode tag sets against the learned vocabulary.
    ///
    /// Unknown tags are ignored; repeated tags count once.
    ///
    /// # Errors
    ///
    /// Returns an error if the binarizer has not been fitted.
    pub fn transform<D, S>(&self, docs: &[D]) -> Result<SparseMatrix>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        if !self.fitted {
            return Err(RecError::NotFitted {
                component: "MultiLabelBinarizer",
            });
        }
        let rows = docs
            .iter()
            .map(|d| {
                let cols: BTreeSet<usize> = d
                    .as_ref()
                    .iter()
                    .filter_map(|t| self.index.get(t.as_ref()).copied())
                    .collect();
                cols.into_iter().map(|c| (c, 1.0)).collect()
            })
            .collect();
        SparseMatrix::from_rows(self.classes.len(), rows)
    }

    /// Fit and transform in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `docs` is empty.
    pub fn fit_transform<D, S>(&mut self, docs: &[D]) -> Result<SparseMatrix>
    where
        D: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.fit(docs)?;
        self.transform(docs)
    }

    /// Learned vocabulary, one entry per column.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

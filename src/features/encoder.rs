//! Item tag sets → feature matrix.

use super::binarizer::MultiLabelBinarizer;
use super::item::Item;
use crate::error::{RecError, Result};
use crate::preprocessing::{DimReduction, Normalizer, TermWeighting, TfidfTransformer};
use crate::primitives::{FeatureMatrix, Vector};
use crate::traits::Transformer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which metadata fields feed an item's tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFields {
    /// Genres and user tags.
    #[default]
    Minimal,
    /// Genres, tags, specs, developer and publisher.
    Extended,
    /// `Extended` plus the early-access token.
    ExtendedEarlyAccess,
}

impl TagFields {
    /// Union of the selected fields for one item.
    #[must_use]
    pub fn tag_set(self, item: &Item) -> Vec<&str> {
        let mut tags: Vec<&str> = item
            .genres
            .iter()
            .chain(&item.tags)
            .map(String::as_str)
            .collect();
        if matches!(self, Self::Extended | Self::ExtendedEarlyAccess) {
            tags.extend(
                item.specs
                    .iter()
                    .chain(&item.developer)
                    .chain(&item.publisher)
                    .map(String::as_str),
            );
        }
        if self == Self::ExtendedEarlyAccess {
            tags.extend(item.early_access_token());
        }
        tags
    }
}

/// Encoder settings.
///
/// Defaults: minimal tag fields, sparse backing, default tf-idf, no
/// reduction, no normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Fields assembled into each item's tag set.
    pub tag_fields: TagFields,
    /// Keep the matrix in CSR form.
    pub sparse: bool,
    /// Term weighting mode.
    pub term_weighting: TermWeighting,
    /// Optional dimensionality reduction; forces dense storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dim_reduction: Option<DimReduction>,
    /// L2-normalize item rows and query vectors.
    pub normalize: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            tag_fields: TagFields::Minimal,
            sparse: true,
            term_weighting: TermWeighting::Default,
            dim_reduction: None,
            normalize: false,
        }
    }
}

impl EncoderConfig {
    /// Sets the tag fields.
    #[must_use]
    pub fn with_tag_fields(mut self, tag_fields: TagFields) -> Self {
        self.tag_fields = tag_fields;
        self
    }

    /// Sets sparse or dense backing.
    #[must_use]
    pub fn with_sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    /// Sets the term weighting mode.
    #[must_use]
    pub fn with_term_weighting(mut self, mode: TermWeighting) -> Self {
        self.term_weighting = mode;
        self
    }

    /// Sets the dimensionality reduction.
    #[must_use]
    pub fn with_dim_reduction(mut self, reduction: DimReduction) -> Self {
        self.dim_reduction = Some(reduction);
        self
    }

    /// Enables or disables row normalization.
    #[must_use]
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Rejects settings that can never encode.
    ///
    /// # Errors
    ///
    /// Returns an error if the reduction requests zero components.
    pub fn validate(&self) -> Result<()> {
        if let Some(reduction) = self.dim_reduction {
            reduction.validate()?;
        }
        Ok(())
    }
}

/// Encoded catalog: the item×feature matrix and what is needed to map
/// query vectors into the same space.
#[derive(Debug, Clone)]
pub struct EncodedItems {
    features: Arc<FeatureMatrix>,
    vocabulary: Vec<String>,
    normalizer: Option<Normalizer>,
}

impl EncodedItems {
    /// Item×feature matrix; row `i` is item `i`.
    #[must_use]
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Tag vocabulary, one entry per binarized column.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of encoded items.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.features.n_rows()
    }

    /// Applies the fitted row normalization to a query vector, if enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector width differs from the feature width.
    pub fn finish_query(&self, query: Vector<f64>) -> Result<Vector<f64>> {
        match &self.normalizer {
            Some(n) => n.transform_vector(&query),
            None if query.len() != self.features.n_cols() => Err(RecError::dimension_mismatch(
                "features",
                self.features.n_cols(),
                query.len(),
            )),
            None => Ok(query),
        }
    }

    /// Shared handle to the matrix, for building an index over it.
    #[must_use]
    pub fn shared_features(&self) -> Arc<FeatureMatrix> {
        Arc::clone(&self.features)
    }

    /// Consumes the encoding, returning the matrix.
    #[must_use]
    pub fn into_features(self) -> FeatureMatrix {
        Arc::try_unwrap(self.features).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// Runs the encoding pipeline: binarize, weight, reduce, normalize.
///
/// # Examples
///
/// ```
/// use gamerec::features::{EncoderConfig, FeatureEncoder, Item};
///
/// let items = vec![
///     Item::new(0).with_genres(["rpg"]),
///     Item::new(1).with_genres(["shooter"]),
/// ];
/// let encoder = FeatureEncoder::new(EncoderConfig::default().with_sparse(false))
///     .expect("valid config");
/// let encoded = encoder.encode(&items).expect("encode");
/// assert!(!encoded.features().is_sparse());
/// ```
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    config: EncoderConfig,
}

impl FeatureEncoder {
    /// Creates an encoder, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, an item's id differs from
    /// its position, or a transform cannot fit (e.g. more components than
    /// features).
    pub fn encode(&self, items: &[Item]) -> Result<EncodedItems> {
        if items.is_empty() {
            return Err(RecError::empty_input("catalog"));
        }
        if let Some((pos, item)) = items.iter().enumerate().find(|(pos, it)| it.id != *pos) {
            return Err(RecError::Other(format!(
                "item id {} stored at row {pos}; ids must equal row positions",
                item.id
            )));
        }

        let tag_sets: Vec<Vec<&str>> = items
            .iter()
            .map(|it| self.config.tag_fields.tag_set(it))
            .collect();
        let mut binarizer = MultiLabelBinarizer::new();
        let multi_hot = binarizer.fit_transform(&tag_sets)?;
        debug!(
            items = items.len(),
            vocabulary = binarizer.classes().len(),
            nnz = multi_hot.nnz(),
            "binarized tag sets"
        );

        let mut features = if self.config.sparse {
            FeatureMatrix::Sparse(multi_hot)
        } else {
            FeatureMatrix::Dense(multi_hot.to_dense())
        };

        if self.config.term_weighting.is_enabled() {
            let mut tfidf = TfidfTransformer::new(self.config.term_weighting);
            features = tfidf.fit_transform(&features)?;
        }

        if let Some(reduction) = self.config.dim_reduction {
            if features.is_sparse() {
                warn!(
                    ?reduction,
                    "dimensionality reduction requires dense features; falling back to dense"
                );
                features = FeatureMatrix::Dense(features.into_dense());
            }
            let mut reducer = reduction.build();
            features = reducer.fit_transform(&features)?;
        }

        let normalizer = if self.config.normalize {
            let mut normalizer = Normalizer::new();
            features = normalizer.fit_transform(&features)?;
            Some(normalizer)
        } else {
            None
        };

        info!(
            items = features.n_rows(),
            dims = features.n_cols(),
            sparse = features.is_sparse(),
            "encoded catalog"
        );

        Ok(EncodedItems {
            features: Arc::new(features),
            vocabulary: binarizer.classes().to_vec(),
            normalizer,
        })
    }
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;

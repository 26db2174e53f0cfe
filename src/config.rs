//! Run configuration, loadable from TOML.
//!
//! ```toml
//! [encoder]
//! tag_fields = "extended"
//! sparse = false
//! term_weighting = "smooth_sublinear"
//! normalize = true
//!
//! [encoder.dim_reduction]
//! algorithm = "truncated_svd"
//! n_components = 64
//!
//! [generation]
//! amount = 20
//! use_feedback = true
//! on_empty_history = "skip"
//! ```
//!
//! Unknown keys and unknown enum values are rejected at load time.

use crate::error::{RecError, Result};
use crate::features::EncoderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a user who owns no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHistoryPolicy {
    /// Abort generation with [`RecError::EmptyHistory`].
    #[default]
    Fail,
    /// Leave the user out of the table and list them as skipped.
    Skip,
}

/// Per-user generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Recommendations per user.
    pub amount: usize,
    /// Only the first N users are processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_max: Option<usize>,
    /// Weight owned items by review feedback and sentiment.
    pub use_feedback: bool,
    /// Multiply weights by `log2(playtime + 1)`.
    pub use_playtime: bool,
    /// Weight for unreviewed items without a sentiment score.
    pub missing_sentiment_weight: f64,
    /// Handling of users with no owned items.
    pub on_empty_history: EmptyHistoryPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            amount: 10,
            read_max: None,
            use_feedback: false,
            use_playtime: false,
            missing_sentiment_weight: 1.0,
            on_empty_history: EmptyHistoryPolicy::Fail,
        }
    }
}

impl GenerationConfig {
    /// Sets the number of recommendations per user.
    #[must_use]
    pub fn with_amount(mut self, amount: usize) -> Self {
        self.amount = amount;
        self
    }

    /// Limits generation to the first `n` users.
    #[must_use]
    pub fn with_read_max(mut self, n: usize) -> Self {
        self.read_max = Some(n);
        self
    }

    /// Enables feedback weighting.
    #[must_use]
    pub fn with_feedback(mut self, enabled: bool) -> Self {
        self.use_feedback = enabled;
        self
    }

    /// Enables playtime weighting.
    #[must_use]
    pub fn with_playtime(mut self, enabled: bool) -> Self {
        self.use_playtime = enabled;
        self
    }

    /// Sets the weight used when an item has no sentiment score.
    #[must_use]
    pub fn with_missing_sentiment_weight(mut self, weight: f64) -> Self {
        self.missing_sentiment_weight = weight;
        self
    }

    /// Sets the empty-history policy.
    #[must_use]
    pub fn with_empty_history(mut self, policy: EmptyHistoryPolicy) -> Self {
        self.on_empty_history = policy;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error if `missing_sentiment_weight` is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        let w = self.missing_sentiment_weight;
        if !w.is_finite() || w < 0.0 {
            return Err(RecError::invalid_config(
                "generation.missing_sentiment_weight",
                w,
                "finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Complete recommender configuration.
///
/// # Examples
///
/// ```
/// use gamerec::config::{EmptyHistoryPolicy, RecommenderConfig};
///
/// let config = RecommenderConfig::from_toml_str(r#"
///     [generation]
///     amount = 5
///     on_empty_history = "skip"
/// "#).expect("valid config");
///
/// assert_eq!(config.generation.amount, 5);
/// assert_eq!(config.generation.on_empty_history, EmptyHistoryPolicy::Skip);
/// assert!(config.encoder.sparse);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Feature encoding.
    pub encoder: EncoderConfig,
    /// Per-user generation.
    pub generation: GenerationConfig,
}

impl RecommenderConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML, unknown keys or values, or
    /// out-of-range settings.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serializes to pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RecError::Serialization(e.to_string()))
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        self.encoder.validate()?;
        self.generation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::TagFields;
    use crate::preprocessing::{DimReduction, TermWeighting};
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.generation.amount, 10);
        assert_eq!(config.generation.missing_sentiment_weight, 1.0);
        assert_eq!(config.encoder.tag_fields, TagFields::Minimal);
        assert_eq!(config.encoder.term_weighting, TermWeighting::Default);
        assert!(config.encoder.dim_reduction.is_none());
        assert!(!config.encoder.normalize);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = RecommenderConfig::from_toml_str("").expect("empty is valid");
        assert_eq!(config, RecommenderConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = RecommenderConfig::from_toml_str(
            r#"
            [encoder]
            tag_fields = "extended_early_access"
            sparse = false
            term_weighting = "smooth_sublinear"
            normalize = true

            [encoder.dim_reduction]
            algorithm = "pca"
            n_components = 8

            [generation]
            amount = 3
            read_max = 100
            use_feedback = true
            use_playtime = true
            missing_sentiment_weight = 0.5
            "#,
        )
        .expect("valid config");
        assert_eq!(config.encoder.tag_fields, TagFields::ExtendedEarlyAccess);
        assert_eq!(
            config.encoder.dim_reduction,
            Some(DimReduction::Pca { n_components: 8 })
        );
        assert_eq!(config.generation.read_max, Some(100));
        assert!(config.generation.use_playtime);
    }

    #[test]
    fn test_unknown_weighting_rejected() {
        let err = RecommenderConfig::from_toml_str("[encoder]\nterm_weighting = \"bm25\"\n");
        assert!(matches!(err, Err(RecError::Serialization(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(RecommenderConfig::from_toml_str("[generation]\namout = 3\n").is_err());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let doc = "[encoder.dim_reduction]\nalgorithm = \"umap\"\nn_components = 2\n";
        assert!(RecommenderConfig::from_toml_str(doc).is_err());
    }

    #[test]
    fn test_zero_components_rejected() {
        let doc = "[encoder.dim_reduction]\nalgorithm = \"truncated_svd\"\nn_components = 0\n";
        assert!(matches!(
            RecommenderConfig::from_toml_str(doc),
            Err(RecError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_negative_sentiment_weight_rejected() {
        let config = GenerationConfig::default().with_missing_sentiment_weight(-0.1);
        assert!(config.validate().is_err());
        let config = GenerationConfig::default().with_missing_sentiment_weight(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let config = RecommenderConfig {
            generation: GenerationConfig::default()
                .with_amount(7)
                .with_empty_history(EmptyHistoryPolicy::Skip),
            ..RecommenderConfig::default()
        };
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(config.to_toml_string().expect("serialize").as_bytes())
            .expect("write");
        let loaded = RecommenderConfig::from_toml_file(file.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RecommenderConfig::from_toml_file("/nonexistent/gamerec.toml");
        assert!(matches!(err, Err(RecError::Io(_))));
    }
}

//! Error types for gamerec operations.
//!
//! Provides rich error context for library consumers.

use thiserror::Error;

/// Main error type for gamerec operations.
///
/// # Examples
///
/// ```
/// use gamerec::error::RecError;
///
/// let err = RecError::DimensionMismatch {
///     expected: "vocabulary=12".to_string(),
///     actual: "8".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum RecError {
    /// Matrix/vector dimensions don't match for the operation.
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid or unsupported configuration value.
    #[error("Invalid hyperparameter: {param} = {value}, expected {constraint}")]
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A user has no owned items, so no query vector can be built.
    #[error("User {user_id} has no owned items")]
    EmptyHistory {
        /// Offending user
        user_id: String,
    },

    /// A record references an item outside the encoded catalog.
    #[error("User {user_id} references item {item_id}, catalog has {catalog_size} items")]
    UnknownItem {
        /// Offending user
        user_id: String,
        /// Item identifier that could not be resolved
        item_id: usize,
        /// Number of encoded items
        catalog_size: usize,
    },

    /// Aligned per-item columns (playtime, review flags) have mismatched lengths.
    #[error("User {user_id}: {field} has {actual} values, expected {expected}")]
    MisalignedRecord {
        /// Offending user
        user_id: String,
        /// Column name
        field: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// A component was used before `fit`.
    #[error("{component} is not fitted")]
    NotFitted {
        /// Component name
        component: &'static str,
    },

    /// Generation was cancelled between user iterations.
    #[error("Generation cancelled after {completed} users")]
    Cancelled {
        /// Users finished before cancellation was observed
        completed: usize,
    },

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error with string message.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for RecError {
    fn from(msg: &str) -> Self {
        RecError::Other(msg.to_string())
    }
}

impl From<String> for RecError {
    fn from(msg: String) -> Self {
        RecError::Other(msg)
    }
}

impl From<serde_json::Error> for RecError {
    fn from(err: serde_json::Error) -> Self {
        RecError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RecError {
    fn from(err: toml::de::Error) -> Self {
        RecError::Serialization(err.to_string())
    }
}

impl RecError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid configuration error
    #[must_use]
    pub fn invalid_config(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidHyperparameter {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an index out of bounds error
    #[must_use]
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::Other(format!("index {index} out of bounds (len={len})"))
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, RecError>;

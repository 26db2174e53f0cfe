//! Nearest-neighbor retrieval over the encoded item matrix.
//!
//! The catalog fits in memory, so retrieval is exact: every query scores
//! every item by cosine distance.
//!
//! # Quick Start
//!
//! ```
//! use gamerec::index::{ExactCosineIndex, NeighborIndex};
//! use gamerec::primitives::{FeatureMatrix, Matrix, Vector};
//! use std::sync::Arc;
//!
//! let items = Matrix::from_vec(3, 3, vec![
//!     1.0, 0.0, 0.0,
//!     1.0, 1.0, 0.0,
//!     0.0, 1.0, 0.0,
//! ]).expect("valid matrix dimensions");
//! let index = ExactCosineIndex::new(Arc::new(FeatureMatrix::Dense(items)));
//!
//! let query = Vector::from_slice(&[0.9, 0.1, 0.0]);
//! let results = index.query(&query, 2).expect("query width matches");
//!
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].item, 0);
//! assert!(results[0].distance <= results[1].distance);
//! ```

mod exact;

pub use exact::{cosine_distance, ExactCosineIndex};

use crate::error::Result;
use crate::primitives::Vector;

/// One retrieved item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index of the item.
    pub item: usize,
    /// Cosine distance to the query, in `[0, 2]`.
    pub distance: f64,
}

/// Read-only k-nearest-neighbor lookup.
///
/// Implementations are built once and then queried concurrently; `k` is a
/// query-time parameter.
pub trait NeighborIndex: Send + Sync {
    /// Up to `k` items ordered by ascending distance, ties by ascending
    /// item index.
    ///
    /// # Errors
    ///
    /// Returns an error if the query width differs from the indexed width.
    fn query(&self, query: &Vector<f64>, k: usize) -> Result<Vec<Neighbor>>;

    /// Number of indexed items.
    fn len(&self) -> usize;

    /// Whether the index holds no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

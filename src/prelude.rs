//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use gamerec::prelude::*;
//! ```

pub use crate::config::RecommenderConfig;
pub use crate::evaluation::{EvaluationReport, Evaluator};
pub use crate::index::NeighborIndex;
pub use crate::primitives::{FeatureMatrix, Matrix, Vector};
pub use crate::recommend::{CancellationToken, ContentRecommender, PopularityRecommender};
pub use crate::traits::Transformer;

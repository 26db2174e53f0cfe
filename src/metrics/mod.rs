//! Top-K ranking metrics for set-valued ground truth.
//!
//! Each function scores one user's ranked recommendation list against the
//! set of items that user actually interacted with in the held-out split.
//! Metrics that divide by a quantity that can be zero return `Option`.
//!
//! # Example
//!
//! ```
//! use gamerec::metrics::UserMetrics;
//! use std::collections::HashSet;
//!
//! let relevant = HashSet::from([2, 9]);
//! let m = UserMetrics::compute(&[2, 5, 7], &relevant, 3).expect("non-empty ground truth");
//!
//! assert_eq!(m.hit_rate, 1.0);
//! assert_eq!(m.recall, 0.5);
//! assert_eq!(m.ideal_recall, 1.0);
//! ```

pub mod ranking;

pub use ranking::{
    dcg_at_k, hit_rate_at_k, ideal_dcg_at_k, ideal_recall_at_k, ndcg_at_k,
    normalized_recall_at_k, recall_at_k, UserMetrics,
};

#[cfg(test)]
#[path = "tests_ranking_contract.rs"]
mod tests_ranking_contract;

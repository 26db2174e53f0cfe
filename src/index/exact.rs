//! Brute-force cosine index.

use super::{Neighbor, NeighborIndex};
use crate::error::{RecError, Result};
use crate::primitives::{FeatureMatrix, Vector};
use std::cmp::Ordering;
use std::sync::Arc;

/// Cosine distance `1 - cos(a, b)`.
///
/// A zero vector has no direction; its similarity to anything is taken as
/// 0, giving distance 1.
///
/// # Examples
///
/// ```
/// use gamerec::index::cosine_distance;
///
/// assert!(cosine_distance(&[1.0, 0.0], &[2.0, 0.0]).abs() < 1e-12);
/// assert!((cosine_distance(&[1.0, 0.0], &[0.0, 3.0]) - 1.0).abs() < 1e-12);
/// assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 1.0]), 1.0);
/// ```
#[must_use]
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    distance_from_parts(dot, norm_a, norm_b)
}

fn distance_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    let cos_sim = dot / (norm_a * norm_b);
    1.0 - cos_sim.clamp(-1.0, 1.0)
}

fn by_distance_then_item(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.item.cmp(&b.item))
}

/// Exact cosine nearest-neighbor index over a shared feature matrix.
///
/// Row norms are computed once at construction; a query costs one dot
/// product per item plus a partial sort.
#[derive(Debug, Clone)]
pub struct ExactCosineIndex {
    features: Arc<FeatureMatrix>,
    norms: Vec<f64>,
}

impl ExactCosineIndex {
    /// Builds the index.
    #[must_use]
    pub fn new(features: Arc<FeatureMatrix>) -> Self {
        let norms = (0..features.n_rows()).map(|i| features.row_norm(i)).collect();
        Self { features, norms }
    }

    /// Indexed feature width.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.features.n_cols()
    }

    /// The indexed matrix.
    #[must_use]
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }
}

impl NeighborIndex for ExactCosineIndex {
    fn query(&self, query: &Vector<f64>, k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dim() {
            return Err(RecError::dimension_mismatch("query", self.dim(), query.len()));
        }
        let k = k.min(self.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let q = query.as_slice();
        let q_norm = query.norm();
        let mut scored: Vec<Neighbor> = self
            .norms
            .iter()
            .enumerate()
            .map(|(item, &norm)| Neighbor {
                item,
                distance: distance_from_parts(self.features.dot_row(item, q), q_norm, norm),
            })
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, by_distance_then_item);
            scored.truncate(k);
        }
        scored.sort_unstable_by(by_distance_then_item);
        Ok(scored)
    }

    fn len(&self) -> usize {
        self.norms.len()
    }
}

#[cfg(test)]
#[path = "exact_tests.rs"]
mod tests;

//! Ranking metrics for recommendation lists.
//!
//! All metrics first truncate the list to its top `k` entries. Relevance is
//! binary: an item is relevant iff it is in the ground-truth set.

use std::collections::HashSet;
use std::hash::Hash;

fn top_k<T>(recommendations: &[T], k: usize) -> &[T] {
    &recommendations[..k.min(recommendations.len())]
}

fn discount(position: usize) -> f64 {
    1.0 / (position as f64 + 2.0).log2()
}

/// HR@K: 1.0 if any of the top-K recommendations is relevant.
///
/// # Examples
///
/// ```
/// use gamerec::metrics::ranking::hit_rate_at_k;
/// use std::collections::HashSet;
///
/// let relevant = HashSet::from([3]);
/// assert_eq!(hit_rate_at_k(&[5, 3, 1], &relevant, 1), 0.0);
/// assert_eq!(hit_rate_at_k(&[5, 3, 1], &relevant, 2), 1.0);
/// ```
#[must_use]
pub fn hit_rate_at_k<T: Eq + Hash>(recommendations: &[T], relevant: &HashSet<T>, k: usize) -> f64 {
    if top_k(recommendations, k).iter().any(|r| relevant.contains(r)) {
        1.0
    } else {
        0.0
    }
}

/// DCG@K with binary gains: `Σ rel_i / log2(i + 2)` over 0-based positions.
///
/// A repeated item earns gain only at its first position.
///
/// # Examples
///
/// ```
/// use gamerec::metrics::ranking::dcg_at_k;
/// use std::collections::HashSet;
///
/// let relevant = HashSet::from([1, 2]);
/// let dcg = dcg_at_k(&[1, 9, 2], &relevant, 3);
/// assert!((dcg - (1.0 + 0.5)).abs() < 1e-12);
/// ```
#[must_use]
pub fn dcg_at_k<T: Eq + Hash>(recommendations: &[T], relevant: &HashSet<T>, k: usize) -> f64 {
    let mut seen: HashSet<&T> = HashSet::new();
    top_k(recommendations, k)
        .iter()
        .enumerate()
        .filter(|(_, r)| seen.insert(*r) && relevant.contains(*r))
        .map(|(i, _)| discount(i))
        .sum()
}

/// Ideal DCG@K: every one of the first `min(n_recommendations, k, n_relevant)`
/// positions holds a relevant item. `n_recommendations` counts distinct items.
#[must_use]
pub fn ideal_dcg_at_k(n_recommendations: usize, n_relevant: usize, k: usize) -> f64 {
    (0..n_recommendations.min(k).min(n_relevant))
        .map(discount)
        .sum()
}

/// nDCG@K = DCG@K / ideal DCG@K.
///
/// `None` when the ideal DCG is zero (empty list or empty ground truth).
/// The ideal is sized by the distinct items in the top K, so the result
/// stays within `[0, 1]` for lists with repeats.
///
/// # Examples
///
/// ```
/// use gamerec::metrics::ranking::ndcg_at_k;
/// use std::collections::HashSet;
///
/// let relevant = HashSet::from([2, 4]);
/// let ndcg = ndcg_at_k(&[2, 3], &relevant, 2).expect("defined");
/// let expected = 1.0 / (1.0 + 1.0 / 3f64.log2());
/// assert!((ndcg - expected).abs() < 1e-12);
///
/// assert_eq!(ndcg_at_k(&[1, 2], &HashSet::new(), 2), None);
/// ```
#[must_use]
pub fn ndcg_at_k<T: Eq + Hash>(
    recommendations: &[T],
    relevant: &HashSet<T>,
    k: usize,
) -> Option<f64> {
    let distinct: HashSet<&T> = top_k(recommendations, k).iter().collect();
    let idcg = ideal_dcg_at_k(distinct.len(), relevant.len(), k);
    if idcg == 0.0 {
        return None;
    }
    Some(dcg_at_k(recommendations, relevant, k) / idcg)
}

/// Recall@K: share of relevant items found in the top K.
///
/// `None` when the ground truth is empty.
#[must_use]
pub fn recall_at_k<T: Eq + Hash>(
    recommendations: &[T],
    relevant: &HashSet<T>,
    k: usize,
) -> Option<f64> {
    if relevant.is_empty() {
        return None;
    }
    let found: HashSet<&T> = top_k(recommendations, k)
        .iter()
        .filter(|r| relevant.contains(*r))
        .collect();
    Some(found.len() as f64 / relevant.len() as f64)
}

/// Ideal recall@K: `min(|relevant|, |distinct top K|) / |relevant|`, the best
/// recall a list of this length could reach.
///
/// `None` when the ground truth is empty.
#[must_use]
pub fn ideal_recall_at_k<T: Eq + Hash>(
    recommendations: &[T],
    relevant: &HashSet<T>,
    k: usize,
) -> Option<f64> {
    if relevant.is_empty() {
        return None;
    }
    let distinct: HashSet<&T> = top_k(recommendations, k).iter().collect();
    Some(relevant.len().min(distinct.len()) as f64 / relevant.len() as f64)
}

/// nRecall@K = recall@K / ideal recall@K.
///
/// `None` when either is undefined or the ideal recall is zero.
///
/// # Examples
///
/// ```
/// use gamerec::metrics::ranking::normalized_recall_at_k;
/// use std::collections::HashSet;
///
/// // Five relevant items but only two slots: finding one is half of the best case.
/// let relevant: HashSet<u32> = (0..5).collect();
/// assert_eq!(normalized_recall_at_k(&[0, 9], &relevant, 2), Some(0.5));
/// assert_eq!(normalized_recall_at_k(&[], &relevant, 2), None);
/// ```
#[must_use]
pub fn normalized_recall_at_k<T: Eq + Hash>(
    recommendations: &[T],
    relevant: &HashSet<T>,
    k: usize,
) -> Option<f64> {
    let recall = recall_at_k(recommendations, relevant, k)?;
    let ideal = ideal_recall_at_k(recommendations, relevant, k)?;
    if ideal == 0.0 {
        return None;
    }
    Some(recall / ideal)
}

/// All metrics for one user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserMetrics {
    /// HR@K.
    pub hit_rate: f64,
    /// nDCG@K; `None` if the ideal DCG is zero.
    pub ndcg: Option<f64>,
    /// Recall@K.
    pub recall: f64,
    /// Ideal recall@K.
    pub ideal_recall: f64,
    /// nRecall@K; `None` if the ideal recall is zero.
    pub normalized_recall: Option<f64>,
}

impl UserMetrics {
    /// Scores one user; `None` when the ground truth is empty.
    #[must_use]
    pub fn compute<T: Eq + Hash>(
        recommendations: &[T],
        relevant: &HashSet<T>,
        k: usize,
    ) -> Option<Self> {
        Some(Self {
            hit_rate: hit_rate_at_k(recommendations, relevant, k),
            ndcg: ndcg_at_k(recommendations, relevant, k),
            recall: recall_at_k(recommendations, relevant, k)?,
            ideal_recall: ideal_recall_at_k(recommendations, relevant, k)?,
            normalized_recall: normalized_recall_at_k(recommendations, relevant, k),
        })
    }

    /// Metrics of a user who received no usable recommendations.
    ///
    /// Every metric is 0, including nDCG and nRecall, which [`compute`]
    /// would leave undefined for a zero ideal. The user then counts
    /// towards every mean.
    ///
    /// [`compute`]: UserMetrics::compute
    #[must_use]
    pub fn zero() -> Self {
        Self {
            hit_rate: 0.0,
            ndcg: Some(0.0),
            recall: 0.0,
            ideal_recall: 0.0,
            normalized_recall: Some(0.0),
        }
    }
}

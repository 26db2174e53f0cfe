//! Adaptive candidate expansion with exclusion filtering.

use crate::error::Result;
use crate::index::NeighborIndex;
use crate::primitives::Vector;
use std::collections::HashSet;
use tracing::trace;

/// Retrieves up to `amount` nearest items that are not in `exclude`.
///
/// Starts by requesting `amount / 5` neighbors, then grows the request by
/// the number of still-missing items each round. Stops once `amount` valid
/// items are found or the whole catalog has been requested, so the result
/// has `min(amount, catalog − |exclude ∩ catalog|)` items, nearest first.
///
/// # Errors
///
/// Returns an error if the index rejects the query.
///
/// # Examples
///
/// ```
/// use gamerec::index::ExactCosineIndex;
/// use gamerec::primitives::{FeatureMatrix, Matrix, Vector};
/// use gamerec::recommend::retrieve;
/// use std::collections::HashSet;
/// use std::sync::Arc;
///
/// let m = Matrix::from_vec(3, 2, vec![1.0, 0.0, 1.0, 0.0, 0.0, 1.0]).expect("valid");
/// let index = ExactCosineIndex::new(Arc::new(FeatureMatrix::Dense(m)));
///
/// let exclude = HashSet::from([0]);
/// let recs = retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 1, &exclude).expect("query");
/// assert_eq!(recs, vec![1]);
/// ```
pub fn retrieve<I>(
    index: &I,
    query: &Vector<f64>,
    amount: usize,
    exclude: &HashSet<usize>,
) -> Result<Vec<usize>>
where
    I: NeighborIndex + ?Sized,
{
    let catalog = index.len();
    if amount == 0 || catalog == 0 {
        return Ok(Vec::new());
    }

    let mut requested = amount / 5;
    let mut valid: Vec<usize> = Vec::new();
    loop {
        requested = (requested + (amount - valid.len())).min(catalog);
        valid = index
            .query(query, requested)?
            .into_iter()
            .map(|n| n.item)
            .filter(|item| !exclude.contains(item))
            .collect();
        trace!(requested, valid = valid.len(), "expansion round");
        if valid.len() >= amount || requested >= catalog {
            break;
        }
    }

    valid.truncate(amount);
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ExactCosineIndex, Neighbor};
    use crate::primitives::{FeatureMatrix, Matrix};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn line_index(n: usize) -> ExactCosineIndex {
        // Row i points at angle i * 10 degrees.
        let data = (0..n)
            .flat_map(|i| {
                let a = (i as f64 * 10.0).to_radians();
                [a.cos(), a.sin()]
            })
            .collect();
        ExactCosineIndex::new(Arc::new(FeatureMatrix::Dense(
            Matrix::from_vec(n, 2, data).expect("valid"),
        )))
    }

    struct CountingIndex {
        inner: ExactCosineIndex,
        calls: AtomicUsize,
    }

    impl NeighborIndex for CountingIndex {
        fn query(&self, query: &Vector<f64>, k: usize) -> Result<Vec<Neighbor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.query(query, k)
        }

        fn len(&self) -> usize {
            self.inner.len()
        }
    }

    #[test]
    fn test_returns_nearest_first() {
        let index = line_index(6);
        let recs = retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 3, &HashSet::new())
            .expect("query");
        assert_eq!(recs, vec![0, 1, 2]);
    }

    #[test]
    fn test_skips_excluded() {
        let index = line_index(6);
        let exclude = HashSet::from([0, 2]);
        let recs =
            retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 3, &exclude).expect("query");
        assert_eq!(recs, vec![1, 3, 4]);
    }

    #[test]
    fn test_terminates_when_catalog_exhausted() {
        let index = CountingIndex {
            inner: line_index(5),
            calls: AtomicUsize::new(0),
        };
        let exclude = HashSet::from([0, 1, 2, 3]);
        let recs =
            retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 3, &exclude).expect("query");
        assert_eq!(recs, vec![4]);
        assert!(index.calls.load(Ordering::SeqCst) <= 5);
    }

    #[test]
    fn test_zero_amount() {
        let index = line_index(3);
        let recs = retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 0, &HashSet::new())
            .expect("query");
        assert!(recs.is_empty());
    }

    #[test]
    fn test_amount_larger_than_catalog() {
        let index = line_index(3);
        let recs = retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 10, &HashSet::new())
            .expect("query");
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn test_single_round_when_nothing_excluded() {
        let index = CountingIndex {
            inner: line_index(20),
            calls: AtomicUsize::new(0),
        };
        retrieve(&index, &Vector::from_slice(&[1.0, 0.0]), 10, &HashSet::new()).expect("query");
        assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    }
}

use super::*;
use crate::primitives::{Matrix, SparseMatrix};

fn dense(rows: usize, cols: usize, data: Vec<f64>) -> ExactCosineIndex {
    ExactCosineIndex::new(Arc::new(FeatureMatrix::Dense(
        Matrix::from_vec(rows, cols, data).expect("valid matrix dimensions"),
    )))
}

#[test]
fn test_empty_query_k() {
    let index = dense(2, 2, vec![1.0, 0.0, 0.0, 1.0]);
    let results = index.query(&Vector::from_slice(&[1.0, 0.0]), 0).expect("query");
    assert!(results.is_empty());
}

#[test]
fn test_identical_vector_is_nearest() {
    let index = dense(3, 3, vec![1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0, 0.0, 1.0]);
    let results = index.query(&Vector::from_slice(&[1.0, 2.0, 3.0]), 1).expect("query");
    assert_eq!(results[0].item, 0);
    assert!(results[0].distance < 1e-9);
}

#[test]
fn test_k_larger_than_index() {
    let index = dense(2, 1, vec![1.0, 2.0]);
    let results = index.query(&Vector::from_slice(&[1.5]), 10).expect("query");
    assert_eq!(results.len(), 2);
}

#[test]
fn test_ties_broken_by_ascending_index() {
    // Rows 1, 2 and 3 are identical.
    let index = dense(
        4,
        2,
        vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
    );
    let results = index.query(&Vector::from_slice(&[1.0, 0.0]), 3).expect("query");
    let items: Vec<usize> = results.iter().map(|n| n.item).collect();
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn test_partial_selection_keeps_tie_order() {
    let index = dense(
        5,
        2,
        vec![1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0],
    );
    let results = index.query(&Vector::from_slice(&[1.0, 0.0]), 2).expect("query");
    let items: Vec<usize> = results.iter().map(|n| n.item).collect();
    assert_eq!(items, vec![0, 1]);
}

#[test]
fn test_zero_rows_have_unit_distance() {
    let index = dense(2, 2, vec![0.0, 0.0, 1.0, 0.0]);
    let results = index.query(&Vector::from_slice(&[1.0, 0.0]), 2).expect("query");
    assert_eq!(results[0].item, 1);
    assert_eq!(results[1].item, 0);
    assert_eq!(results[1].distance, 1.0);
}

#[test]
fn test_query_width_mismatch() {
    let index = dense(1, 2, vec![1.0, 0.0]);
    assert!(index.query(&Vector::from_slice(&[1.0]), 1).is_err());
}

#[test]
fn test_sparse_matches_dense() {
    let rows = vec![
        vec![(0, 0.5), (2, 1.0)],
        vec![(1, 2.0)],
        vec![(0, 1.0), (1, 1.0), (2, 1.0)],
    ];
    let sparse = SparseMatrix::from_rows(3, rows).expect("valid rows");
    let dense_m = sparse.to_dense();
    let a = ExactCosineIndex::new(Arc::new(FeatureMatrix::Sparse(sparse)));
    let b = ExactCosineIndex::new(Arc::new(FeatureMatrix::Dense(dense_m)));
    let q = Vector::from_slice(&[0.3, 0.7, 0.1]);
    assert_eq!(a.query(&q, 3).expect("query"), b.query(&q, 3).expect("query"));
}

#[test]
fn test_distances_non_decreasing() {
    let index = dense(
        4,
        3,
        vec![1.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 1.0, 0.0, 0.2, 0.2, 0.9],
    );
    let results = index.query(&Vector::from_slice(&[0.8, 0.3, 0.1]), 4).expect("query");
    assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
}

#[test]
fn test_cosine_distance_opposite() {
    assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-12);
}

#[test]
fn test_len_and_dim() {
    let index = dense(3, 4, vec![0.0; 12]);
    assert_eq!(index.len(), 3);
    assert_eq!(index.dim(), 4);
    assert!(!index.is_empty());
}

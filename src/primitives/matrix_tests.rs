pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-12);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0]);
    assert!(matches!(result, Err(RecError::DimensionMismatch { .. })));
}

#[test]
fn test_zeros() {
    let m = Matrix::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_row() {
    let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let row = m.row(1);
    assert_eq!(row.as_slice(), &[4.0, 5.0, 6.0]);
    assert_eq!(m.row_slice(0), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_set() {
    let mut m = Matrix::zeros(2, 2);
    m.set(1, 0, 7.0);
    assert!((m.get(1, 0) - 7.0).abs() < 1e-12);
}

#[test]
fn test_matmul() {
    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).expect("valid");
    let b = Matrix::from_vec(2, 1, vec![1.0, 1.0]).expect("valid");
    let c = a.matmul(&b).expect("compatible shapes");
    assert_eq!(c.shape(), (2, 1));
    assert_eq!(c.as_slice(), &[3.0, 7.0]);
}

#[test]
fn test_matmul_dimension_error() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);
    assert!(a.matmul(&b).is_err());
}

#[test]
fn test_normalize_rows() {
    let mut m = Matrix::from_vec(2, 2, vec![3.0, 4.0, 0.0, 0.0]).expect("valid");
    m.normalize_rows();
    assert!((m.get(0, 0) - 0.6).abs() < 1e-12);
    assert!((m.get(0, 1) - 0.8).abs() < 1e-12);
    assert_eq!(m.row_slice(1), &[0.0, 0.0]);
}

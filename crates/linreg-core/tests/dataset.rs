//! Integration tests for synthetic data generation and train/test splitting.

use std::collections::HashSet;

use linreg_core::dataset::{make_regression, split_indices, train_test_split};
use linreg_core::math::Matrix;
use linreg_core::MatrixError;

#[test]
fn split_of_200_is_disjoint_and_covering() {
    let (train, test) = split_indices(200, 160, 40, 42).unwrap();
    assert_eq!(train.shape(), (160, 1));
    assert_eq!(test.shape(), (40, 1));

    let train_set: HashSet<i64> = train.as_slice().iter().copied().collect();
    let test_set: HashSet<i64> = test.as_slice().iter().copied().collect();
    assert_eq!(train_set.len(), 160);
    assert_eq!(test_set.len(), 40);
    assert!(train_set.is_disjoint(&test_set));

    let all: HashSet<i64> = train_set.union(&test_set).copied().collect();
    assert_eq!(all, (0..200).collect::<HashSet<i64>>());
}

#[test]
fn split_is_reproducible_per_seed() {
    let a = split_indices(50, 40, 10, 3).unwrap();
    let b = split_indices(50, 40, 10, 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn split_rejects_bad_sizes() {
    assert!(matches!(
        split_indices(100, 50, 50, 0),
        Err(MatrixError::InvalidParameter(_))
    ));
    assert!(matches!(
        split_indices(100, 60, 30, 0),
        Err(MatrixError::InvalidParameter(_))
    ));
}

#[test]
fn train_test_split_keeps_rows_paired() {
    // y mirrors the first feature so pairing survives the shuffle
    let x_values: Vec<f64> = (0..20).flat_map(|i| [i as f64, -(i as f64)]).collect();
    let x = Matrix::from_shape_vec((20, 2), x_values).unwrap();
    let y = Matrix::from_shape_vec((20, 1), (0..20).map(|i| i as f64).collect()).unwrap();

    let split = train_test_split(&x, &y, 0.25, 8).unwrap();
    assert_eq!(split.x_train.shape(), (15, 2));
    assert_eq!(split.x_test.shape(), (5, 2));
    assert_eq!(split.y_test.shape(), (5, 1));

    for (xs, ys) in [
        (&split.x_train, &split.y_train),
        (&split.x_test, &split.y_test),
    ] {
        for row in 0..xs.nrows() {
            assert_eq!(xs[(row, 0)], ys[(row, 0)]);
            assert_eq!(xs[(row, 1)], -ys[(row, 0)]);
        }
    }
}

#[test]
fn train_test_split_rejects_large_test_fraction() {
    let x = Matrix::zeros(10, 1);
    let y = Matrix::zeros(10, 1);
    assert!(train_test_split(&x, &y, 0.5, 1).is_err());
    assert!(train_test_split(&x, &y, 1.5, 1).is_err());
}

#[test]
fn make_regression_shapes_and_determinism() {
    let a = make_regression(40, 3, -300.7, 2.0, 42).unwrap();
    assert_eq!(a.x.shape(), (40, 3));
    assert_eq!(a.y.shape(), (40, 1));
    assert_eq!(a.coefficients.shape(), (3, 1));

    let b = make_regression(40, 3, -300.7, 2.0, 42).unwrap();
    assert_eq!(a.x, b.x);
    assert_eq!(a.y, b.y);

    let c = make_regression(40, 3, -300.7, 2.0, 43).unwrap();
    assert_ne!(a.x, c.x);

    assert!(make_regression(10, 2, 0.0, -1.0, 1).is_err());
}

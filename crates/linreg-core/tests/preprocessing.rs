//! Integration tests for mean-centering and intercept recovery.

use linreg_core::math::Matrix;
use linreg_core::preprocessing::{fit_centering, fit_transform};
use linreg_core::stats::mean_all;
use linreg_core::MatrixError;

fn data() -> (Matrix, Matrix) {
    let x = Matrix::from_shape_vec((3, 2), vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0]).unwrap();
    let y = Matrix::from_shape_vec((3, 1), vec![5.0, 7.0, 9.0]).unwrap();
    (x, y)
}

#[test]
fn offsets_are_column_means() {
    let (x, y) = data();
    let centering = fit_centering(&x, &y).unwrap();
    assert_eq!(centering.x_offset.as_slice(), &[2.0, 20.0]);
    assert_eq!(centering.y_offset.as_slice(), &[7.0]);
}

#[test]
fn centered_columns_have_zero_mean_and_inputs_are_untouched() {
    let (x, y) = data();
    let x_before = x.clone();
    let (_, x_c, y_c) = fit_transform(&x, &y).unwrap();

    assert_eq!(x_c.as_slice(), &[-1.0, -10.0, 0.0, 0.0, 1.0, 10.0]);
    assert_eq!(mean_all(&y_c), 0.0);
    assert_eq!(x, x_before);
}

#[test]
fn recovered_bias_matches_the_generating_intercept() {
    // y = 2 * x0 + 3
    let (x, y) = data();
    let centering = fit_centering(&x, &y).unwrap();
    let theta = Matrix::from_shape_vec((2, 1), vec![2.0, 0.0]).unwrap();
    assert_eq!(centering.recover_bias(&theta).unwrap(), 3.0);
}

#[test]
fn centering_rejects_bad_targets_and_empty_data() {
    let (x, _) = data();
    assert!(matches!(
        fit_centering(&x, &Matrix::zeros(2, 1)),
        Err(MatrixError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        fit_centering(&Matrix::zeros(0, 2), &Matrix::zeros(0, 1)),
        Err(MatrixError::InvalidParameter(_))
    ));
}

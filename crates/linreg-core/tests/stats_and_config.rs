//! Integration tests for the stats helpers and the solver configuration types.

use linreg_core::config::{SolverConfig, SolverType};
use linreg_core::losses::LossType;
use linreg_core::math::{Axis, Matrix};
use linreg_core::stats::{mae, mean, mean_all, mse, r2};

fn col(values: &[f64]) -> Matrix {
    Matrix::from_shape_vec((values.len(), 1), values.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

#[test]
fn mean_of_constant_matrix_is_the_constant() {
    for &(rows, cols) in &[(1, 1), (3, 1), (1, 5), (4, 7)] {
        let m = Matrix::from_elem(rows, cols, 2.5);

        let by_rows = mean(&m, Some(Axis::Rows));
        assert_eq!(by_rows.shape(), (1, cols));
        assert!(by_rows.as_slice().iter().all(|&v| v == 2.5));

        let by_cols = mean(&m, Some(Axis::Cols));
        assert_eq!(by_cols.shape(), (rows, 1));
        assert!(by_cols.as_slice().iter().all(|&v| v == 2.5));

        assert_eq!(mean(&m, None)[(0, 0)], 2.5);
        assert_eq!(mean_all(&m), 2.5);
    }
}

#[test]
fn mean_of_empty_matrix_is_nan() {
    assert!(mean_all(&Matrix::zeros(0, 3)).is_nan());
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[test]
fn perfect_prediction_metrics() {
    let y = col(&[1.0, -2.0, 3.5]);
    assert_eq!(mse(&y, &y).unwrap(), 0.0);
    assert_eq!(mae(&y, &y).unwrap(), 0.0);
    assert_eq!(r2(&y, &y).unwrap(), 1.0);
}

#[test]
fn predicting_the_mean_gives_zero_r2() {
    let y = col(&[1.0, 2.0, 3.0, 6.0]);
    let p = Matrix::from_elem(4, 1, 3.0);
    assert!(r2(&y, &p).unwrap().abs() < 1e-12);
    assert_eq!(mae(&y, &p).unwrap(), 1.5);
}

#[test]
fn metrics_require_column_vectors_of_equal_length() {
    let wide = Matrix::zeros(1, 3);
    assert!(mse(&wide, &wide).is_err());
    assert!(mae(&col(&[1.0]), &col(&[1.0, 2.0])).is_err());
}

// ---------------------------------------------------------------------------
// Config / SolverType
// ---------------------------------------------------------------------------

#[test]
fn solver_config_defaults() {
    let cfg = SolverConfig::default();
    assert_eq!(cfg.learning_rate, 0.001);
    assert_eq!(cfg.n_iter, 10000);
    assert_eq!(cfg.tol, 0.001);
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.solver, SolverType::GradientDescent);
    assert_eq!(cfg.loss, LossType::L2);
}

#[test]
fn solver_type_from_str() {
    assert_eq!(
        "gd".parse::<SolverType>().unwrap(),
        SolverType::GradientDescent
    );
    assert_eq!(
        "SGD".parse::<SolverType>().unwrap(),
        SolverType::MiniBatch {
            batch_size: SolverType::DEFAULT_BATCH_SIZE
        }
    );
    let result: Result<SolverType, _> = "adam".parse();
    assert!(result.is_err());
}

#[test]
fn solver_config_json_round_trip() {
    let cfg = SolverConfig::new(0.01, 500, 1e-6, 7, SolverType::MiniBatch { batch_size: 16 })
        .with_loss(LossType::Ridge { lambda: 0.5 });
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("mini_batch"));
    assert!(json.contains("ridge"));

    let back: SolverConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn solver_config_fills_missing_fields_with_defaults() {
    let cfg: SolverConfig =
        serde_json::from_str(r#"{"n_iter": 25, "solver": "gradient_descent"}"#).unwrap();
    assert_eq!(cfg.n_iter, 25);
    assert_eq!(cfg.learning_rate, SolverConfig::default().learning_rate);
}

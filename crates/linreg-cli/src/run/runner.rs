use std::time::Duration;

use anyhow::{Context, Result};

use linreg_core::dataset::{make_regression, train_test_split};
use linreg_core::solver::{fit, SolverResult};
use linreg_core::stats::{mae, mse, r2};

use crate::run::input::RunConfig;
use crate::run::plot::plot_losses;
use crate::util::{validate_html_path, write_bytes_to_file};

/// Fit and held-out scores of one solver.
#[derive(Debug)]
pub struct SolverOutcome {
    pub name: &'static str,
    pub result: SolverResult,
    pub elapsed: Duration,
    pub mse: f64,
    pub mae: f64,
    pub r2: f64,
}

/// Generate data, split it, and fit every configured solver.
pub fn run_experiment(config: &RunConfig) -> Result<Vec<SolverOutcome>> {
    if let Some(report) = &config.report {
        validate_html_path(report)?;
    }
    log::debug!("Run configuration: {:?}", config);

    let start_time = std::time::Instant::now();
    let data = make_regression(
        config.n_samples,
        config.n_features,
        config.bias,
        config.noise,
        config.seed,
    )
    .context("Failed to generate regression data")?;
    let split = train_test_split(&data.x, &data.y, config.test_frac, config.seed)
        .context("Failed to split data into train and test sets")?;
    log::info!(
        "Generated {} x {} dataset ({} train / {} test) in {:?}",
        config.n_samples,
        config.n_features,
        split.x_train.nrows(),
        split.x_test.nrows(),
        start_time.elapsed()
    );

    let mut outcomes = Vec::with_capacity(config.solvers.len());
    for solver in &config.solvers {
        let name = solver.short_name();
        let solver_config = config.solver_config(solver);

        let start_time = std::time::Instant::now();
        let result = fit(&solver_config, &split.x_train, &split.y_train)
            .with_context(|| format!("Solver {} failed", name))?;
        let elapsed = start_time.elapsed();
        log::info!("Solver {} completed in {:?}", name, elapsed);

        let y_pred = result
            .predict(&split.x_test)
            .context("Failed to predict on the test set")?;
        let outcome = SolverOutcome {
            name,
            elapsed,
            mse: mse(&split.y_test, &y_pred)?,
            mae: mae(&split.y_test, &y_pred)?,
            r2: r2(&split.y_test, &y_pred)?,
            result,
        };
        log::info!(
            "{}: MSE = {:.4}, MAE = {:.4}, R-squared = {:.4}",
            name,
            outcome.mse,
            outcome.mae,
            outcome.r2
        );
        outcomes.push(outcome);
    }

    if let Some(report) = &config.report {
        write_loss_report(&outcomes, report)?;
    }

    Ok(outcomes)
}

/// Write the loss curves of all solvers to an HTML file.
pub fn write_loss_report(outcomes: &[SolverOutcome], path: &str) -> Result<()> {
    let traces: Vec<(&str, &[f64])> = outcomes
        .iter()
        .map(|o| (o.name, o.result.losses.as_slice()))
        .collect();
    let plot = plot_losses(&traces);
    write_bytes_to_file(path, plot.to_html().as_bytes())
        .with_context(|| format!("Failed to write report: {}", path))?;
    log::info!("Loss report written to {}", path);
    Ok(())
}

/// Human-readable summary of an experiment, one block per solver.
pub fn format_summary(outcomes: &[SolverOutcome]) -> String {
    let mut out = String::new();
    for o in outcomes {
        out.push_str(&format!(
            "[{}] converged: {}, iterations: {}, time: {:.6} s\n",
            o.name,
            o.result.converged,
            o.result.n_iter,
            o.elapsed.as_secs_f64()
        ));
        out.push_str(&format!("  bias: {:.4}\n", o.result.bias));
        out.push_str(&format!("  MSE: {:.4}\n", o.mse));
        out.push_str(&format!("  MAE: {:.4}\n", o.mae));
        out.push_str(&format!("  R-squared: {:.4}\n", o.r2));
    }
    out
}

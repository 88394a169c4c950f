use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use linreg_core::config::{SolverConfig, SolverType};
use linreg_core::losses::LossType;

/// Parameters of one experiment: dataset generation, split and solvers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub n_samples: usize,
    pub n_features: usize,
    pub bias: f64,
    pub noise: f64,
    pub test_frac: f64,
    pub seed: u64,
    pub learning_rate: f64,
    pub n_iter: usize,
    pub tol: f64,
    pub solvers: Vec<SolverType>,
    pub loss: LossType,
    /// HTML file the loss curves are written to.
    pub report: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            n_samples: 100_000,
            n_features: 20,
            bias: -300.7,
            noise: 2.0,
            test_frac: 0.2,
            seed: 42,
            learning_rate: 0.001,
            n_iter: 10_000,
            tol: 0.001,
            solvers: vec![
                SolverType::GradientDescent,
                SolverType::MiniBatch {
                    batch_size: SolverType::DEFAULT_BATCH_SIZE,
                },
            ],
            loss: LossType::L2,
            report: None,
        }
    }
}

/// Load a run configuration from a JSON file.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: RunConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

impl RunConfig {
    /// Start from the config file (or defaults) and apply command-line overrides.
    pub fn from_arguments(config_path: Option<&Path>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_run_config(path)?,
            None => RunConfig::default(),
        };

        if let Some(&n_samples) = matches.get_one::<usize>("n_samples") {
            config.n_samples = n_samples;
        }
        if let Some(&n_features) = matches.get_one::<usize>("n_features") {
            config.n_features = n_features;
        }
        if let Some(&bias) = matches.get_one::<f64>("bias") {
            config.bias = bias;
        }
        if let Some(&noise) = matches.get_one::<f64>("noise") {
            config.noise = noise;
        }
        if let Some(&test_frac) = matches.get_one::<f64>("test_frac") {
            config.test_frac = test_frac;
        }
        if let Some(&seed) = matches.get_one::<u64>("seed") {
            config.seed = seed;
        }
        if let Some(&learning_rate) = matches.get_one::<f64>("learning_rate") {
            config.learning_rate = learning_rate;
        }
        if let Some(&n_iter) = matches.get_one::<usize>("n_iter") {
            config.n_iter = n_iter;
        }
        if let Some(&tol) = matches.get_one::<f64>("tol") {
            config.tol = tol;
        }

        if let Some(solver) = matches.get_one::<String>("solver") {
            config.solvers = parse_solvers(solver)?;
        }
        if let Some(&batch_size) = matches.get_one::<usize>("batch_size") {
            config.set_batch_size(batch_size);
        }

        if let Some(loss) = matches.get_one::<String>("loss") {
            config.loss = LossType::from_str(loss).map_err(anyhow::Error::msg)?;
        }
        if let Some(&lambda) = matches.get_one::<f64>("lambda") {
            match &mut config.loss {
                LossType::Ridge { lambda: current } => *current = lambda,
                LossType::L2 => log::warn!("--lambda ignored for the l2 loss"),
            }
        }

        if let Some(report) = matches.get_one::<String>("report") {
            config.report = Some(report.clone());
        }

        Ok(config)
    }

    /// Replace the batch size of every mini-batch solver.
    pub fn set_batch_size(&mut self, batch_size: usize) {
        for solver in self.solvers.iter_mut() {
            if let SolverType::MiniBatch { batch_size: current } = solver {
                *current = batch_size;
            }
        }
    }

    /// Solver configuration sharing this run's step parameters.
    pub fn solver_config(&self, solver: &SolverType) -> SolverConfig {
        SolverConfig::new(
            self.learning_rate,
            self.n_iter,
            self.tol,
            self.seed,
            solver.clone(),
        )
        .with_loss(self.loss.clone())
    }
}

/// `gd`, `sgd`, or `both`.
pub fn parse_solvers(value: &str) -> Result<Vec<SolverType>> {
    if value.eq_ignore_ascii_case("both") {
        return Ok(RunConfig::default().solvers);
    }
    let solver = SolverType::from_str(value).map_err(anyhow::Error::msg)?;
    Ok(vec![solver])
}

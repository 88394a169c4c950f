use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use linreg_cli::run::input::RunConfig;
use linreg_cli::run::runner::{format_summary, run_experiment};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("LINREG_LOG", "error,linreg=info"))
        .init();

    let matches = Command::new("linreg")
        .version(clap::crate_version!())
        .about("Linear regression by batch and mini-batch gradient descent")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("run")
                .about("Generate a synthetic dataset, fit the selected solvers and score them")
                .args(run_args()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective run configuration as JSON")
                .args(run_args()),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("run", sub_m)) => handle_run(sub_m),
        Some(("config", sub_m)) => handle_config(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn run_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .help("Path to a JSON run configuration. Defaults are used when omitted.")
            .required(false)
            .value_parser(clap::value_parser!(PathBuf))
            .value_hint(ValueHint::FilePath),
        Arg::new("n_samples")
            .short('M')
            .long("n-samples")
            .help("Number of generated samples")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("n_features")
            .short('N')
            .long("n-features")
            .help("Number of generated features")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("bias")
            .short('b')
            .long("bias")
            .help("Intercept of the generating model")
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(f64)),
        Arg::new("noise")
            .short('I')
            .long("noise")
            .help("Standard deviation of the Gaussian noise added to the targets")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("learning_rate")
            .short('n')
            .long("learning-rate")
            .help("Gradient descent learning rate")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("batch_size")
            .short('B')
            .long("batch-size")
            .help("Mini-batch size for the sgd solver")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("seed")
            .short('S')
            .long("seed")
            .help("Random number seed")
            .value_parser(clap::value_parser!(u64)),
        Arg::new("test_frac")
            .short('f')
            .long("test-frac")
            .help("Fraction of the samples held out for testing")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("n_iter")
            .short('i')
            .long("n-iter")
            .help("Maximum number of iterations per solver")
            .value_parser(clap::value_parser!(usize)),
        Arg::new("tol")
            .short('t')
            .long("tol")
            .help("Loss below which a solver stops")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("solver")
            .long("solver")
            .help("Solvers to run")
            .value_parser(["gd", "sgd", "both"])
            .value_hint(ValueHint::Other),
        Arg::new("loss")
            .long("loss")
            .help("Loss function")
            .value_parser(["l2", "ridge"])
            .value_hint(ValueHint::Other),
        Arg::new("lambda")
            .long("lambda")
            .help("Penalty strength of the ridge loss")
            .value_parser(clap::value_parser!(f64)),
        Arg::new("report")
            .short('r')
            .long("report")
            .help("Write the loss curves to this HTML file")
            .value_parser(clap::builder::NonEmptyStringValueParser::new())
            .value_hint(ValueHint::FilePath),
    ]
}

fn load_config(matches: &ArgMatches) -> Result<RunConfig> {
    let config_path = matches.get_one::<PathBuf>("config");
    match config_path {
        Some(path) => log::info!("[linreg] Using config: {:?}", path),
        None => log::info!("[linreg] No config file provided; using defaults."),
    }
    RunConfig::from_arguments(config_path.map(PathBuf::as_path), matches)
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;

    match run_experiment(&config) {
        Ok(outcomes) => {
            print!("{}", format_summary(&outcomes));
            Ok(())
        }
        Err(e) => {
            log::error!("Experiment failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_config(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

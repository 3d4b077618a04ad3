use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use percolation::{EstimatorConfig, PercolationGrid, SiteState, ThresholdEstimator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Opening sequence replayed by `--demo` on a 4x4 grid.
const DEMO_OPENS: [(usize, usize); 10] = [
    (1, 2),
    (2, 4),
    (3, 3),
    (1, 3),
    (1, 4),
    (4, 1),
    (4, 2),
    (2, 3),
    (2, 1),
    (3, 4),
];

#[derive(Parser, Debug)]
#[command(name = "percolation-stats")]
#[command(about = "Estimate the site percolation threshold by Monte Carlo simulation")]
struct Cli {
    /// Grid side length
    #[arg(allow_negative_numbers = true)]
    n: Option<i64>,

    /// Number of independent trials
    #[arg(allow_negative_numbers = true)]
    trials: Option<i64>,

    /// JSON file with an estimator config; positional arguments override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials on the current thread only
    #[arg(long)]
    sequential: bool,

    /// Print the estimate as JSON
    #[arg(long)]
    json: bool,

    /// Replay a fixed opening sequence on a 4x4 grid and dump its sites
    #[arg(long, conflicts_with_all = ["n", "trials", "config", "json"])]
    demo: bool,
}

fn load_config(cli: &Cli) -> Result<EstimatorConfig, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            EstimatorConfig::from_json(&text).map_err(|e| e.to_string())?
        }
        None => EstimatorConfig::default(),
    };
    if let Some(n) = cli.n {
        config.grid_size = n;
    }
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.sequential {
        config.parallel = false;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run_demo() -> Result<(), String> {
    let mut grid = PercolationGrid::new(4).map_err(|e| e.to_string())?;
    for (row, col) in DEMO_OPENS {
        grid.open(row, col).map_err(|e| e.to_string())?;
    }
    for site in grid.sites() {
        let state = match site.state() {
            SiteState::Blocked => "BLOCKED",
            SiteState::Open => "OPEN",
        };
        println!("ID: {}", site.id());
        println!("State: {state}");
    }
    println!("Percolates: {}", grid.percolates());
    Ok(())
}

fn run_estimate(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli)?;
    let estimate = ThresholdEstimator::with_config(&config).map_err(|e| e.to_string())?;

    if cli.json {
        let json = serde_json::to_string_pretty(&estimate.summary())
            .map_err(|e| format!("failed to encode summary: {e}"))?;
        println!("{json}");
    } else {
        println!("mean = {}", estimate.mean());
        println!("stddev = {}", estimate.stddev());
        println!(
            "95% confidence interval = [{}, {}]",
            estimate.confidence_lo(),
            estimate.confidence_hi()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "percolation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let outcome = if cli.demo {
        run_demo()
    } else {
        run_estimate(&cli)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

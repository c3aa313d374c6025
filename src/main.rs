use anyhow::{Context, bail};
use clap::Parser;
use hydro_gof::{EngineConfig, MetricId, Session};
use std::path::PathBuf;
use std::process::ExitCode;

/// Goodness-of-fit metrics between observed and predicted values
#[derive(Parser, Debug)]
#[command(name = "gof", version)]
struct Args {
    /// CSV file with `predicted,observed` rows
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Extra pair as `observed,predicted`, appended after the CSV rows
    #[arg(long = "pair", value_name = "OBSERVED,PREDICTED")]
    pairs: Vec<String>,

    /// Metric id to compute (mse, rmse, rmsd, meanbias, r2, kendalltau, idx, kling, deri)
    #[arg(long = "metric")]
    metrics: Vec<String>,

    /// Print the configured report instead of single metrics
    #[arg(long, conflicts_with = "metrics")]
    all: bool,

    /// Engine settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let mut session = Session::with_config(config);

    if let Some(path) = &args.csv {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let summary = session.load_csv(&text);
        if summary.skipped > 0 {
            eprintln!(
                "{}: skipped {} malformed rows",
                path.display(),
                summary.skipped
            );
        }
    }

    for pair in &args.pairs {
        let Some((observed, predicted)) = pair.split_once(',') else {
            bail!("--pair expects OBSERVED,PREDICTED, got '{}'", pair);
        };
        session.append(observed, predicted)?;
    }

    if args.all {
        print!("{}", session.render_report());
        return Ok(ExitCode::SUCCESS);
    }

    let names = if args.metrics.is_empty() {
        vec![session.config().default_metric.to_string()]
    } else {
        args.metrics.clone()
    };

    let precision = session.config().report.precision;
    let mut status = ExitCode::SUCCESS;
    for name in &names {
        let label = name
            .parse::<MetricId>()
            .map(MetricId::label)
            .unwrap_or(name.as_str());
        match session.compute_named(name) {
            Ok(value) => println!("{}: {:.precision$}", label, value),
            Err(e) => {
                eprintln!("{}: {}", label, e);
                status = ExitCode::FAILURE;
            }
        }
    }
    Ok(status)
}

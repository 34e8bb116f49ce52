use std::path::PathBuf;

use clap::Parser;

use qradar_bench::config::{BenchmarkConfig, ResolvedOutputs};
use qradar_bench::logging::init_logging;
use qradar_bench::trials::TrialRunner;

/// Batch comparison harness for the classical and belief-guided searchers.
#[derive(Debug, Parser)]
#[command(
    name = "qradar-bench",
    author,
    version,
    about = "Deterministic classical-vs-guided search comparison harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of trials to run.
    #[arg(long, value_name = "TRIALS")]
    trials: Option<usize>,

    /// Override the master RNG seed for board and searcher streams.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the neighborhood boost applied after a hit.
    #[arg(long, value_name = "BOOST")]
    boost: Option<f64>,

    /// Exit after validating the configuration (no trials are run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(trials) = cli.trials {
        config.trials.count = trials;
    }

    if let Some(seed) = cli.seed {
        config.trials.seed = Some(seed);
    }

    if let Some(boost) = cli.boost {
        config.search.boost = boost;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let trials = config.trials.count;
    let grid = config.grid;

    println!(
        "Loaded configuration '{run_id}': {trials} trial{} on a {}x{} grid with {} target{}",
        if trials == 1 { "" } else { "s" },
        grid.height,
        grid.width,
        grid.targets,
        if grid.targets == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = TrialRunner::new(config, outputs);

    if cli.validate_only {
        println!("Validation-only mode: trial execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} trials → {} rows at {}",
        summary.trials_run,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    println!(
        "Mean guess delta (classical − guided): {:+.2} (p = {:.3})",
        summary.analytics.mean_delta, summary.analytics.p_value
    );
    if let Some(plot_path) = summary.plot_path.as_ref() {
        println!("Guess delta plot: {}", plot_path.display());
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use qradar_core::model::board::Board;
use qradar_core::model::config::ConfigError as SimulationError;
use qradar_core::model::coord::Coord;
use qradar_search::{SearchOutcome, accuracy, run_classical, run_guided};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary};
use crate::config::{BenchmarkConfig, ResolvedOutputs};

/// Primary entry point for running batch strategy comparisons.
pub struct TrialRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub trials_run: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub plot_path: Option<PathBuf>,
    pub telemetry_path: Option<PathBuf>,
    pub analytics: AnalyticsSummary,
}

/// Results of both strategies on one shared board.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub board_seed: u64,
    pub targets: Vec<Coord>,
    pub classical: StrategyResult,
    pub guided: StrategyResult,
    pub winner: Winner,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StrategyResult {
    pub guesses: usize,
    pub hits: usize,
    pub accuracy: f64,
}

/// Winner of one trial by guess count. The classical side takes ties,
/// matching the duel rule that the manual reading is checked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Classical,
    Guided,
}

impl TrialRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
        }
    }

    /// Execute all trials, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;
        if !self.outputs.plots_dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.outputs.plots_dir)?;
        }

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.trials.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut analytics = AnalyticsCollector::new();

        for trial_index in 0..self.config.trials.count {
            let board_seed = rng.next_u64();
            let classical_seed = rng.next_u64();
            let guided_seed = rng.next_u64();

            let outcome = self.play_trial(board_seed, classical_seed, guided_seed)?;

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    Level::INFO,
                    trial = trial_index,
                    board_seed,
                    classical_guesses = outcome.classical.guesses,
                    guided_guesses = outcome.guided.guesses,
                    winner = ?outcome.winner,
                    "trial complete"
                );
            }

            analytics.record_trial(&outcome);
            rows_written += write_trial_row(&mut writer, &self.config, trial_index, &outcome)?;
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;
        let plot_path = match summary.render_plot(&self.outputs.plots_dir) {
            Ok(path) => Some(path),
            Err(err) => {
                eprintln!("WARN: {}", err);
                None
            }
        };

        let telemetry_path = if self.logging_enabled {
            self.outputs
                .summary_md
                .parent()
                .map(|dir| dir.join("telemetry.jsonl"))
        } else {
            None
        };

        Ok(RunSummary {
            trials_run: self.config.trials.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            plot_path,
            telemetry_path,
            analytics: summary,
        })
    }

    fn play_trial(
        &self,
        board_seed: u64,
        classical_seed: u64,
        guided_seed: u64,
    ) -> Result<TrialOutcome, RunnerError> {
        let run_config = self.config.run_config();
        let board = Board::generate_with_seed(
            run_config.height,
            run_config.width,
            run_config.num_targets,
            board_seed,
        )?;

        let mut classical_rng = StdRng::seed_from_u64(classical_seed);
        let classical = run_classical(&board, &run_config, &mut classical_rng);

        let mut guided_rng = StdRng::seed_from_u64(guided_seed);
        let guided = run_guided(&board, &run_config, &mut guided_rng);

        let winner = if guided.guesses < classical.guesses {
            Winner::Guided
        } else {
            Winner::Classical
        };

        Ok(TrialOutcome {
            board_seed,
            targets: board.target_cells(),
            classical: strategy_result(&board, &classical),
            guided: strategy_result(&board, &guided),
            winner,
        })
    }
}

fn strategy_result(board: &Board, outcome: &SearchOutcome) -> StrategyResult {
    StrategyResult {
        guesses: outcome.guesses,
        hits: outcome.hits,
        accuracy: accuracy(board, &outcome.detections),
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct TrialLogRow<'a> {
    run_id: &'a str,
    trial_id: String,
    trial_index: usize,
    board_seed: u64,
    targets: &'a [Coord],
    classical: StrategyResult,
    guided: StrategyResult,
    winner: Winner,
}

fn write_trial_row(
    writer: &mut BufWriter<File>,
    config: &BenchmarkConfig,
    trial_index: usize,
    outcome: &TrialOutcome,
) -> Result<usize, RunnerError> {
    let row = TrialLogRow {
        run_id: &config.run_id,
        trial_id: format!("T{trial_index:05}"),
        trial_index,
        board_seed: outcome.board_seed,
        targets: &outcome.targets,
        classical: outcome.classical,
        guided: outcome.guided,
        winner: outcome.winner,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(1)
}

/// Failures while executing or persisting a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid simulation config: {0}")]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

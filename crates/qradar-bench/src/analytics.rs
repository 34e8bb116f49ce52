use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::trials::{TrialOutcome, Winner};

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render plot: {0}")]
    Plot(String),
}

/// Accumulates per-trial results for both strategies and reduces them to a
/// summary at the end of a run.
pub struct AnalyticsCollector {
    classical: StrategyAccumulator,
    guided: StrategyAccumulator,
    /// Per-trial `classical - guided` guess difference; positive means the
    /// guided searcher needed fewer probes.
    deltas: Vec<f64>,
}

impl AnalyticsCollector {
    pub fn new() -> Self {
        Self {
            classical: StrategyAccumulator::new("classical"),
            guided: StrategyAccumulator::new("guided"),
            deltas: Vec::new(),
        }
    }

    pub fn record_trial(&mut self, outcome: &TrialOutcome) {
        self.classical
            .record(&outcome.classical, outcome.winner == Winner::Classical);
        self.guided
            .record(&outcome.guided, outcome.winner == Winner::Guided);
        self.deltas
            .push(outcome.classical.guesses as f64 - outcome.guided.guesses as f64);
    }

    pub fn finalize(self) -> AnalyticsSummary {
        let trials = self.deltas.len();
        let mean_delta = if trials == 0 {
            0.0
        } else {
            self.deltas.iter().sum::<f64>() / trials as f64
        };
        let (p_value, effective_sample) = wilcoxon_signed_rank(&self.deltas);

        AnalyticsSummary {
            trials,
            strategies: vec![self.classical.into_report(), self.guided.into_report()],
            mean_delta,
            p_value,
            effective_sample,
            deltas: self.deltas,
        }
    }
}

impl Default for AnalyticsCollector {
    fn default() -> Self {
        Self::new()
    }
}

struct StrategyAccumulator {
    name: &'static str,
    trials: usize,
    wins: usize,
    total_accuracy: f64,
    per_trial_guesses: Vec<f64>,
}

impl StrategyAccumulator {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            trials: 0,
            wins: 0,
            total_accuracy: 0.0,
            per_trial_guesses: Vec::new(),
        }
    }

    fn record(&mut self, result: &crate::trials::StrategyResult, is_winner: bool) {
        self.trials += 1;
        self.per_trial_guesses.push(result.guesses as f64);
        self.total_accuracy += result.accuracy;
        if is_winner {
            self.wins += 1;
        }
    }

    fn into_report(self) -> StrategyReport {
        let avg_guesses = if self.trials == 0 {
            0.0
        } else {
            self.per_trial_guesses.iter().sum::<f64>() / self.trials as f64
        };
        let avg_accuracy = if self.trials == 0 {
            0.0
        } else {
            self.total_accuracy / self.trials as f64
        };
        let (ci_low, ci_high) = confidence_interval(&self.per_trial_guesses);

        StrategyReport {
            name: self.name,
            trials: self.trials,
            avg_guesses,
            ci95: (ci_low, ci_high),
            avg_accuracy,
            wins: self.wins,
        }
    }
}

/// Two-sided Wilcoxon signed-rank test on per-trial differences, using the
/// normal approximation with tie correction. Returns `(p_value, n)` where
/// `n` is the number of non-zero differences.
fn wilcoxon_signed_rank(diffs: &[f64]) -> (f64, usize) {
    let diffs: Vec<f64> = diffs
        .iter()
        .copied()
        .filter(|d| d.abs() > f64::EPSILON)
        .collect();
    let n = diffs.len();
    if n == 0 {
        return (1.0, 0);
    }

    let mut paired: Vec<(f64, f64)> = diffs.into_iter().map(|d| (d.abs(), d.signum())).collect();
    paired.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    // Rank handling with ties
    let mut ranks = Vec::with_capacity(n);
    let mut tie_sizes = Vec::new();
    let mut i = 0;
    while i < paired.len() {
        let mut j = i;
        while j + 1 < paired.len() && (paired[j + 1].0 - paired[i].0).abs() < 1e-12 {
            j += 1;
        }
        let rank = (i + j + 2) as f64 / 2.0;
        for k in i..=j {
            ranks.push((rank, paired[k].1));
        }
        if j > i {
            tie_sizes.push(j - i + 1);
        }
        i = j + 1;
    }

    let w_plus: f64 = ranks
        .iter()
        .filter(|(_, sign)| *sign > 0.0)
        .map(|(rank, _)| *rank)
        .sum();
    let w_minus: f64 = ranks
        .iter()
        .filter(|(_, sign)| *sign < 0.0)
        .map(|(rank, _)| *rank)
        .sum();

    let w = w_plus.min(w_minus);
    let n_f = n as f64;
    let mean_w = n_f * (n_f + 1.0) / 4.0;

    // Variance with tie correction
    let tie_adjustment: f64 = tie_sizes
        .into_iter()
        .map(|count| {
            let c = count as f64;
            (c.powi(3) - c) / 48.0
        })
        .sum();
    let variance_w = n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 24.0 - tie_adjustment;
    if variance_w <= 0.0 {
        return (1.0, n);
    }

    let z = ((w - mean_w).abs() - 0.5) / variance_w.sqrt();
    let normal = Normal::new(0.0, 1.0).unwrap();
    let p = 2.0 * (1.0 - normal.cdf(z));
    (p.clamp(0.0, 1.0), n)
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub trials: usize,
    pub strategies: Vec<StrategyReport>,
    /// Mean of per-trial `classical - guided` guess counts.
    pub mean_delta: f64,
    pub p_value: f64,
    pub effective_sample: usize,
    #[serde(skip)]
    deltas: Vec<f64>,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str("# Search Strategy Comparison\n\n");
        rows.push_str(&format!("Trials: {}\n\n", self.trials));
        rows.push_str("| Strategy | Trials | Avg guesses | 95% CI | Avg accuracy | Win % |\n");
        rows.push_str("|----------|--------|-------------|--------|--------------|-------|\n");

        for strategy in &self.strategies {
            let win_rate = if strategy.trials == 0 {
                0.0
            } else {
                strategy.wins as f64 / strategy.trials as f64
            };
            rows.push_str(&format!(
                "| {name} | {trials} | {avg:.2} | [{ci_low:.2}, {ci_high:.2}] | {accuracy:.3} | {win:.1}% |\n",
                name = strategy.name,
                trials = strategy.trials,
                avg = strategy.avg_guesses,
                ci_low = strategy.ci95.0,
                ci_high = strategy.ci95.1,
                accuracy = strategy.avg_accuracy,
                win = win_rate * 100.0,
            ));
        }

        rows.push_str(&format!(
            "\nMean guess delta (classical − guided): {delta:+.2} \
             (Wilcoxon signed-rank p = {p:.3}, n = {n})\n",
            delta = self.mean_delta,
            p = self.p_value,
            n = self.effective_sample,
        ));

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }

    /// Renders a histogram of per-trial guess deltas.
    pub fn render_plot(&self, dir: impl AsRef<Path>) -> Result<PathBuf, AnalyticsError> {
        let dir = dir.as_ref();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| AnalyticsError::Io {
                context: "creating plots directory",
                source: e,
            })?;
        }

        let output_path = dir.join("guess_delta.png");
        let deltas = self.deltas.clone();

        let prev_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|_| {}));

        let plot_attempt = std::panic::catch_unwind(move || {
            let min_delta = deltas.iter().copied().fold(0.0f64, f64::min).floor() as i64;
            let max_delta = deltas.iter().copied().fold(0.0f64, f64::max).ceil() as i64;

            let mut counts = vec![0usize; (max_delta - min_delta + 1) as usize];
            for delta in &deltas {
                counts[(delta.round() as i64 - min_delta) as usize] += 1;
            }
            let top = counts.iter().copied().max().unwrap_or(1).max(1);

            let root = BitMapBackend::new(&output_path, (800, 480)).into_drawing_area();
            root.fill(&WHITE)
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .caption(
                    "Per-trial guess delta, classical - guided (higher favors guided)",
                    ("sans-serif", 22),
                )
                .set_label_area_size(LabelAreaPosition::Left, 50)
                .set_label_area_size(LabelAreaPosition::Bottom, 60)
                .build_cartesian_2d(min_delta..(max_delta + 1), 0usize..(top + 1))
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            chart
                .configure_mesh()
                .disable_mesh()
                .y_desc("Trials")
                .x_desc("Guess delta")
                .draw()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            chart
                .draw_series(counts.iter().enumerate().map(|(idx, count)| {
                    let delta = min_delta + idx as i64;
                    let color = if delta >= 0 { &GREEN } else { &RED };
                    Rectangle::new([(delta, 0), (delta + 1, *count)], color.filled())
                }))
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            drop(chart);

            root.present()
                .map_err(|e| AnalyticsError::Plot(e.to_string()))?;

            drop(root);

            Ok(output_path)
        });

        std::panic::set_hook(prev_hook);

        match plot_attempt {
            Ok(result) => result,
            Err(_) => Err(AnalyticsError::Plot(
                "plotters panicked while rendering (missing font support?)".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub name: &'static str,
    pub trials: usize,
    pub avg_guesses: f64,
    pub ci95: (f64, f64),
    pub avg_accuracy: f64,
    pub wins: usize,
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let std_error = (variance / points.len() as f64).sqrt();
    let margin = CONFIDENCE_Z * std_error;
    (mean - margin, mean + margin)
}

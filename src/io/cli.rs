//! Command-line interface for heatmap extraction and comparison

use crate::extraction::extractor::extract_file;
use crate::io::configuration::REPORT_PRECISION;
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::io::image::load_intensity_field;
use crate::io::progress::ProgressManager;
use crate::metrics::field::FieldRole;
use crate::metrics::overlap::{ClampPolicy, IntersectionRule, MetricConfig, OverlapMetrics};
use crate::metrics::temporal::SequenceAccumulator;
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "heatoverlap")]
#[command(
    author,
    version,
    about = "Compare gaze heatmaps against saliency-model heatmaps"
)]
/// Command-line arguments for the heatmap tool
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Subcommands of the heatmap tool
#[derive(Subcommand)]
pub enum Command {
    /// Convert a color-coded heatmap into a grayscale intensity PNG
    Extract {
        /// Color heatmap to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Grayscale PNG to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Compute overlap metrics for one or more gaze/saliency pairs
    ///
    /// Several pairs are averaged over time before the metrics are computed.
    Compare {
        /// Alternating gaze and saliency images: GAZE SALIENCY [GAZE SALIENCY ...]
        #[arg(value_name = "PATHS", required = true, num_args = 2..)]
        paths: Vec<PathBuf>,

        /// Pointwise intersection rule (min, product or bitwise)
        #[arg(long, default_value_t = IntersectionRule::Minimum)]
        intersection: IntersectionRule,

        /// Clamp only the gaze field, leaving the saliency field as loaded
        #[arg(long)]
        legacy_clamp: bool,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flag
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A grayscale heatmap was written
    Extracted {
        /// Path of the written image
        output: PathBuf,
    },
    /// Metrics were computed over `pairs` frame pairs
    Compared {
        /// The overlap ratios
        metrics: OverlapMetrics,
        /// Number of frame pairs averaged
        pairs: usize,
    },
}

/// Executes the parsed command with progress tracking
pub struct CommandRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CommandRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Execute the command and print its report to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be decoded, the output cannot be
    /// written, or the metrics are undefined for the given fields
    // Allow print for the metric report, which is the command's output
    #[allow(clippy::print_stdout)]
    pub fn process(&mut self) -> Result<()> {
        match self.execute()? {
            Outcome::Extracted { output } => {
                if !self.cli.quiet {
                    println!("Wrote {}", output.display());
                }
            }
            Outcome::Compared { metrics, pairs } => {
                println!("{}", format_report(&metrics, pairs));
            }
        }
        Ok(())
    }

    /// Execute the command without printing
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be decoded, the output cannot be
    /// written, or the metrics are undefined for the given fields
    pub fn execute(&mut self) -> Result<Outcome> {
        match &self.cli.command {
            Command::Extract { input, output } => {
                extract_file(input, output)?;
                Ok(Outcome::Extracted {
                    output: output.clone(),
                })
            }
            Command::Compare {
                paths,
                intersection,
                legacy_clamp,
            } => {
                let config = MetricConfig {
                    intersection: *intersection,
                    clamp: if *legacy_clamp {
                        ClampPolicy::GazeOnly
                    } else {
                        ClampPolicy::Symmetric
                    },
                };
                let pairs = pair_paths(paths)?;
                let metrics = Self::compare(self.progress_manager.as_mut(), &pairs, config)?;
                Ok(Outcome::Compared {
                    metrics,
                    pairs: pairs.len(),
                })
            }
        }
    }

    fn compare(
        mut progress_manager: Option<&mut ProgressManager>,
        pairs: &[(&Path, &Path)],
        config: MetricConfig,
    ) -> Result<OverlapMetrics> {
        tracing::info!("Comparing {} frame pair(s) with {config:?}", pairs.len());

        if let Some(pm) = progress_manager.as_deref_mut() {
            pm.initialize(pairs.len());
        }

        let mut sequence = SequenceAccumulator::new();
        for (index, (gaze_path, saliency_path)) in pairs.iter().enumerate() {
            if let Some(pm) = progress_manager.as_deref() {
                pm.start_pair(gaze_path);
            }

            let gaze = load_intensity_field(gaze_path)?;
            let saliency = load_intensity_field(saliency_path)?;
            tracing::debug!(
                "Frame {index}: gaze mass {:.3}, saliency mass {:.3}",
                gaze.mass(),
                saliency.mass()
            );
            if let Err(error) = sequence.push_pair(&gaze, &saliency) {
                let path = if error.field_role() == Some(FieldRole::Gaze) {
                    gaze_path
                } else {
                    saliency_path
                };
                return Err(error).with_path(path);
            }

            if let Some(pm) = progress_manager.as_deref() {
                pm.complete_pair();
            }
        }

        if let Some(pm) = progress_manager {
            pm.finish();
        }

        sequence.metrics(config)
    }
}

/// Split an alternating gaze/saliency path list into pairs
///
/// # Errors
///
/// Returns an error if the list is empty or has an odd number of paths
pub fn pair_paths(paths: &[PathBuf]) -> Result<Vec<(&Path, &Path)>> {
    if paths.is_empty() || paths.len() % 2 != 0 {
        return Err(invalid_parameter(
            "paths",
            &paths.len(),
            &"expected alternating GAZE SALIENCY pairs",
        ));
    }

    Ok(paths
        .chunks_exact(2)
        .filter_map(|pair| match pair {
            [gaze, saliency] => Some((gaze.as_path(), saliency.as_path())),
            _ => None,
        })
        .collect())
}

/// Render metrics as labelled lines
pub fn format_report(metrics: &OverlapMetrics, pairs: usize) -> String {
    let precision = REPORT_PRECISION;
    let mut lines = Vec::with_capacity(4);
    if pairs > 1 {
        lines.push(format!("Averaged over {pairs} frame pairs"));
    }
    lines.push(format!(
        "coverage (gaze within predicted salient regions): {:.precision$}",
        metrics.coverage
    ));
    lines.push(format!(
        "outside gaze (gaze outside all predicted salient regions): {:.precision$}",
        metrics.outside_gaze
    ));
    lines.push(format!(
        "unseen saliency (uncovered gaze relative to saliency mass): {:.precision$}",
        metrics.unseen_saliency
    ));
    lines.join("\n")
}

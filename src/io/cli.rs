//! Command-line interface for analyzing single screenshots or whole directories

use crate::algorithm::executor::{AnalysisResult, Analyzer};
use crate::io::configuration::{
    AnalysisConfig, DEFAULT_DEBUG_LIMIT, DEFAULT_SENSITIVITY, IMAGE_EXTENSIONS, MAX_CAPTURE_SCALE,
    MIN_CAPTURE_SCALE,
};
use crate::io::error::{AnalysisError, Result, invalid_parameter};
use crate::io::image::{crop_scaled, load_rgb};
use crate::io::progress::ProgressManager;
use crate::io::report::{ReportMode, render_error, render_json, render_text};
use crate::spatial::Rect;
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "oddcell")]
#[command(
    author,
    version,
    about = "Find the cell whose color differs in a screenshot of a colored grid"
)]
/// Command-line arguments for the analyzer
pub struct Cli {
    /// Image file or directory of images to analyze
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Higher values flag smaller color differences
    #[arg(short, long, default_value_t = DEFAULT_SENSITIVITY, value_parser = parse_sensitivity)]
    pub sensitivity: f64,

    /// List every cell color instead of only the outliers
    #[arg(short, long)]
    pub debug: bool,

    /// Maximum number of cells listed in debug mode
    #[arg(long, default_value_t = DEFAULT_DEBUG_LIMIT)]
    pub debug_limit: usize,

    /// Emit one JSON object per image instead of text
    #[arg(long)]
    pub json: bool,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// JSON file overriding analysis thresholds
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Capture region X,Y,W,H in logical pixels
    #[arg(long, value_parser = parse_region)]
    pub region: Option<Rect>,

    /// Horizontal factor from logical to image pixels
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale_x: f64,

    /// Vertical factor from logical to image pixels
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale_y: f64,

    /// Increase log detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_sensitivity(value: &str) -> std::result::Result<f64, String> {
    let sensitivity: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if sensitivity.is_finite() && sensitivity > 0.0 {
        Ok(sensitivity)
    } else {
        Err(format!("{value} is not a positive number"))
    }
}

fn parse_scale(value: &str) -> std::result::Result<f64, String> {
    let scale: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if (MIN_CAPTURE_SCALE..=MAX_CAPTURE_SCALE).contains(&scale) {
        Ok(scale)
    } else {
        Err(format!(
            "{value} is outside {MIN_CAPTURE_SCALE}..={MAX_CAPTURE_SCALE}"
        ))
    }
}

/// Parse `X,Y,W,H` into a rectangle
///
/// # Errors
///
/// Returns a message if there are not exactly four non-negative integers
pub fn parse_region(value: &str) -> std::result::Result<Rect, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("{value}: {e}"))?;
    match parts.as_slice() {
        &[x, y, width, height] => Ok(Rect::new(x, y, width, height)),
        _ => Err(format!("{value}: expected X,Y,W,H")),
    }
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by `-v` repetitions
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Presentation mode for text output
    pub const fn report_mode(&self) -> ReportMode {
        if self.debug {
            ReportMode::Debug {
                limit: self.debug_limit,
            }
        } else {
            ReportMode::Summary
        }
    }

    /// Analysis configuration from `--config`, or the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        self.config
            .as_deref()
            .map_or_else(|| Ok(AnalysisConfig::default()), AnalysisConfig::from_json_file)
    }
}

/// Counts of a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images analyzed
    pub processed: usize,
    /// Images where a grid was found
    pub detected: usize,
    /// Images where no grid was found
    pub failed: usize,
}

/// Runs the analyzer over every target image and writes the reports
pub struct FileProcessor {
    cli: Cli,
    analyzer: Analyzer,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor, loading the configuration named on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded
    pub fn new(cli: Cli) -> Result<Self> {
        let config = cli.analysis_config()?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            analyzer: Analyzer::new(&config),
            cli,
            progress_manager,
        })
    }

    /// Analyze every target and write reports to standard output
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be read or an image fails to load
    pub fn process(&mut self) -> Result<BatchSummary> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.process_into(&mut out)
    }

    /// Analyze every target and write reports to `out`
    ///
    /// A missing grid is reported and the batch continues; load, crop and
    /// write failures stop it.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be read, an image fails to load
    /// or crop, or `out` cannot be written
    pub fn process_into<W: Write>(&mut self, out: &mut W) -> Result<BatchSummary> {
        let files = self.collect_files()?;
        let batch = files.len() > 1;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut summary = BatchSummary::default();
        for file in &files {
            if let Some(ref pm) = self.progress_manager {
                pm.start_file(file);
            }

            let outcome = self.analyze_file(file)?;
            let grid_found = outcome.is_ok();
            self.write_report(out, file, batch, &outcome)?;

            summary.processed += 1;
            if grid_found {
                summary.detected += 1;
            } else {
                summary.failed += 1;
            }
            if let Some(ref pm) = self.progress_manager {
                pm.complete_file();
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        info!(
            processed = summary.processed,
            detected = summary.detected,
            failed = summary.failed,
            "batch finished"
        );
        Ok(summary)
    }

    /// Load, crop and analyze one image
    ///
    /// The outer error aborts the batch; the inner one is a per-image
    /// detection failure.
    fn analyze_file(&self, path: &Path) -> Result<Result<AnalysisResult>> {
        let mut image = load_rgb(path)?;
        if let Some(region) = self.cli.region {
            image = crop_scaled(&image, region, self.cli.scale_x, self.cli.scale_y)?;
        }

        let outcome = self
            .analyzer
            .analyze(&image, self.cli.sensitivity, self.cli.debug);
        match outcome {
            Ok(ref result) => info!(
                path = %path.display(),
                rows = result.rows(),
                cols = result.cols(),
                outliers = result.outliers.len(),
                "analyzed"
            ),
            Err(ref error) if error.is_detection_failure() => {
                warn!(path = %path.display(), %error, "no grid");
            }
            Err(error) => return Err(error),
        }
        Ok(outcome)
    }

    fn write_report<W: Write>(
        &self,
        out: &mut W,
        path: &Path,
        batch: bool,
        outcome: &Result<AnalysisResult>,
    ) -> Result<()> {
        let text = if self.cli.json {
            render_json(batch.then_some(path), outcome)?
        } else {
            let body = match outcome {
                Ok(result) => render_text(result, self.cli.report_mode()),
                Err(error) => render_error(error),
            };
            if batch {
                format!("== {} ==\n{body}\n", path.display())
            } else {
                body
            }
        };

        writeln!(out, "{text}").map_err(|source| AnalysisError::FileSystem {
            path: PathBuf::from("<stdout>"),
            operation: "write report",
            source,
        })
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_supported_image(target) {
                Ok(vec![target.clone()])
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("expected one of: {}", IMAGE_EXTENSIONS.join(", ")),
                ))
            }
        } else if target.is_dir() {
            let read_error = |source: std::io::Error| AnalysisError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if path.is_file() && is_supported_image(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or a directory",
            ))
        }
    }
}

/// Check whether a path has one of the recognized image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

//! Text and JSON presentation of analysis results

use crate::algorithm::executor::AnalysisResult;
use crate::io::error::{AnalysisError, Result};
use serde::Serialize;
use std::path::Path;

/// Message shown when no grid could be found
pub const NO_GRID_MESSAGE: &str = "no valid grid detected";

/// Message shown when no cell stands out
pub const UNIFORM_MESSAGE: &str = "all cells share the same color";

const OUTLIER_MARKER: &str = "*";

/// How much of a result to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Grid size and the outlier cells
    Summary,
    /// Grid size and every sampled cell, at most `limit` of them
    Debug {
        /// Maximum number of cell lines
        limit: usize,
    },
}

/// Render a result as human-readable text
///
/// Debug mode falls back to the summary when the result carries no per-cell
/// colors.
pub fn render_text(result: &AnalysisResult, mode: ReportMode) -> String {
    let (rows, cols) = result.grid;

    let lines: Vec<String> = match (mode, &result.all_colors) {
        (ReportMode::Debug { limit }, Some(cells)) => {
            let header = format!("Grid: {rows}x{cols} (debug)");
            let cell_lines = cells.iter().take(limit).map(|cell| {
                let marker = if result.is_outlier(cell.position()) {
                    OUTLIER_MARKER
                } else {
                    " "
                };
                format!("{marker} [{},{}] {}", cell.row, cell.col, cell.color)
            });
            let remainder = (cells.len() > limit)
                .then(|| format!("... and {} more cells", cells.len() - limit));

            std::iter::once(header)
                .chain(cell_lines)
                .chain(remainder)
                .collect()
        }
        _ if result.outliers.is_empty() => {
            vec![format!("Grid: {rows}x{cols}"), UNIFORM_MESSAGE.to_string()]
        }
        _ => std::iter::once(format!("Grid: {rows}x{cols}"))
            .chain(result.outliers.iter().map(|cell| {
                format!(
                    "{OUTLIER_MARKER} row {}, column {}  ({})",
                    cell.row, cell.col, cell.color
                )
            }))
            .collect(),
    };

    lines.join("\n")
}

/// Render a failure as human-readable text
pub fn render_error(error: &AnalysisError) -> String {
    if error.is_detection_failure() {
        NO_GRID_MESSAGE.to_string()
    } else {
        error.to_string()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
    #[serde(flatten)]
    result: Option<&'a AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Render a result or failure as a single-line JSON object
///
/// `path` is included when given, which lets batch output stay one object
/// per line.
///
/// # Errors
///
/// Returns [`AnalysisError::Report`] if serialization fails
pub fn render_json(path: Option<&Path>, outcome: &Result<AnalysisResult>) -> Result<String> {
    let report = match outcome {
        Ok(result) => JsonReport {
            path,
            result: Some(result),
            error: None,
        },
        Err(error) => JsonReport {
            path,
            result: None,
            error: Some(render_error(error)),
        },
    };
    Ok(serde_json::to_string(&report)?)
}

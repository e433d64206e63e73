//! Outlier classification as an ordered cascade of strategies
//!
//! Each stage inspects the same precomputed distances and either decides the
//! outcome (`Some`, possibly an empty set) or defers to the next stage
//! (`None`). The robust statistical tests come first; clustering and the
//! single-farthest heuristic only run when those tests have nothing usable to
//! work with, typically because the data is nearly uniform.

use crate::algorithm::bitset::CellSet;
use crate::algorithm::clustering::{farthest_pair, two_means};
use crate::io::configuration::ClassifierConfig;
use crate::math::color::{Color, distances_to_median};
use crate::math::statistics::{median_absolute_deviation, std_dev, z_scores};
use std::fmt;
use tracing::debug;

/// One step of the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stop with no outliers when no cell is far from the others
    IsolationGate,
    /// Z-scores of the mean distance to all other cells
    ZScore,
    /// Modified z-scores of the distance to the median color
    MedianDeviation,
    /// Minority cluster of a two-means split
    TwoCluster,
    /// Single cell farthest from the median color
    LastResort,
}

impl Stage {
    /// All stages in evaluation order
    pub const ALL: [Self; 5] = [
        Self::IsolationGate,
        Self::ZScore,
        Self::MedianDeviation,
        Self::TwoCluster,
        Self::LastResort,
    ];

    /// Run the stage; `None` defers to the next one
    pub fn run(self, evidence: &Evidence<'_>) -> Option<CellSet> {
        match self {
            Self::IsolationGate => isolation_gate(evidence),
            Self::ZScore => z_score_test(evidence),
            Self::MedianDeviation => median_deviation_test(evidence),
            Self::TwoCluster => two_cluster_split(evidence),
            Self::LastResort => farthest_from_median(evidence),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IsolationGate => "isolation gate",
            Self::ZScore => "z-score",
            Self::MedianDeviation => "median absolute deviation",
            Self::TwoCluster => "two-cluster split",
            Self::LastResort => "farthest from median",
        };
        f.write_str(name)
    }
}

/// Distances shared by every stage
#[derive(Debug, Clone)]
pub struct Evidence<'a> {
    colors: &'a [Color],
    config: &'a ClassifierConfig,
    /// Mean distance from each cell to every other cell
    pub avg_distances: Vec<f64>,
    /// Distance from each cell to the per-channel median color
    pub median_distances: Vec<f64>,
    /// Distance below which colors count as the same
    pub min_threshold: f64,
}

impl<'a> Evidence<'a> {
    /// Precompute distances for at least two colors
    pub fn gather(colors: &'a [Color], config: &'a ClassifierConfig, sensitivity: f64) -> Self {
        let others = colors.len().saturating_sub(1).max(1) as f64;
        let avg_distances = colors
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let total: f64 = colors
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, b)| a.distance(*b))
                    .sum();
                total / others
            })
            .collect();

        Self {
            colors,
            config,
            avg_distances,
            median_distances: distances_to_median(colors),
            min_threshold: config.min_threshold(sensitivity),
        }
    }

    fn set_of(&self, indices: impl IntoIterator<Item = usize>) -> CellSet {
        CellSet::from_indices(self.colors.len(), indices)
    }

    fn none(&self) -> CellSet {
        CellSet::new(self.colors.len())
    }
}

fn isolation_gate(evidence: &Evidence<'_>) -> Option<CellSet> {
    let most_isolated = evidence
        .avg_distances
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    (most_isolated < evidence.min_threshold).then(|| evidence.none())
}

fn z_score_test(evidence: &Evidence<'_>) -> Option<CellSet> {
    let spread = std_dev(&evidence.avg_distances)?;
    if spread <= evidence.config.min_spread {
        return None;
    }

    let scores = z_scores(&evidence.avg_distances)?;
    let flagged = evidence.set_of(
        scores
            .iter()
            .enumerate()
            .filter(|&(_, &z)| z > evidence.config.z_score_threshold)
            .map(|(i, _)| i),
    );
    (!flagged.is_empty()).then_some(flagged)
}

fn median_deviation_test(evidence: &Evidence<'_>) -> Option<CellSet> {
    let (center, mad) = median_absolute_deviation(&evidence.median_distances)?;
    if mad <= evidence.config.min_spread {
        return None;
    }

    let flagged = evidence.set_of(
        evidence
            .median_distances
            .iter()
            .enumerate()
            .filter(|&(_, &d)| {
                evidence.config.mad_scale * (d - center) / mad > evidence.config.modified_z_threshold
            })
            .map(|(i, _)| i),
    );
    (!flagged.is_empty()).then_some(flagged)
}

fn two_cluster_split(evidence: &Evidence<'_>) -> Option<CellSet> {
    let (a, b, distance) = farthest_pair(evidence.colors)?;
    if distance < evidence.min_threshold {
        return Some(evidence.none());
    }

    let partition = two_means(evidence.colors, (a, b), evidence.config.cluster_rounds);
    partition
        .minority()
        .map(|minority| evidence.set_of(minority.iter().copied()))
}

fn farthest_from_median(evidence: &Evidence<'_>) -> Option<CellSet> {
    let mut farthest: Option<(usize, f64)> = None;
    for (index, &distance) in evidence.median_distances.iter().enumerate() {
        if farthest.is_none_or(|(_, best)| distance > best) {
            farthest = Some((index, distance));
        }
    }

    Some(match farthest {
        Some((index, distance)) if distance > evidence.min_threshold => evidence.set_of([index]),
        _ => evidence.none(),
    })
}

/// Outcome of a classification, with the stage that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Anomalous cell indices
    pub outliers: CellSet,
    /// Deciding stage, `None` when there were too few cells to compare
    pub stage: Option<Stage>,
}

/// Flags cells whose color stands out from the rest
#[derive(Debug, Clone, Default)]
pub struct OutlierClassifier {
    config: ClassifierConfig,
}

impl OutlierClassifier {
    /// Create a classifier with the given thresholds
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Indices of anomalous cells
    ///
    /// Higher `sensitivity` lowers the distance a cell needs to stand out.
    pub fn classify(&self, colors: &[Color], sensitivity: f64) -> CellSet {
        self.verdict(colors, sensitivity).outliers
    }

    /// Anomalous cells together with the stage that decided them
    pub fn verdict(&self, colors: &[Color], sensitivity: f64) -> Verdict {
        if colors.len() < 2 {
            return Verdict {
                outliers: CellSet::new(colors.len()),
                stage: None,
            };
        }

        let evidence = Evidence::gather(colors, &self.config, sensitivity);
        for stage in Stage::ALL {
            if let Some(outliers) = stage.run(&evidence) {
                debug!(%stage, count = outliers.count(), "outlier stage decided");
                return Verdict {
                    outliers,
                    stage: Some(stage),
                };
            }
        }

        // LastResort always returns Some
        Verdict {
            outliers: evidence.none(),
            stage: None,
        }
    }
}

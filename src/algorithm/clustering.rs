//! Minimal two-means clustering of cell colors

use crate::math::color::{Color, mean_color};

/// Indices of the two most distant colors and their distance
///
/// Scans pairs `(i, j)` with `i < j` and keeps the first maximum. When every
/// pair is at distance zero the result is `(0, 1, 0.0)`. Returns `None` for
/// fewer than two colors.
pub fn farthest_pair(colors: &[Color]) -> Option<(usize, usize, f64)> {
    if colors.len() < 2 {
        return None;
    }

    let mut best = (0, 1, 0.0);
    for (i, a) in colors.iter().enumerate() {
        for (j, b) in colors.iter().enumerate().skip(i + 1) {
            let distance = a.distance(*b);
            if distance > best.2 {
                best = (i, j, distance);
            }
        }
    }
    Some(best)
}

/// Final partition of a two-means run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Indices assigned to the first center (ties go here)
    pub first: Vec<usize>,
    /// Indices assigned to the second center
    pub second: Vec<usize>,
}

impl Partition {
    /// Test whether either cluster ended up empty
    pub fn is_degenerate(&self) -> bool {
        self.first.is_empty() || self.second.is_empty()
    }

    /// The strictly smaller cluster, `None` for equal sizes or a degenerate split
    pub fn minority(&self) -> Option<&[usize]> {
        if self.is_degenerate() {
            return None;
        }
        match self.first.len().cmp(&self.second.len()) {
            std::cmp::Ordering::Less => Some(&self.first),
            std::cmp::Ordering::Greater => Some(&self.second),
            std::cmp::Ordering::Equal => None,
        }
    }
}

fn assign(colors: &[Color], first: Color, second: Color) -> Partition {
    let mut partition = Partition::default();
    for (index, color) in colors.iter().enumerate() {
        if color.distance(first) <= color.distance(second) {
            partition.first.push(index);
        } else {
            partition.second.push(index);
        }
    }
    partition
}

fn centroid(colors: &[Color], members: &[usize]) -> Option<Color> {
    let selected: Vec<Color> = members
        .iter()
        .filter_map(|&i| colors.get(i).copied())
        .collect();
    mean_color(&selected)
}

/// Alternate nearest-center assignment and centroid updates
///
/// Starts from the colors at `seeds`, runs at most `rounds` assignments and
/// stops early when a cluster empties or neither centroid moves. The returned
/// partition is the last assignment made; with zero rounds it is empty.
pub fn two_means(colors: &[Color], seeds: (usize, usize), rounds: usize) -> Partition {
    let (Some(&seed_a), Some(&seed_b)) = (colors.get(seeds.0), colors.get(seeds.1)) else {
        return Partition::default();
    };

    let (mut first, mut second) = (seed_a, seed_b);
    let mut partition = Partition::default();

    for _ in 0..rounds {
        partition = assign(colors, first, second);
        if partition.is_degenerate() {
            break;
        }

        let (Some(next_first), Some(next_second)) = (
            centroid(colors, &partition.first),
            centroid(colors, &partition.second),
        ) else {
            break;
        };

        if first.approx_eq(next_first) && second.approx_eq(next_second) {
            break;
        }
        first = next_first;
        second = next_second;
    }

    partition
}

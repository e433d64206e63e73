//! Grid geometry: cell rectangles in image space and row-major cell indexing
//!
//! A detected grid is an ordered list of rectangles, one per cell, where the
//! cell at zero-based `(row, col)` lives at index `row * cols + col`. Reports
//! use one-based coordinates, so conversions in both directions live here.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point, rounded down
    pub const fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Test whether the rectangle has zero area
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rectangle shrunk by `margin_x` on the left and right and `margin_y`
    /// on the top and bottom, saturating to an empty rectangle
    pub const fn inset(&self, margin_x: u32, margin_y: u32) -> Self {
        Self {
            x: self.x + margin_x,
            y: self.y + margin_y,
            width: self.width.saturating_sub(margin_x.saturating_mul(2)),
            height: self.height.saturating_sub(margin_y.saturating_mul(2)),
        }
    }
}

/// One-based position of a cell, as shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    /// Row, starting at 1
    pub row: usize,
    /// Column, starting at 1
    pub col: usize,
}

/// Detected grid layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Rect>,
}

impl Grid {
    /// Build a grid from row and column boundary coordinates
    ///
    /// Consecutive pairs of `row_splits` and `col_splits` delimit the cells.
    /// Returns `None` unless both axes have at least two boundaries.
    pub fn from_splits(row_splits: &[u32], col_splits: &[u32]) -> Option<Self> {
        if row_splits.len() < 2 || col_splits.len() < 2 {
            return None;
        }

        let rows = row_splits.len() - 1;
        let cols = col_splits.len() - 1;
        let mut cells = Vec::with_capacity(rows * cols);

        for row_pair in row_splits.windows(2) {
            let (Some(&top), Some(&bottom)) = (row_pair.first(), row_pair.get(1)) else {
                continue;
            };
            for col_pair in col_splits.windows(2) {
                let (Some(&left), Some(&right)) = (col_pair.first(), col_pair.get(1)) else {
                    continue;
                };
                cells.push(Rect::new(
                    left,
                    top,
                    right.saturating_sub(left),
                    bottom.saturating_sub(top),
                ));
            }
        }

        Some(Self { rows, cols, cells })
    }

    /// Partition a `width` x `height` area into equally sized cells
    ///
    /// Cell size is the integer quotient, so any remainder on the right and
    /// bottom edges is left outside the grid.
    pub fn uniform(width: u32, height: u32, rows: usize, cols: usize) -> Option<Self> {
        let rows_u32 = u32::try_from(rows).ok().filter(|&r| r > 0)?;
        let cols_u32 = u32::try_from(cols).ok().filter(|&c| c > 0)?;
        let cell_width = width / cols_u32;
        let cell_height = height / rows_u32;

        let cells = (0..rows_u32)
            .flat_map(|i| {
                (0..cols_u32)
                    .map(move |j| Rect::new(j * cell_width, i * cell_height, cell_width, cell_height))
            })
            .collect();

        Some(Self { rows, cols, cells })
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell rectangles in row-major order
    pub fn cells(&self) -> &[Rect] {
        &self.cells
    }

    /// Convert a zero-based cell index to a one-based position
    pub const fn position(&self, index: usize) -> Option<CellPosition> {
        if self.cols == 0 || index >= self.rows * self.cols {
            return None;
        }
        Some(CellPosition {
            row: index / self.cols + 1,
            col: index % self.cols + 1,
        })
    }

    /// Convert a one-based position back to a zero-based cell index
    pub const fn index_of(&self, position: CellPosition) -> Option<usize> {
        if position.row == 0
            || position.col == 0
            || position.row > self.rows
            || position.col > self.cols
        {
            return None;
        }
        Some((position.row - 1) * self.cols + (position.col - 1))
    }
}

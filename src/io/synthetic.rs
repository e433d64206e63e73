//! Rendered grid screenshots with known layout, for tests and benchmarks

use crate::spatial::Rect;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builder for a synthetic grid image
///
/// Cells are laid out row-major with `gutter` pixels between them and
/// `margin` pixels of background around the whole grid. Positions passed to
/// [`GridImage::with_cell`] are one-based like reported results.
#[derive(Debug, Clone)]
pub struct GridImage {
    rows: usize,
    cols: usize,
    colors: Vec<Rgb<u8>>,
    cell_size: u32,
    gutter: u32,
    margin: u32,
    background: Rgb<u8>,
    noise: Option<(u8, u64)>,
}

impl GridImage {
    /// Grid where every cell has the same color, on a white background
    pub fn uniform(rows: usize, cols: usize, color: [u8; 3]) -> Self {
        Self {
            rows,
            cols,
            colors: vec![Rgb(color); rows * cols],
            cell_size: 40,
            gutter: 10,
            margin: 20,
            background: Rgb([255, 255, 255]),
            noise: None,
        }
    }

    /// Gutterless grid alternating `even` and `odd` colors, with `even` in
    /// the top-left corner
    ///
    /// Such images have no contrast against their corners, so only the
    /// partition search can find a grid in them.
    pub fn checkerboard(rows: usize, cols: usize, even: [u8; 3], odd: [u8; 3]) -> Self {
        let colors = (0..rows * cols)
            .map(|i| {
                let (row, col) = (i / cols.max(1), i % cols.max(1));
                Rgb(if (row + col) % 2 == 0 { even } else { odd })
            })
            .collect();
        Self {
            colors,
            gutter: 0,
            margin: 0,
            ..Self::uniform(rows, cols, even)
        }
    }

    /// Recolor the cell at one-based `(row, col)`; out-of-range positions are ignored
    #[must_use]
    pub fn with_cell(mut self, row: usize, col: usize, color: [u8; 3]) -> Self {
        if let Some(cell) = self.index(row, col).and_then(|i| self.colors.get_mut(i)) {
            *cell = Rgb(color);
        }
        self
    }

    /// Side length of each square cell
    #[must_use]
    pub const fn cell_size(mut self, size: u32) -> Self {
        self.cell_size = size;
        self
    }

    /// Spacing between adjacent cells
    #[must_use]
    pub const fn gutter(mut self, gutter: u32) -> Self {
        self.gutter = gutter;
        self
    }

    /// Background border around the grid
    #[must_use]
    pub const fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Color of the gutters and margin
    #[must_use]
    pub const fn background(mut self, color: [u8; 3]) -> Self {
        self.background = Rgb(color);
        self
    }

    /// Perturb each cell pixel channel by up to `amplitude`, reproducibly per `seed`
    #[must_use]
    pub const fn noise(mut self, amplitude: u8, seed: u64) -> Self {
        self.noise = Some((amplitude, seed));
        self
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        ((1..=self.rows).contains(&row) && (1..=self.cols).contains(&col))
            .then(|| (row - 1) * self.cols + col - 1)
    }

    fn extent(&self, count: usize) -> u32 {
        let count = count as u32;
        2 * self.margin + count * self.cell_size + count.saturating_sub(1) * self.gutter
    }

    /// Rendered width in pixels
    pub fn width(&self) -> u32 {
        self.extent(self.cols)
    }

    /// Rendered height in pixels
    pub fn height(&self) -> u32 {
        self.extent(self.rows)
    }

    /// Pixel rectangle of the cell at one-based `(row, col)`
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        self.index(row, col)?;
        let pitch = self.cell_size + self.gutter;
        Some(Rect::new(
            self.margin + (col - 1) as u32 * pitch,
            self.margin + (row - 1) as u32 * pitch,
            self.cell_size,
            self.cell_size,
        ))
    }

    /// Draw the image
    pub fn render(&self) -> RgbImage {
        let mut image = RgbImage::from_pixel(self.width(), self.height(), self.background);
        let mut rng = self.noise.map(|(_, seed)| StdRng::seed_from_u64(seed));
        let amplitude = self.noise.map_or(0, |(a, _)| i16::from(a));

        for row in 1..=self.rows {
            for col in 1..=self.cols {
                let (Some(rect), Some(&color)) = (
                    self.cell_rect(row, col),
                    self.index(row, col).and_then(|i| self.colors.get(i)),
                ) else {
                    continue;
                };

                for y in rect.y..rect.bottom() {
                    for x in rect.x..rect.right() {
                        let pixel = rng.as_mut().map_or(color, |rng| {
                            Rgb(color.0.map(|channel| {
                                let offset = rng.random_range(-amplitude..=amplitude);
                                (i16::from(channel) + offset).clamp(0, 255) as u8
                            }))
                        });
                        image.put_pixel(x, y, pixel);
                    }
                }
            }
        }

        image
    }
}

/// Fill a rectangle, clipped to the image
pub fn paint_rect(image: &mut RgbImage, rect: Rect, color: [u8; 3]) {
    let right = rect.right().min(image.width());
    let bottom = rect.bottom().min(image.height());
    for y in rect.y..bottom {
        for x in rect.x..right {
            image.put_pixel(x, y, Rgb(color));
        }
    }
}

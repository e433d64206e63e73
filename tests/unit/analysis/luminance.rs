//! Tests for grayscale conversion, background estimation and foreground bounds

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use ndarray::{Axis, array};
    use oddcell::analysis::luminance::{
        background_level, foreground_bounds, foreground_mask, grayscale, line_density,
        occupied_extent, sub_view,
    };

    // Tests gray values are unweighted channel means indexed (row, col)
    #[test]
    fn test_grayscale() {
        let mut image = RgbImage::from_pixel(3, 2, Rgb([0, 0, 0]));
        image.put_pixel(2, 1, Rgb([30, 60, 90]));
        let gray = grayscale(&image);
        assert_eq!(gray.dim(), (2, 3));
        assert_eq!(gray.get((1, 2)).copied(), Some(60.0));
        assert_eq!(gray.get((0, 0)).copied(), Some(0.0));
    }

    // Tests the background is the median of the four corner patch means
    #[test]
    fn test_background_level() {
        let mut gray = ndarray::Array2::from_elem((20, 20), 200.0);
        for value in gray.slice_mut(ndarray::s![..5, ..5]).iter_mut() {
            *value = 0.0;
        }
        assert_eq!(background_level(&gray.view(), 5), Some(200.0));

        let empty = ndarray::Array2::<f64>::zeros((0, 0));
        assert_eq!(background_level(&empty.view(), 5), None);
    }

    // Tests corner patches are clipped on images smaller than the patch
    #[test]
    fn test_background_level_tiny_image() {
        let gray = array![[10.0, 20.0], [30.0, 40.0]];
        assert_eq!(background_level(&gray.view(), 5), Some(25.0));
    }

    // Tests foreground is strictly darker than the threshold
    #[test]
    fn test_foreground_mask() {
        let gray = array![[10.0, 50.0], [49.9, 80.0]];
        let mask = foreground_mask(&gray.view(), 50.0);
        assert_eq!(mask, array![[true, false], [true, false]]);
    }

    // Tests extents are half-open
    #[test]
    fn test_occupied_extent() {
        assert_eq!(occupied_extent(&[false, true, false, true, false]), Some((1, 4)));
        assert_eq!(occupied_extent(&[false, false]), None);
    }

    // Tests foreground bounds and per-line densities
    #[test]
    fn test_bounds_and_density() {
        let mask = array![
            [false, false, false, false],
            [false, true, true, false],
            [false, true, false, false],
        ];
        assert_eq!(foreground_bounds(&mask.view()), Some(((1, 3), (1, 3))));

        let rows = line_density(&mask.view(), Axis(0));
        assert_eq!(rows, vec![0.0, 0.5, 0.25]);
        let cols = line_density(&mask.view(), Axis(1));
        assert_eq!(cols.len(), 4);
        assert!((cols.get(1).copied().unwrap_or_default() - 2.0 / 3.0).abs() < 1e-12);

        let blank = ndarray::Array2::from_elem((3, 3), false);
        assert_eq!(foreground_bounds(&blank.view()), None);
    }

    // Tests windows keep their position and clamp to the view
    #[test]
    fn test_sub_view() {
        let grid = array![[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]];
        let view = grid.view();

        let window = sub_view(&view, 1..3, 2..4);
        assert_eq!(window, array![[7, 8], [11, 12]]);

        let clamped = sub_view(&view, 2..10, 3..10);
        assert_eq!(clamped, array![[12]]);

        let (start, end) = (2, 1);
        assert_eq!(sub_view(&view, start..end, 0..4).dim(), (0, 4));
        assert_eq!(sub_view(&view, 5..6, 0..1).dim(), (0, 1));
    }
}

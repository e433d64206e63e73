//! Tests for cell rectangles and row-major position mapping

#[cfg(test)]
mod tests {
    use oddcell::spatial::{CellPosition, Grid, Rect};

    // Tests rectangle edges and center
    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(10, 20, 31, 40);
        assert_eq!(rect.right(), 41);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center(), (25, 40));
        assert!(!rect.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    // Tests inset shrinks symmetrically and saturates
    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0, 0, 100, 50);
        assert_eq!(rect.inset(15, 10), Rect::new(15, 10, 70, 30));
        assert!(rect.inset(60, 0).is_empty());
    }

    // Tests split lists need at least two entries per axis
    #[test]
    fn test_from_splits_requires_bounds() {
        assert!(Grid::from_splits(&[0], &[0, 10]).is_none());
        assert!(Grid::from_splits(&[0, 10], &[]).is_none());
    }

    // Tests cells are produced row-major between consecutive splits
    #[test]
    fn test_from_splits_layout() {
        let grid = Grid::from_splits(&[0, 10, 30], &[5, 15, 20, 40])
            .expect("two row and three column intervals should form a grid");
        assert_eq!((grid.rows(), grid.cols()), (2, 3));
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.cells().first(), Some(&Rect::new(5, 0, 10, 10)));
        assert_eq!(grid.cells().get(2), Some(&Rect::new(20, 0, 20, 10)));
        assert_eq!(grid.cells().get(3), Some(&Rect::new(5, 10, 10, 20)));
    }

    // Tests uniform partitions drop the integer remainder
    #[test]
    fn test_uniform_partition() {
        let grid = Grid::uniform(103, 50, 2, 4).expect("a 2x4 partition is valid");
        assert_eq!(grid.len(), 8);
        assert!(grid.cells().iter().all(|c| c.width == 25 && c.height == 25));
        assert_eq!(grid.cells().last(), Some(&Rect::new(75, 25, 25, 25)));
        assert!(Grid::uniform(100, 100, 0, 3).is_none());
    }

    // Tests index to position conversion is one-based and bounded
    #[test]
    fn test_position_mapping() {
        let grid = Grid::uniform(90, 60, 2, 3).expect("a 2x3 partition is valid");
        assert_eq!(grid.position(0), Some(CellPosition { row: 1, col: 1 }));
        assert_eq!(grid.position(4), Some(CellPosition { row: 2, col: 2 }));
        assert_eq!(grid.position(6), None);
        assert_eq!(grid.index_of(CellPosition { row: 2, col: 3 }), Some(5));
        assert_eq!(grid.index_of(CellPosition { row: 0, col: 1 }), None);
        assert_eq!(grid.index_of(CellPosition { row: 3, col: 1 }), None);
    }

    // Tests every index round-trips through its position
    #[test]
    fn test_position_bijection() {
        let grid = Grid::uniform(140, 100, 4, 7).expect("a 4x7 partition is valid");
        for index in 0..grid.len() {
            let position = grid.position(index);
            assert_eq!(position.and_then(|p| grid.index_of(p)), Some(index));
        }
    }
}

//! Tests for mean, deviation, median and z-score helpers

#[cfg(test)]
mod tests {
    use oddcell::math::statistics::{
        approx_eq, mean, median, median_absolute_deviation, std_dev, z_scores,
    };

    // Tests empty input yields no statistics
    #[test]
    fn test_empty_input() {
        let empty: [f64; 0] = [];
        assert!(mean(&empty).is_none());
        assert!(std_dev(&empty).is_none());
        assert!(median(&empty).is_none());
        assert!(median_absolute_deviation(&empty).is_none());
        assert!(z_scores(&empty).is_none());
    }

    // Tests standard deviation divides by n rather than n - 1
    #[test]
    fn test_population_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(std_dev(&values), Some(2.0));
    }

    // Tests odd and even median selection
    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0_f32]), Some(7.0));
    }

    // Tests MAD is reported alongside the median it was measured from
    #[test]
    fn test_median_absolute_deviation() {
        let values = [1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0];
        let (center, mad) = median_absolute_deviation(&values).unwrap_or((0.0, 0.0));
        assert_eq!(center, 2.0);
        assert_eq!(mad, 1.0);
    }

    // Tests z-scores are unavailable for zero spread
    #[test]
    fn test_z_scores_zero_spread() {
        assert!(z_scores(&[3.0, 3.0, 3.0]).is_none());
    }

    // Tests z-scores are centered and scaled by the population deviation
    #[test]
    fn test_z_scores_values() {
        let scores = z_scores(&[1.0, 3.0]).unwrap_or_default();
        assert_eq!(scores, vec![-1.0, 1.0]);
    }

    // Tests tolerance is relative to the second argument
    #[test]
    fn test_approx_eq_tolerances() {
        assert!(approx_eq(100.0, 100.0005, 1e-5, 1e-8));
        assert!(!approx_eq(100.0, 100.01, 1e-5, 1e-8));
        assert!(approx_eq(0.0, 1e-9, 1e-5, 1e-8));
        assert!(!approx_eq(0.0, 1e-7, 1e-5, 1e-8));
    }
}

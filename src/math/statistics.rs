//! Order and moment statistics over slices of floating point samples

use num_traits::Float;

/// Arithmetic mean, `None` for an empty slice
pub fn mean<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    T::from(values.len()).map(|n| sum / n)
}

/// Population standard deviation (divides by `n`, not `n - 1`)
pub fn std_dev<T: Float>(values: &[T]) -> Option<T> {
    let mu = mean(values)?;
    let squared: Vec<T> = values.iter().map(|&v| (v - mu) * (v - mu)).collect();
    mean(&squared).map(Float::sqrt)
}

/// Median; even-length input averages the two middle values
///
/// NaN samples are ordered as equal to everything, so the result is only
/// meaningful for finite input.
pub fn median<T: Float>(values: &[T]) -> Option<T> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    let upper = sorted.get(mid).copied()?;
    if sorted.len() % 2 == 0 {
        let lower = sorted.get(mid - 1).copied()?;
        T::from(2.0).map(|two| (lower + upper) / two)
    } else {
        Some(upper)
    }
}

/// Median and median absolute deviation `median(|x - median(x)|)`
pub fn median_absolute_deviation<T: Float>(values: &[T]) -> Option<(T, T)> {
    let center = median(values)?;
    let deviations: Vec<T> = values.iter().map(|&v| (v - center).abs()).collect();
    median(&deviations).map(|mad| (center, mad))
}

/// Standard z-scores, `None` when the spread is zero
pub fn z_scores<T: Float>(values: &[T]) -> Option<Vec<T>> {
    let mu = mean(values)?;
    let sigma = std_dev(values)?;
    if sigma <= T::zero() {
        return None;
    }
    Some(values.iter().map(|&v| (v - mu) / sigma).collect())
}

/// Near-equality with the relative/absolute tolerances numeric libraries use
/// for `allclose`: `|a - b| <= atol + rtol * |b|`
pub fn approx_eq<T: Float>(a: T, b: T, rtol: T, atol: T) -> bool {
    (a - b).abs() <= atol + rtol * b.abs()
}

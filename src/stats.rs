//! Mean and variance over flattened pixel buffers.
//!
//! Both functions require non-empty input: frame buffers have fixed,
//! non-zero dimensions, so callers guarantee this. An empty slice is
//! undefined (NaN) and trips a debug assertion rather than an error.

/// Arithmetic mean of a sequence
pub fn mean(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty(), "mean of empty sequence");
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance using a single reference mean.
///
/// Two passes, no Bessel correction: `mean((x - mean(xs))^2)`.
pub fn variance(values: &[f64]) -> f64 {
    debug_assert!(!values.is_empty(), "variance of empty sequence");
    let m = mean(values);
    values.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_simple() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean(&[5.0]), 5.0);
    }

    #[test]
    fn test_variance_known_values() {
        // Population variance of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(variance(&values), 4.0);
    }

    #[test]
    fn test_variance_all_equal_is_zero() {
        assert_eq!(variance(&[3.5]), 0.0);
        assert_eq!(variance(&[128.0; 1000]), 0.0);
    }

    #[test]
    fn test_variance_no_bessel_correction() {
        // Sample variance of [1, 3] would be 2; population variance is 1
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
    }

    #[test]
    #[should_panic(expected = "mean of empty sequence")]
    fn test_mean_empty_fails_fast() {
        let _ = mean(&[]);
    }

    #[test]
    #[should_panic(expected = "variance of empty sequence")]
    fn test_variance_empty_fails_fast() {
        let _ = variance(&[]);
    }
}

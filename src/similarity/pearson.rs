// Pearson correlation between two dense rating vectors.
//
// Mean-centered covariance over the product of standard deviations. A
// constant vector has no variance, so the correlation is undefined and
// we return None rather than inventing a number.

/// Pearson correlation of two equal-length vectors, in [-1, 1].
///
/// Returns `None` for fewer than two observations or when either vector
/// has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let n = a.len();
    if n != b.len() || n < 2 {
        return None;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < f64::EPSILON {
        None
    } else {
        Some((cov / denom).clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&a, &b).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative() {
        let a = [1.0, 2.0, 3.0];
        let b = [3.0, 2.0, 1.0];
        assert!((pearson(&a, &b).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_vector_is_undefined() {
        let flat = [3.0, 3.0, 3.0];
        let b = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&flat, &b), None);
        assert_eq!(pearson(&flat, &flat), None);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[], &[]), None);
    }

    #[test]
    fn test_known_value() {
        // Mean-centered: a = [-1, 0, 1], b = [-1, -1, 2]
        // cov = 1 + 0 + 2 = 3, var_a = 2, var_b = 6
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 1.0, 4.0];
        let expected = 3.0 / (12.0f64).sqrt();
        assert!((pearson(&a, &b).unwrap() - expected).abs() < 1e-12);
    }
}

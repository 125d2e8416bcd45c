// Turning two sparse rating columns into a pair of dense vectors.

use super::metric::Imputation;

/// Build the dense vectors a metric compares for one user pair.
///
/// Zero and mean fill keep every item, so both vectors have the item count
/// as their length. Exclude keeps only the items both users rated, so the
/// vectors can be empty.
pub fn paired_vectors(
    a: &[Option<f64>],
    b: &[Option<f64>],
    imputation: Imputation,
) -> (Vec<f64>, Vec<f64>) {
    match imputation {
        Imputation::Zero => (fill(a, 0.0), fill(b, 0.0)),
        Imputation::Mean => (fill(a, observed_mean(a)), fill(b, observed_mean(b))),
        Imputation::Exclude => a
            .iter()
            .zip(b)
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
            .unzip(),
    }
}

/// Number of positions where both columns have a rating.
pub fn co_rated_count(a: &[Option<f64>], b: &[Option<f64>]) -> usize {
    a.iter()
        .zip(b)
        .filter(|(x, y)| x.is_some() && y.is_some())
        .count()
}

fn fill(column: &[Option<f64>], missing: f64) -> Vec<f64> {
    column.iter().map(|r| r.unwrap_or(missing)).collect()
}

fn observed_mean(column: &[Option<f64>]) -> f64 {
    let (sum, count) = column
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), r| (s + r, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [Option<f64>; 4] = [Some(4.0), None, Some(2.0), Some(3.0)];
    const B: [Option<f64>; 4] = [Some(1.0), Some(5.0), None, Some(2.0)];

    #[test]
    fn test_zero_fill() {
        let (a, b) = paired_vectors(&A, &B, Imputation::Zero);
        assert_eq!(a, vec![4.0, 0.0, 2.0, 3.0]);
        assert_eq!(b, vec![1.0, 5.0, 0.0, 2.0]);
    }

    #[test]
    fn test_mean_fill() {
        let (a, b) = paired_vectors(&A, &B, Imputation::Mean);
        assert_eq!(a, vec![4.0, 3.0, 2.0, 3.0]);
        assert!((b[2] - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_fill_empty_column() {
        let empty = [None, None];
        let (a, _) = paired_vectors(&empty, &[Some(1.0), None], Imputation::Mean);
        assert_eq!(a, vec![0.0, 0.0]);
    }

    #[test]
    fn test_exclude_keeps_co_rated_only() {
        let (a, b) = paired_vectors(&A, &B, Imputation::Exclude);
        assert_eq!(a, vec![4.0, 3.0]);
        assert_eq!(b, vec![1.0, 2.0]);
        assert_eq!(co_rated_count(&A, &B), 2);
    }
}

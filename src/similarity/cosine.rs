// Cosine similarity between two dense rating vectors.
//
//   cos(a, b) = dot(a, b) / (|a| * |b|)
//
// Defined as 0.0 when either vector has zero magnitude, so an all-zero
// user (nothing rated, under zero fill) is similar to nobody, itself included.

/// Cosine similarity of two equal-length vectors, in [-1, 1].
///
/// Non-negative ratings give a score in [0, 1].
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        // Rounding can push parallel vectors a hair past 1.0
        (dot / (mag_a * mag_b)).clamp(-1.0, 1.0)
    }
}

// Output formatting — terminal display of predictions, rankings and matrices.

pub mod terminal;

/// Format an optional score for display, or "n/a" when undefined.
///
/// Undefined results are shown as such, never as 0 or NaN.
pub fn format_score(score: Option<f64>, decimals: usize) -> String {
    match score {
        Some(s) => format!("{s:.decimals$}"),
        None => "n/a".to_string(),
    }
}

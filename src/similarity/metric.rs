// Similarity metric and imputation strategy selection.
//
// Both are plain enums. `Metric` dispatches to one of two stateless
// functions with the same (vector, vector) -> score shape; `Imputation`
// decides what a missing rating turns into before either function sees it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{cosine, pearson};

/// Which similarity function to use between two user vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Cosine,
    Pearson,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Cosine, Metric::Pearson];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cosine => "cosine",
            Metric::Pearson => "pearson",
        }
    }

    /// Score two equal-length vectors. `None` means the metric is undefined
    /// for this pair (Pearson on a constant vector).
    pub fn score(&self, a: &[f64], b: &[f64]) -> Option<f64> {
        match self {
            Metric::Cosine => Some(cosine::cosine(a, b)),
            Metric::Pearson => pearson::pearson(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Metric::Cosine),
            "pearson" => Ok(Metric::Pearson),
            other => Err(format!("unknown metric '{other}' (expected cosine or pearson)")),
        }
    }
}

/// How missing ratings are handled when building user vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Imputation {
    /// Missing ratings count as 0 across all items. Unrated items look
    /// like low ratings, which biases toward users who rated less.
    #[default]
    Zero,
    /// Missing ratings take the user's own mean observed rating
    /// (0 for a user with no ratings at all).
    Mean,
    /// Only items both users rated contribute to the pair's vectors.
    Exclude,
}

impl Imputation {
    pub fn name(&self) -> &'static str {
        match self {
            Imputation::Zero => "zero",
            Imputation::Mean => "mean",
            Imputation::Exclude => "exclude",
        }
    }
}

impl fmt::Display for Imputation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Imputation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(Imputation::Zero),
            "mean" => Ok(Imputation::Mean),
            "exclude" => Ok(Imputation::Exclude),
            other => Err(format!(
                "unknown imputation '{other}' (expected zero, mean or exclude)"
            )),
        }
    }
}

/// Options for building a similarity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimilarityOptions {
    pub imputation: Imputation,
}

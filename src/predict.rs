// Predictor — similarity-weighted average over the users who rated an item.
//
//   prediction = sum(sim(u, v) * r(v, i)) / sum(|sim(u, v)|)
//
// taken over every v who rated item i. The result is undefined (None) when
// nobody rated the item, when the weights sum to zero, or when any rater's
// similarity to u is itself undefined. It's never replaced by 0 or a mean.
//
// The target user is not excluded from the raters by default. When u has
// already rated i, their own rating joins the average at self-similarity
// (1.0 for a nonzero vector). `PredictOptions::include_self` turns that off,
// e.g. for backtesting against ratings the user already gave.

use serde::Serialize;
use tracing::debug;

use crate::error::LookupError;
use crate::ratings::RatingMatrix;
use crate::similarity::{Metric, SimilarityMatrix};

/// Knobs for a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictOptions {
    /// Let the target user's own rating of the item contribute (default true).
    pub include_self: bool,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self { include_self: true }
    }
}

/// An estimated rating for one (user, item) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub user: String,
    pub item: String,
    pub method: Metric,
    /// `None` when the prediction is undefined
    pub score: Option<f64>,
    /// How many raters contributed to the weighted sum
    pub raters: usize,
}

/// Predict `user`'s rating of `item` with default options.
pub fn predict(
    user: &str,
    item: &str,
    similarity: &SimilarityMatrix,
    ratings: &RatingMatrix,
) -> Result<Prediction, LookupError> {
    predict_with(user, item, similarity, ratings, &PredictOptions::default())
}

/// Predict `user`'s rating of `item`.
///
/// `user` must appear in the similarity matrix and `item` in the rating
/// matrix. Every rater of `item` must also appear in the similarity matrix,
/// which always holds when it was computed from `ratings`.
pub fn predict_with(
    user: &str,
    item: &str,
    similarity: &SimilarityMatrix,
    ratings: &RatingMatrix,
    options: &PredictOptions,
) -> Result<Prediction, LookupError> {
    let u = similarity.user_position(user)?;
    let i = ratings.item_position(item)?;

    let mut weighted_sum = 0.0;
    let mut sum_of_weights = 0.0;
    let mut raters = 0;
    let mut undefined_similarity = false;

    for (v, rating) in ratings.raters(i) {
        let other = &ratings.users()[v];
        if !options.include_self && other == user {
            continue;
        }
        let sv = similarity.user_position(other)?;
        raters += 1;

        match similarity.get(u, sv) {
            Some(s) => {
                weighted_sum += s * rating;
                sum_of_weights += s.abs();
            }
            None => undefined_similarity = true,
        }
    }

    let score = if raters == 0 {
        debug!(user, item, "No raters for item; prediction undefined");
        None
    } else if undefined_similarity {
        debug!(
            user,
            item,
            method = %similarity.metric(),
            "Undefined similarity among raters; prediction undefined"
        );
        None
    } else if sum_of_weights == 0.0 {
        debug!(user, item, raters, "Similarity weights sum to zero; prediction undefined");
        None
    } else {
        Some(weighted_sum / sum_of_weights)
    };

    Ok(Prediction {
        user: user.to_string(),
        item: item.to_string(),
        method: similarity.metric(),
        score,
        raters,
    })
}

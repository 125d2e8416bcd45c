// Top-N recommendation — rank every item a user hasn't rated.
//
// Each unrated item is scored through the predictor. A failed or undefined
// prediction doesn't abort the batch: the item stays in the list with no
// score and sorts below every scored item.

use std::cell::OnceCell;
use std::cmp::Ordering;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::LookupError;
use crate::predict::{self, PredictOptions, Prediction};
use crate::ratings::RatingMatrix;
use crate::similarity::{self, Metric, SimilarityMatrix, SimilarityOptions};

/// One ranked item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub item: String,
    /// `None` when the prediction was undefined
    pub score: Option<f64>,
}

/// The `n` best unrated items for `user`, highest predicted score first.
///
/// `method` names the metric the caller expects `similarity` to have been
/// built with; a mismatch is an error rather than a silently mixed ranking.
pub fn top_n(
    user: &str,
    n: usize,
    similarity: &SimilarityMatrix,
    ratings: &RatingMatrix,
    method: Metric,
) -> Result<Vec<Recommendation>> {
    top_n_with(user, n, similarity, ratings, method, &PredictOptions::default())
}

/// `top_n` with explicit predictor options.
pub fn top_n_with(
    user: &str,
    n: usize,
    similarity: &SimilarityMatrix,
    ratings: &RatingMatrix,
    method: Metric,
    options: &PredictOptions,
) -> Result<Vec<Recommendation>> {
    if similarity.metric() != method {
        anyhow::bail!(
            "similarity matrix was computed with {}, not {method}",
            similarity.metric()
        );
    }

    let u = ratings.user_position(user)?;
    similarity.user_position(user)?;

    if n == 0 {
        return Ok(Vec::new());
    }

    let candidates = ratings.unrated_items(u);
    let mut ranked: Vec<Recommendation> = candidates
        .iter()
        .map(|&i| {
            let item = &ratings.items()[i];
            let score = match predict::predict_with(user, item, similarity, ratings, options) {
                Ok(prediction) => prediction.score,
                Err(e) => {
                    warn!(
                        user,
                        item = %item,
                        error = %e,
                        "Prediction failed; ranking as undefined"
                    );
                    None
                }
            };
            Recommendation {
                item: item.clone(),
                score,
            }
        })
        .collect();

    // Stable sort: ties keep item order
    ranked.sort_by(|a, b| compare_scores(a.score, b.score));
    ranked.truncate(n);

    info!(
        user,
        method = %method,
        candidates = candidates.len(),
        returned = ranked.len(),
        "Top-N recommendations ranked"
    );
    Ok(ranked)
}

/// Descending by score, with undefined scores after every defined one.
fn compare_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A rating matrix plus lazily computed similarity, one matrix per metric.
///
/// Similarity is computed on first use and reused by every later prediction.
/// Changing a rating drops all of it; the next query recomputes from scratch.
pub struct Recommender {
    ratings: RatingMatrix,
    similarity_options: SimilarityOptions,
    predict_options: PredictOptions,
    cosine: OnceCell<SimilarityMatrix>,
    pearson: OnceCell<SimilarityMatrix>,
}

impl Recommender {
    pub fn new(
        ratings: RatingMatrix,
        similarity_options: SimilarityOptions,
        predict_options: PredictOptions,
    ) -> Self {
        Self {
            ratings,
            similarity_options,
            predict_options,
            cosine: OnceCell::new(),
            pearson: OnceCell::new(),
        }
    }

    pub fn ratings(&self) -> &RatingMatrix {
        &self.ratings
    }

    /// The similarity matrix for `metric`, computing it if needed.
    pub fn similarity(&self, metric: Metric) -> &SimilarityMatrix {
        let cell = match metric {
            Metric::Cosine => &self.cosine,
            Metric::Pearson => &self.pearson,
        };
        cell.get_or_init(|| {
            similarity::compute_similarity_with(&self.ratings, metric, &self.similarity_options)
        })
    }

    /// Whether the similarity matrix for `metric` is currently memoized.
    pub fn is_cached(&self, metric: Metric) -> bool {
        match metric {
            Metric::Cosine => self.cosine.get().is_some(),
            Metric::Pearson => self.pearson.get().is_some(),
        }
    }

    pub fn predict(
        &self,
        user: &str,
        item: &str,
        metric: Metric,
    ) -> Result<Prediction, LookupError> {
        predict::predict_with(
            user,
            item,
            self.similarity(metric),
            &self.ratings,
            &self.predict_options,
        )
    }

    pub fn top_n(&self, user: &str, n: usize, metric: Metric) -> Result<Vec<Recommendation>> {
        top_n_with(
            user,
            n,
            self.similarity(metric),
            &self.ratings,
            metric,
            &self.predict_options,
        )
    }

    /// Set or clear one rating and invalidate all memoized similarity.
    pub fn set_rating(
        &mut self,
        item: &str,
        user: &str,
        rating: Option<f64>,
    ) -> Result<Option<f64>> {
        let previous = self.ratings.set_rating(item, user, rating)?;
        self.cosine.take();
        self.pearson.take();
        Ok(previous)
    }
}

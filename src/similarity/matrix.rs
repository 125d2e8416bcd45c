// The user x user similarity matrix and the engine that builds it.
//
// Every pair is computed eagerly. The upper triangle is computed once and
// mirrored, so sim(a, b) and sim(b, a) are the same f64, not just close.
// The matrix is a pure function of the rating matrix it came from; if the
// ratings change, build a new one.

use std::collections::HashMap;

use tracing::{debug, info};

use super::metric::{Metric, SimilarityOptions};
use super::vectors::{co_rated_count, paired_vectors};
use crate::error::LookupError;
use crate::ratings::RatingMatrix;

/// Pairwise user similarity under one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    metric: Metric,
    options: SimilarityOptions,
    users: Vec<String>,
    user_index: HashMap<String, usize>,
    /// Row-major `n x n`; `None` where the metric is undefined
    scores: Vec<Option<f64>>,
    /// Row-major `n x n` count of items both users rated
    co_rated: Vec<usize>,
}

/// Build the similarity matrix for every user pair with default options
/// (zero-filled missing ratings).
pub fn compute_similarity(ratings: &RatingMatrix, metric: Metric) -> SimilarityMatrix {
    compute_similarity_with(ratings, metric, &SimilarityOptions::default())
}

/// Build the similarity matrix for every user pair.
pub fn compute_similarity_with(
    ratings: &RatingMatrix,
    metric: Metric,
    options: &SimilarityOptions,
) -> SimilarityMatrix {
    let n = ratings.user_count();
    let columns: Vec<Vec<Option<f64>>> = (0..n).map(|u| ratings.user_column(u)).collect();

    let mut scores = vec![None; n * n];
    let mut co_rated = vec![0; n * n];

    for a in 0..n {
        for b in a..n {
            let (va, vb) = paired_vectors(&columns[a], &columns[b], options.imputation);
            let score = metric.score(&va, &vb);
            let shared = co_rated_count(&columns[a], &columns[b]);

            scores[a * n + b] = score;
            scores[b * n + a] = score;
            co_rated[a * n + b] = shared;
            co_rated[b * n + a] = shared;
        }
    }

    let undefined = scores.iter().filter(|s| s.is_none()).count();
    if undefined > 0 {
        debug!(
            metric = %metric,
            undefined,
            "Some user pairs have no defined similarity"
        );
    }
    info!(
        metric = %metric,
        imputation = %options.imputation,
        users = n,
        items = ratings.item_count(),
        "Similarity matrix computed"
    );

    let users = ratings.users().to_vec();
    let user_index = users
        .iter()
        .enumerate()
        .map(|(i, u)| (u.clone(), i))
        .collect();

    SimilarityMatrix {
        metric,
        options: *options,
        users,
        user_index,
        scores,
        co_rated,
    }
}

impl SimilarityMatrix {
    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn options(&self) -> &SimilarityOptions {
        &self.options
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn user_position(&self, user: &str) -> Result<usize, LookupError> {
        self.user_index
            .get(user)
            .copied()
            .ok_or_else(|| LookupError::UnknownUser(user.to_string()))
    }

    /// Positional access. Panics on out-of-range positions.
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.scores[a * self.users.len() + b]
    }

    /// Similarity between two users by identifier.
    pub fn score(&self, a: &str, b: &str) -> Result<Option<f64>, LookupError> {
        let a = self.user_position(a)?;
        let b = self.user_position(b)?;
        Ok(self.get(a, b))
    }

    /// One user's similarity to every user, in user order.
    pub fn row(&self, user: usize) -> &[Option<f64>] {
        let n = self.users.len();
        &self.scores[user * n..(user + 1) * n]
    }

    /// Number of items both users rated.
    pub fn co_rated(&self, a: &str, b: &str) -> Result<usize, LookupError> {
        let a = self.user_position(a)?;
        let b = self.user_position(b)?;
        Ok(self.co_rated[a * self.users.len() + b])
    }

    /// The `k` users most similar to `user`, excluding the user themselves.
    ///
    /// Pairs with an undefined score are skipped. Ties keep user order.
    pub fn neighbors(&self, user: &str, k: usize) -> Result<Vec<(&str, f64)>, LookupError> {
        let u = self.user_position(user)?;
        let mut ranked: Vec<(&str, f64)> = self
            .row(u)
            .iter()
            .enumerate()
            .filter(|(v, _)| *v != u)
            .filter_map(|(v, s)| s.map(|s| (self.users[v].as_str(), s)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);
        Ok(ranked)
    }
}

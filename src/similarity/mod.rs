// Similarity engine — user x user similarity under cosine or Pearson.

pub mod cosine;
pub mod matrix;
pub mod metric;
pub mod pearson;
pub mod vectors;

pub use matrix::{compute_similarity, compute_similarity_with, SimilarityMatrix};
pub use metric::{Imputation, Metric, SimilarityOptions};

// Rating data — the matrix type, the built-in dataset, and the JSON source.

pub mod loader;
pub mod matrix;
pub mod reference;

pub use matrix::RatingMatrix;

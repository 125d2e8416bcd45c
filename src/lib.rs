// usercf: user-based collaborative filtering over sparse rating matrices.
//
// This is the library root. Data flows one way through the modules:
// ratings -> similarity -> predict -> recommend. Output formatting sits
// beside the pipeline and only consumes its results.

pub mod config;
pub mod error;
pub mod output;
pub mod predict;
pub mod ratings;
pub mod recommend;
pub mod similarity;

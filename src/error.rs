// Lookup errors for identifiers that don't exist in a matrix.
//
// Everything else in the crate reports through anyhow. These are typed so
// callers can tell a bad identifier apart from an undefined prediction,
// which is not an error at all (it's `None`).

use thiserror::Error;

/// A user or item identifier was not found in the matrix being queried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),
}

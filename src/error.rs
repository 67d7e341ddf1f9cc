//! Error types shared by the TSP and game pipelines.

use thiserror::Error;

/// Crate-wide error type.
///
/// Every variant is a contract violation by the caller (malformed input or
/// configuration). Operations that fail leave no side effects behind.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A route given to cost evaluation is not a permutation of the known
    /// locations.
    #[error("invalid route: {reason}")]
    InvalidRoute { reason: String },

    /// Distance matrix is empty, not square, asymmetric, or has bad entries.
    #[error("invalid distance matrix: {reason}")]
    InvalidMatrix { reason: String },

    /// Attempted to play on an occupied or out-of-range cell.
    #[error("illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    /// A board that no legal sequence of moves can produce.
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    /// Solver configuration rejected by validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Brute-force enumeration refused because the instance is too large.
    #[error("instance with {locations} locations exceeds the brute-force limit of {limit}")]
    InstanceTooLarge { locations: usize, limit: usize },
}

impl Error {
    pub(crate) fn invalid_route(reason: impl Into<String>) -> Self {
        Error::InvalidRoute {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_matrix(reason: impl Into<String>) -> Self {
        Error::InvalidMatrix {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Identity is missing its user id.
    #[error("identity has no user id")]
    MissingUserId,

    /// Storage error.
    #[error("storage error: {0}")]
    Cache(#[from] mart_cache::CacheError),
}

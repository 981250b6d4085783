//! Errors surfaced to callers of [`QueryResolver`](crate::resolver::QueryResolver).
//!
//! Matcher failures never appear here: they are logged and absorbed at
//! the token level and never reach the caller.

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("project lookup failed: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;

/// Why one matcher contributed nothing for one token.
///
/// Logged by the token resolver and then treated as an empty result.
#[derive(Debug, thiserror::Error)]
pub enum MatcherFailure {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("matcher panicked: {0}")]
    Panicked(String),
}

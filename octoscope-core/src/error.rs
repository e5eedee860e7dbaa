//! Error taxonomy shared by the core components.
//!
//! Only [`SearchError`] ever reaches the user. Suggestion failures are
//! swallowed by the suggestion controller and [`StoreError`] is absorbed by
//! the saved-profile store.

use thiserror::Error;

/// Why a profile service call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    NotFound,
    RateLimited,
    Timeout,
    Network,
}

/// A failed [`crate::service::ProfileService`] call.
///
/// `message` is user-facing and shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The error state held by the search orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The submitted username was blank.
    #[error("Please enter a username")]
    EmptyUsername,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// A key-value backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

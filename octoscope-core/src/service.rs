use futures::future::BoxFuture;

use crate::error::ServiceError;
use crate::types::{ProfileBundle, ProfileSummary};

/// The remote side of the app: username search and profile lookup.
///
/// Both methods return `'static` futures so callers can move them onto a
/// spawned task without borrowing the service. Implementations clone whatever
/// they need out of `self` before building the future.
pub trait ProfileService: Send + Sync {
    /// Returns profiles whose username (or display name) matches `query`, in
    /// service order. A blank query yields an empty list, never an error.
    fn search(&self, query: &str) -> BoxFuture<'static, Result<Vec<ProfileSummary>, ServiceError>>;

    /// Loads one profile and its repositories. Lookup is case-insensitive; the
    /// returned profile carries the canonical username.
    fn fetch(&self, username: &str) -> BoxFuture<'static, Result<ProfileBundle, ServiceError>>;
}

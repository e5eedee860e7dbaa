//! Confirmed-username → loaded profile.
//!
//! Same staleness discipline as the suggestion controller: every call to
//! [`SearchOrchestrator::search`] starts a new generation, and a fetch that
//! completes under an older generation is discarded.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{SearchError, ServiceError, ServiceErrorKind};
use crate::notify::{Notification, NotificationSink};
use crate::service::ProfileService;
use crate::types::ProfileBundle;
use crate::Reply;

/// Client-side fetch timeout used when none is configured explicitly.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// What the result area shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub loading: bool,
    pub result: Option<ProfileBundle>,
    pub error: Option<SearchError>,
    /// Set once any search has been submitted, until [`SearchOrchestrator::reset`].
    pub has_searched: bool,
}

/// A finished profile fetch, on its way back to the orchestrator.
#[derive(Debug)]
pub struct FetchUpdate {
    generation: u64,
    username: String,
    outcome: Result<ProfileBundle, ServiceError>,
}

impl FetchUpdate {
    /// The username exactly as it was submitted.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Owner of [`SearchState`].
pub struct SearchOrchestrator {
    state: SearchState,
    service: Arc<dyn ProfileService>,
    reply: Reply<FetchUpdate>,
    sink: Arc<dyn NotificationSink>,
    timeout: Option<Duration>,
    generation: u64,
}

impl SearchOrchestrator {
    pub fn new(
        service: Arc<dyn ProfileService>,
        reply: Reply<FetchUpdate>,
        sink: Arc<dyn NotificationSink>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            state: SearchState::default(),
            service,
            reply,
            sink,
            timeout,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Canonical username of the displayed profile.
    pub fn current_username(&self) -> Option<&str> {
        self.state.result.as_ref().map(|b| b.profile.username())
    }

    /// Starts a search for `username`, superseding any search in flight.
    ///
    /// A blank username sets [`SearchError::EmptyUsername`] without calling
    /// the service. Returns `true` when a fetch was issued.
    /// Must be called from within a tokio runtime.
    pub fn search(&mut self, username: &str) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.state.result = None;
        self.state.error = None;

        let username = username.trim();
        if username.is_empty() {
            self.state.loading = false;
            self.state.error = Some(SearchError::EmptyUsername);
            return false;
        }

        self.state.loading = true;
        self.state.has_searched = true;

        let generation = self.generation;
        let username = username.to_owned();
        let fetch = self.service.fetch(&username);
        let reply = Arc::clone(&self.reply);
        let timeout = self.timeout;
        debug!(generation, username = %username, "profile fetch issued");

        tokio::spawn(async move {
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, fetch)
                    .await
                    .unwrap_or_else(|_| Err(timed_out())),
                None => fetch.await,
            };
            reply(FetchUpdate {
                generation,
                username,
                outcome,
            });
        });
        true
    }

    /// Applies a finished fetch. Returns `false` when the update was stale and
    /// therefore dropped.
    pub fn apply(&mut self, update: FetchUpdate) -> bool {
        if update.generation != self.generation {
            debug!(
                generation = update.generation,
                current = self.generation,
                username = %update.username,
                "stale profile dropped"
            );
            return false;
        }
        self.state.loading = false;
        match update.outcome {
            Ok(bundle) => {
                let canonical = bundle.profile.username().to_owned();
                info!(
                    username = %canonical,
                    repositories = bundle.repositories.len(),
                    "profile loaded"
                );
                self.state.error = None;
                self.state.result = Some(bundle);
                self.sink.notify(Notification::ProfileLoaded { username: canonical });
            }
            Err(e) => {
                info!(username = %update.username, kind = ?e.kind, "profile fetch failed");
                self.state.result = None;
                self.state.error = Some(SearchError::Service(e));
            }
        }
        true
    }

    /// Back to the initial state. Any fetch in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state = SearchState::default();
    }
}

fn timed_out() -> ServiceError {
    ServiceError::new(
        ServiceErrorKind::Timeout,
        "Request timed out. Please check your connection and try again.",
    )
}

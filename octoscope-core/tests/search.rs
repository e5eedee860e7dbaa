//! Profile loading through the search orchestrator.

mod common;

use std::time::Duration;

use common::{channel, recorder, ScriptedService};
use octoscope_core::error::{SearchError, ServiceErrorKind};
use octoscope_core::notify::Notification;
use octoscope_core::search::{FetchUpdate, SearchOrchestrator, SearchState, DEFAULT_FETCH_TIMEOUT};
use tokio::sync::mpsc::UnboundedReceiver;

fn orchestrator(
    service: &ScriptedService,
    timeout: Option<Duration>,
) -> (
    SearchOrchestrator,
    UnboundedReceiver<FetchUpdate>,
    std::sync::Arc<std::sync::Mutex<Vec<Notification>>>,
) {
    let (reply, rx) = channel();
    let (sink, events) = recorder();
    (
        SearchOrchestrator::new(service.shared(), reply, sink, timeout),
        rx,
        events,
    )
}

#[tokio::test(start_paused = true)]
async fn loads_profile_and_repositories() {
    let service = ScriptedService::default();
    let (mut orch, mut rx, events) = orchestrator(&service, Some(DEFAULT_FETCH_TIMEOUT));

    assert!(orch.search("octocat"));
    assert!(orch.state().loading);
    assert!(orch.state().has_searched);

    let update = rx.recv().await.unwrap();
    assert!(orch.apply(update));

    let state = orch.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    let bundle = state.result.as_ref().unwrap();
    assert_eq!(bundle.profile.summary.display_name.as_deref(), Some("The Octocat"));
    assert_eq!(bundle.repositories.len(), 8);
    assert_eq!(
        *events.lock().unwrap(),
        [Notification::ProfileLoaded { username: "octocat".into() }]
    );
}

#[tokio::test(start_paused = true)]
async fn canonical_username_comes_from_the_service() {
    let service = ScriptedService::default();
    let (mut orch, mut rx, events) = orchestrator(&service, None);

    orch.search("  OCTOCAT ");
    let update = rx.recv().await.unwrap();
    assert_eq!(update.username(), "OCTOCAT", "submitted form is trimmed only");
    orch.apply(update);

    assert_eq!(orch.current_username(), Some("octocat"));
    assert_eq!(events.lock().unwrap()[0].username(), "octocat");
    assert_eq!(service.fetches(), ["OCTOCAT"]);
}

#[tokio::test(start_paused = true)]
async fn only_the_latest_search_wins() {
    let service = ScriptedService::default();
    service.delay("gaearon", Duration::from_millis(900));
    service.delay("tj", Duration::from_millis(100));
    let (mut orch, mut rx, events) = orchestrator(&service, None);

    orch.search("gaearon");
    orch.search("tj");

    let mut applied = 0;
    for _ in 0..2 {
        let update = rx.recv().await.unwrap();
        if orch.apply(update) {
            applied += 1;
        }
        assert!(!orch.state().loading, "cleared by the current fetch only");
    }

    assert_eq!(applied, 1);
    assert_eq!(orch.current_username(), Some("tj"));
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_completion_leaves_loading_untouched() {
    let service = ScriptedService::default();
    service.delay("tj", Duration::from_millis(10));
    service.delay("wesbos", Duration::from_millis(500));
    let (mut orch, mut rx, _events) = orchestrator(&service, None);

    orch.search("tj");
    orch.search("wesbos");

    let early = rx.recv().await.unwrap();
    assert_eq!(early.username(), "tj");
    assert!(!orch.apply(early));
    assert!(orch.state().loading, "newer fetch still in flight");
    assert!(orch.state().result.is_none());

    let late = rx.recv().await.unwrap();
    assert!(orch.apply(late));
    assert!(!orch.state().loading);
    assert_eq!(orch.current_username(), Some("wesbos"));
}

#[tokio::test(start_paused = true)]
async fn blank_username_is_rejected_without_a_fetch() {
    let service = ScriptedService::default();
    let (mut orch, _rx, events) = orchestrator(&service, None);

    assert!(!orch.search("   "));

    let state = orch.state();
    assert!(!state.loading);
    assert_eq!(state.error, Some(SearchError::EmptyUsername));
    assert_eq!(
        state.error.as_ref().unwrap().to_string(),
        "Please enter a username"
    );
    assert!(service.fetches().is_empty());
    assert!(events.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn blank_search_supersedes_one_in_flight() {
    let service = ScriptedService::default();
    let (mut orch, mut rx, _events) = orchestrator(&service, None);

    orch.search("octocat");
    orch.search("");

    let update = rx.recv().await.unwrap();
    assert!(!orch.apply(update));
    assert!(!orch.state().loading);
    assert!(orch.state().result.is_none());
    assert_eq!(orch.state().error, Some(SearchError::EmptyUsername));
}

#[tokio::test(start_paused = true)]
async fn service_errors_are_shown_verbatim() {
    let cases = [
        ("nobody-here", ServiceErrorKind::NotFound, "User not found. Please check the username and try again."),
        ("ratelimit", ServiceErrorKind::RateLimited, "API rate limit exceeded. Please try again later."),
        ("error", ServiceErrorKind::Network, "Network error: Unable to connect to server"),
        ("timeout", ServiceErrorKind::Timeout, "Request timed out. Please check your connection and try again."),
    ];
    for (username, kind, message) in cases {
        let service = ScriptedService::default();
        let (mut orch, mut rx, events) = orchestrator(&service, None);

        orch.search(username);
        orch.apply(rx.recv().await.unwrap());

        let state = orch.state();
        assert!(!state.loading);
        assert!(state.result.is_none());
        match state.error.as_ref() {
            Some(SearchError::Service(e)) => {
                assert_eq!(e.kind, kind, "{username}");
                assert_eq!(e.to_string(), message);
            }
            other => panic!("{username}: unexpected error {other:?}"),
        }
        assert!(events.lock().unwrap().is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn slow_fetch_times_out() {
    let service = ScriptedService::default();
    service.delay("octocat", Duration::from_secs(30));
    let (mut orch, mut rx, _events) = orchestrator(&service, Some(Duration::from_secs(2)));

    orch.search("octocat");
    orch.apply(rx.recv().await.unwrap());

    match orch.state().error.as_ref() {
        Some(SearchError::Service(e)) => assert_eq!(e.kind, ServiceErrorKind::Timeout),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(!orch.state().loading);
}

#[tokio::test(start_paused = true)]
async fn new_search_clears_the_previous_error() {
    let service = ScriptedService::default();
    let (mut orch, mut rx, _events) = orchestrator(&service, None);

    orch.search("");
    assert!(orch.state().error.is_some());

    orch.search("tj");
    assert!(orch.state().error.is_none());
    assert!(orch.state().loading);
    orch.apply(rx.recv().await.unwrap());
    assert_eq!(orch.current_username(), Some("tj"));
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_the_initial_state() {
    let service = ScriptedService::default();
    let (mut orch, mut rx, _events) = orchestrator(&service, None);

    orch.search("octocat");
    orch.reset();

    assert_eq!(*orch.state(), SearchState::default());
    assert!(!orch.apply(rx.recv().await.unwrap()), "in-flight fetch is stale after reset");
    assert!(orch.state().result.is_none());
    assert!(!orch.state().has_searched);
}

use std::time::Duration;

use octoscope_core::error::ServiceErrorKind;
use octoscope_core::mock::{MockProfileService, DEFAULT_FETCH_LATENCY};
use octoscope_core::service::ProfileService;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn octocat_has_eight_repositories() {
    let service = MockProfileService::default();

    let started = Instant::now();
    let bundle = service.fetch("octocat").await.unwrap();
    assert!(started.elapsed() >= DEFAULT_FETCH_LATENCY);

    let profile = &bundle.profile;
    assert_eq!(profile.username(), "octocat");
    assert_eq!(profile.summary.display_name.as_deref(), Some("The Octocat"));
    assert_eq!(profile.public_repo_count, 8);
    assert_eq!(profile.profile_url, "https://github.com/octocat");
    assert_eq!(bundle.repositories.len(), 8);
    assert!(bundle.repositories.iter().any(|r| r.name == "Hello-World"));
}

#[tokio::test(start_paused = true)]
async fn fetch_is_case_insensitive() {
    let service = MockProfileService::new(Duration::ZERO, Duration::ZERO);
    let bundle = service.fetch("GaeaRon").await.unwrap();
    assert_eq!(bundle.profile.username(), "gaearon");
    assert_eq!(bundle.profile.summary.label(), "Dan Abramov");
}

#[tokio::test(start_paused = true)]
async fn sentinel_usernames_fail() {
    let service = MockProfileService::new(Duration::ZERO, Duration::ZERO);

    let err = service.fetch("error").await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::Network);
    assert_eq!(err.message, "Network error: Unable to connect to server");

    let err = service.fetch("RateLimit").await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::RateLimited);

    let err = service.fetch("timeout").await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::Timeout);

    let err = service.fetch("definitely-not-a-user").await.unwrap_err();
    assert_eq!(err.kind, ServiceErrorKind::NotFound);
    assert_eq!(
        err.message,
        "User not found. Please check the username and try again."
    );
}

#[tokio::test(start_paused = true)]
async fn search_matches_login_and_display_name() {
    let service = MockProfileService::new(Duration::ZERO, Duration::ZERO);

    let by_login: Vec<_> = service
        .search("OCTO")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.username)
        .collect();
    assert_eq!(by_login, ["octocat"]);

    let by_name = service.search("holowaychuk").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].username, "tj");

    assert!(service.search("   ").await.unwrap().is_empty());
    assert!(service.search("no-such-person").await.unwrap().is_empty());
}

//! In-process stand-in for a real profile API.
//!
//! Serves a fixed table of ten profiles with simulated latency. A handful of
//! sentinel usernames trigger each failure kind so every error path of the
//! app can be reached by typing.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::debug;

use crate::error::{ServiceError, ServiceErrorKind};
use crate::service::ProfileService;
use crate::types::{fold, FullProfile, ProfileBundle, ProfileSummary, Repository};

pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(300);
pub const DEFAULT_FETCH_LATENCY: Duration = Duration::from_millis(800);

struct UserRow {
    login: &'static str,
    id: u64,
    name: Option<&'static str>,
    bio: Option<&'static str>,
    public_repos: u32,
    followers: u32,
    following: u32,
}

struct RepoRow {
    owner: &'static str,
    id: u64,
    name: &'static str,
    url: &'static str,
    description: Option<&'static str>,
    stars: u32,
    language: Option<&'static str>,
}

const USERS: &[UserRow] = &[
    UserRow { login: "octocat", id: 583231, name: Some("The Octocat"), bio: Some("GitHub mascot & official spokes-cat"), public_repos: 8, followers: 9621, following: 9 },
    UserRow { login: "gaearon", id: 810438, name: Some("Dan Abramov"), bio: Some("Working on @reactjs. Co-author of Redux and Create React App. Building tools for humans."), public_repos: 262, followers: 78300, following: 171 },
    UserRow { login: "kentcdodds", id: 1500684, name: Some("Kent C. Dodds"), bio: Some("Improving the world with quality software"), public_repos: 593, followers: 54200, following: 131 },
    UserRow { login: "cassidoo", id: 1454517, name: Some("Cassidy Williams"), bio: Some("Director of Developer Experience at @remotion"), public_repos: 137, followers: 12900, following: 182 },
    UserRow { login: "sindresorhus", id: 170270, name: Some("Sindre Sorhus"), bio: Some("Full-Time Open-Sourcerer · Maker · Into Swift and Node.js"), public_repos: 1192, followers: 58200, following: 0 },
    UserRow { login: "tj", id: 25254, name: Some("TJ Holowaychuk"), bio: Some("Founder of Apex, Luna, and many open source JS/Go projects."), public_repos: 285, followers: 44800, following: 0 },
    UserRow { login: "wesbos", id: 176013, name: Some("Wes Bos"), bio: Some("Making really good web development courses!"), public_repos: 237, followers: 26900, following: 0 },
    UserRow { login: "thepracticaldev", id: 13613037, name: Some("DEV Community"), bio: Some("Community of software developers. Formerly known as @ThePracticalDev."), public_repos: 14, followers: 1520, following: 0 },
    UserRow { login: "vercel", id: 14985020, name: Some("Vercel"), bio: Some("Develop. Preview. Ship."), public_repos: 248, followers: 9820, following: 0 },
    UserRow { login: "bradtraversy", id: 5550850, name: Some("Brad Traversy"), bio: Some("Full stack web developer and online instructor"), public_repos: 302, followers: 57100, following: 0 },
];

const REPOS: &[RepoRow] = &[
    RepoRow { owner: "octocat", id: 132935648, name: "boysenberry-repo-1", url: "https://github.com/octocat/boysenberry-repo-1", description: Some("Testing"), stars: 156, language: Some("HTML") },
    RepoRow { owner: "octocat", id: 18221276, name: "git-consortium", url: "https://github.com/octocat/git-consortium", description: Some("This repo is for demonstration purposes only"), stars: 343, language: Some("JavaScript") },
    RepoRow { owner: "octocat", id: 20978623, name: "hello-worId", url: "https://github.com/octocat/hello-worId", description: Some("My first repository on GitHub!"), stars: 178, language: None },
    RepoRow { owner: "octocat", id: 1296269, name: "Hello-World", url: "https://github.com/octocat/Hello-World", description: Some("My first repository on GitHub!"), stars: 2042, language: None },
    RepoRow { owner: "octocat", id: 56271164, name: "linguist", url: "https://github.com/octocat/linguist", description: Some("Language Savant. If your repository's language is being reported incorrectly, send us a pull request!"), stars: 122, language: Some("Ruby") },
    RepoRow { owner: "octocat", id: 64778136, name: "octocat.github.io", url: "https://github.com/octocat/octocat.github.io", description: None, stars: 1024, language: Some("HTML") },
    RepoRow { owner: "octocat", id: 17881631, name: "Spoon-Knife", url: "https://github.com/octocat/Spoon-Knife", description: Some("This repo is for demonstration purposes only"), stars: 11257, language: Some("HTML") },
    RepoRow { owner: "octocat", id: 1300192, name: "test-repo1", url: "https://github.com/octocat/test-repo1", description: None, stars: 57, language: None },
    RepoRow { owner: "gaearon", id: 23083156, name: "redux", url: "https://github.com/reduxjs/redux", description: Some("Predictable state container for JavaScript apps"), stars: 59800, language: Some("TypeScript") },
    RepoRow { owner: "gaearon", id: 63537249, name: "create-react-app", url: "https://github.com/facebook/create-react-app", description: Some("Set up a modern web app by running one command"), stars: 98700, language: Some("JavaScript") },
    RepoRow { owner: "gaearon", id: 36632496, name: "react-hot-loader", url: "https://github.com/gaearon/react-hot-loader", description: Some("Tweak React components in real time"), stars: 12200, language: Some("JavaScript") },
    RepoRow { owner: "gaearon", id: 75376963, name: "overreacted.io", url: "https://github.com/gaearon/overreacted.io", description: Some("Personal blog by Dan Abramov"), stars: 6700, language: Some("JavaScript") },
    RepoRow { owner: "kentcdodds", id: 89271847, name: "react-testing-library", url: "https://github.com/testing-library/react-testing-library", description: Some("Simple and complete React DOM testing utilities"), stars: 17800, language: Some("JavaScript") },
    RepoRow { owner: "kentcdodds", id: 62352812, name: "advanced-react-patterns", url: "https://github.com/kentcdodds/advanced-react-patterns", description: Some("Advanced React Component Patterns"), stars: 4300, language: Some("JavaScript") },
    RepoRow { owner: "kentcdodds", id: 76273809, name: "react-hooks", url: "https://github.com/kentcdodds/react-hooks", description: Some("Learn React Hooks!"), stars: 3900, language: Some("JavaScript") },
    RepoRow { owner: "kentcdodds", id: 105784815, name: "epic-react-dev", url: "https://github.com/kentcdodds/epic-react-dev", description: Some("The Epic React Dev website"), stars: 1200, language: Some("JavaScript") },
    RepoRow { owner: "cassidoo", id: 321980593, name: "talks", url: "https://github.com/cassidoo/talks", description: Some("Talks I've given at events and conferences!"), stars: 378, language: None },
    RepoRow { owner: "cassidoo", id: 28663639, name: "getting-a-gig", url: "https://github.com/cassidoo/getting-a-gig", description: Some("Guide for getting a gig as a tech major"), stars: 1100, language: None },
    RepoRow { owner: "cassidoo", id: 334906298, name: "next-netlify-starter", url: "https://github.com/cassidoo/next-netlify-starter", description: Some("A one-click starter project for Next and Netlify"), stars: 342, language: Some("JavaScript") },
    RepoRow { owner: "sindresorhus", id: 10639316, name: "awesome", url: "https://github.com/sindresorhus/awesome", description: Some("Awesome lists about all kinds of interesting topics"), stars: 223000, language: None },
    RepoRow { owner: "sindresorhus", id: 28239447, name: "refined-github", url: "https://github.com/sindresorhus/refined-github", description: Some("Browser extension that simplifies the GitHub interface and adds useful features"), stars: 19700, language: Some("TypeScript") },
    RepoRow { owner: "sindresorhus", id: 32948223, name: "p-queue", url: "https://github.com/sindresorhus/p-queue", description: Some("Promise queue with concurrency control"), stars: 3800, language: Some("TypeScript") },
    RepoRow { owner: "sindresorhus", id: 3617179, name: "chalk", url: "https://github.com/chalk/chalk", description: Some("Terminal string styling done right"), stars: 19900, language: Some("JavaScript") },
    RepoRow { owner: "tj", id: 73669, name: "commander.js", url: "https://github.com/tj/commander.js", description: Some("node.js command-line interfaces made easy"), stars: 24300, language: Some("JavaScript") },
    RepoRow { owner: "tj", id: 1510194, name: "node-progress", url: "https://github.com/tj/node-progress", description: Some("Flexible ascii progress bar for nodejs"), stars: 2700, language: Some("JavaScript") },
    RepoRow { owner: "tj", id: 1355231, name: "co", url: "https://github.com/tj/co", description: Some("The ultimate generator based flow-control goodness for nodejs"), stars: 11300, language: Some("JavaScript") },
    RepoRow { owner: "wesbos", id: 46851472, name: "JavaScript30", url: "https://github.com/wesbos/JavaScript30", description: Some("30 Day Vanilla JS Challenge"), stars: 21900, language: Some("HTML") },
    RepoRow { owner: "wesbos", id: 161810052, name: "awesome-uses", url: "https://github.com/wesbos/awesome-uses", description: Some("A list of /uses pages detailing developer setups"), stars: 4100, language: Some("JavaScript") },
    RepoRow { owner: "wesbos", id: 56655128, name: "Advanced-React", url: "https://github.com/wesbos/Advanced-React", description: Some("Starter Files and Solutions for Full Stack Advanced React and GraphQL"), stars: 3800, language: Some("JavaScript") },
    RepoRow { owner: "thepracticaldev", id: 91985779, name: "dev.to", url: "https://github.com/forem/forem", description: Some("For empowering community"), stars: 19700, language: Some("Ruby") },
    RepoRow { owner: "thepracticaldev", id: 151348450, name: "DEV-ios", url: "https://github.com/thepracticaldev/DEV-ios", description: Some("DEV Community iOS App"), stars: 456, language: Some("Swift") },
    RepoRow { owner: "vercel", id: 70107786, name: "next.js", url: "https://github.com/vercel/next.js", description: Some("The React Framework"), stars: 98700, language: Some("JavaScript") },
    RepoRow { owner: "vercel", id: 112468814, name: "vercel", url: "https://github.com/vercel/vercel", description: Some("Develop. Preview. Ship."), stars: 10800, language: Some("TypeScript") },
    RepoRow { owner: "vercel", id: 135511454, name: "swr", url: "https://github.com/vercel/swr", description: Some("React Hooks for Data Fetching"), stars: 25700, language: Some("TypeScript") },
    RepoRow { owner: "vercel", id: 260287870, name: "commerce", url: "https://github.com/vercel/commerce", description: Some("Next.js Commerce"), stars: 7800, language: Some("TypeScript") },
    RepoRow { owner: "bradtraversy", id: 202645186, name: "50projects50days", url: "https://github.com/bradtraversy/50projects50days", description: Some("50+ mini web projects using HTML, CSS & JS"), stars: 25400, language: Some("CSS") },
    RepoRow { owner: "bradtraversy", id: 230308544, name: "design-resources-for-developers", url: "https://github.com/bradtraversy/design-resources-for-developers", description: Some("Curated list of design and UI resources"), stars: 45800, language: None },
    RepoRow { owner: "bradtraversy", id: 243796927, name: "vanillawebprojects", url: "https://github.com/bradtraversy/vanillawebprojects", description: Some("Mini projects built with HTML5, CSS & JavaScript"), stars: 13900, language: Some("JavaScript") },
];

impl UserRow {
    fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            username: self.login.to_owned(),
            display_name: self.name.map(str::to_owned),
            avatar_url: format!("https://avatars.githubusercontent.com/u/{}?v=4", self.id),
            bio: self.bio.map(str::to_owned),
        }
    }

    fn full(&self) -> FullProfile {
        FullProfile {
            summary: self.summary(),
            id: self.id,
            followers: self.followers,
            following: self.following,
            public_repo_count: self.public_repos,
            profile_url: format!("https://github.com/{}", self.login),
        }
    }

    fn matches_query(&self, folded: &str) -> bool {
        self.login.to_lowercase().contains(folded)
            || self
                .name
                .is_some_and(|name| name.to_lowercase().contains(folded))
    }
}

impl RepoRow {
    fn repository(&self) -> Repository {
        Repository {
            id: self.id,
            name: self.name.to_owned(),
            url: self.url.to_owned(),
            description: self.description.map(str::to_owned),
            star_count: self.stars,
            primary_language: self.language.map(str::to_owned),
        }
    }
}

/// Maps a sentinel username to the failure it simulates.
fn sentinel_error(folded: &str) -> Option<ServiceError> {
    match folded {
        "error" => Some(ServiceError::new(
            ServiceErrorKind::Network,
            "Network error: Unable to connect to server",
        )),
        "timeout" => Some(ServiceError::new(
            ServiceErrorKind::Timeout,
            "Request timed out. Please check your connection and try again.",
        )),
        "ratelimit" => Some(ServiceError::new(
            ServiceErrorKind::RateLimited,
            "API rate limit exceeded. Please try again later.",
        )),
        _ => None,
    }
}

/// Looks `username` up in the static tables without any latency.
pub fn lookup(username: &str) -> Result<ProfileBundle, ServiceError> {
    let folded = fold(username);
    if let Some(err) = sentinel_error(&folded) {
        return Err(err);
    }
    let user = USERS
        .iter()
        .find(|u| u.login.to_lowercase() == folded)
        .ok_or_else(|| {
            ServiceError::new(
                ServiceErrorKind::NotFound,
                "User not found. Please check the username and try again.",
            )
        })?;
    let repositories = REPOS
        .iter()
        .filter(|r| r.owner == user.login)
        .map(RepoRow::repository)
        .collect();
    Ok(ProfileBundle {
        profile: user.full(),
        repositories,
    })
}

/// Matches `query` against the static tables without any latency.
pub fn matching(query: &str) -> Result<Vec<ProfileSummary>, ServiceError> {
    let folded = fold(query);
    if folded.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(err) = sentinel_error(&folded) {
        return Err(err);
    }
    Ok(USERS
        .iter()
        .filter(|u| u.matches_query(&folded))
        .map(UserRow::summary)
        .collect())
}

/// Latency-simulating [`ProfileService`] over the static tables.
#[derive(Debug, Clone)]
pub struct MockProfileService {
    search_latency: Duration,
    fetch_latency: Duration,
}

impl Default for MockProfileService {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_LATENCY, DEFAULT_FETCH_LATENCY)
    }
}

impl MockProfileService {
    pub fn new(search_latency: Duration, fetch_latency: Duration) -> Self {
        Self {
            search_latency,
            fetch_latency,
        }
    }

    /// Wraps the service for sharing between components.
    pub fn shared(self) -> Arc<dyn ProfileService> {
        Arc::new(self)
    }
}

impl ProfileService for MockProfileService {
    fn search(&self, query: &str) -> BoxFuture<'static, Result<Vec<ProfileSummary>, ServiceError>> {
        let query = query.to_owned();
        let latency = self.search_latency;
        async move {
            tokio::time::sleep(latency).await;
            let result = matching(&query);
            debug!(query = %query, ok = result.is_ok(), "mock search served");
            result
        }
        .boxed()
    }

    fn fetch(&self, username: &str) -> BoxFuture<'static, Result<ProfileBundle, ServiceError>> {
        let username = username.to_owned();
        let latency = self.fetch_latency;
        async move {
            tokio::time::sleep(latency).await;
            let result = lookup(&username);
            debug!(username = %username, ok = result.is_ok(), "mock fetch served");
            result
        }
        .boxed()
    }
}

use std::fmt;

/// A non-blank, case-preserved username.
///
/// Lookup and de-duplication compare case-insensitively; the stored and
/// displayed form is whatever the user or the service supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Trims `raw` and wraps it. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against arbitrary input.
    pub fn matches(&self, other: &str) -> bool {
        fold(&self.0) == fold(other)
    }

    /// The folded form used as a map key.
    pub fn key(&self) -> String {
        fold(&self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Folds a username for comparison: trimmed and lowercased.
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Minimal profile snapshot used to render one suggestion row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub username: String,
    pub display_name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
}

impl ProfileSummary {
    /// Display name when present, otherwise the username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// A profile as shown on the profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullProfile {
    pub summary: ProfileSummary,
    pub id: u64,
    pub followers: u32,
    pub following: u32,
    pub public_repo_count: u32,
    pub profile_url: String,
}

impl FullProfile {
    /// The canonical username as reported by the service.
    pub fn username(&self) -> &str {
        &self.summary.username
    }
}

/// One public repository. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub star_count: u32,
    pub primary_language: Option<String>,
}

/// The payload of a successful fetch: the profile plus its repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileBundle {
    pub profile: FullProfile,
    pub repositories: Vec<Repository>,
}

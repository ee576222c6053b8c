//! Network collaborators used by the template function library.
//!
//! The renderer never talks HTTP directly. It sees two traits:
//!
//! - [`RepoHost`] - user profiles, repository facts, contributors and owned
//!   repositories from a code-hosting API ([`GitHubClient`])
//! - [`FeedSource`] - the latest entry of an RSS/Atom feed ([`FeedClient`])
//!
//! Both return `Result<_, RemoteError>`. The function library turns every
//! error into a fallback string so a failed lookup never stops a render;
//! see [`crate::templating::functions`].
//!
//! Calls are blocking and made on the rendering thread. The only bound on
//! a stuck request is the client timeout ([`crate::constants::HTTP_TIMEOUT`]).

pub mod feed;
pub mod github;

pub use feed::FeedClient;
pub use github::GitHubClient;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::constants::{DEFAULT_GITHUB_API, GITHUB_API_ENV, TOKEN_ENV_VARS};

/// Failure of a remote lookup. Never fatal to a render.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status {
        url: String,
        status: u16,
    },

    #[error("failed to decode response from {url}: {reason}")]
    Decode {
        url: String,
        reason: String,
    },

    /// The collaborator is not available at all (used by offline setups and tests).
    #[error("{0}")]
    Unavailable(String),
}

/// A user profile.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct License {
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// Facts about one repository.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RepositoryInfo {
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl RepositoryInfo {
    /// SPDX identifier of the license, `N/A` when the repository has none.
    pub fn spdx_id(&self) -> String {
        self.license
            .as_ref()
            .and_then(|l| l.spdx_id.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RepositoryOwner {
    pub login: String,
}

/// An entry of an owner's repository listing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OwnedRepository {
    pub name: String,
    #[serde(default)]
    pub has_pages: bool,
    pub owner: RepositoryOwner,
}

/// The latest entry of a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPost {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
}

/// Read access to a code-hosting API.
pub trait RepoHost: Send + Sync {
    fn user(&self, id: &str) -> Result<UserProfile, RemoteError>;

    fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, RemoteError>;

    fn contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>, RemoteError>;

    fn owner_repositories(&self, owner: &str) -> Result<Vec<OwnedRepository>, RemoteError>;
}

/// Read access to syndication feeds.
pub trait FeedSource: Send + Sync {
    /// The latest entry of the feed at `url`, or `None` when it has no entries.
    fn latest_post(&self, url: &str) -> Result<Option<FeedPost>, RemoteError>;
}

/// Connection settings for the remote collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL of the GitHub REST API, without trailing slash.
    pub github_api: String,
    /// Token sent as `Authorization: token <t>`.
    pub token: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            github_api: DEFAULT_GITHUB_API.to_string(),
            token: None,
        }
    }
}

impl RemoteConfig {
    /// Read `GITHUB_TOKEN` (then `GH_TOKEN`) and the API base override from the environment.
    pub fn from_env() -> Self {
        let token = TOKEN_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty());
        let github_api = std::env::var(GITHUB_API_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string());

        Self {
            github_api: github_api.trim_end_matches('/').to_string(),
            token,
        }
    }
}

/// The collaborators handed to the function library.
#[derive(Clone)]
pub struct Remotes {
    pub repo_host: Arc<dyn RepoHost>,
    pub feeds: Arc<dyn FeedSource>,
}

impl Remotes {
    pub fn new(repo_host: Arc<dyn RepoHost>, feeds: Arc<dyn FeedSource>) -> Self {
        Self {
            repo_host,
            feeds,
        }
    }

    /// Real HTTP clients configured from `config`.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be constructed (TLS backend setup).
    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        Ok(Self {
            repo_host: Arc::new(GitHubClient::new(config)?),
            feeds: Arc::new(FeedClient::new()?),
        })
    }

    /// Collaborators that fail every call; renders fall back everywhere.
    pub fn offline() -> Self {
        Self {
            repo_host: Arc::new(Offline),
            feeds: Arc::new(Offline),
        }
    }
}

impl std::fmt::Debug for Remotes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Remotes").finish_non_exhaustive()
    }
}

/// A collaborator with no network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Offline {
    fn fail<T>(what: &str) -> Result<T, RemoteError> {
        Err(RemoteError::Unavailable(format!("offline: {what} lookup skipped")))
    }
}

impl RepoHost for Offline {
    fn user(&self, _id: &str) -> Result<UserProfile, RemoteError> {
        Self::fail("user")
    }

    fn repository(&self, _owner: &str, _repo: &str) -> Result<RepositoryInfo, RemoteError> {
        Self::fail("repository")
    }

    fn contributors(&self, _owner: &str, _repo: &str) -> Result<Vec<Contributor>, RemoteError> {
        Self::fail("contributors")
    }

    fn owner_repositories(&self, _owner: &str) -> Result<Vec<OwnedRepository>, RemoteError> {
        Self::fail("repositories")
    }
}

impl FeedSource for Offline {
    fn latest_post(&self, _url: &str) -> Result<Option<FeedPost>, RemoteError> {
        Self::fail("feed")
    }
}

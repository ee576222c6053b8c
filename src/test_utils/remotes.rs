//! Remote collaborators with fixed answers.

use chrono::{DateTime, TimeZone, Utc};

use crate::remote::{
    Contributor, FeedPost, FeedSource, License, OwnedRepository, RemoteError, RepoHost,
    RepositoryInfo, RepositoryOwner, UserProfile,
};

/// A [`RepoHost`] that knows one user (`linuxsuren`) and answers every
/// repository question with the same facts.
#[derive(Debug, Clone)]
pub struct CannedRepoHost {
    pub user: UserProfile,
    pub repository: RepositoryInfo,
    pub contributors: usize,
}

impl Default for CannedRepoHost {
    fn default() -> Self {
        Self {
            user: UserProfile {
                login: "LinuxSuRen".to_string(),
                name: Some("Rick".to_string()),
                html_url: "https://github.com/LinuxSuRen".to_string(),
                bio: Some("Open source lover".to_string()),
                twitter_username: Some("rick".to_string()),
                ..Default::default()
            },
            repository: RepositoryInfo {
                stargazers_count: 42,
                forks_count: 7,
                license: Some(License {
                    spdx_id: Some("MIT".to_string()),
                }),
                created_at: Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).single(),
                pushed_at: Utc.with_ymd_and_hms(2022, 1, 2, 3, 4, 5).single(),
            },
            contributors: 7,
        }
    }
}

impl RepoHost for CannedRepoHost {
    fn user(&self, id: &str) -> Result<UserProfile, RemoteError> {
        if id.eq_ignore_ascii_case(&self.user.login) {
            Ok(self.user.clone())
        } else {
            Err(RemoteError::Status {
                url: format!("canned://users/{id}"),
                status: 404,
            })
        }
    }

    fn repository(&self, _owner: &str, _repo: &str) -> Result<RepositoryInfo, RemoteError> {
        Ok(self.repository.clone())
    }

    fn contributors(&self, _owner: &str, _repo: &str) -> Result<Vec<Contributor>, RemoteError> {
        Ok((0..self.contributors)
            .map(|i| Contributor {
                login: format!("user{i}"),
                html_url: format!("https://github.com/user{i}"),
                avatar_url: format!("https://avatars.example.com/user{i}"),
            })
            .collect())
    }

    fn owner_repositories(&self, owner: &str) -> Result<Vec<OwnedRepository>, RemoteError> {
        let repository = |name: &str, has_pages| OwnedRepository {
            name: name.to_string(),
            has_pages,
            owner: RepositoryOwner {
                login: owner.to_string(),
            },
        };
        Ok(vec![repository("site", true), repository("tool", false)])
    }
}

/// A [`FeedSource`] returning the same post (or none) for every URL.
#[derive(Debug, Clone, Default)]
pub struct CannedFeed {
    pub post: Option<FeedPost>,
}

impl CannedFeed {
    /// A feed that parses but has no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A feed whose latest post was published at `published` (RFC 3339).
    pub fn with_post(title: &str, link: &str, published: &str) -> Self {
        Self {
            post: Some(FeedPost {
                title: title.to_string(),
                link: link.to_string(),
                published: DateTime::parse_from_rfc3339(published)
                    .ok()
                    .map(|date| date.with_timezone(&Utc)),
            }),
        }
    }
}

impl FeedSource for CannedFeed {
    fn latest_post(&self, _url: &str) -> Result<Option<FeedPost>, RemoteError> {
        Ok(self.post.clone())
    }
}

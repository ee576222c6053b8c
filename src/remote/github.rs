//! Blocking GitHub REST client.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    Contributor, OwnedRepository, RemoteConfig, RemoteError, RepoHost, RepositoryInfo, UserProfile,
};
use crate::constants::{HTTP_TIMEOUT, USER_AGENT_VALUE};

/// [`RepoHost`] backed by the GitHub REST API.
///
/// One GET per call; no pagination and no rate-limit handling. Set
/// `GITHUB_TOKEN` (or `GH_TOKEN`) to raise the anonymous rate limit.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build().map_err(|e| {
            RemoteError::Transport {
                url: config.github_api.clone(),
                source: e,
            }
        })?;

        Ok(Self {
            client,
            base_url: config.github_api.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RemoteError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {token}"));
        }

        let response = request.send().map_err(|e| RemoteError::Transport {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RemoteError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| RemoteError::Transport {
            url: url.clone(),
            source: e,
        })?;
        serde_json::from_str(&body).map_err(|e| RemoteError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

impl RepoHost for GitHubClient {
    fn user(&self, id: &str) -> Result<UserProfile, RemoteError> {
        self.get(&format!("/users/{id}"))
    }

    fn repository(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, RemoteError> {
        self.get(&format!("/repos/{owner}/{repo}"))
    }

    fn contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>, RemoteError> {
        self.get(&format!("/repos/{owner}/{repo}/contributors"))
    }

    fn owner_repositories(&self, owner: &str) -> Result<Vec<OwnedRepository>, RemoteError> {
        self.get(&format!("/users/{owner}/repos?type=owner&per_page=100&sort=updated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(&RemoteConfig {
            github_api: server.url(),
            token: token.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn test_user_lookup_sends_token() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/users/linuxsuren")
            .match_header("authorization", "token secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"login":"LinuxSuRen","name":"Rick","html_url":"https://github.com/LinuxSuRen","bio":null}"#,
            )
            .create();

        let user = client_for(&server, Some("secret")).user("linuxsuren").unwrap();

        mock.assert();
        assert_eq!(user.name.as_deref(), Some("Rick"));
        assert_eq!(user.html_url, "https://github.com/LinuxSuRen");
        assert_eq!(user.bio, None);
    }

    #[test]
    fn test_non_ok_status_is_an_error() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/repos/o/missing").with_status(404).create();

        let err = client_for(&server, None).repository("o", "missing").unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let mut server = Server::new();
        let _mock =
            server.mock("GET", "/repos/o/r/contributors").with_status(200).with_body("{").create();

        let err = client_for(&server, None).contributors("o", "r").unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
    }

    #[test]
    fn test_owner_repositories() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", Matcher::Regex(r"^/users/octo/repos".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"[{"name":"site","has_pages":true,"owner":{"login":"octo"}},
                    {"name":"lib","has_pages":false,"owner":{"login":"octo"}}]"#,
            )
            .create();

        let repos = client_for(&server, None).owner_repositories("octo").unwrap();
        assert_eq!(repos.len(), 2);
        assert!(repos[0].has_pages);
        assert_eq!(repos[1].owner.login, "octo");
    }
}

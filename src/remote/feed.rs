//! RSS/Atom feed client.

use feed_rs::model::Entry;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use super::{FeedPost, FeedSource, RemoteError};
use crate::constants::{HTTP_TIMEOUT, USER_AGENT_VALUE};

/// [`FeedSource`] that downloads a feed and parses it with `feed-rs`.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new() -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build().map_err(|e| {
            RemoteError::Transport {
                url: String::new(),
                source: e,
            }
        })?;
        Ok(Self {
            client,
        })
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        debug!("GET {}", url);
        let transport = |e| RemoteError::Transport {
            url: url.to_string(),
            source: e,
        };

        let response =
            self.client.get(url).header(USER_AGENT, USER_AGENT_VALUE).send().map_err(transport)?;
        if !response.status().is_success() {
            return Err(RemoteError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.bytes().map_err(transport)?.to_vec())
    }
}

impl FeedSource for FeedClient {
    fn latest_post(&self, url: &str) -> Result<Option<FeedPost>, RemoteError> {
        let body = self.fetch(url)?;
        parse_latest_post(url, &body)
    }
}

/// Parse a feed document and pick its latest entry.
pub(crate) fn parse_latest_post(url: &str, body: &[u8]) -> Result<Option<FeedPost>, RemoteError> {
    let feed = feed_rs::parser::parse(body).map_err(|e| RemoteError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(latest_entry(&feed.entries).map(to_post))
}

/// Feeds are ordered newest-first or oldest-first; compare the two ends and
/// take the later one. Entries without dates favour the first entry.
fn latest_entry(entries: &[Entry]) -> Option<&Entry> {
    let first = entries.first()?;
    let last = entries.last()?;

    match (published(first), published(last)) {
        (Some(first_date), Some(last_date)) if last_date > first_date => Some(last),
        (None, Some(_)) => Some(last),
        _ => Some(first),
    }
}

fn published(entry: &Entry) -> Option<chrono::DateTime<chrono::Utc>> {
    entry.published.or(entry.updated)
}

fn to_post(entry: &Entry) -> FeedPost {
    FeedPost {
        title: entry.title.as_ref().map(|t| t.content.clone()).unwrap_or_default(),
        link: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
        published: published(entry),
    }
}

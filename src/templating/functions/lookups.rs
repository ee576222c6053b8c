//! Template functions backed by the remote collaborators.
//!
//! Every function here returns a plain `String`. A failed lookup is logged
//! and replaced by the function's fallback text, so the document always
//! renders:
//!
//! | Function | Fallback |
//! |----------|----------|
//! | [`user_lookup`] | the id unchanged |
//! | [`user_table`] | the table header only |
//! | repository accessors, [`contributor_table`], [`pages_table`] | empty string |
//! | [`feed_latest_post`] | `[default](default)` |
//! | [`feed_latest_published`] | empty string |
//!
//! The feed functions return `feed parsed failed` when a feed loads but has
//! no entries.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Display;
use tracing::warn;

use super::markup::{github_id, has_markdown_link, link};
use crate::constants::{CONTRIBUTORS_PER_ROW, FEED_EMPTY_MARKER, NEW_POST_BADGE, NEW_POST_WINDOW};
use crate::remote::{Contributor, FeedPost, FeedSource, RemoteError, RepoHost, RepositoryInfo};

fn degrade<T: Default>(function: &str, subject: impl Display, err: RemoteError) -> T {
    warn!("{function}({subject}) fell back to its default: {err}");
    T::default()
}

/// A Markdown link to a user's profile, optionally followed by their bio.
///
/// Ids containing a space are returned as-is. An id that already is a
/// Markdown link is returned as-is, or, when `bio` is requested, resolved
/// through the GitHub ID inside the link.
pub fn user_lookup(host: &dyn RepoHost, id: &str, bio: bool) -> String {
    if id.is_empty() || id.contains(' ') {
        return id.to_string();
    }

    if has_markdown_link(id) {
        let inner = github_id(id);
        if bio && !has_markdown_link(&inner) {
            return user_lookup(host, &inner, bio);
        }
        return id.to_string();
    }

    match host.user(id) {
        Ok(user) => {
            let name = user.name.filter(|n| !n.is_empty()).unwrap_or(user.login);
            let profile = link(&name, &user.html_url);
            match user.bio.filter(|b| bio && !b.is_empty()) {
                Some(bio) => format!("{profile} ({bio})"),
                None => profile,
            }
        }
        Err(err) => {
            warn!("user_lookup({id}) fell back to the plain id: {err}");
            id.to_string()
        }
    }
}

/// Run [`user_lookup`] on every id in a `sep`-separated list.
///
/// An empty separator means a single space. When the separator is a comma
/// the results are joined with `", "`.
pub fn user_group_lookup(host: &dyn RepoHost, ids: &str, sep: &str) -> String {
    let sep = if sep.is_empty() {
        " "
    } else {
        sep
    };

    let links: Vec<String> = ids.split(sep).map(|id| user_lookup(host, id.trim(), false)).collect();

    let joiner = if sep == "," {
        ", "
    } else {
        sep
    };
    links.join(joiner)
}

/// A two-column table of a user's public profile fields.
pub fn user_table(host: &dyn RepoHost, id: &str) -> String {
    let mut table = String::from("|||\n|---|---|\n");

    let user = match host.user(id) {
        Ok(user) => user,
        Err(err) => {
            warn!("user_table({id}) rendered without rows: {err}");
            return table;
        }
    };

    let twitter = user
        .twitter_username
        .filter(|t| !t.is_empty())
        .map(|t| link(&t, &format!("https://twitter.com/{t}")));
    let rows = [
        ("Name", user.name),
        ("Location", user.location),
        ("Bio", user.bio),
        ("Blog", user.blog),
        ("Twitter", twitter),
        ("Organization", user.company),
    ];

    for (title, value) in rows {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            table.push_str(&format!("| {title} | {value} |\n"));
        }
    }
    table
}

fn with_repository(
    function: &str,
    host: &dyn RepoHost,
    owner: &str,
    repo: &str,
    render: impl FnOnce(&RepositoryInfo) -> String,
) -> String {
    match host.repository(owner, repo) {
        Ok(info) => render(&info),
        Err(err) => degrade(function, format_args!("{owner}/{repo}"), err),
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

pub fn repo_stars(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    with_repository("repo_stars", host, owner, repo, |info| info.stargazers_count.to_string())
}

pub fn repo_forks(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    with_repository("repo_forks", host, owner, repo, |info| info.forks_count.to_string())
}

/// SPDX id of the repository license, `N/A` when unlicensed.
pub fn repo_license(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    with_repository("repo_license", host, owner, repo, RepositoryInfo::spdx_id)
}

pub fn repo_created_at(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    with_repository("repo_created_at", host, owner, repo, |info| format_date(info.created_at))
}

pub fn repo_pushed_at(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    with_repository("repo_pushed_at", host, owner, repo, |info| format_date(info.pushed_at))
}

/// `license|stars|created|pushed` in a single lookup, for table rows.
pub fn repo_summary(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    with_repository("repo_summary", host, owner, repo, |info| {
        format!(
            "{}|{}|{}|{}",
            info.spdx_id(),
            info.stargazers_count,
            format_date(info.created_at),
            format_date(info.pushed_at)
        )
    })
}

fn contributor_cell(contributor: &Contributor) -> String {
    format!(
        "\n\t<td align=\"center\">\n\t\t<a href=\"{url}\">\n\t\t\t<img src=\"{avatar}\" width=\"100;\" alt=\"{login}\"/>\n\t\t\t<br />\n\t\t\t<sub><b>{login}</b></sub>\n\t\t</a>\n\t</td>",
        url = contributor.html_url,
        avatar = contributor.avatar_url,
        login = contributor.login,
    )
}

/// An HTML table of avatars, six contributors per row.
pub fn contributor_table(host: &dyn RepoHost, owner: &str, repo: &str) -> String {
    let contributors = match host.contributors(owner, repo) {
        Ok(contributors) => contributors,
        Err(err) => return degrade("contributor_table", format_args!("{owner}/{repo}"), err),
    };

    let rows: String = contributors
        .chunks(CONTRIBUTORS_PER_ROW)
        .map(|row| {
            let cells: String = row.iter().map(contributor_cell).collect();
            format!("<tr>{cells}\n</tr>")
        })
        .collect();

    format!("<table>{rows}</table>\n")
}

/// A Markdown table of the owner's repositories that publish GitHub Pages.
pub fn pages_table(host: &dyn RepoHost, owner: &str) -> String {
    let repositories = match host.owner_repositories(owner) {
        Ok(repositories) => repositories,
        Err(err) => return degrade("pages_table", owner, err),
    };

    let rows: Vec<String> = repositories
        .iter()
        .filter(|r| r.has_pages)
        .map(|r| {
            let login = &r.owner.login;
            let name = &r.name;
            format!(
                "|{name}|![GitHub Repo stars](https://img.shields.io/github/stars/{login}/{name}?style=social)|[view](https://{login}.github.io/{name}/)|"
            )
        })
        .collect();

    format!("||||\n|---|---|---|\n{}", rows.join("\n"))
}

/// A link to the latest post of a feed, with a badge when it is recent.
pub fn feed_latest_post(feeds: &dyn FeedSource, url: &str, default: &str) -> String {
    match feeds.latest_post(url) {
        Ok(Some(post)) => format_post(&post, Utc::now()),
        Ok(None) => FEED_EMPTY_MARKER.to_string(),
        Err(err) => {
            warn!("feed_latest_post({url}) fell back to the default link: {err}");
            link(default, default)
        }
    }
}

/// RFC 3339 publish time of the latest post of a feed.
pub fn feed_latest_published(feeds: &dyn FeedSource, url: &str) -> String {
    match feeds.latest_post(url) {
        Ok(Some(post)) => post
            .published
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default(),
        Ok(None) => FEED_EMPTY_MARKER.to_string(),
        Err(err) => degrade("feed_latest_published", url, err),
    }
}

pub(crate) fn format_post(post: &FeedPost, now: DateTime<Utc>) -> String {
    let title = post.title.replace('|', " ");
    let mut output = link(&title, &post.link);
    if post.published.is_some_and(|published| is_recent(published, now)) {
        output.push_str(NEW_POST_BADGE);
    }
    output
}

fn is_recent(published: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    match (now - published).to_std() {
        Ok(age) => age < NEW_POST_WINDOW,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::Offline;
    use crate::test_utils::{CannedFeed, CannedRepoHost};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_user_lookup_success_and_bio() {
        let host = CannedRepoHost::default();
        assert_eq!(user_lookup(&host, "linuxsuren", false), "[Rick](https://github.com/LinuxSuRen)");
        assert_eq!(
            user_lookup(&host, "linuxsuren", true),
            "[Rick](https://github.com/LinuxSuRen) (Open source lover)"
        );
    }

    #[test]
    fn test_user_lookup_passthrough_cases() {
        let host = CannedRepoHost::default();
        assert_eq!(user_lookup(&host, "two words", false), "two words");
        assert_eq!(user_lookup(&host, "", false), "");

        let existing = "[Rick](https://github.com/linuxsuren)";
        assert_eq!(user_lookup(&host, existing, false), existing);
        assert_eq!(
            user_lookup(&host, existing, true),
            "[Rick](https://github.com/LinuxSuRen) (Open source lover)"
        );
    }

    #[test]
    fn test_user_lookup_falls_back_to_id() {
        assert_eq!(user_lookup(&Offline, "linuxsuren", true), "linuxsuren");
    }

    #[test]
    fn test_user_group_lookup_separators() {
        let host = CannedRepoHost::default();
        assert_eq!(
            user_group_lookup(&host, "linuxsuren,unknown", ","),
            "[Rick](https://github.com/LinuxSuRen), unknown"
        );
        assert_eq!(user_group_lookup(&Offline, "a b", ""), "a b");
    }

    #[test]
    fn test_user_table() {
        let table = user_table(&CannedRepoHost::default(), "linuxsuren");
        assert_eq!(
            table,
            "|||\n|---|---|\n| Name | Rick |\n| Bio | Open source lover |\n| Twitter | [rick](https://twitter.com/rick) |\n"
        );
        assert_eq!(user_table(&Offline, "linuxsuren"), "|||\n|---|---|\n");
    }

    #[test]
    fn test_repository_accessors() {
        let host = CannedRepoHost::default();
        assert_eq!(repo_stars(&host, "o", "r"), "42");
        assert_eq!(repo_forks(&host, "o", "r"), "7");
        assert_eq!(repo_license(&host, "o", "r"), "MIT");
        assert_eq!(repo_created_at(&host, "o", "r"), "2021-03-04");
        assert_eq!(repo_pushed_at(&host, "o", "r"), "2022-01-02");
        assert_eq!(repo_summary(&host, "o", "r"), "MIT|42|2021-03-04|2022-01-02");
    }

    #[test]
    fn test_repository_accessors_fall_back_to_empty() {
        for accessor in [
            repo_stars,
            repo_forks,
            repo_license,
            repo_created_at,
            repo_pushed_at,
            repo_summary,
            contributor_table,
        ] {
            assert_eq!(accessor(&Offline, "o", "r"), "");
        }
        assert_eq!(pages_table(&Offline, "o"), "");
    }

    #[test]
    fn test_contributor_table_rows_of_six() {
        let table = contributor_table(&CannedRepoHost::default(), "o", "r");
        assert!(table.starts_with("<table><tr>"));
        assert!(table.ends_with("</tr></table>\n"));
        assert_eq!(table.matches("<tr>").count(), 2);
        assert_eq!(table.matches("<td align=\"center\">").count(), 7);
        assert!(table.contains("<sub><b>user0</b></sub>"));
    }

    #[test]
    fn test_pages_table_lists_only_pages_repos() {
        let table = pages_table(&CannedRepoHost::default(), "octo");
        assert_eq!(
            table,
            "||||\n|---|---|---|\n|site|![GitHub Repo stars](https://img.shields.io/github/stars/octo/site?style=social)|[view](https://octo.github.io/site/)|"
        );
    }

    #[test]
    fn test_feed_latest_post_fallbacks() {
        assert_eq!(
            feed_latest_post(&Offline, "https://x/feed", "https://x"),
            "[https://x](https://x)"
        );
        assert_eq!(feed_latest_post(&CannedFeed::empty(), "u", "d"), FEED_EMPTY_MARKER);
        assert_eq!(feed_latest_published(&Offline, "u"), "");
        assert_eq!(feed_latest_published(&CannedFeed::empty(), "u"), FEED_EMPTY_MARKER);
    }

    #[test]
    fn test_feed_latest_published() {
        let feed = CannedFeed::with_post("Post", "https://b/p", "2024-04-01T00:00:00Z");
        assert_eq!(feed_latest_published(&feed, "u"), "2024-04-01T00:00:00Z");
    }

    #[test]
    fn test_format_post_badge_window() {
        let now = Utc.with_ymd_and_hms(2024, 4, 10, 0, 0, 0).unwrap();
        let mut post = FeedPost {
            title: "A | B".to_string(),
            link: "https://b/p".to_string(),
            published: Some(now - Duration::days(2)),
        };
        assert_eq!(format_post(&post, now), format!("[A   B](https://b/p){NEW_POST_BADGE}"));

        post.published = Some(now - Duration::days(8));
        assert_eq!(format_post(&post, now), "[A   B](https://b/p)");

        post.published = Some(now + Duration::days(1));
        assert_eq!(format_post(&post, now), "[A   B](https://b/p)");

        post.published = None;
        assert_eq!(format_post(&post, now), "[A   B](https://b/p)");
    }
}

//! Pure text and Markdown helpers. None of these touch the network.

use regex::Regex;
use std::sync::LazyLock;
use tera::Value;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*\[.*\]\(.*\)").expect("markdown link pattern is valid"));

static LINK_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]\(.*/|\)").expect("link decoration pattern is valid"));

/// Render a loosely-typed value for a Markdown table cell.
///
/// Booleans become check/cross emoji, strings pass through unchanged and
/// every other value renders as nothing.
pub fn sanitize_render(value: &Value) -> String {
    match value {
        Value::Bool(true) => ":white_check_mark:".to_string(),
        Value::Bool(false) => ":x:".to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

pub fn link(text: &str, url: &str) -> String {
    format!("[{text}]({url})")
}

/// A Markdown link, or nothing when `url` is empty.
pub fn link_or_empty(text: &str, url: &str) -> String {
    if url.is_empty() {
        String::new()
    } else {
        link(text, url)
    }
}

/// `:octocat:` linking to a GitHub profile; empty for an empty user.
pub fn emoji_link(user: &str) -> String {
    if user.is_empty() {
        String::new()
    } else {
        link(":octocat:", &format!("https://github.com/{user}"))
    }
}

pub fn twitter_link(user: &str) -> String {
    if user.is_empty() {
        String::new()
    } else {
        link(&format!("@{user}"), &format!("https://twitter.com/{user}"))
    }
}

pub fn youtube_link(channel: &str) -> String {
    if channel.is_empty() {
        String::new()
    } else {
        link("YouTube", &format!("https://www.youtube.com/{channel}"))
    }
}

/// Whether `text` contains a Markdown-style link.
pub fn has_markdown_link(text: &str) -> bool {
    MARKDOWN_LINK.is_match(text)
}

/// Extract the GitHub ID from a link such as `[Rick](https://github.com/linuxsuren)`.
pub fn github_id(link: &str) -> String {
    LINK_DECORATION.replace_all(link, "").into_owned()
}

pub fn star_history(owner: &str, repo: &str) -> String {
    format!(
        "[![Star History Chart](https://api.star-history.com/svg?repos={owner}/{repo}&type=Date)](https://star-history.com/#{owner}/{repo}&Date)"
    )
}

pub fn visitor_count(id: &str) -> String {
    format!("![Visitor Count](https://profile-counter.glitch.me/{id}/count.svg)")
}

//! Constants shared across yaml-readme.
//!
//! Default CLI values, environment variable names, URLs embedded in
//! generated Markdown and network timeouts live here so they are
//! discoverable in one place.

use std::time::Duration;

/// Default glob pattern for record files.
pub const DEFAULT_PATTERN: &str = "items/*.yaml";

/// Default template file.
pub const DEFAULT_TEMPLATE: &str = "README.tpl";

/// Lines starting with this marker are removed from the template before rendering.
pub const DIRECTIVE_MARKER: &str = "#!yaml-readme";

/// Project link used in the attribution header.
pub const PROJECT_URL: &str = "https://github.com/LinuxSuRen/yaml-readme";

/// Default base URL of the GitHub REST API.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

/// Environment variable overriding [`DEFAULT_GITHUB_API`].
pub const GITHUB_API_ENV: &str = "YAML_README_GITHUB_API";

/// Environment variables consulted for an API token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GITHUB_TOKEN", "GH_TOKEN"];

/// `User-Agent` sent with every request; GitHub rejects requests without one.
pub const USER_AGENT_VALUE: &str = concat!("yaml-readme/", env!("CARGO_PKG_VERSION"));

/// Timeout for a single HTTP request (30 seconds).
///
/// This is the only bound on a remote lookup; the render waits for it.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Contributors per table row in `contributor_table`.
pub const CONTRIBUTORS_PER_ROW: usize = 6;

/// A feed post younger than this gets the "new" badge.
pub const NEW_POST_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Badge appended to recent feed posts.
pub const NEW_POST_BADGE: &str =
    "![news](https://github.com/ChanceYu/front-end-rss/blob/master/assets/new.png?raw=true)";

/// Returned by the feed functions when a feed parses but has no entries.
pub const FEED_EMPTY_MARKER: &str = "feed parsed failed";

//! Glob pattern expansion for record discovery.
//!
//! Record files are located with standard glob patterns relative to the
//! current working directory:
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any sequence of path components (recursive matching)
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match a character set or range
//!
//! # Ordering
//!
//! Matches are returned in the order the `glob` crate yields them, which is
//! sorted per directory. The same filesystem state therefore always produces
//! the same order, which keeps generated documents reproducible.
//!
//! # Examples
//!
//! ```rust,no_run
//! use yaml_readme::pattern::PatternMatcher;
//!
//! # fn example() -> anyhow::Result<()> {
//! let matcher = PatternMatcher::new("items/*.yaml")?;
//! for path in matcher.find_matches() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::core::ReadmeError;

/// Compiled glob pattern for locating record files.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    original_pattern: String,
}

impl PatternMatcher {
    /// Compile a glob pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ReadmeError::InvalidPattern`] when the pattern has invalid
    /// glob syntax (for example an unclosed `[`).
    pub fn new(pattern_str: &str) -> Result<Self, ReadmeError> {
        let pattern = Pattern::new(pattern_str).map_err(|e| ReadmeError::InvalidPattern {
            pattern: pattern_str.to_string(),
            reason: e.msg.to_string(),
        })?;

        Ok(Self {
            pattern,
            original_pattern: pattern_str.to_string(),
        })
    }

    /// Check whether a path matches the pattern without touching the filesystem.
    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.matches_path(path)
    }

    /// Expand the pattern against the filesystem and return matching files.
    ///
    /// Directories are skipped. Entries that cannot be read while walking
    /// (permission errors and the like) are logged and skipped.
    pub fn find_matches(&self) -> Vec<PathBuf> {
        debug!("Expanding glob pattern '{}'", self.original_pattern);

        // The pattern already compiled in `new`, so this cannot fail on syntax.
        let Ok(paths) = glob::glob(&self.original_pattern) else {
            return Vec::new();
        };

        let mut matches = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    trace!("Pattern match: {}", path.display());
                    matches.push(path);
                }
                Ok(path) => trace!("Skipping non-file match: {}", path.display()),
                Err(e) => {
                    tracing::warn!("Failed to read {} while globbing: {}", e.path().display(), e);
                }
            }
        }

        debug!("Pattern '{}' matched {} file(s)", self.original_pattern, matches.len());
        matches
    }
}

//! Test utilities for yaml-readme
//!
//! This module provides helpers shared by unit and integration tests:
//! - Temporary project directories with record files and templates
//! - Canned remote collaborators that never touch the network
//! - One-time logging initialization
//!
//! # Example
//!
//! ```rust,no_run
//! use yaml_readme::test_utils::ReadmeProject;
//!
//! let project = ReadmeProject::new().unwrap();
//! project.write_record("a.yaml", "name: a\n").unwrap();
//! project.write_template("{% for item in items %}{{ item.name }}{% endfor %}").unwrap();
//! assert!(project.pattern().ends_with("items/*.yaml"));
//! ```

pub mod fixtures;
pub mod remotes;

pub use fixtures::{ReadmeProject, RecordFixture};
pub use remotes::{CannedFeed, CannedRepoHost};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// This function initializes the tracing subscriber for tests, but only once
/// regardless of how many times it's called. It respects the `RUST_LOG` environment
/// variable if set, or uses the provided log level.
///
/// # Arguments
///
/// * `level` - Optional log level to use. If None, uses `RUST_LOG` environment variable
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            // No logging if neither is provided
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}

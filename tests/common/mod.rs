//! Common test utilities for yaml-readme integration tests

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// An API base that refuses connections, so remote lookups fail fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Environment variables that would otherwise leak the caller's setup into a test.
const ISOLATED_VARS: &[&str] = &[
    "YAML_README_PATTERN",
    "YAML_README_TEMPLATE",
    "YAML_README_SORT_BY",
    "YAML_README_GROUP_BY",
    "GITHUB_TOKEN",
    "GH_TOKEN",
    "RUST_LOG",
];

/// The yaml-readme binary running in `dir` with an isolated environment.
pub fn yaml_readme(dir: &Path) -> Command {
    yaml_readme_with_api(dir, UNREACHABLE_API)
}

/// Like [`yaml_readme`], with GitHub API calls sent to `api`.
pub fn yaml_readme_with_api(dir: &Path, api: &str) -> Command {
    let mut cmd = Command::cargo_bin("yaml-readme").unwrap();
    cmd.current_dir(dir).env("YAML_README_GITHUB_API", api).env("NO_COLOR", "1");
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

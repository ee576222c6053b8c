//! yaml-readme - generate a README from YAML metadata files
//!
//! A directory of small YAML files, one per project, tool or article, is
//! turned into a Markdown document by rendering a Tera template over the
//! parsed records.
//!
//! # Architecture Overview
//!
//! One invocation is one sequential pipeline:
//! - Records are discovered with a glob pattern and parsed as YAML mappings
//! - The flat list is sorted by a field, or the records are bucketed by a field
//! - The template is rendered with the records and a library of helper functions
//!
//! ## Key Features
//!
//! - **Provenance fields**: every record carries `filename`, `parentname` and `fullpath`
//! - **Skip markers**: records with `ignore: true` are dropped at load time
//! - **Table of contents**: generated from the template's own headings
//! - **GitHub lookups**: user links, repository stars, contributors and Pages sites
//! - **Feeds**: latest post of an RSS or Atom feed, with a badge for recent posts
//! - **Degradation**: a failed lookup renders fallback text instead of failing
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface and pipeline orchestration
//! - [`core`] - Error types and user-facing error formatting
//! - [`metadata`] - Records, loading, sorting and grouping
//! - [`pattern`] - Glob matching for record discovery
//! - [`remote`] - GitHub API and feed clients behind traits
//! - [`templating`] - Template loading, function library and rendering
//! - [`constants`] - Defaults, environment variable names and URLs
//!
//! # Template Example
//!
//! ```markdown
//! |Name|Author|Stars|
//! |---|---|---|
//! {%- for item in items %}
//! |{{ item.name }}|{{ user_lookup(id=item.author) }}|{{ repo_stars(owner=item.owner, repo=item.repo) }}|
//! {%- endfor %}
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Render README.tpl over items/*.yaml, newest year first
//! yaml-readme --sort-by year > README.md
//!
//! # List template functions
//! yaml-readme --print-functions
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod metadata;
pub mod pattern;
pub mod remote;
pub mod templating;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

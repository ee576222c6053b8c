//! Integration test suite for yaml-readme
//!
//! These tests run the compiled binary against temporary project directories
//! and check stdout, stderr and the exit status.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Flags, introspection modes and fatal errors
//! - **pipeline**: Loading, sorting, grouping and rendering records
//! - **remote_lookups**: GitHub-backed functions against a mock API

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod pipeline;
mod remote_lookups;

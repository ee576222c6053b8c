//! Core types shared across yaml-readme.
//!
//! Currently this is the error system: [`ReadmeError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting them on the
//! command line.

pub mod error;

pub use error::{ErrorContext, ReadmeError, user_friendly_error};

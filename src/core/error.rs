//! Error handling for yaml-readme
//!
//! Fatal failures are represented by [`ReadmeError`]; everything else is
//! absorbed where it happens (a record file that fails to parse is skipped, a
//! failed remote lookup renders its fallback text).
//!
//! # Error Categories
//!
//! | Category | Type | Fatal |
//! |----------|------|-------|
//! | Invalid glob pattern | [`ReadmeError::InvalidPattern`] | yes |
//! | Unparseable record file | logged warning | no |
//! | Template syntax / evaluation | [`ReadmeError::Template`] | yes |
//! | Remote lookup failure | `RemoteError`, replaced by fallback text | no |
//! | Writing the document | [`ReadmeError::Output`] | yes |
//!
//! Use [`user_friendly_error`] to turn any error reaching `main` into an
//! [`ErrorContext`] with details and a suggestion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use yaml_readme::core::{ReadmeError, user_friendly_error};
//!
//! let error = ReadmeError::InvalidPattern {
//!     pattern: "items/[.yaml".to_string(),
//!     reason: "invalid range pattern".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // coloured error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::templating::TemplateError;

/// The main error type for yaml-readme operations.
#[derive(Error, Debug)]
pub enum ReadmeError {
    /// The record glob pattern has invalid syntax.
    ///
    /// Zero matches is not an error; only a pattern that cannot be compiled.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied
        pattern: String,
        /// Why the glob compiler rejected it
        reason: String,
    },

    /// The template failed to parse or evaluate.
    #[error("Failed to render template '{template}'")]
    Template {
        /// Template file name
        template: String,
        /// The structured rendering error
        #[source]
        source: TemplateError,
    },

    /// The rendered document could not be written to its destination.
    #[error("Failed to write the rendered document")]
    Output {
        #[source]
        source: std::io::Error,
    },

    /// Anything else, with a free-form message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// An error plus user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ReadmeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without details or suggestion.
    #[must_use]
    pub const fn new(error: ReadmeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] for CLI display.
///
/// [`ReadmeError`] variants get tailored suggestions; I/O errors get
/// filesystem guidance; anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<ReadmeError>() {
        Ok(readme_error) => return create_error_context(readme_error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                "Check file ownership and permissions of the records and template"
            }
            std::io::ErrorKind::NotFound => {
                "Check that the file or directory exists and the path is correct"
            }
            _ => "Re-run with --verbose for more information",
        };
        return ErrorContext::new(ReadmeError::Other {
            message: format!("{error:#}"),
        })
        .with_suggestion(suggestion);
    }

    ErrorContext::new(ReadmeError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: ReadmeError) -> ErrorContext {
    match error {
        ReadmeError::InvalidPattern {
            ..
        } => ErrorContext::new(error)
            .with_details("Record files are located with a glob pattern such as 'items/*.yaml'")
            .with_suggestion("Quote the pattern in your shell and check for unbalanced '[' or ']'"),
        ReadmeError::Template {
            ref source,
            ..
        } => {
            let details = source.format_with_context();
            ErrorContext::new(error).with_details(details)
        }
        ReadmeError::Output {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the output destination is writable"),
        ReadmeError::Other {
            ..
        } => ErrorContext::new(error),
    }
}

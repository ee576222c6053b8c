//! Command-line interface for yaml-readme.
//!
//! One invocation runs one pipeline and writes the document to stdout:
//!
//! 1. Load every YAML record matched by `--pattern`
//! 2. Sort the records (`--sort-by`) or bucket them (`--group-by`)
//! 3. Render `--template` with the function library
//!
//! # Usage
//!
//! ```bash
//! # Render README.tpl over items/*.yaml
//! yaml-readme > README.md
//!
//! # Newest first by year, records from another directory
//! yaml-readme -p 'data/*.yaml' --sort-by year > README.md
//!
//! # Oldest first
//! yaml-readme --sort-by '!year'
//!
//! # Bind `groups` instead of `items`
//! yaml-readme --group-by category --include-header=false
//!
//! # Introspection
//! yaml-readme --print-functions
//! yaml-readme --print-variables
//! ```
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `YAML_README_PATTERN` | default for `--pattern` |
//! | `YAML_README_TEMPLATE` | default for `--template` |
//! | `YAML_README_SORT_BY` | default for `--sort-by` |
//! | `YAML_README_GROUP_BY` | default for `--group-by` |
//! | `GITHUB_TOKEN` / `GH_TOKEN` | token for GitHub API lookups |
//! | `YAML_README_GITHUB_API` | GitHub API base URL |
//! | `RUST_LOG` | overrides the log filter |


use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_PATTERN, DEFAULT_TEMPLATE};
use crate::core::ReadmeError;
use crate::metadata::{RecordLoader, SYNTHESIZED_FIELDS, SortKey, sort_records};
use crate::remote::{RemoteConfig, Remotes};
use crate::templating::{FunctionLibrary, RenderContext, TemplateError, TemplateRenderer, load_template};

/// Runtime configuration resolved from flags and the environment.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive, e.g. `debug`
    pub log_level: Option<String>,

    /// Remote collaborator settings
    pub remote: RemoteConfig,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Render a README from YAML records and a template.
#[derive(Parser, Debug)]
#[command(
    name = "yaml-readme",
    about = "Generate a README from YAML metadata files and a template",
    version,
    long_about = "yaml-readme loads YAML records matched by a glob pattern, optionally sorts or groups them, \
                  and renders a Tera template with a library of Markdown and GitHub helper functions."
)]
pub struct Cli {
    /// Glob pattern of the YAML record files
    #[arg(short, long, env = "YAML_README_PATTERN", default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Template file to render
    #[arg(short, long, env = "YAML_README_TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    template: PathBuf,

    /// Prepend a "generated file" header naming the template
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    include_header: bool,

    /// Field to sort by, newest first; prefix with `!` for ascending order
    #[arg(long, env = "YAML_README_SORT_BY")]
    sort_by: Option<String>,

    /// Field to group records by; binds `groups` instead of `items`
    #[arg(long, env = "YAML_README_GROUP_BY")]
    group_by: Option<String>,

    /// Print the names of all template functions and exit
    #[arg(long)]
    print_functions: bool,

    /// Print the fields added to every record and exit
    #[arg(long)]
    print_variables: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Resolve configuration, install logging and run the pipeline.
    pub fn execute(self, out: &mut impl Write) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(config, out)
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            remote: RemoteConfig::from_env(),
        }
    }

    pub fn execute_with_config(self, config: CliConfig, out: &mut impl Write) -> Result<()> {
        if self.print_functions {
            return print_lines(out, FunctionLibrary::all_names());
        }
        if self.print_variables {
            return print_lines(out, SYNTHESIZED_FIELDS.iter().copied());
        }

        let mut loaded = RecordLoader::new(&self.pattern)
            .with_group_by(self.group_by.as_deref().unwrap_or_default())
            .load()?;

        if let Some(key) = self.sort_by.as_deref().and_then(SortKey::parse) {
            tracing::debug!("Sorting {} records by {:?}", loaded.item_count(), key);
            sort_records(&mut loaded.records, &key);
        }

        let source = load_template(&self.template, self.include_header);
        let remotes =
            Remotes::from_config(&config.remote).context("Failed to set up the HTTP clients")?;

        let template_name = self.template.display().to_string();
        let context = RenderContext::from_loaded(source, loaded);
        TemplateRenderer::new(template_name.clone(), remotes).render(&context, out).map_err(
            |source| match source {
                TemplateError::Output {
                    source,
                } => ReadmeError::Output {
                    source,
                },
                source => ReadmeError::Template {
                    template: template_name,
                    source,
                },
            },
        )?;

        Ok(())
    }
}

fn print_lines<'a>(out: &mut impl Write, lines: impl IntoIterator<Item = &'a str>) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}").map_err(|source| ReadmeError::Output {
            source,
        })?;
    }
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or("info")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! README templating with Tera.
//!
//! A render pass takes a template source, the loaded records and the remote
//! collaborators, and produces one Markdown document:
//!
//! 1. [`load_template`] reads the template file (or the built-in fallback),
//!    optionally prepends the attribution header and strips
//!    `#!yaml-readme` directive lines.
//! 2. A [`RenderContext`] freezes the source, the bound data and the
//!    counters.
//! 3. [`TemplateRenderer::render`] builds a fresh Tera instance, registers
//!    the [`FunctionLibrary`] for this context and writes the output.
//!
//! # Template Context
//!
//! - `items`: the flat list of records, when no group-by field is given
//! - `groups`: group key → list of records, when a group-by field is given
//!
//! Every record exposes its YAML fields plus `filename`, `parentname` and
//! `fullpath`.
//!
//! # Examples
//!
//! ```markdown
//! ## Tools
//! {{ table_of_contents() }}
//!
//! |Name|Author|Stars|
//! |---|---|---|
//! {%- for item in items %}
//! |{{ item.name }}|{{ user_lookup(id=item.author) }}|{{ repo_stars(owner=item.owner, repo=item.repo) }}|
//! {%- endfor %}
//! ```
//!
//! Tera's built-in filters and functions (`upper`, `replace`, `date`,
//! `range`, ...) are always available next to the library functions.

pub mod context;
pub mod error;
pub mod functions;
pub mod renderer;
pub mod source;
pub mod toc;
pub mod utils;


pub use context::{RenderContext, RenderCounters, RenderData};
pub use error::{ErrorLocation, TemplateError};
pub use functions::FunctionLibrary;
pub use renderer::TemplateRenderer;
pub use source::load_template;
pub use toc::extract_toc;

//! Loading the template text.
//!
//! A missing template file is not fatal: a built-in three-column table over
//! `items` is used instead and a warning is logged.
//!
//! Two transformations happen before rendering:
//!
//! 1. Optionally, an attribution header naming the template file is prepended.
//! 2. Every `#!yaml-readme ...` directive line is removed.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::constants::{DIRECTIVE_MARKER, PROJECT_URL};

/// Template used when the configured template file cannot be read.
pub const FALLBACK_TEMPLATE: &str = r#"|中文名称|英文名称|JD|
|---|---|---|
{%- for val in items %}
|{{ val.zh | default(value="") }}|{{ val.en | default(value="") }}|{{ val.jd | default(value="") }}|
{%- endfor %}"#;

static DIRECTIVE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{} .*\n", regex::escape(DIRECTIVE_MARKER)))
        .expect("directive pattern is a valid regex")
});

/// Read the template at `path` and prepare it for rendering.
pub fn load_template(path: &Path, include_header: bool) -> String {
    let body = match std::fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(
                "failed to load README template {}, using the built-in table: {}",
                path.display(),
                e
            );
            FALLBACK_TEMPLATE.to_string()
        }
    };

    prepare_template(path, &body, include_header)
}

/// Apply header injection and directive stripping to template text.
pub fn prepare_template(path: &Path, body: &str, include_header: bool) -> String {
    let mut template = String::with_capacity(body.len() + 160);
    if include_header {
        template.push_str(&attribution_header(path));
    }
    template.push_str(body);

    strip_directives(&template)
}

/// The "generated file" banner naming the template.
pub fn attribution_header(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!(
        "> This file was generated by [{name}]({name}) via [yaml-readme]({PROJECT_URL}), please don't edit it directly!\n\n"
    )
}

/// Remove `#!yaml-readme ...` lines.
pub fn strip_directives(template: &str) -> String {
    DIRECTIVE_LINE.replace_all(template, "").into_owned()
}

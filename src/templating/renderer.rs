//! Template rendering engine with Tera.
//!
//! This module provides the [`TemplateRenderer`], which renders one
//! [`RenderContext`] with a fresh Tera instance carrying the function library,
//! and turns Tera's errors into structured [`TemplateError`]s.

use regex::Regex;
use std::io::Write;
use strsim::levenshtein;
use tera::Tera;

use super::context::{RenderContext, RenderData};
use super::error::{ErrorLocation, TemplateError};
use super::functions::FunctionLibrary;
use crate::metadata::SYNTHESIZED_FIELDS;
use crate::remote::Remotes;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
/// This represents a 50% similarity threshold for variable name suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Number of template lines shown before and after an error line.
const CONTEXT_LINES: usize = 3;

/// Renders README templates.
///
/// The renderer owns the remote collaborators and the template name used in
/// error messages. Each call to [`render`](Self::render) builds its own Tera
/// instance and [`FunctionLibrary`], so nothing carries over between renders.
///
/// # Examples
///
/// ```rust
/// use yaml_readme::remote::Remotes;
/// use yaml_readme::templating::{RenderContext, RenderCounters, RenderData, TemplateRenderer};
///
/// let context = RenderContext::new(
///     "{{ item_count() }} items",
///     RenderData::Flat(Vec::new()),
///     RenderCounters::default(),
/// );
/// let renderer = TemplateRenderer::new("README.tpl", Remotes::offline());
///
/// let mut out = Vec::new();
/// renderer.render(&context, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0 items");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template_name: String,
    remotes: Remotes,
}

impl TemplateRenderer {
    pub fn new(template_name: impl Into<String>, remotes: Remotes) -> Self {
        Self {
            template_name: template_name.into(),
            remotes,
        }
    }

    /// Render `context` and write the document to `out`.
    ///
    /// Nothing is written unless rendering succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::SyntaxError`] or [`TemplateError::VariableNotFound`]
    /// when the template is invalid, and [`TemplateError::Output`] when the
    /// writer fails.
    pub fn render(&self, context: &RenderContext, out: &mut impl Write) -> Result<(), TemplateError> {
        let rendered = self.render_to_string(context)?;

        out.write_all(rendered.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|source| TemplateError::Output {
                source,
            })
    }

    /// Render `context` to a string.
    pub fn render_to_string(&self, context: &RenderContext) -> Result<String, TemplateError> {
        let counters = context.counters();
        tracing::debug!(
            "Rendering {} bound as `{}` ({} items, {} groups)",
            self.template_name,
            context.data().variable_name(),
            counters.item_count,
            counters.group_count
        );

        // Fresh instance per render; the library closes over this render's data
        let mut tera = Tera::default();
        FunctionLibrary::new(context.source(), counters, self.remotes.clone()).register(&mut tera);

        let rendered = tera
            .render_str(context.source(), &context.to_tera_context())
            .map_err(|e| self.parse_tera_error(&e, context))?;

        tracing::debug!("Template rendering complete");
        Ok(rendered)
    }

    /// Parse a Tera error into a structured TemplateError
    fn parse_tera_error(&self, error: &tera::Error, context: &RenderContext) -> TemplateError {
        let line_number = Self::extract_line_from_tera_error(error);

        let context_lines = line_number
            .map(|line| Self::extract_context_lines(context.source(), line, CONTEXT_LINES))
            .filter(|lines| !lines.is_empty());

        let location = Box::new(ErrorLocation {
            template_name: self.template_name.clone(),
            line_number,
            context_lines,
        });

        // Render errors wrap the interesting message one level down
        let variable = Self::error_chain(error).iter().find_map(|msg| Self::extract_variable_name(msg));

        match variable {
            Some(name) => {
                let available_variables = Self::extract_available_variables(context.data());
                let suggestions = Self::find_similar_variables(&name, &available_variables);
                TemplateError::VariableNotFound {
                    variable: name,
                    available_variables: Box::new(available_variables),
                    suggestions: Box::new(suggestions),
                    location,
                }
            }
            None => TemplateError::SyntaxError {
                message: Self::format_tera_error(error),
                location,
            },
        }
    }

    fn error_chain(error: &tera::Error) -> Vec<String> {
        use std::error::Error;

        let mut messages = vec![error.to_string()];
        let mut current_error: Option<&dyn Error> = error.source();
        while let Some(err) = current_error {
            messages.push(err.to_string());
            current_error = err.source();
        }
        messages
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }

    /// Variables a template can reference: the bound data and the
    /// synthesized fields of each record.
    fn extract_available_variables(data: &RenderData) -> Vec<String> {
        let root = data.variable_name();
        let mut vars = vec![root.to_string()];

        if let RenderData::Flat(records) = data {
            let mut fields: Vec<&str> = SYNTHESIZED_FIELDS.to_vec();
            for record in records {
                for (key, _) in record.fields() {
                    if !fields.contains(&key) {
                        fields.push(key);
                    }
                }
            }
            vars.extend(fields.into_iter().map(|field| format!("item.{field}")));
        }

        vars
    }

    /// Find similar variable names using Levenshtein distance
    fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> = available
            .iter()
            .map(|var| {
                let distance = levenshtein(target, var);
                (var.clone(), distance)
            })
            .collect();

        // Sort by distance (closest first)
        scored.sort_by_key(|(_, dist)| *dist);

        // Return top 3 suggestions within reasonable distance
        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(var, _)| var)
            .collect()
    }

    /// Extract context lines around an error location
    ///
    /// Returns up to `context_size` lines before and after the error line,
    /// along with their line numbers (1-indexed).
    fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        // Tera uses 1-indexed line numbers
        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, line.to_string()))
            .collect()
    }

    /// Extract line number from Tera error message
    ///
    /// Tera includes line:column information in parse error messages.
    /// Examples: "1:7", "15:23", "864:1"
    fn extract_line_from_tera_error(error: &tera::Error) -> Option<usize> {
        let error_msg = format!("{:?}", error);

        let re = Regex::new(r"(\d+):(\d+)").ok()?;
        re.captures(&error_msg)
            .and_then(|caps| caps.get(1))
            .and_then(|line| line.as_str().parse::<usize>().ok())
    }

    /// Format a Tera error with detailed information about what went wrong.
    ///
    /// Walks the error chain and drops the internal `__tera_one_off`
    /// template name Tera uses for string templates.
    pub fn format_tera_error(error: &tera::Error) -> String {
        let mut messages = Vec::new();

        for msg in Self::error_chain(error) {
            let cleaned = msg
                .replace("while rendering '__tera_one_off'", "")
                .replace("Failed to render '__tera_one_off'", "Template rendering failed")
                .replace("Failed to parse '__tera_one_off'", "Template syntax error")
                .replace("'__tera_one_off'", "template")
                .trim()
                .to_string();

            if !cleaned.is_empty()
                && cleaned != "Template rendering failed"
                && cleaned != "Template syntax error"
            {
                messages.push(cleaned);
            }
        }

        if !messages.is_empty() {
            messages.join("\n  → ")
        } else {
            "Template syntax error (see details above)".to_string()
        }
    }
}

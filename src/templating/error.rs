//! Structured errors for template rendering.
//!
//! Tera reports failures as a chain of messages mentioning its internal
//! one-off template name. The renderer turns those into a [`TemplateError`]
//! that names the template file, the line when Tera reports one, and the
//! surrounding template lines.

/// A template that could not be rendered.
#[derive(Debug)]
pub enum TemplateError {
    /// A variable used by the template is not bound.
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    /// Parse error, unknown function or filter, or a function that rejected its arguments.
    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    /// The rendered document could not be written to the output sink.
    Output {
        source: std::io::Error,
    },
}

/// Where in the template an error happened.
#[derive(Debug, Clone, Default)]
pub struct ErrorLocation {
    /// Template file name as given on the command line
    pub template_name: String,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Numbered template lines around the error
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                ..
            } => {
                write!(f, "Template variable not found: '{}'", variable)
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {}", message)
            }
            TemplateError::Output {
                source,
            } => {
                write!(f, "Failed to write rendered output: {}", source)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Output {
                source,
            } => Some(source),
            _ => None,
        }
    }
}

impl TemplateError {
    /// Generate user-friendly error message with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
            TemplateError::Output {
                source,
            } => format!("ERROR: Output Failed\n\nError: {}\n", source),
        }
    }

    /// Location of the error, when it comes from the template itself.
    pub fn location(&self) -> Option<&ErrorLocation> {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            } => Some(&**location),
            TemplateError::Output {
                ..
            } => None,
        }
    }
}

fn format_context_lines(msg: &mut String, location: &ErrorLocation) {
    let Some(lines) = &location.context_lines else {
        return;
    };

    msg.push('\n');
    for (number, line) in lines {
        let marker = if Some(*number) == location.line_number {
            ">"
        } else {
            " "
        };
        msg.push_str(&format!("{} {:>4} | {}\n", marker, number, line));
    }
}

/// Format a detailed "variable not found" error message
fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {}\n", variable));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push_str(&format!("Template: {}\n", location.template_name));
    format_context_lines(&mut msg, location);
    msg.push('\n');

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables in this context:\n");
        for var in available_variables {
            msg.push_str(&format!("  {}\n", var));
        }
        msg.push('\n');
    }

    msg
}

/// Format syntax error
fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    msg.push_str(&format!("Template: {}\n", location.template_name));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    format_context_lines(&mut msg, location);

    msg.push_str("\nSUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Unknown function or filter names (run with --print-functions)\n");
    msg.push_str("  - Function arguments passed by position instead of by name\n\n");

    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> ErrorLocation {
        ErrorLocation {
            template_name: "README.tpl".to_string(),
            line_number: Some(2),
            context_lines: Some(vec![(1, "# Title".to_string()), (2, "{{ oops".to_string())]),
        }
    }

    #[test]
    fn test_syntax_error_formatting() {
        let err = TemplateError::SyntaxError {
            message: "expected `}}`".to_string(),
            location: Box::new(location()),
        };

        assert_eq!(err.to_string(), "Template syntax error: expected `}}`");
        let formatted = err.format_with_context();
        assert!(formatted.contains("Template: README.tpl"));
        assert!(formatted.contains("Line: 2"));
        assert!(formatted.contains(">    2 | {{ oops"));
        assert!(formatted.contains("\n     1 | # Title"));
    }

    #[test]
    fn test_variable_not_found_lists_suggestions() {
        let err = TemplateError::VariableNotFound {
            variable: "item".to_string(),
            available_variables: Box::new(vec!["items".to_string()]),
            suggestions: Box::new(vec!["items".to_string()]),
            location: Box::new(ErrorLocation {
                template_name: "README.tpl".to_string(),
                ..Default::default()
            }),
        };

        let formatted = err.format_with_context();
        assert!(formatted.contains("Variable: item"));
        assert!(formatted.contains("Did you mean one of these?\n  - items"));
        assert!(err.location().is_some());
    }

    #[test]
    fn test_output_error_has_source() {
        use std::error::Error;

        let err = TemplateError::Output {
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        };
        assert!(err.source().is_some());
        assert!(err.location().is_none());
        assert!(err.to_string().contains("closed"));
    }
}

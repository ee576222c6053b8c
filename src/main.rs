//! yaml-readme CLI entry point
//!
//! Parses arguments, runs the render pipeline with stdout as the output and
//! prints fatal errors with context before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use yaml_readme::cli;
use yaml_readme::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let stdout = std::io::stdout();
    match cli.execute(&mut stdout.lock()) {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

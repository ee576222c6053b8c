//! Embedding the `--help` output of a local command.

use colored::Colorize;
use std::process::Command;
use tracing::debug;

/// Run `<command> --help` and wrap its standard output in a `shell` code fence.
///
/// A command that is not on `PATH`, fails to start or exits unsuccessfully
/// renders as nothing. The failure is reported on stderr so it is visible
/// even when logging is quiet.
pub fn run_external_help(command: &str) -> String {
    let program = match which::which(command) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{} cannot find command {command}: {e}", "Warning:".yellow().bold());
            return String::new();
        }
    };

    debug!("Running {} --help", program.display());
    match Command::new(&program).arg("--help").output() {
        Ok(output) if output.status.success() => {
            format!("```shell\n{}\n```", String::from_utf8_lossy(&output.stdout))
        }
        Ok(output) => {
            eprintln!(
                "{} {command} --help exited with {}: {}",
                "Warning:".yellow().bold(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            String::new()
        }
        Err(e) => {
            eprintln!("{} failed to run {command} --help: {e}", "Warning:".yellow().bold());
            String::new()
        }
    }
}

//! Diagnostics for humans, always on stderr.

use crate::boundary::BoundaryWarning;
use crate::error::VersionError;
use console::style;

/// Format a failure as `error[<component>]: <message>`
pub fn format_failure(err: &VersionError) -> String {
    format!("error[{}]: {}", err.kind(), err)
}

/// Print a resolution failure in red.
pub fn display_failure(err: &VersionError) {
    eprintln!("{}", style(format_failure(err)).red().for_stderr());
}

/// Print a failure that was downgraded because failing is disabled.
pub fn display_suppressed_failure(err: &VersionError) {
    eprintln!(
        "{} {} (emitting fallback version)",
        style(format!("warning[{}]:", err.kind()))
            .yellow()
            .bold()
            .for_stderr(),
        err
    );
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

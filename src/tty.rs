//! Terminal I/O utilities for CLI.

use std::io::IsTerminal;

/// Print status message to stderr if running in a terminal.
pub fn status(message: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message);
    }
}

// log_status! macro is defined in the library crate (#[macro_export]) and
// available via roadie::log_status!.

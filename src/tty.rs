//! Terminal detection for CLI output.

use std::io::{self, IsTerminal};

pub fn is_stdout_tty() -> bool {
    io::stdout().is_terminal()
}

pub fn is_stderr_tty() -> bool {
    io::stderr().is_terminal()
}

/// Colors only when both output streams are terminals.
pub fn colors_enabled() -> bool {
    is_stdout_tty() && is_stderr_tty()
}

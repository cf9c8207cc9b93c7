//! Command execution primitives.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Run a command in `dir` with the caller's stdin and stderr attached.
///
/// The child's stdout goes wherever `stdout` points; only its exit status
/// comes back. The working directory is set on the child alone, so the
/// process-wide current directory is never touched.
pub fn run_in(
    dir: &Path,
    program: &str,
    args: &[String],
    stdout: Stdio,
) -> std::io::Result<ExitStatus> {
    Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(stdout)
        .stderr(Stdio::inherit())
        .status()
}

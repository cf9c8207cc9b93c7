//! Dependency installation through the external package manager.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Serialize;

use crate::command;
use crate::error::{Error, InstallFailedDetails, Result};
use crate::validation;

#[cfg(windows)]
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm.cmd";
#[cfg(not(windows))]
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

pub const DEFAULT_PACKAGES: &[&str] = &["hubs-sdk"];

/// Record into package.json with exact versions; keep npm's own output terse.
pub const DEFAULT_INSTALL_FLAGS: &[&str] = &["--save", "--save-exact", "--loglevel", "error"];

/// Where the package manager's stdout goes. Its stderr is always inherited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildOutput {
    /// Share our stdout.
    #[default]
    Inherit,
    /// Write to our stderr, leaving our stdout for a machine-readable result.
    Stderr,
}

impl ChildOutput {
    fn stdio(self) -> Stdio {
        match self {
            ChildOutput::Inherit => Stdio::inherit(),
            ChildOutput::Stderr => Stdio::from(std::io::stderr()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSpec {
    pub program: String,
    pub working_directory: PathBuf,
    pub packages: Vec<String>,
    pub flags: Vec<String>,
    pub output: ChildOutput,
}

impl InstallSpec {
    /// Install `packages` with npm's default flags.
    pub fn new(working_directory: &Path, packages: Vec<String>) -> Self {
        Self {
            program: DEFAULT_PACKAGE_MANAGER.to_string(),
            working_directory: working_directory.to_path_buf(),
            packages,
            flags: to_strings(DEFAULT_INSTALL_FLAGS),
            output: ChildOutput::Inherit,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_flags(mut self, flags: Vec<String>) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_output(mut self, output: ChildOutput) -> Self {
        self.output = output;
        self
    }

    /// `install`, then the flags, then the packages.
    pub fn args(&self) -> Vec<String> {
        std::iter::once("install".to_string())
            .chain(self.flags.iter().cloned())
            .chain(self.packages.iter().cloned())
            .collect()
    }
}

/// Run the install and block until the package manager exits.
///
/// The package manager's stderr goes straight to the terminal and its stdout
/// follows `spec.output`. Any non-zero exit, signal termination, or spawn
/// failure is `install.failed`.
pub fn install_packages(spec: &InstallSpec) -> Result<()> {
    validation::require_non_empty_vec(
        &spec.packages,
        "packages",
        "At least one package is required",
    )?;

    let args = spec.args();
    let status = command::run_in(
        &spec.working_directory,
        &spec.program,
        &args,
        spec.output.stdio(),
    );

    let details = |exit_code: Option<i32>, error: Option<String>| InstallFailedDetails {
        program: spec.program.clone(),
        args: args.clone(),
        working_directory: spec.working_directory.display().to_string(),
        exit_code,
        error,
    };

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(Error::install_failed(details(status.code(), None))),
        Err(e) => Err(Error::install_failed(details(None, Some(e.to_string())))),
    }
}

pub(crate) fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

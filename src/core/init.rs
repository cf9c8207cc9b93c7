//! The project initialization sequence.
//!
//! Steps run strictly in order and the first failure ends the run. Completed
//! steps are never rolled back; the failing step is recorded in the error
//! details under `step`. Progress lines always go to stderr so stdout stays
//! free for the final result.

use std::path::PathBuf;

use serde::Serialize;

use crate::defaults::Defaults;
use crate::directory::{self, DirectoryDisposition};
use crate::error::Result;
use crate::install::{self, ChildOutput, InstallSpec};
use crate::manifest::{self, Manifest};
use crate::name;
use crate::project::ProjectRequest;
use crate::template;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitStep {
    ValidatingName,
    PreparingDirectory,
    MaterializingTemplate,
    WritingManifest,
    InstallingPackages,
}

impl InitStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitStep::ValidatingName => "validating_name",
            InitStep::PreparingDirectory => "preparing_directory",
            InitStep::MaterializingTemplate => "materializing_template",
            InitStep::WritingManifest => "writing_manifest",
            InitStep::InstallingPackages => "installing_packages",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextStep {
    pub command: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub project_name: String,
    pub project_path: PathBuf,
    pub directory: DirectoryDisposition,
    pub files: Vec<String>,
    pub manifest_path: PathBuf,
    pub packages: Vec<String>,
    pub next_steps: Vec<NextStep>,
    pub docs_url: String,
}

/// Commands the new project supports, in the order they are usually run.
pub fn next_steps() -> Vec<NextStep> {
    [
        (
            "npm run login",
            "Log into your Hubs Cloud server. You need to do this first.",
        ),
        ("npm start", "Start the development server for your Hubs app."),
        (
            "npm run deploy",
            "Build and deploy your Hubs app to your Hubs Cloud instance.",
        ),
        ("npm run logout", "Log out of your Hubs Cloud server."),
    ]
    .into_iter()
    .map(|(command, description)| NextStep {
        command: command.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// Create the project described by `request` using `defaults`, sharing our
/// stdout with the package manager.
pub fn run(request: &ProjectRequest, defaults: &Defaults) -> Result<InitReport> {
    run_with_output(request, defaults, ChildOutput::Inherit)
}

/// Like [`run`], with the package manager's stdout sent to `install_output`.
pub fn run_with_output(
    request: &ProjectRequest,
    defaults: &Defaults,
    install_output: ChildOutput,
) -> Result<InitReport> {
    defaults.validate()?;

    step(InitStep::ValidatingName, || {
        name::require_valid_project_name(&request.name)
    })?;

    eprintln!("Creating a new Hubs app in {}.", request.path.display());

    let directory = step(InitStep::PreparingDirectory, || {
        directory::prepare_project_directory(&request.path, &defaults.extra_ignored_files)
    })?;

    let files = step(InitStep::MaterializingTemplate, || {
        template::materialize(&defaults.template_source(), &request.path)
    })?;

    let manifest_path = step(InitStep::WritingManifest, || {
        manifest::write_manifest(&request.path, &Manifest::new(&request.name))
    })?;

    eprintln!("Installing packages. This might take a couple of minutes.");

    let spec = InstallSpec::new(&request.path, defaults.packages.clone())
        .with_program(&defaults.package_manager.program)
        .with_output(install_output);

    step(InitStep::InstallingPackages, || install::install_packages(&spec))?;

    Ok(InitReport {
        project_name: request.name.clone(),
        project_path: request.path.clone(),
        directory,
        files,
        manifest_path,
        packages: spec.packages,
        next_steps: next_steps(),
        docs_url: defaults.docs_url.clone(),
    })
}

fn step<T>(step: InitStep, action: impl FnOnce() -> Result<T>) -> Result<T> {
    action().map_err(|err| err.with_detail("step", step.as_str()))
}

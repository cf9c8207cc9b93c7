use clap::Args;

use create_hubs_app::defaults;
use create_hubs_app::install::ChildOutput;
use create_hubs_app::log_status;
use create_hubs_app::{InitReport, ProjectRequest};

use super::CmdResult;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the Hubs app in
    #[arg(value_name = "project-path")]
    pub project_path: String,

    /// Extra positional arguments passed by wrapper scripts
    #[arg(hide = true, num_args = 0..)]
    pub ignored: Vec<String>,
}

/// `install_output` is `Stderr` in `--json` mode so stdout holds only the envelope.
pub fn run(args: InitArgs, install_output: ChildOutput) -> CmdResult<InitReport> {
    if !args.ignored.is_empty() {
        log_status!("init", "Ignoring extra arguments: {}", args.ignored.join(" "));
    }

    let request = ProjectRequest::resolve(&args.project_path)?;
    let defaults = defaults::load_defaults();

    let report = create_hubs_app::init::run_with_output(&request, &defaults, install_output)?;

    Ok((report, 0))
}

use clap::Parser;

use create_hubs_app::args;
use create_hubs_app::install::ChildOutput;

mod commands;
mod output;
mod tty;

use commands::init;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options clap understands. Any other option is dropped before parsing so
/// wrapper scripts can pass their own flags through.
const KNOWN_FLAGS: &[&str] = &["--json", "--help", "-h", "--version", "-V"];

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Human,
    Json,
}

#[derive(Parser)]
#[command(name = "create-hubs-app")]
#[command(version = VERSION)]
#[command(about = "Create a new Hubs app")]
#[command(override_usage = "create-hubs-app <project-path> [options]")]
struct Cli {
    #[command(flatten)]
    init: init::InitArgs,

    /// Print the result as a JSON envelope instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> std::process::ExitCode {
    let argv = args::strip_unknown_options(std::env::args().collect(), KNOWN_FLAGS);
    let cli = Cli::parse_from(argv);

    let mode = if cli.json {
        ResponseMode::Json
    } else {
        ResponseMode::Human
    };

    if !tty::colors_enabled() {
        colored::control::set_override(false);
    }

    let install_output = match mode {
        ResponseMode::Json => ChildOutput::Stderr,
        ResponseMode::Human => ChildOutput::Inherit,
    };

    let result = init::run(cli.init, install_output);

    let exit_code = match mode {
        ResponseMode::Json => output::print_json_result(result),
        ResponseMode::Human => output::print_human_result(result),
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

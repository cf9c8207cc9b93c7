//! Human-readable output for the terminal.

use colored::Colorize;
use create_hubs_app::{Error, InitReport};

use super::response::exit_code_for_error;
use crate::commands::CmdResult;

pub fn render_report(report: &InitReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", "Finished!".green()));
    out.push_str(&format!(
        "Created {} at {}\n\n",
        report.project_name,
        report.project_path.display()
    ));
    out.push_str("  Inside that directory you can run the following commands:\n\n");

    for step in &report.next_steps {
        out.push_str(&format!("    {}\n", step.command.blue()));
        out.push_str(&format!("      {}\n\n", step.description));
    }

    out.push_str(
        "  Check the documentation for more information on getting set up with Hubs Cloud.\n",
    );
    out.push_str(&format!("  {}\n", report.docs_url));
    out
}

pub fn render_error(err: &Error) -> String {
    let mut out = format!("{}\n", "Error creating Hubs app:".red());
    out.push_str(&format!("  {}\n", err.message.red()));

    for hint in &err.hints {
        out.push_str(&format!("  hint: {}\n", hint.message));
    }

    out
}

/// Print the report to stdout or the error to stderr, returning the exit code.
pub fn print_human_result(result: CmdResult<InitReport>) -> i32 {
    match result {
        Ok((report, exit_code)) => {
            print!("{}", render_report(&report));
            exit_code
        }
        Err(err) => {
            eprint!("{}", render_error(&err));
            exit_code_for_error(err.code)
        }
    }
}

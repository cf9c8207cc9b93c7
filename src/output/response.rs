//! The `--json` envelope and the error-code to exit-code table.
//!
//! Success prints `{"success": true, "data": <report>}`. Failure prints
//! `{"success": false, "error": {code, message, details, hints}}`.

use std::io::{self, Write};

use create_hubs_app::error::Hint;
use create_hubs_app::{Error, ErrorCode, InitReport};
use serde::Serialize;
use serde_json::Value;

use crate::commands::CmdResult;

#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a InitReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody<'a>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: &'a str,
    details: &'a Value,
    #[serde(skip_serializing_if = "no_hints")]
    hints: &'a [Hint],
}

fn no_hints(hints: &&[Hint]) -> bool {
    hints.is_empty()
}

impl<'a> Envelope<'a> {
    fn from_result(result: &'a CmdResult<InitReport>) -> Self {
        match result {
            Ok((report, _)) => Self {
                success: true,
                data: Some(report),
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error: Some(ErrorBody {
                    code: err.code.as_str(),
                    message: &err.message,
                    details: &err.details,
                    hints: &err.hints,
                }),
            },
        }
    }
}

/// Pretty-printed envelope for `result`.
pub fn render_json(result: &CmdResult<InitReport>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope::from_result(result))
}

/// Print the envelope to stdout and return the exit code for `result`.
pub fn print_json_result(result: CmdResult<InitReport>) -> i32 {
    let exit_code = match &result {
        Ok((_, exit_code)) => *exit_code,
        Err(err) => exit_code_for_error(err.code),
    };

    let payload = match render_json(&result) {
        Ok(payload) => payload,
        Err(e) => {
            let err = Error::internal_json(e.to_string(), Some("serialize response".to_string()));
            eprintln!("{}", err);
            return exit_code_for_error(err.code);
        }
    };

    match writeln!(io::stdout().lock(), "{}", payload) {
        Ok(()) => exit_code,
        // A closed pipe means nobody is reading the result.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => exit_code,
        Err(e) => {
            eprintln!("{}", Error::internal_io(e.to_string(), Some("write stdout".to_string())));
            exit_code_for_error(ErrorCode::InternalIoError)
        }
    }
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson
        | ErrorCode::ConfigInvalidValue
        | ErrorCode::ValidationInvalidArgument
        | ErrorCode::ProjectInvalidName => 2,

        ErrorCode::ProjectPathConflict => 4,

        ErrorCode::InstallFailed => 20,

        ErrorCode::TemplateCopyFailed
        | ErrorCode::ManifestWriteFailed
        | ErrorCode::InternalIoError
        | ErrorCode::InternalJsonError
        | ErrorCode::InternalUnexpected => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use create_hubs_app::directory::DirectoryDisposition;
    use create_hubs_app::init::next_steps;
    use std::path::PathBuf;

    fn report() -> InitReport {
        InitReport {
            project_name: "my-app".to_string(),
            project_path: PathBuf::from("/tmp/my-app"),
            directory: DirectoryDisposition::Created,
            files: vec!["README.md".to_string()],
            manifest_path: PathBuf::from("/tmp/my-app/package.json"),
            packages: vec!["hubs-sdk".to_string()],
            next_steps: next_steps(),
            docs_url: "https://hubs.mozilla.com/docs".to_string(),
        }
    }

    fn parse(result: &CmdResult<InitReport>) -> Value {
        serde_json::from_str(&render_json(result).unwrap()).unwrap()
    }

    #[test]
    fn success_envelope_carries_the_report() {
        let json = parse(&Ok((report(), 0)));

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["project_name"], "my-app");
        assert_eq!(json["data"]["directory"], "created");
        assert_eq!(json["data"]["next_steps"][0]["command"], "npm run login");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_envelope_carries_code_details_and_hints() {
        let err = Error::project_path_not_empty("/tmp/my-app", vec!["notes.txt".to_string()]);

        let json = parse(&Err(err));

        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "project.path_conflict");
        assert_eq!(json["error"]["details"]["entries"][0], "notes.txt");
        assert!(json["error"]["hints"][0]["message"].is_string());
    }

    #[test]
    fn hints_are_omitted_when_empty() {
        let json = parse(&Err(Error::project_path_not_directory("/tmp/my-app")));

        assert!(json["error"].get("hints").is_none());
    }

    #[test]
    fn every_failure_is_non_zero() {
        let codes = [
            ErrorCode::ConfigInvalidJson,
            ErrorCode::ConfigInvalidValue,
            ErrorCode::ValidationInvalidArgument,
            ErrorCode::ProjectInvalidName,
            ErrorCode::ProjectPathConflict,
            ErrorCode::TemplateCopyFailed,
            ErrorCode::ManifestWriteFailed,
            ErrorCode::InstallFailed,
            ErrorCode::InternalIoError,
            ErrorCode::InternalJsonError,
            ErrorCode::InternalUnexpected,
        ];

        for code in codes {
            assert_ne!(exit_code_for_error(code), 0, "{}", code.as_str());
        }
        assert_eq!(exit_code_for_error(ErrorCode::ProjectInvalidName), 2);
        assert_eq!(exit_code_for_error(ErrorCode::ProjectPathConflict), 4);
        assert_eq!(exit_code_for_error(ErrorCode::InstallFailed), 20);
    }
}

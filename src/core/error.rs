use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidJson,
    ConfigInvalidValue,

    ValidationInvalidArgument,

    ProjectInvalidName,
    ProjectPathConflict,

    TemplateCopyFailed,
    ManifestWriteFailed,
    InstallFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidJson => "config.invalid_json",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::ProjectInvalidName => "project.invalid_name",
            ErrorCode::ProjectPathConflict => "project.path_conflict",

            ErrorCode::TemplateCopyFailed => "template.copy_failed",
            ErrorCode::ManifestWriteFailed => "manifest.write_failed",
            ErrorCode::InstallFailed => "install.failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidJsonDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidNameDetails {
    pub name: String,
    pub problems: Vec<String>,
}

/// Why an existing destination cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathConflictReason {
    NotADirectory,
    NotEmpty,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathConflictDetails {
    pub path: String,
    pub reason: PathConflictReason,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCopyFailedDetails {
    pub file: String,
    pub destination: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestWriteFailedDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallFailedDetails {
    pub program: String,
    pub args: Vec<String>,
    pub working_directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    /// The problem doubles as the user-facing message.
    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
        });

        Self::new(ErrorCode::ValidationInvalidArgument, problem, details)
    }

    pub fn config_invalid_json(path: impl Into<String>, err: serde_json::Error) -> Self {
        let details = to_details(ConfigInvalidJsonDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidJson,
            "Invalid JSON in configuration",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    /// `problems` must be non-empty; the first one is shown to the user.
    pub fn project_invalid_name(name: impl Into<String>, problems: Vec<String>) -> Self {
        let message = match problems.first() {
            Some(first) => format!("Invalid project name. {}", first),
            None => "Invalid project name.".to_string(),
        };

        Self::new(
            ErrorCode::ProjectInvalidName,
            message,
            to_details(InvalidNameDetails {
                name: name.into(),
                problems,
            }),
        )
        .with_hint("Project names must be valid npm package names, e.g. 'my-hubs-app'")
    }

    pub fn project_path_not_directory(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ProjectPathConflict,
            format!("{} is not a directory.", path),
            to_details(PathConflictDetails {
                path,
                reason: PathConflictReason::NotADirectory,
                entries: Vec::new(),
            }),
        )
    }

    pub fn project_path_not_empty(path: impl Into<String>, entries: Vec<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::ProjectPathConflict,
            format!("{} is not an empty directory.", path),
            to_details(PathConflictDetails {
                path,
                reason: PathConflictReason::NotEmpty,
                entries,
            }),
        )
        .with_hint("Choose a new directory, or empty this one before retrying")
    }

    pub fn template_copy_failed(
        file: impl Into<String>,
        destination: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let file = file.into();
        let error = error.into();
        let message = format!("Failed to copy template file {}: {}", file, error);

        Self::new(
            ErrorCode::TemplateCopyFailed,
            message,
            to_details(TemplateCopyFailedDetails {
                file,
                destination: destination.into(),
                error,
            }),
        )
        .with_hint("The project directory may be partially populated; clear it before retrying")
    }

    pub fn manifest_write_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        let error = error.into();
        let message = format!("Failed to write {}: {}", path, error);

        Self::new(
            ErrorCode::ManifestWriteFailed,
            message,
            to_details(ManifestWriteFailedDetails { path, error }),
        )
    }

    pub fn install_failed(details: InstallFailedDetails) -> Self {
        let spawn_failed = details.error.is_some();
        let program = details.program.clone();

        let err = Self::new(
            ErrorCode::InstallFailed,
            format!("Error running {} install", program),
            to_details(details),
        );

        if spawn_failed {
            err.with_hint(format!(
                "Make sure {} is installed and available on your PATH",
                program
            ))
        } else {
            err
        }
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let error = error.into();
        let message = match &context {
            Some(context) => format!("{}: {}", context, error),
            None => error.clone(),
        };

        Self::new(
            ErrorCode::InternalIoError,
            message,
            to_details(InternalIoErrorDetails { error, context }),
        )
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        Self::new(
            ErrorCode::InternalJsonError,
            "JSON error",
            to_details(InternalJsonErrorDetails {
                error: error.into(),
                context,
            }),
        )
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::InternalUnexpected,
            error.clone(),
            serde_json::json!({ "error": error }),
        )
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::internal_unexpected(message)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }

    /// Attach an extra key to the error details. Non-object details are left unchanged.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.details {
            map.insert(key.to_string(), value.into());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_message_uses_first_problem() {
        let err = Error::project_invalid_name(
            "Bad",
            vec!["name can no longer contain capital letters".to_string()],
        );
        assert_eq!(err.code, ErrorCode::ProjectInvalidName);
        assert_eq!(
            err.message,
            "Invalid project name. name can no longer contain capital letters"
        );
        assert_eq!(err.details["name"], "Bad");
    }

    #[test]
    fn path_conflict_messages_name_the_path() {
        let err = Error::project_path_not_directory("/tmp/file");
        assert_eq!(err.message, "/tmp/file is not a directory.");
        assert_eq!(err.details["reason"], "not_a_directory");

        let err = Error::project_path_not_empty("/tmp/dir", vec!["a.txt".to_string()]);
        assert_eq!(err.message, "/tmp/dir is not an empty directory.");
        assert_eq!(err.details["reason"], "not_empty");
        assert_eq!(err.details["entries"][0], "a.txt");
    }

    #[test]
    fn install_failed_adds_path_hint_only_on_spawn_failure() {
        let exited = Error::install_failed(InstallFailedDetails {
            program: "npm".to_string(),
            args: vec!["install".to_string()],
            working_directory: "/tmp/app".to_string(),
            exit_code: Some(1),
            error: None,
        });
        assert_eq!(exited.message, "Error running npm install");
        assert!(exited.hints.is_empty());
        assert_eq!(exited.details["exitCode"], 1);

        let missing = Error::install_failed(InstallFailedDetails {
            program: "npm".to_string(),
            args: vec![],
            working_directory: "/tmp/app".to_string(),
            exit_code: None,
            error: Some("No such file or directory".to_string()),
        });
        assert_eq!(missing.hints.len(), 1);
        assert!(missing.hints[0].message.contains("PATH"));
    }

    #[test]
    fn with_detail_inserts_into_object_details() {
        let err = Error::manifest_write_failed("/tmp/app/package.json", "disk full")
            .with_detail("step", "writing_manifest");
        assert_eq!(err.details["step"], "writing_manifest");
        assert_eq!(err.details["path"], "/tmp/app/package.json");
    }

    #[test]
    fn codes_have_dotted_names() {
        assert_eq!(ErrorCode::ProjectPathConflict.as_str(), "project.path_conflict");
        assert_eq!(ErrorCode::InstallFailed.as_str(), "install.failed");
    }
}

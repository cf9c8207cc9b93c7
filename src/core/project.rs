use std::env;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::validation;

/// The project the user asked for, resolved once from the CLI argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRequest {
    pub raw_path: String,
    pub path: PathBuf,
    pub name: String,
}

impl ProjectRequest {
    /// Resolve `raw` against the current working directory.
    pub fn resolve(raw: &str) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("read current directory".to_string()))
        })?;
        Self::resolve_from(raw, &cwd)
    }

    /// Resolve `raw` against `base`. Absolute inputs ignore `base`.
    pub fn resolve_from(raw: &str, base: &Path) -> Result<Self> {
        let trimmed = validation::require_non_empty(
            raw,
            "project_path",
            "Project path cannot be empty",
        )?;

        let path = normalize(&base.join(trimmed));
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            raw_path: trimmed.to_string(),
            path,
            name,
        })
    }
}

/// Lexically fold `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

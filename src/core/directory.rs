//! Destination directory preconditions.
//!
//! The existence check and the create are separate filesystem calls, so a
//! concurrent writer can still slip in between them. That window is accepted.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::io;

/// OS-generated files that do not make a directory "non-empty".
pub const DEFAULT_IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryDisposition {
    /// Nothing existed; the directory and any missing parents were created.
    Created,
    /// An empty directory (ignoring artifact files) was already there.
    Reused,
}

/// Make sure `path` is an empty directory, creating it when absent.
///
/// Fails with `project.path_conflict` when the path is a file or holds entries
/// other than [`DEFAULT_IGNORED_FILES`] and `extra_ignored`. Nothing is
/// modified on failure.
pub fn prepare_project_directory(
    path: &Path,
    extra_ignored: &[String],
) -> Result<DirectoryDisposition> {
    let display = path.display().to_string();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            io::create_dir_all(path, &format!("create {}", display))?;
            return Ok(DirectoryDisposition::Created);
        }
        Err(e) => {
            return Err(Error::internal_io(
                e.to_string(),
                Some(format!("inspect {}", display)),
            ))
        }
    };

    if !metadata.is_dir() {
        return Err(Error::project_path_not_directory(display));
    }

    let remaining: Vec<String> = io::list_entry_names(path, &format!("list {}", display))?
        .into_iter()
        .filter(|name| !is_ignored(name, extra_ignored))
        .collect();

    if !remaining.is_empty() {
        return Err(Error::project_path_not_empty(display, remaining));
    }

    Ok(DirectoryDisposition::Reused)
}

fn is_ignored(name: &str, extra_ignored: &[String]) -> bool {
    DEFAULT_IGNORED_FILES.contains(&name) || extra_ignored.iter().any(|extra| extra == name)
}

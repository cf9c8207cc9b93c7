//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Create a directory and any missing parents.
pub fn create_dir_all(path: &Path, operation: &str) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Names of the immediate entries of a directory, sorted.
pub fn list_entry_names(dir: &Path, operation: &str) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort();
    Ok(names)
}

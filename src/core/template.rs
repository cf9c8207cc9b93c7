//! Template tree materialization.
//!
//! The starter files under `template/` are embedded at build time (see
//! `build.rs`). A directory on disk can stand in for them via `template_dir`.
//! Copies are not rolled back on failure.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

include!(concat!(env!("OUT_DIR"), "/generated_template.rs"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The tree compiled into the binary.
    Embedded,
    /// A template tree on disk.
    Directory(PathBuf),
}

/// Relative paths of the embedded template files, `/`-separated.
pub fn embedded_files() -> impl Iterator<Item = &'static str> {
    TEMPLATE_FILES.iter().map(|(path, _)| *path)
}

/// Copy the whole template into `destination`.
///
/// Returns the `/`-separated relative paths of the files written, sorted.
pub fn materialize(source: &TemplateSource, destination: &Path) -> Result<Vec<String>> {
    match source {
        TemplateSource::Embedded => materialize_embedded(destination),
        TemplateSource::Directory(root) => materialize_directory(root, destination),
    }
}

fn materialize_embedded(destination: &Path) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(TEMPLATE_FILES.len());

    for (relative, contents) in TEMPLATE_FILES {
        let target = join_relative(destination, relative);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| copy_error(relative, destination, e))?;
        }
        fs::write(&target, contents).map_err(|e| copy_error(relative, destination, e))?;

        written.push(relative.to_string());
    }

    written.sort();
    Ok(written)
}

fn materialize_directory(root: &Path, destination: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(Error::config_invalid_value(
            "template_dir",
            Some(root.display().to_string()),
            "Template directory does not exist",
        ));
    }

    let mut entries = Vec::new();
    collect_entries(root, root, &mut entries)?;
    entries.sort_by(|a, b| a.relative.cmp(&b.relative));

    let mut written = Vec::new();
    for entry in entries {
        let target = join_relative(destination, &entry.relative);

        if entry.is_dir {
            fs::create_dir_all(&target)
                .map_err(|e| copy_error(&entry.relative, destination, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| copy_error(&entry.relative, destination, e))?;
        }
        fs::copy(&entry.source, &target)
            .map_err(|e| copy_error(&entry.relative, destination, e))?;

        written.push(entry.relative);
    }

    Ok(written)
}

struct TemplateEntry {
    source: PathBuf,
    relative: String,
    is_dir: bool,
}

fn collect_entries(root: &Path, dir: &Path, out: &mut Vec<TemplateEntry>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read template {}", dir.display())))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read template {}", dir.display())))
        })?;
        let file_type = entry.file_type().map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read template {}", dir.display())))
        })?;
        let path = entry.path();
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path.as_path())
            .to_string_lossy()
            .replace('\\', "/");

        // Symlinks are copied as files and never descended into.
        if file_type.is_dir() {
            out.push(TemplateEntry {
                source: path.clone(),
                relative,
                is_dir: true,
            });
            collect_entries(root, &path, out)?;
        } else {
            out.push(TemplateEntry {
                source: path,
                relative,
                is_dir: false,
            });
        }
    }

    Ok(())
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |acc, segment| acc.join(segment))
}

fn copy_error(relative: &str, destination: &Path, err: std::io::Error) -> Error {
    Error::template_copy_failed(relative, destination.display().to_string(), err.to_string())
}

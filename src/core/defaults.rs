use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::install::{to_strings, DEFAULT_PACKAGES, DEFAULT_PACKAGE_MANAGER};
use crate::template::TemplateSource;
use crate::{io, paths};

pub const DEFAULT_DOCS_URL: &str = "https://hubs.mozilla.com/docs";

/// Root configuration structure for config.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Everything the init sequence reads from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub package_manager: PackageManagerConfig,

    #[serde(default = "default_packages")]
    pub packages: Vec<String>,

    /// Names ignored on top of `.DS_Store` and `Thumbs.db` when checking
    /// that the destination is empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_ignored_files: Vec<String>,

    /// On-disk template tree to use instead of the embedded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<String>,

    #[serde(default = "default_docs_url")]
    pub docs_url: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            package_manager: PackageManagerConfig::default(),
            packages: default_packages(),
            extra_ignored_files: Vec::new(),
            template_dir: None,
            docs_url: default_docs_url(),
        }
    }
}

impl Defaults {
    /// Where template files come from. `~` in `template_dir` expands to the home directory.
    pub fn template_source(&self) -> TemplateSource {
        match &self.template_dir {
            Some(dir) => {
                TemplateSource::Directory(PathBuf::from(shellexpand::tilde(dir).into_owned()))
            }
            None => TemplateSource::Embedded,
        }
    }

    /// Reject values that would only fail once the project is half written.
    pub fn validate(&self) -> Result<()> {
        if self.packages.is_empty() {
            return Err(Error::config_invalid_value(
                "packages",
                Some("[]".to_string()),
                "At least one package is required",
            ));
        }

        if self.package_manager.program.trim().is_empty() {
            return Err(Error::config_invalid_value(
                "package_manager.program",
                Some(self.package_manager.program.clone()),
                "Package manager program cannot be empty",
            ));
        }

        Ok(())
    }
}

/// The install flags are fixed; only the program can be swapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManagerConfig {
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_program() -> String {
    DEFAULT_PACKAGE_MANAGER.to_string()
}

fn default_packages() -> Vec<String> {
    to_strings(DEFAULT_PACKAGES)
}

fn default_docs_url() -> String {
    DEFAULT_DOCS_URL.to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If config.json is missing or invalid, returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full config, falling back to defaults on any error.
///
/// A config file that exists but cannot be used is reported on stderr.
pub fn load_config() -> CreateConfig {
    let Ok(path) = paths::config_json() else {
        return CreateConfig::default();
    };

    if !path.exists() {
        return CreateConfig::default();
    }

    match load_config_from(&path) {
        Ok(config) => config,
        Err(err) => {
            log_status!("config", "Ignoring {}: {}", path.display(), err);
            CreateConfig::default()
        }
    }
}

/// Attempt to load config from a specific file.
pub fn load_config_from(path: &Path) -> Result<CreateConfig> {
    if !path.exists() {
        return Err(Error::other(format!("{} not found", path.display())));
    }

    let content = io::read_file(path, &format!("read {}", path.display()))?;

    let config: CreateConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;
    config.defaults.validate()?;

    Ok(config)
}

//! The generated `package.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MANIFEST_FILE: &str = "package.json";
pub const INITIAL_VERSION: &str = "0.1.0";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Field order here is the key order in the written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub scripts: Scripts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripts {
    pub login: String,
    pub start: String,
    pub deploy: String,
    pub logout: String,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            login: "hubs login".to_string(),
            start: "hubs start".to_string(),
            deploy: "hubs deploy".to_string(),
            logout: "hubs logout".to_string(),
        }
    }
}

impl Manifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: INITIAL_VERSION.to_string(),
            scripts: Scripts::default(),
        }
    }

    /// Two-space indented JSON followed by the platform line ending.
    pub fn to_json_string(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some(format!("serialize {}", MANIFEST_FILE)))
        })?;
        Ok(format!("{}{}", json, LINE_ENDING))
    }
}

/// Write `manifest` to `package.json` in `project_dir`, replacing any existing file.
pub fn write_manifest(project_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = project_dir.join(MANIFEST_FILE);
    let content = manifest.to_json_string()?;

    fs::write(&path, content)
        .map_err(|e| Error::manifest_write_failed(path.display().to_string(), e.to_string()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn new_manifest_uses_fixed_version_and_scripts() {
        let manifest = Manifest::new("my-app");
        assert_eq!(manifest.name, "my-app");
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.scripts.login, "hubs login");
        assert_eq!(manifest.scripts.start, "hubs start");
        assert_eq!(manifest.scripts.deploy, "hubs deploy");
        assert_eq!(manifest.scripts.logout, "hubs logout");
    }

    #[test]
    fn serializes_with_stable_key_order() {
        let json = Manifest::new("my-app").to_json_string().unwrap();
        let expected = [
            "{",
            "  \"name\": \"my-app\",",
            "  \"version\": \"0.1.0\",",
            "  \"scripts\": {",
            "    \"login\": \"hubs login\",",
            "    \"start\": \"hubs start\",",
            "    \"deploy\": \"hubs deploy\",",
            "    \"logout\": \"hubs logout\"",
            "  }",
            "}",
        ]
        .join("\n");

        assert_eq!(json, format!("{}{}", expected, LINE_ENDING));
    }

    #[test]
    fn write_manifest_round_trips_through_disk() {
        let temp = tempfile::tempdir().unwrap();

        let path = write_manifest(temp.path(), &Manifest::new("my-app")).unwrap();

        assert_eq!(path, temp.path().join("package.json"));
        let parsed: Manifest =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, Manifest::new("my-app"));
    }

    #[test]
    fn write_manifest_overwrites_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("package.json"), "{\"name\":\"old\"}").unwrap();

        write_manifest(temp.path(), &Manifest::new("fresh")).unwrap();

        let parsed: Manifest =
            serde_json::from_str(&fs::read_to_string(temp.path().join("package.json")).unwrap())
                .unwrap();
        assert_eq!(parsed.name, "fresh");
    }

    #[test]
    fn write_manifest_reports_write_failure() {
        let err = write_manifest(Path::new("/nonexistent/dir"), &Manifest::new("my-app"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ManifestWriteFailed);
        assert!(err.message.contains("package.json"));
    }
}

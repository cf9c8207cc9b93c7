//! Project name validation.
//!
//! A project name becomes the `name` field of `package.json`, so it must be
//! accepted by npm as the name of a new package.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

pub const MAX_NAME_LENGTH: usize = 214;

const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

const CORE_MODULE_NAMES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

const SPECIAL_CHARS: &[char] = &['~', '\'', '!', '(', ')', '*'];

static SCOPED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@([^/]+?)/)?([^/]+?)$").expect("valid scoped name pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub acceptable: bool,
    pub errors: Vec<String>,
}

/// Check `name` against npm's rules for new packages.
///
/// Hard errors are listed before the stricter new-package rules.
pub fn validate_project_name(name: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if name.is_empty() {
        errors.push("name length must be greater than zero".to_string());
    }

    if name.starts_with('.') {
        errors.push("name cannot start with a period".to_string());
    }

    if name.starts_with('_') {
        errors.push("name cannot start with an underscore".to_string());
    }

    if name.trim() != name {
        errors.push("name cannot contain leading or trailing spaces".to_string());
    }

    let lowered = name.to_lowercase();
    for reserved in RESERVED_NAMES {
        if lowered == *reserved {
            errors.push(format!("{} is a reserved name", reserved));
        }
    }

    if CORE_MODULE_NAMES.contains(&lowered.as_str()) {
        warnings.push(format!("{} is a core module name", name));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        warnings.push(format!(
            "name can no longer contain more than {} characters",
            MAX_NAME_LENGTH
        ));
    }

    if lowered != name {
        warnings.push("name can no longer contain capital letters".to_string());
    }

    let last_segment = name.rsplit('/').next().unwrap_or(name);
    if last_segment.contains(SPECIAL_CHARS) {
        warnings.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if !is_url_friendly(name) && !is_url_friendly_scoped(name) {
        errors.push("name can only contain URL-friendly characters".to_string());
    }

    errors.extend(warnings);

    ValidationResult {
        acceptable: errors.is_empty(),
        errors,
    }
}

/// Fail with `project.invalid_name` unless `name` is acceptable.
pub fn require_valid_project_name(name: &str) -> Result<()> {
    let result = validate_project_name(name);
    if result.acceptable {
        Ok(())
    } else {
        Err(Error::project_invalid_name(name, result.errors))
    }
}

/// True when percent-encoding would leave `value` unchanged.
fn is_url_friendly(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_.!~*'()".contains(c))
}

fn is_url_friendly_scoped(name: &str) -> bool {
    let Some(captures) = SCOPED_NAME.captures(name) else {
        return false;
    };

    let (Some(scope), Some(package)) = (captures.get(1), captures.get(2)) else {
        return false;
    };

    is_url_friendly(scope.as_str()) && is_url_friendly(package.as_str())
}

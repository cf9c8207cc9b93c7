// Public modules
pub mod defaults;
pub mod directory;
pub mod error;
pub mod init;
pub mod install;
pub mod manifest;
pub mod name;
pub mod project;
pub mod template;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use init::{InitReport, InitStep, NextStep};
pub use project::ProjectRequest;

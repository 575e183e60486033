//! Error types for zmk-build
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or validating `build.yaml`
#[derive(Error, Debug)]
pub enum TargetError {
    /// build.yaml does not exist
    #[error("{path} not found!")]
    ConfigNotFound { path: PathBuf },

    /// build.yaml could not be read
    #[error("Failed to read '{path}': {error}")]
    ReadFailed { path: PathBuf, error: String },

    /// build.yaml is not valid YAML or has the wrong shape
    #[error("Error parsing {path}: {error}")]
    Parse { path: PathBuf, error: String },

    /// The `include` list is missing or empty
    #[error("No build configurations found in build.yaml")]
    Empty,

    /// A field holds characters that cannot be passed to the build shell
    #[error("Build #{index}: invalid {field} '{value}' (allowed: letters, digits, space, and _ . , + / -)")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// Errors choosing a build target
#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    /// `--number` outside `1..=count`
    #[error("Build number must be between 1 and {count}")]
    OutOfRange { number: usize, count: usize },

    /// No target matched the shield/board criteria
    #[error("No build configuration found matching criteria:{}", describe_criteria(shield.as_deref(), board.as_deref()))]
    NoMatch {
        shield: Option<String>,
        board: Option<String>,
    },

    /// More than one target matched the criteria
    #[error("Multiple builds match your criteria:\n{}\n\nPlease specify more precise criteria or use -n with the build number", candidates.join("\n"))]
    Ambiguous { candidates: Vec<String> },
}

fn describe_criteria(shield: Option<&str>, board: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(shield) = shield {
        out.push_str(&format!("\n  Shield: {shield}"));
    }
    if let Some(board) = board {
        out.push_str(&format!("\n  Board: {board}"));
    }
    out
}

/// Container runtime errors
#[derive(Error, Debug)]
pub enum ContainerError {
    /// Runtime binary is not on PATH
    #[error("'{runtime}' not found in PATH. Install Docker or Podman, or pass --runtime")]
    RuntimeNotFound { runtime: String },

    /// Unknown runtime name in config or flags
    #[error("Unknown container runtime '{name}' (expected docker or podman)")]
    UnknownRuntime { name: String },

    /// The process could not be spawned or awaited
    #[error("Failed to run {runtime}: {error}")]
    SpawnFailed { runtime: String, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to copy a file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Settings file errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// zmk-build.toml is malformed
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// zmk-build.toml could not be read
    #[error("Failed to read '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// A value that would be unsafe in the build script
    #[error("Invalid {key} '{value}' (allowed: letters, digits and _ . -)")]
    InvalidValue { key: &'static str, value: String },

    /// Runtime name from flags, environment or file
    #[error(transparent)]
    Runtime(#[from] ContainerError),
}

/// Errors ending a container build
#[derive(Error, Debug)]
pub enum BuildError {
    /// Ctrl-C stopped the container
    #[error("Build interrupted by user.")]
    Interrupted,
}

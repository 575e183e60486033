//! Per-workspace settings (zmk-build.toml) and workspace discovery
//!
//! Resolution order for every setting: CLI flag or environment variable
//! (both handled by clap) > `zmk-build.toml` > built-in default.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    BUILD_MATRIX_FILE, DEFAULT_IMAGE, DEFAULT_MODULE_NAME, DEFAULT_RUNTIME, SETTINGS_FILE,
};
use crate::error::SettingsError;
use crate::infra::container::ContainerRuntime;

/// Contents of `zmk-build.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Container image
    #[serde(default)]
    pub image: Option<String>,

    /// Container runtime (docker or podman)
    #[serde(default)]
    pub runtime: Option<String>,

    /// Module directory name inside the west workspace
    #[serde(default)]
    pub module_name: Option<String>,
}

impl SettingsFile {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `zmk-build.toml` from the workspace root, if present
    pub fn load(workspace: &Path) -> Result<Self, SettingsError> {
        let path = workspace.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| SettingsError::Read {
            path: path.clone(),
            error: e.to_string(),
        })?;
        tracing::debug!("Loaded settings from {}", path.display());
        Self::from_toml(&content, &path)
    }
}

/// Values already chosen on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    /// `--image` / `ZMK_BUILD_IMAGE`
    pub image: Option<String>,
    /// `--runtime` / `ZMK_BUILD_RUNTIME`
    pub runtime: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Container image
    pub image: String,
    /// Container runtime
    pub runtime: ContainerRuntime,
    /// Module directory name inside the west workspace
    pub module_name: String,
}

impl Settings {
    /// Merge overrides, file values and defaults
    pub fn resolve(
        overrides: &SettingsOverrides,
        file: &SettingsFile,
    ) -> Result<Self, SettingsError> {
        let image = overrides
            .image
            .clone()
            .or_else(|| file.image.clone())
            .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        let runtime = overrides
            .runtime
            .as_deref()
            .or(file.runtime.as_deref())
            .unwrap_or(DEFAULT_RUNTIME)
            .parse()?;

        let module_name = file
            .module_name
            .clone()
            .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string());
        // Used unquoted as a directory name in the build script
        if !module_name_regex().is_match(&module_name) {
            return Err(SettingsError::InvalidValue {
                key: "module_name",
                value: module_name,
            });
        }

        Ok(Self {
            image,
            runtime,
            module_name,
        })
    }
}

fn module_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("valid regex"))
}

/// Find the workspace root
///
/// An explicit path wins and is resolved against `start` (the current
/// directory), since it ends up in a container bind mount. Otherwise walk up
/// from `start` to the first directory holding `build.yaml`, falling back to
/// `start` itself.
pub fn discover_workspace(explicit: Option<&Path>, start: &Path) -> PathBuf {
    if let Some(path) = explicit {
        // Collecting components drops `.` segments
        return start.join(path).components().collect();
    }
    start
        .ancestors()
        .find(|dir| dir.join(BUILD_MATRIX_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

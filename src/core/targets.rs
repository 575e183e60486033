//! Build matrix (build.yaml) parsing and validation
//!
//! `build.yaml` follows the ZMK GitHub Actions format: an `include` list of
//! board/shield combinations. The same file drives the local builds.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::defaults::BUILD_MATRIX_FILE;
use crate::error::TargetError;

/// Top-level shape of `build.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BuildMatrix {
    /// Build targets, in file order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub include: Vec<BuildTarget>,
}

/// `include:` with no value parses as null
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BuildTarget>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BuildTarget>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One board/shield combination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct BuildTarget {
    /// Zephyr board name
    pub board: String,

    /// Shield list (space separated); absent for board-only targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield: Option<String>,

    /// Zephyr snippet passed with `-S`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    /// Extra CMake arguments, appended verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmake_args: Option<String>,

    /// Firmware file name (without extension)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_name: Option<String>,
}

fn safe_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.,+/ -]+$").expect("valid regex"))
}

impl BuildTarget {
    /// Create a target for `board` with no shield
    pub fn new(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            shield: None,
            snippet: None,
            cmake_args: None,
            artifact_name: None,
        }
    }

    /// Set the shield
    pub fn with_shield(mut self, shield: impl Into<String>) -> Self {
        self.shield = Some(shield.into());
        self
    }

    /// Set the snippet
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Set extra CMake arguments
    pub fn with_cmake_args(mut self, args: impl Into<String>) -> Self {
        self.cmake_args = Some(args.into());
        self
    }

    /// Shield, or `N/A` when the target is board-only
    pub fn shield_label(&self) -> &str {
        self.shield.as_deref().unwrap_or("N/A")
    }

    /// Shield if present, otherwise the board
    pub fn primary_name(&self) -> &str {
        self.shield.as_deref().unwrap_or(&self.board)
    }

    /// Directory name for this target's build output
    ///
    /// Spaces and underscores become hyphens so `nice_view_adapter nice_view`
    /// maps to `nice-view-adapter-nice-view`.
    pub fn build_dir_name(&self) -> String {
        self.primary_name().replace([' ', '_'], "-")
    }

    /// Check that fields interpolated into the build shell are safe
    ///
    /// `index` is the 1-based position used in error messages.
    pub fn validate(&self, index: usize) -> Result<(), TargetError> {
        check_field(index, "board", &self.board)?;
        if let Some(shield) = &self.shield {
            check_field(index, "shield", shield)?;
        }
        if let Some(snippet) = &self.snippet {
            check_field(index, "snippet", snippet)?;
        }
        if let Some(name) = &self.artifact_name {
            if name.contains('/') || name.trim().is_empty() {
                return Err(TargetError::InvalidField {
                    index,
                    field: "artifact-name",
                    value: name.clone(),
                });
            }
            check_field(index, "artifact-name", name)?;
        }
        Ok(())
    }
}

fn check_field(index: usize, field: &'static str, value: &str) -> Result<(), TargetError> {
    if value.trim().is_empty() || !safe_value_regex().is_match(value) {
        return Err(TargetError::InvalidField {
            index,
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.shield_label(), self.board)
    }
}

impl BuildMatrix {
    /// Parse a build matrix from YAML text
    ///
    /// `path` is only used for error messages.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, TargetError> {
        // An empty document deserializes to null, which means "no targets".
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| TargetError::Parse {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;
        if value.is_null() {
            return Ok(Self::default());
        }

        let matrix: Self = serde_yaml::from_value(value).map_err(|e| TargetError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        for (idx, target) in matrix.include.iter().enumerate() {
            target.validate(idx + 1)?;
        }
        Ok(matrix)
    }

    /// Load `build.yaml` from a workspace root
    ///
    /// Fails with [`TargetError::Empty`] when there is nothing to build.
    pub fn load(workspace: &Path) -> Result<Self, TargetError> {
        let path = workspace.join(BUILD_MATRIX_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TargetError::ConfigNotFound { path });
            }
            Err(e) => {
                return Err(TargetError::ReadFailed {
                    path,
                    error: e.to_string(),
                });
            }
        };

        let matrix = Self::from_yaml(&content, &path)?;
        if matrix.include.is_empty() {
            return Err(TargetError::Empty);
        }
        tracing::debug!("Loaded {} build targets from {}", matrix.len(), path.display());
        Ok(matrix)
    }

    /// Number of targets
    pub fn len(&self) -> usize {
        self.include.len()
    }

    /// Whether the matrix has no targets
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    /// Target by 1-based number
    pub fn get(&self, number: usize) -> Option<&BuildTarget> {
        number.checked_sub(1).and_then(|idx| self.include.get(idx))
    }

    /// Human-readable listing of all targets
    pub fn render_listing(&self) -> String {
        let mut out = String::from("\n=== Available Build Configurations ===\n\n");
        for (idx, target) in self.include.iter().enumerate() {
            out.push_str(&format!("{}. {target}\n", idx + 1));
            if let Some(snippet) = target.snippet.as_deref().filter(|s| !s.is_empty()) {
                out.push_str(&format!("   └─ Snippet: {snippet}\n"));
            }
            if let Some(args) = target.cmake_args.as_deref().filter(|s| !s.is_empty()) {
                out.push_str(&format!("   └─ CMake args: {args}\n"));
            }
            out.push('\n');
        }
        out
    }
}

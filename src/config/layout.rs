//! Host and container directory layout
//!
//! Host paths are relative to the workspace root (the directory holding
//! `build.yaml`). Container paths are fixed mount points.

use std::path::{Path, PathBuf};

/// Directory holding all local build state
pub const MANUAL_BUILD_DIR: &str = "manual_build";

/// West workspace cache, relative to [`MANUAL_BUILD_DIR`]
pub const WEST_WORKSPACE_DIR: &str = "west-workspace";

/// Build artifacts, relative to [`MANUAL_BUILD_DIR`]
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Copied firmware images, relative to the artifacts directory
pub const OUTPUT_DIR: &str = "output";

/// Mount point of the repository inside the container
pub const CONTAINER_REPO: &str = "/repo";

/// Mount point of the west workspace inside the container
pub const CONTAINER_WORKSPACE: &str = "/workspace";

/// Mount point of the artifacts directory inside the container
pub const CONTAINER_OUT: &str = "/out";

/// Resolved host paths for one workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root (mounted at `/repo`)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `manual_build/west-workspace` (mounted at `/workspace`)
    pub fn west_workspace(&self) -> PathBuf {
        self.root.join(MANUAL_BUILD_DIR).join(WEST_WORKSPACE_DIR)
    }

    /// `manual_build/artifacts` (mounted at `/out`)
    pub fn artifacts(&self) -> PathBuf {
        self.root.join(MANUAL_BUILD_DIR).join(ARTIFACTS_DIR)
    }

    /// `manual_build/artifacts/output`
    pub fn output(&self) -> PathBuf {
        self.artifacts().join(OUTPUT_DIR)
    }

    /// Host build directory for a sanitized target directory name
    pub fn build_dir(&self, dir_name: &str) -> PathBuf {
        self.artifacts().join(dir_name)
    }

    /// Path relative to the workspace root, or the path itself if outside it
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

//! Workspace preparation and cleaning
//!
//! The west workspace under `manual_build/west-workspace/` is the dependency
//! cache: zmk, zephyr and modules are fetched into it once and reused until
//! it is cleaned. Build artifacts live under `manual_build/artifacts/`.

use std::path::PathBuf;

use crate::config::layout::Layout;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Result of clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Directories that were removed and recreated empty
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

/// Directories cleaned by `--clean`, dependency cache first
pub fn clean_directories(layout: &Layout) -> [PathBuf; 2] {
    [layout.west_workspace(), layout.artifacts()]
}

/// Ensure the mounted host directories exist
///
/// Existing contents are kept so cached dependencies survive between runs.
pub fn prepare_workspace(layout: &Layout) -> Result<(), FilesystemError> {
    for dir in clean_directories(layout) {
        filesystem::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Empty the west workspace and the artifacts directory
///
/// Both directories are removed recursively (including hidden entries such
/// as `.west/`) and recreated empty, so the next build re-fetches every
/// dependency. Missing directories are skipped.
pub fn clean_workspace(layout: &Layout) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();

    for dir in clean_directories(layout) {
        if dir.exists() {
            filesystem::remove_dir_all(&dir)?;
            filesystem::create_dir_all(&dir)?;
            tracing::info!("Cleaned {}", dir.display());
            result.removed.push(dir);
        } else {
            result.skipped.push(dir);
        }
    }

    Ok(result)
}

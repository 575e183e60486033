//! Firmware artifact collection
//!
//! After a successful build, `zmk.uf2` is copied from the per-target build
//! directory to `manual_build/artifacts/output/` under a name derived from
//! the target, so several targets can be built without overwriting each
//! other.

use std::path::{Path, PathBuf};

use super::targets::BuildTarget;
use crate::config::defaults::FIRMWARE_EXTENSION;
use crate::config::layout::Layout;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// A firmware image copied to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFirmware {
    /// Destination path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex SHA-256 of the image
    pub sha256: String,
}

/// Output file name for a target
///
/// `artifact-name` wins when set. Otherwise `{shield}-{board}.uf2` with
/// underscores turned into hyphens; spaces in multi-shield names are kept.
pub fn output_file_name(target: &BuildTarget) -> String {
    if let Some(name) = &target.artifact_name {
        return format!("{name}.{FIRMWARE_EXTENSION}");
    }
    let board = target.board.replace('_', "-");
    match &target.shield {
        Some(shield) => format!("{}-{board}.{FIRMWARE_EXTENSION}", shield.replace('_', "-")),
        None => format!("{board}.{FIRMWARE_EXTENSION}"),
    }
}

/// Copy a built firmware image into the output directory
///
/// Returns `Ok(None)` when `source` does not exist; the build itself
/// succeeded, so a missing image is reported as a warning by the caller.
pub fn collect_firmware(
    layout: &Layout,
    source: &Path,
    target: &BuildTarget,
) -> Result<Option<CollectedFirmware>, FilesystemError> {
    if !source.exists() {
        tracing::debug!("Firmware image not found at {}", source.display());
        return Ok(None);
    }

    let output_dir = layout.output();
    filesystem::create_dir_all(&output_dir)?;

    let dest = output_dir.join(output_file_name(target));
    let size = filesystem::copy_file(source, &dest)?;
    let sha256 = filesystem::sha256_file(&dest)?;
    tracing::info!("Copied {} -> {}", source.display(), dest.display());

    Ok(Some(CollectedFirmware {
        path: dest,
        size,
        sha256,
    }))
}

//! Filesystem operations
//!
//! Handles file and directory operations.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Copy a file, creating the destination's parent directories
pub fn copy_file(from: &Path, to: &Path) -> Result<u64, FilesystemError> {
    if let Some(parent) = to.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(from, to).map_err(|e| FilesystemError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// Hex SHA-256 of a file's contents
pub fn sha256_file(path: &Path) -> Result<String, FilesystemError> {
    let read_err = |e: std::io::Error| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(read_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

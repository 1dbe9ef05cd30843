//! Atomic file replacement.
//!
//! Every file relbin puts in place goes through a sibling temporary file that
//! is renamed over the target, so a reader never observes a half-written
//! executable.
//!
//! - Source and destination must be on the same filesystem for the rename to
//!   be atomic; [`atomic_copy`] exists for the cases where they are not.
//! - On crash a temporary file may remain (named `.{filename}.{tag}.tmp`).

use crate::error::{RelbinError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Temporary path next to `target`, named `.{filename}.{tag}.tmp`.
pub fn sibling_temp_path(target: &Path, tag: &str) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            RelbinError::UserError(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.{}.tmp", filename, tag)))
}

/// Atomically replace `target` with `source`.
///
/// `source` is consumed. On failure it is removed so no temporary file is
/// left behind, and `target` is untouched.
pub fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    // rename() replaces an existing destination on both POSIX and Windows.
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        RelbinError::RelocateFailed(format!(
            "failed to atomically replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    sync_parent_dir(target);
    Ok(())
}

/// Copy `source` to `destination` atomically, preserving permissions.
///
/// The copy is written and synced under a temporary name next to the
/// destination before being renamed into place.
pub fn atomic_copy(source: &Path, destination: &Path) -> Result<()> {
    let temp_path = sibling_temp_path(destination, "copy")?;

    // fs::copy carries the permission bits over, which keeps the executable bit.
    fs::copy(source, &temp_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        RelbinError::RelocateFailed(format!(
            "failed to copy '{}' to '{}': {}",
            source.display(),
            temp_path.display(),
            e
        ))
    })?;

    File::open(&temp_path)
        .and_then(|file| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            RelbinError::RelocateFailed(format!(
                "failed to sync '{}' to disk: {}",
                temp_path.display(),
                e
            ))
        })?;

    atomic_replace(&temp_path, destination)
}

#[cfg(unix)]
fn sync_parent_dir(target: &Path) {
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_target: &Path) {}

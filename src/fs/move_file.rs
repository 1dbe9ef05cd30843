//! File move helper used to relocate finished artifacts.
//!
//! On POSIX filesystems a move is normally an atomic `rename(2)`. The toolchain
//! output directory is often on a different mount than the working directory
//! (a shared `CARGO_TARGET_DIR`, a container volume), which surfaces `EXDEV`
//! ("Invalid cross-device link"). For those cases we fall back to an atomic
//! copy followed by deleting the source.

use crate::error::{RelbinError, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Move a single file from `source` to `destination`, replacing any existing
/// file at `destination`.
///
/// - Tries `rename()` first (atomic when possible).
/// - Falls back to an atomic copy to `destination` + delete of `source` on EXDEV.
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| {
            RelbinError::RelocateFailed(format!(
                "failed to create destination directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_rename(&e) => move_file_cross_device(source, destination, e),
        Err(e) => Err(RelbinError::RelocateFailed(format!(
            "failed to move '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))),
    }
}

fn move_file_cross_device(
    source: &Path,
    destination: &Path,
    original_error: io::Error,
) -> Result<()> {
    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        "rename crossed devices, copying instead"
    );

    crate::fs::atomic_copy(source, destination).map_err(|e| {
        RelbinError::RelocateFailed(format!(
            "{} (original rename error: {})",
            e, original_error
        ))
    })?;

    fs::remove_file(source).map_err(|e| {
        RelbinError::RelocateFailed(format!(
            "moved '{}' across devices but failed to delete the source: {}",
            source.display(),
            e
        ))
    })?;

    Ok(())
}

fn is_cross_device_rename(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(18)
}

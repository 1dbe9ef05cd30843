//! Artifact finishing: verify, strip, relocate.
//!
//! The three steps run in order and each is fatal. An artifact that could not
//! be stripped stays at its toolchain location and is never relocated.

use crate::config::Settings;
use crate::error::{RelbinError, Result};
use crate::fs::{atomic_replace, move_file, sibling_temp_path};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Verify, strip and relocate the artifact the toolchain reported at
/// `artifact`. Returns the size in bytes of the stripped binary.
pub fn finish(artifact: &Path, destination: &Path, settings: &Settings) -> Result<u64> {
    verify_exists(artifact)?;
    let size_bytes = strip_in_place(artifact, &settings.strip)?;
    relocate(artifact, destination)?;
    Ok(size_bytes)
}

/// Fail with `ArtifactMissing` unless `path` is a regular file.
pub fn verify_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        tracing::debug!(artifact = %path.display(), "artifact present");
        Ok(())
    } else {
        Err(RelbinError::ArtifactMissing {
            path: path.to_path_buf(),
        })
    }
}

/// Strip symbols from `path`.
///
/// The utility writes the stripped copy to a sibling temporary file, which
/// then replaces the artifact in one rename. Either the artifact is fully
/// stripped or it is left exactly as the toolchain produced it. Returns the
/// stripped size in bytes.
pub fn strip_in_place(path: &Path, strip: &Path) -> Result<u64> {
    let stripped = sibling_temp_path(path, "strip")?;
    let failed = |code: Option<i32>, reason: Option<String>| {
        let _ = fs::remove_file(&stripped);
        RelbinError::StripFailed {
            path: path.to_path_buf(),
            code,
            reason,
        }
    };

    tracing::debug!(artifact = %path.display(), strip = %strip.display(), "stripping");

    let status = Command::new(strip)
        .arg("-o")
        .arg(&stripped)
        .arg(path)
        .status()
        .map_err(|e| {
            failed(
                None,
                Some(format!("failed to execute '{}': {}", strip.display(), e)),
            )
        })?;

    if !status.success() {
        return Err(failed(status.code(), None));
    }

    // Not every strip keeps the mode bits on its -o output.
    let permissions = fs::metadata(path)
        .map(|m| m.permissions())
        .map_err(|e| failed(None, Some(format!("failed to read artifact metadata: {}", e))))?;
    fs::set_permissions(&stripped, permissions).map_err(|e| {
        failed(
            None,
            Some(format!(
                "stripped output '{}' is unusable: {}",
                stripped.display(),
                e
            )),
        )
    })?;
    let size_bytes = fs::metadata(&stripped)
        .map(|m| m.len())
        .map_err(|e| failed(None, Some(format!("failed to read stripped output: {}", e))))?;

    atomic_replace(&stripped, path).map_err(|e| failed(None, Some(e.to_string())))?;
    Ok(size_bytes)
}

/// Move the finished artifact to its final location, replacing any previous
/// build.
pub fn relocate(artifact: &Path, destination: &Path) -> Result<()> {
    move_file(artifact, destination)?;
    tracing::debug!(destination = %destination.display(), "artifact relocated");
    Ok(())
}

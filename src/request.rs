//! Build request and artifact location model.

use crate::error::{RelbinError, Result};
use crate::target;
use std::path::{Path, PathBuf};

/// One build of one binary target for one triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub unit_name: String,
    pub target_triple: String,
}

impl BuildRequest {
    /// Create a request, resolving the target triple and checking that the
    /// unit name can be used as a file name.
    ///
    /// Whether the unit is an actual binary target is not checked here; the
    /// toolchain rejects unknown units itself.
    pub fn new(unit_name: impl Into<String>, target: Option<&str>) -> Result<Self> {
        let unit_name = unit_name.into();
        validate_unit_name(&unit_name)?;

        Ok(Self {
            unit_name,
            target_triple: target::resolve(target)?,
        })
    }

    /// File name the toolchain gives the built executable.
    pub fn artifact_file_name(&self) -> String {
        if target::uses_exe_suffix(&self.target_triple) {
            format!("{}.exe", self.unit_name)
        } else {
            self.unit_name.clone()
        }
    }
}

fn validate_unit_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RelbinError::UserError(
            "unit name must not be empty".to_string(),
        ));
    }

    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(RelbinError::UserError(format!(
            "unit name '{}' must be a binary target name, not a path",
            name
        )));
    }

    // The toolchain reads these as a glob pattern or a flag, not as one unit.
    if name.starts_with('-') || name.contains(['*', '?', '[', ']']) {
        return Err(RelbinError::UserError(format!(
            "unit name '{}' must name exactly one binary target (no glob characters or leading '-')",
            name
        )));
    }

    Ok(())
}

/// Where the artifact is produced and where it ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    /// `<target-dir>/<triple>/release/<unit>`, as laid out by the toolchain.
    pub toolchain_output_path: PathBuf,
    /// `<cwd>/<unit>`.
    pub final_output_path: PathBuf,
}

impl ArtifactLocation {
    pub fn new(request: &BuildRequest, target_dir: &Path, cwd: &Path) -> Self {
        Self {
            toolchain_output_path: expected_artifact_path(target_dir, request),
            final_output_path: cwd.join(request.artifact_file_name()),
        }
    }
}

/// Path the toolchain writes a release binary to.
pub fn expected_artifact_path(target_dir: &Path, request: &BuildRequest) -> PathBuf {
    target_dir
        .join(&request.target_triple)
        .join("release")
        .join(request.artifact_file_name())
}

//! Toolchain invocation.
//!
//! Spawns `cargo build --release` for exactly one binary target and reports
//! where the toolchain's output layout puts the resulting executable. The
//! child's stdout and stderr are inherited so compiler diagnostics reach the
//! terminal unchanged.

use crate::config::Settings;
use crate::error::{RelbinError, Result};
use crate::request::{BuildRequest, expected_artifact_path};
use std::path::PathBuf;
use std::process::Command;

/// Build the toolchain command for a request without running it.
///
/// The target directory is always passed explicitly so that Cargo config
/// files cannot move the output away from the path we expect.
pub fn build_command(request: &BuildRequest, settings: &Settings) -> Command {
    let mut cmd = Command::new(&settings.cargo);
    cmd.current_dir(&settings.cwd)
        .args(["build", "--release", "--target"])
        .arg(&request.target_triple)
        .arg("--bin")
        .arg(&request.unit_name)
        .arg("--target-dir")
        .arg(&settings.target_dir);
    cmd
}

/// Render a command as a shell-quoted line for display.
pub fn describe_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let args = cmd.get_args().map(|a| a.to_string_lossy().into_owned());
    shell_words::join(std::iter::once(program).chain(args))
}

/// Run the release build and return the expected artifact path.
///
/// Blocks until the toolchain exits. A non-zero exit is fatal and carries the
/// toolchain's exit code; the toolchain has already printed its diagnostics.
pub fn invoke(request: &BuildRequest, settings: &Settings) -> Result<PathBuf> {
    let expected = expected_artifact_path(&settings.target_dir, request);
    let mut cmd = build_command(request, settings);

    tracing::debug!(command = %describe_command(&cmd), "invoking toolchain");

    let status = cmd.status().map_err(|e| RelbinError::BuildFailed {
        unit: request.unit_name.clone(),
        code: None,
        reason: Some(format!(
            "failed to execute '{}': {}",
            settings.cargo.display(),
            e
        )),
    })?;

    if !status.success() {
        return Err(RelbinError::BuildFailed {
            unit: request.unit_name.clone(),
            code: status.code(),
            reason: None,
        });
    }

    tracing::debug!(expected = %expected.display(), "toolchain finished");
    Ok(expected)
}

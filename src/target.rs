//! Target triple resolution.
//!
//! The default triple is musl-based so the produced binary is fully static
//! and runs on hosts without a matching libc.

use crate::error::{RelbinError, Result};

/// Target triple used when none is requested.
pub const DEFAULT_TARGET: &str = "x86_64-unknown-linux-musl";

/// Resolve the target triple for a build.
///
/// A requested triple is returned verbatim once it is well-formed (non-empty,
/// no whitespace). Whether the toolchain knows the triple is for the
/// toolchain to decide.
pub fn resolve(requested: Option<&str>) -> Result<String> {
    let Some(requested) = requested else {
        return Ok(DEFAULT_TARGET.to_string());
    };

    if requested.trim().is_empty() {
        return Err(RelbinError::UserError(
            "target triple must not be empty".to_string(),
        ));
    }

    if requested.chars().any(char::is_whitespace) {
        return Err(RelbinError::UserError(format!(
            "target triple '{}' must not contain whitespace",
            requested
        )));
    }

    Ok(requested.to_string())
}

/// Whether the toolchain appends `.exe` to executables for this triple.
pub fn uses_exe_suffix(triple: &str) -> bool {
    triple.contains("windows")
}

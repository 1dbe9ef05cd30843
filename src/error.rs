//! Error types for the relbin CLI.
//!
//! Every variant is fatal to the invocation. Build and strip failures keep
//! the subprocess exit code so it can be propagated unchanged.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for relbin operations.
#[derive(Error, Debug)]
pub enum RelbinError {
    /// User provided invalid arguments or the environment is unusable.
    #[error("{0}")]
    UserError(String),

    /// The toolchain exited non-zero or could not be spawned.
    #[error("build of '{unit}' failed{}", describe_failure(.code, .reason))]
    BuildFailed {
        unit: String,
        code: Option<i32>,
        reason: Option<String>,
    },

    /// The toolchain reported success but the artifact is not where the
    /// output layout says it should be.
    #[error(
        "build succeeded but no artifact exists at '{}' (the unit name may not match a binary target)",
        .path.display()
    )]
    ArtifactMissing { path: PathBuf },

    /// The strip utility exited non-zero or could not be spawned.
    #[error("stripping '{}' failed{}", .path.display(), describe_failure(.code, .reason))]
    StripFailed {
        path: PathBuf,
        code: Option<i32>,
        reason: Option<String>,
    },

    /// Moving the finished artifact into place failed.
    #[error("{0}")]
    RelocateFailed(String),
}

fn describe_failure(code: &Option<i32>, reason: &Option<String>) -> String {
    match (code, reason) {
        (_, Some(reason)) => format!(": {}", reason),
        (Some(code), None) => format!(" (exit code {})", code),
        (None, None) => " (terminated by signal)".to_string(),
    }
}

impl RelbinError {
    /// Returns the process exit code for this error.
    ///
    /// Subprocess failures propagate the child's own exit code when it is a
    /// usable non-zero process status.
    pub fn exit_code(&self) -> i32 {
        match self {
            RelbinError::UserError(_) => exit_codes::USER_ERROR,
            RelbinError::BuildFailed { code, .. } => propagated(*code, exit_codes::BUILD_FAILURE),
            RelbinError::ArtifactMissing { .. } => exit_codes::ARTIFACT_MISSING,
            RelbinError::StripFailed { code, .. } => propagated(*code, exit_codes::STRIP_FAILURE),
            RelbinError::RelocateFailed(_) => exit_codes::RELOCATE_FAILURE,
        }
    }

    /// Whether the failing subprocess already wrote its own diagnostics to
    /// stderr, in which case nothing more should be printed.
    pub fn reported_by_subprocess(&self) -> bool {
        match self {
            RelbinError::BuildFailed { code, reason, .. }
            | RelbinError::StripFailed { code, reason, .. } => code.is_some() && reason.is_none(),
            _ => false,
        }
    }
}

fn propagated(code: Option<i32>, fallback: i32) -> i32 {
    match code {
        Some(code) if (1..=255).contains(&code) => code,
        _ => fallback,
    }
}

/// Result type alias for relbin operations.
pub type Result<T> = std::result::Result<T, RelbinError>;

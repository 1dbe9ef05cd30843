//! Toolchain settings for a relbin run.
//!
//! Settings come from CLI flags with environment fallbacks (`CARGO`, `STRIP`,
//! `CARGO_TARGET_DIR`); there is no config file. Relative target directories
//! are resolved against the working directory so the computed artifact path
//! does not depend on where the toolchain runs from.

use crate::cli::Cli;
use crate::error::{RelbinError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Toolchain program used when neither `--cargo` nor `CARGO` is set.
pub const DEFAULT_CARGO: &str = "cargo";

/// Strip utility used when neither `--strip` nor `STRIP` is set.
pub const DEFAULT_STRIP: &str = "strip";

/// Toolchain output directory, relative to the working directory.
pub const DEFAULT_TARGET_DIR: &str = "target";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Toolchain program (`cargo`).
    pub cargo: PathBuf,

    /// Symbol stripping utility.
    pub strip: PathBuf,

    /// Absolute toolchain output directory.
    pub target_dir: PathBuf,

    /// Absolute working directory; the toolchain runs here and the final
    /// artifact lands here.
    pub cwd: PathBuf,
}

impl Settings {
    /// Resolve settings from parsed CLI arguments and the process working
    /// directory.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            RelbinError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(
            &cwd,
            cli.cargo.clone(),
            cli.strip.clone(),
            &cli.target_dir,
        ))
    }

    /// Resolve settings against a specific working directory.
    pub fn resolve_from(cwd: &Path, cargo: PathBuf, strip: PathBuf, target_dir: &Path) -> Self {
        let target_dir = if target_dir.is_absolute() {
            target_dir.to_path_buf()
        } else {
            cwd.join(target_dir)
        };

        Self {
            cargo,
            strip,
            target_dir,
            cwd: cwd.to_path_buf(),
        }
    }
}

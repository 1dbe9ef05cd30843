//! The release pipeline: resolve → invoke → verify → strip → relocate.
//!
//! Strictly linear. The first failing step aborts the run and nothing after
//! it executes, so the final output path only changes when every step passed.

use crate::config::Settings;
use crate::error::{RelbinError, Result};
use crate::finish;
use crate::request::{ArtifactLocation, BuildRequest};
use crate::toolchain;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// What a run would do, computed without spawning anything.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub unit: String,
    pub target: String,
    pub command: String,
    pub toolchain_output_path: PathBuf,
    pub final_output_path: PathBuf,
    pub strip: PathBuf,
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub unit: String,
    pub target: String,
    pub toolchain_output_path: PathBuf,
    pub final_output_path: PathBuf,
    pub size_bytes: u64,
    pub finished_at: DateTime<Utc>,
}

/// Serialize a plan or report for `--json`.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RelbinError::UserError(format!("failed to serialize JSON output: {}", e)))
}

/// Compute the plan for a request.
pub fn plan(request: &BuildRequest, settings: &Settings) -> BuildPlan {
    let location = ArtifactLocation::new(request, &settings.target_dir, &settings.cwd);
    let command = toolchain::describe_command(&toolchain::build_command(request, settings));

    BuildPlan {
        unit: request.unit_name.clone(),
        target: request.target_triple.clone(),
        command,
        toolchain_output_path: location.toolchain_output_path,
        final_output_path: location.final_output_path,
        strip: settings.strip.clone(),
    }
}

/// Build, strip and relocate one unit.
pub fn run(request: &BuildRequest, settings: &Settings) -> Result<BuildReport> {
    let location = ArtifactLocation::new(request, &settings.target_dir, &settings.cwd);

    tracing::debug!(
        unit = %request.unit_name,
        target = %request.target_triple,
        "building release artifact"
    );

    let built = toolchain::invoke(request, settings)?;
    let size_bytes = finish::finish(&built, &location.final_output_path, settings)?;

    tracing::info!(
        "built {} for {} -> {}",
        request.unit_name,
        request.target_triple,
        location.final_output_path.display()
    );

    Ok(BuildReport {
        unit: request.unit_name.clone(),
        target: request.target_triple.clone(),
        toolchain_output_path: built,
        final_output_path: location.final_output_path,
        size_bytes,
        finished_at: Utc::now(),
    })
}

//! CLI argument parsing for relbin.
//!
//! Uses clap derive macros. Every flag is optional; `relbin <UNIT>` alone runs
//! the default static release build.

use crate::config::{DEFAULT_CARGO, DEFAULT_STRIP, DEFAULT_TARGET_DIR};
use crate::target::DEFAULT_TARGET;
use clap::Parser;
use std::path::PathBuf;

/// Relbin: build a statically-linked, stripped release binary.
///
/// Runs `cargo build --release` for one binary target, strips the result and
/// moves it into the current directory as `./<UNIT>`.
#[derive(Parser, Debug)]
#[command(name = "relbin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Binary target to build (a `[[bin]]` name in the workspace).
    pub unit: String,

    /// Target triple to build for.
    #[arg(short, long, env = "RELBIN_TARGET", default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Directory the toolchain writes build output to.
    #[arg(long, env = "CARGO_TARGET_DIR", default_value = DEFAULT_TARGET_DIR)]
    pub target_dir: PathBuf,

    /// Toolchain program to invoke.
    #[arg(long, env = "CARGO", default_value = DEFAULT_CARGO)]
    pub cargo: PathBuf,

    /// Symbol stripping utility.
    #[arg(long, env = "STRIP", default_value = DEFAULT_STRIP)]
    pub strip: PathBuf,

    /// Print the toolchain invocation and artifact paths without running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON build report on stdout after a successful build.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

//! Relbin: build a statically-linked, stripped release binary from a Cargo
//! workspace and place it in the current directory.
//!
//! This is the main entry point for the `relbin` CLI. It parses arguments,
//! runs the release pipeline, and maps failures to exit codes.

mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod finish;
pub mod fs;
pub mod pipeline;
pub mod request;
pub mod target;
pub mod toolchain;

#[cfg(test)]
mod test_support;

use cli::Cli;
use config::Settings;
use error::Result;
use request::BuildRequest;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // The toolchain or strip utility already explained itself on stderr.
            if err.reported_by_subprocess() {
                tracing::debug!(error = %err, "subprocess failed");
            } else {
                eprintln!("error: {}", err);
            }

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "relbin=debug" } else { "relbin=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_cli(cli)?;
    let request = BuildRequest::new(&cli.unit, Some(cli.target.as_str()))?;

    if cli.dry_run {
        let plan = pipeline::plan(&request, &settings);
        if cli.json {
            println!("{}", pipeline::to_json(&plan)?);
        } else {
            println!("command:  {}", plan.command);
            println!("artifact: {}", plan.toolchain_output_path.display());
            println!("strip:    {}", plan.strip.display());
            println!("output:   {}", plan.final_output_path.display());
        }
        return Ok(());
    }

    let report = pipeline::run(&request, &settings)?;
    if cli.json {
        println!("{}", pipeline::to_json(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelbinError;
    use crate::test_support::DirGuard;
    use serial_test::serial;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn cli_for(unit: &str, workspace: &std::path::Path) -> Cli {
        Cli {
            unit: unit.to_string(),
            target: target::DEFAULT_TARGET.to_string(),
            target_dir: PathBuf::from("target"),
            cargo: workspace.join("no-such-cargo"),
            strip: workspace.join("no-such-strip"),
            dry_run: false,
            json: false,
            verbose: false,
        }
    }

    #[test]
    #[serial]
    fn dry_run_spawns_nothing() {
        let temp = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp.path());

        let cli = Cli {
            dry_run: true,
            ..cli_for("svc-a", temp.path())
        };

        run(&cli).unwrap();
        assert!(!temp.path().join("target").exists());
        assert!(!temp.path().join("svc-a").exists());
    }

    #[test]
    #[serial]
    fn invalid_unit_is_user_error() {
        let temp = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp.path());

        let err = run(&cli_for("../svc-a", temp.path())).unwrap_err();
        assert!(matches!(err, RelbinError::UserError(_)));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn glob_unit_is_rejected_before_the_toolchain_runs() {
        use crate::test_support::{fake_cargo, fake_strip};

        let temp = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp.path());

        let cli = Cli {
            cargo: fake_cargo(temp.path()),
            strip: fake_strip(temp.path()),
            ..cli_for("svc-*", temp.path())
        };

        let err = run(&cli).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(!temp.path().join("cargo.args").exists());
        assert!(!temp.path().join("target").exists());
    }

    #[test]
    #[serial]
    fn missing_toolchain_is_build_failure() {
        let temp = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp.path());

        let err = run(&cli_for("svc-a", temp.path())).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::BUILD_FAILURE);
        assert!(!err.reported_by_subprocess());
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn run_places_artifact_in_working_directory() {
        use crate::test_support::{fake_cargo, fake_strip};

        let temp = TempDir::new().unwrap();
        let _guard = DirGuard::new(temp.path());

        let cli = Cli {
            cargo: fake_cargo(temp.path()),
            strip: fake_strip(temp.path()),
            json: true,
            ..cli_for("svc-a", temp.path())
        };

        run(&cli).unwrap();
        assert!(temp.path().join("svc-a").is_file());
    }
}

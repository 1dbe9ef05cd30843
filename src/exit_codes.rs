//! Exit code constants for the relbin CLI.
//!
//! - 0: Success
//! - 1: User error (bad unit name, bad target triple)
//! - 2: Toolchain build failure (when the toolchain's own code is unusable)
//! - 3: Artifact missing after a successful build
//! - 4: Strip failure (when the utility's own code is unusable)
//! - 5: Relocation of the finished artifact failed
//!
//! Build and strip failures prefer the failing subprocess's own exit code;
//! see [`crate::error::RelbinError::exit_code`].

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: invalid arguments.
pub const USER_ERROR: i32 = 1;

/// The toolchain could not be spawned or was killed by a signal.
pub const BUILD_FAILURE: i32 = 2;

/// The toolchain reported success but the expected artifact is absent.
pub const ARTIFACT_MISSING: i32 = 3;

/// The strip utility could not be spawned or was killed by a signal.
pub const STRIP_FAILURE: i32 = 4;

/// Moving the finished artifact to its final location failed.
pub const RELOCATE_FAILURE: i32 = 5;

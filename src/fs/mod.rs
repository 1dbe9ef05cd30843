//! Filesystem utilities for relbin.
//!
//! Atomic replacement and moves, so the final artifact is either the previous
//! file or the complete new one.

pub mod atomic;
mod move_file;

pub use atomic::{atomic_copy, atomic_replace, sibling_temp_path};
pub use move_file::move_file;

//! Subprocess plumbing for accent-sync.
//!
//! Every external program the tool talks to (the desktop preference store,
//! `pgrep` and `kill`, the launcher itself) goes through one of three calls:
//!
//! - [`run_captured`]: run to completion, fail on non-zero, return stdout
//! - [`run_status`]: run to completion, hand back the exit status as-is
//! - [`spawn_detached`]: start and forget, all stdio on the null sink
//!
//! Programs are executed directly, never through `sh -c`, so arguments are
//! passed verbatim.

pub mod shell;

pub use shell::{run_captured, run_status, spawn_detached, ShellError};

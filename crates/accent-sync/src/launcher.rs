//! Restarting the launcher so it reloads its theme.

use accent_sync_shell::ShellError;

use crate::config::LauncherConfig;
use crate::env::{ProcessControl, Termination};

#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("Failed to stop {program}")]
    Terminate {
        program: String,
        #[source]
        source: ShellError,
    },

    #[error("Failed to start {program}")]
    Launch {
        program: String,
        #[source]
        source: ShellError,
    },
}

/// Outcome of a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restart {
    /// Whether an old instance was found and signalled.
    pub previous: Termination,
}

/// Stop any running launcher, then start a fresh detached one.
///
/// A launcher that isn't running is fine; the new instance is started
/// either way.
pub fn restart<P: ProcessControl + ?Sized>(
    processes: &P,
    launcher: &LauncherConfig,
) -> Result<Restart, LauncherError> {
    let previous = processes
        .terminate(&launcher.process_pattern)
        .map_err(|source| LauncherError::Terminate {
            program: launcher.command.clone(),
            source,
        })?;

    match previous {
        Termination::Terminated => {
            tracing::info!(pattern = %launcher.process_pattern, "terminated running launcher")
        }
        Termination::NotRunning => {
            tracing::info!(pattern = %launcher.process_pattern, "no running process found")
        }
    }

    processes
        .launch(&launcher.command)
        .map_err(|source| LauncherError::Launch {
            program: launcher.command.clone(),
            source,
        })?;

    Ok(Restart { previous })
}

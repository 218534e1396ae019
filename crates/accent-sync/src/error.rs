//! Top-level error type and exit codes.

use crate::config::ConfigError;
use crate::env::QueryError;
use crate::launcher::LauncherError;
use crate::palette::UnsupportedAccent;
use crate::theme::ThemeError;

/// Exit status for an accent name outside the palette.
pub const EXIT_UNSUPPORTED: u8 = 1;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 2;

/// Anything that can stop a sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Unsupported(#[from] UnsupportedAccent),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Launcher(#[from] LauncherError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SyncError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncError::Unsupported(_) => EXIT_UNSUPPORTED,
            _ => EXIT_FAILURE,
        }
    }
}

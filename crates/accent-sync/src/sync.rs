//! The sync pipeline: read the accent, patch the theme, restart the launcher.

use crate::config::Config;
use crate::env::{AccentReader, ProcessControl};
use crate::error::SyncError;
use crate::launcher::{self, Restart};
use crate::palette::{self, AccentColor};
use crate::theme::{ThemeFiles, ThemePlan};

/// Per-run switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Use this accent name instead of asking the desktop.
    pub accent: Option<String>,
    /// Compute everything, write and restart nothing.
    pub dry_run: bool,
    /// Leave the launcher alone after patching.
    pub no_restart: bool,
}

/// What a run did.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub accent: AccentColor,
    pub files: ThemeFiles,
    /// Stylesheet color before the run.
    pub previous_color: Option<String>,
    /// False for dry runs.
    pub written: bool,
    /// False when the run was told to leave the launcher alone.
    pub restart_requested: bool,
    /// `None` when no restart happened.
    pub restart: Option<Restart>,
}

impl SyncReport {
    pub fn hex(&self) -> &'static str {
        self.accent.hex()
    }
}

/// Run the full pipeline once.
///
/// Both theme files are patched in memory before either is written. Once
/// writing starts there is no rollback: if the stylesheet write fails the
/// manifest has already been updated.
pub fn run<A, P>(
    config: &Config,
    reader: &A,
    processes: &P,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError>
where
    A: AccentReader + ?Sized,
    P: ProcessControl + ?Sized,
{
    let name = match &options.accent {
        Some(name) => name.clone(),
        None => reader.read_accent()?,
    };
    let accent = palette::resolve(&name)?;
    tracing::debug!(%accent, hex = accent.hex(), "resolved accent");

    let files = ThemeFiles::in_dir(&config.theme_dir);
    let plan = ThemePlan::prepare(&files, accent.hex())?;

    let mut report = SyncReport {
        accent,
        files,
        previous_color: plan.previous_color().map(str::to_string),
        written: false,
        restart_requested: !options.no_restart,
        restart: None,
    };

    if options.dry_run {
        return Ok(report);
    }

    plan.write_manifest()?;
    plan.write_stylesheet()?;
    report.written = true;

    if report.restart_requested {
        report.restart = Some(launcher::restart(processes, &config.launcher)?);
    }

    Ok(report)
}

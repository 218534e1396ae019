//! Environment abstractions for testability.
//!
//! The pipeline touches the host in two places: it asks the desktop for the
//! current accent name, and it kills and relaunches the launcher. Both go
//! through the traits here so tests can run without GNOME, without
//! `gsettings`, and without signalling real processes.

use std::sync::Mutex;
use std::time::Duration;

use accent_sync_shell::{run_captured, run_status, spawn_detached, ShellError};

use crate::config::GSettingsConfig;

/// Failure while asking the desktop for its accent.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The preference command could not run or exited non-zero.
    #[error("Failed to query accent color")]
    Command(#[from] ShellError),

    /// The preference command succeeded but printed nothing usable.
    #[error("Accent color query returned an empty value")]
    Empty,
}

/// Abstraction over the desktop preference store.
pub trait AccentReader: Send + Sync {
    /// Return the current accent name, already normalized
    /// (see [`normalize_accent`]).
    fn read_accent(&self) -> Result<String, QueryError>;
}

/// What happened when we tried to stop the running launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// At least one matching process was signalled.
    Terminated,
    /// Nothing matched the pattern.
    NotRunning,
}

/// Abstraction over process control.
pub trait ProcessControl: Send + Sync {
    /// Signal every other process whose command line matches `pattern`.
    fn terminate(&self, pattern: &str) -> Result<Termination, ShellError>;

    /// Start `program` in the background, detached from this process.
    fn launch(&self, program: &str) -> Result<(), ShellError>;
}

/// Strip the whitespace and single quotes gsettings wraps string values in.
pub fn normalize_accent(raw: &str) -> &str {
    raw.trim().trim_matches('\'')
}

// === Real implementations ===

/// Reads the accent with `gsettings get <schema> <key>`.
#[derive(Debug, Clone)]
pub struct GSettings {
    program: String,
    schema: String,
    key: String,
    timeout: Option<Duration>,
}

impl GSettings {
    pub fn new(config: &GSettingsConfig) -> Self {
        Self {
            program: config.program.clone(),
            schema: config.schema.clone(),
            key: config.key.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl Default for GSettings {
    fn default() -> Self {
        Self::new(&GSettingsConfig::default())
    }
}

impl AccentReader for GSettings {
    fn read_accent(&self) -> Result<String, QueryError> {
        let stdout = run_captured(
            &self.program,
            &["get", self.schema.as_str(), self.key.as_str()],
            self.timeout,
        )?;
        let accent = normalize_accent(&stdout);
        if accent.is_empty() {
            return Err(QueryError::Empty);
        }
        tracing::debug!(raw = %stdout.trim_end(), accent, "read accent");
        Ok(accent.to_string())
    }
}

/// Real process control using `pgrep -f`, `kill` and a detached spawn.
///
/// This process is never signalled, even when its own command line matches
/// the pattern (a theme directory under `~/.config/ulauncher`, say).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcesses;

impl ProcessControl for SystemProcesses {
    fn terminate(&self, pattern: &str) -> Result<Termination, ShellError> {
        let listing = match run_captured("pgrep", &["-f", pattern], None) {
            Ok(listing) => listing,
            Err(ShellError::CommandFailed(_, status)) => {
                if status.code() != Some(1) {
                    tracing::warn!(%status, pattern, "pgrep failed, assuming no process matched");
                }
                return Ok(Termination::NotRunning);
            }
            Err(err) => return Err(err),
        };

        let pids = other_pids(&listing, std::process::id());
        if pids.is_empty() {
            tracing::debug!(pattern, "only this process matched");
            return Ok(Termination::NotRunning);
        }

        let pid_args: Vec<String> = pids.iter().map(u32::to_string).collect();
        let mut args = vec!["-TERM"];
        args.extend(pid_args.iter().map(String::as_str));
        let status = run_status("kill", &args)?;
        if status.success() {
            Ok(Termination::Terminated)
        } else {
            // The matches exited between the listing and the signal.
            tracing::warn!(%status, ?pids, "kill failed, assuming the processes already exited");
            Ok(Termination::NotRunning)
        }
    }

    fn launch(&self, program: &str) -> Result<(), ShellError> {
        spawn_detached(program, &[]).map(|_| ())
    }
}

/// Pids from `pgrep` output, minus `own`. Lines that aren't pids are skipped.
fn other_pids(listing: &str, own: u32) -> Vec<u32> {
    listing
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .filter(|&pid| pid != own)
        .collect()
}

// === Mock implementations for testing ===

/// Mock accent reader for testing.
#[derive(Debug, Clone)]
pub struct MockAccent {
    value: Option<String>,
}

impl MockAccent {
    /// A desktop reporting `raw`, exactly as gsettings would print it.
    pub fn reporting(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
        }
    }

    /// A desktop whose preference command is missing.
    pub fn unavailable() -> Self {
        Self { value: None }
    }
}

impl AccentReader for MockAccent {
    fn read_accent(&self) -> Result<String, QueryError> {
        match &self.value {
            Some(raw) => {
                let accent = normalize_accent(raw);
                if accent.is_empty() {
                    Err(QueryError::Empty)
                } else {
                    Ok(accent.to_string())
                }
            }
            None => Err(QueryError::Command(ShellError::Spawn {
                command: "gsettings".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock: not installed"),
            })),
        }
    }
}

/// A call recorded by [`MockProcesses`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessCall {
    Terminate(String),
    Launch(String),
}

/// Mock process control that records calls instead of making them.
#[derive(Debug)]
pub struct MockProcesses {
    running: bool,
    fail_launch: bool,
    calls: Mutex<Vec<ProcessCall>>,
}

impl MockProcesses {
    /// The launcher is currently running.
    pub fn running() -> Self {
        Self {
            running: true,
            fail_launch: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// No launcher process exists.
    pub fn not_running() -> Self {
        Self {
            running: false,
            ..Self::running()
        }
    }

    /// Make [`ProcessControl::launch`] fail as if the binary were missing.
    pub fn with_failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ProcessCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: ProcessCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl ProcessControl for MockProcesses {
    fn terminate(&self, pattern: &str) -> Result<Termination, ShellError> {
        self.record(ProcessCall::Terminate(pattern.to_string()));
        Ok(if self.running {
            Termination::Terminated
        } else {
            Termination::NotRunning
        })
    }

    fn launch(&self, program: &str) -> Result<(), ShellError> {
        self.record(ProcessCall::Launch(program.to_string()));
        if self.fail_launch {
            return Err(ShellError::Spawn {
                command: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock: not installed"),
            });
        }
        Ok(())
    }
}

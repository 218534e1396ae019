use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error while running command")]
    Io(#[from] std::io::Error),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command `{0}` failed with status {1}")]
    CommandFailed(String, ExitStatus),
    #[error("Command output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl ShellError {
    /// True when the program itself could not be found on `PATH`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ShellError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    let mut out = program.to_string();
    for arg in args {
        out.push(' ');
        out.push_str(arg);
    }
    out
}

fn spawn_error(program: &str, args: &[&str], source: std::io::Error) -> ShellError {
    ShellError::Spawn {
        command: display_command(program, args),
        source,
    }
}

/// Run `program` with `args` and return its stdout.
///
/// Stdin is closed and stderr is inherited so the program's own diagnostics
/// reach the terminal. A non-zero exit is an error.
///
/// # Arguments
///
/// * `program` - Executable name or path, resolved through `PATH`
/// * `args` - Arguments passed verbatim
/// * `timeout` - Optional timeout; if exceeded, the process is killed
pub fn run_captured(
    program: &str,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<String, ShellError> {
    let command_str = display_command(program, args);
    tracing::debug!(command = %command_str, ?timeout, "running");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| spawn_error(program, args, e))?;

    // Drain stdout on a separate thread so a chatty child can't fill the
    // pipe and stall while we wait on it.
    let reader = child.stdout.take().map(|mut stdout| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        })
    });

    let status = match timeout {
        Some(duration) => match child.wait_timeout(duration)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                return Err(ShellError::Timeout(command_str, duration));
            }
        },
        None => child.wait()?,
    };

    let bytes = match reader {
        Some(handle) => handle
            .join()
            .map_err(|_| std::io::Error::other("stdout reader panicked"))??,
        None => Vec::new(),
    };

    if !status.success() {
        return Err(ShellError::CommandFailed(command_str, status));
    }

    Ok(String::from_utf8(bytes)?)
}

/// Run `program` with `args` and return its exit status without judging it.
///
/// All stdio is discarded. Only a failure to start the program is an error.
pub fn run_status(program: &str, args: &[&str]) -> Result<ExitStatus, ShellError> {
    tracing::debug!(command = %display_command(program, args), "running for status");
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| spawn_error(program, args, e))
}

/// Start `program` in the background and return its pid.
///
/// The child gets its own process group and null stdio, and is never waited
/// on, so it outlives the caller.
pub fn spawn_detached(program: &str, args: &[&str]) -> Result<u32, ShellError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let child = cmd.spawn().map_err(|e| spawn_error(program, args, e))?;
    let pid = child.id();
    tracing::debug!(command = %display_command(program, args), pid, "spawned detached");
    Ok(pid)
}

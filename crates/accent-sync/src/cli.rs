//! Command-line interface and output.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use console::style;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};
use crate::env::Termination;
use crate::palette::AccentColor;
use crate::sync::{SyncOptions, SyncReport};

/// Log level options for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "accent-sync")]
#[command(about = "Apply the GNOME accent color to a Ulauncher theme and restart Ulauncher")]
#[command(version)]
pub struct Cli {
    /// Use this accent instead of reading it from gsettings
    #[arg(long, value_name = "NAME")]
    pub accent: Option<String>,

    /// Theme directory holding manifest.json and theme.css
    #[arg(long, value_name = "PATH", env = "ACCENT_SYNC_THEME_DIR")]
    pub theme_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.config/accent-sync/config.yaml if present)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Update the theme files but don't restart the launcher
    #[arg(long)]
    pub no_restart: bool,

    /// Show what would change without writing or restarting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List the supported accent colors and exit
    #[arg(long)]
    pub list: bool,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            accent: self.accent.clone(),
            dry_run: self.dry_run,
            no_restart: self.no_restart,
        }
    }

    /// Load the config file with the theme directory flag layered on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        Config::load(self.config.as_deref(), self.theme_dir.as_deref())
    }

    pub fn level_filter(&self) -> LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, true) => LevelFilter::DEBUG,
            (None, false) => LevelFilter::WARN,
        }
    }

    /// Install the stderr tracing subscriber. `RUST_LOG` wins when set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::builder()
            .with_default_directive(self.level_filter().into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}

/// Lines printed for `--list`.
pub fn palette_lines() -> Vec<String> {
    AccentColor::ALL
        .iter()
        .map(|accent| format!("{:<7} {}", accent.name(), accent.hex()))
        .collect()
}

/// Progress lines for a finished run.
pub fn report_lines(report: &SyncReport, launcher: &str) -> Vec<String> {
    let hex = report.hex();
    let mut lines = Vec::new();

    let verb = if report.written { "Updated" } else { "Would update" };
    for path in [&report.files.manifest, &report.files.stylesheet] {
        lines.push(format!(
            "{} {} with {}",
            verb,
            path.display(),
            style(hex).bold()
        ));
    }

    match report.restart {
        Some(restart) => {
            match restart.previous {
                Termination::Terminated => {
                    lines.push(format!("{} process terminated", launcher))
                }
                Termination::NotRunning => lines.push(format!(
                    "{}",
                    style(format!("No running {} process found", launcher)).dim()
                )),
            }
            lines.push(format!("{} restarted", launcher));
        }
        None if !report.written && report.restart_requested => {
            lines.push(format!("Would restart {}", launcher));
        }
        None => {}
    }

    if report.written {
        lines.push(format!("{}", style("Done!").green().bold()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::Restart;
    use crate::theme::ThemeFiles;
    use std::path::Path;

    fn report(written: bool, restart_requested: bool, restart: Option<Restart>) -> SyncReport {
        SyncReport {
            accent: AccentColor::Purple,
            files: ThemeFiles::in_dir(Path::new("/t")),
            previous_color: Some("#000000".to_string()),
            written,
            restart_requested,
            restart,
        }
    }

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|l| console::strip_ansi_codes(&l).into_owned())
            .collect()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["accent-sync"]).unwrap();
        assert_eq!(cli.sync_options(), SyncOptions::default());
        assert_eq!(cli.level_filter(), LevelFilter::WARN);
        assert!(!cli.list);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "accent-sync",
            "--accent",
            "teal",
            "--dry-run",
            "--no-restart",
            "--theme-dir",
            "/tmp/theme",
            "-v",
        ])
        .unwrap();
        let opts = cli.sync_options();
        assert_eq!(opts.accent.as_deref(), Some("teal"));
        assert!(opts.dry_run);
        assert!(opts.no_restart);
        assert_eq!(cli.level_filter(), LevelFilter::DEBUG);

        let config = cli.load_config().unwrap();
        assert_eq!(config.theme_dir, Path::new("/tmp/theme"));
    }

    #[test]
    fn test_explicit_log_level_beats_verbose() {
        let cli = Cli::try_parse_from(["accent-sync", "-v", "--log-level", "error"]).unwrap();
        assert_eq!(cli.level_filter(), LevelFilter::ERROR);
    }

    #[test]
    fn test_palette_lines() {
        let lines = palette_lines();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "blue    #3584e4");
        assert_eq!(lines[8], "slate   #6f8396");
    }

    #[test]
    fn test_report_full_run() {
        let lines = plain(report_lines(
            &report(
                true,
                true,
                Some(Restart {
                    previous: Termination::Terminated,
                }),
            ),
            "ulauncher",
        ));
        assert_eq!(
            lines,
            vec![
                "Updated /t/manifest.json with #9141ac",
                "Updated /t/theme.css with #9141ac",
                "ulauncher process terminated",
                "ulauncher restarted",
                "Done!",
            ]
        );
    }

    #[test]
    fn test_report_not_running() {
        let lines = plain(report_lines(
            &report(
                true,
                true,
                Some(Restart {
                    previous: Termination::NotRunning,
                }),
            ),
            "ulauncher",
        ));
        assert_eq!(lines[2], "No running ulauncher process found");
        assert_eq!(lines[3], "ulauncher restarted");
    }

    #[test]
    fn test_report_dry_run() {
        let lines = plain(report_lines(&report(false, true, None), "ulauncher"));
        assert_eq!(
            lines,
            vec![
                "Would update /t/manifest.json with #9141ac",
                "Would update /t/theme.css with #9141ac",
                "Would restart ulauncher",
            ]
        );
    }

    #[test]
    fn test_report_no_restart() {
        let lines = plain(report_lines(&report(true, false, None), "ulauncher"));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Done!");
    }

    #[test]
    fn test_report_dry_run_without_restart() {
        let lines = plain(report_lines(&report(false, false, None), "ulauncher"));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.starts_with("Would update")));
    }
}

//! # accent-sync
//!
//! Keeps a Ulauncher user theme in step with the GNOME accent color.
//!
//! A run has three steps:
//!
//! 1. Read the accent name from `gsettings` ([`env::GSettings`]).
//! 2. Resolve it through the fixed [`palette`] and patch the theme's
//!    `manifest.json` and `theme.css` ([`theme`]).
//! 3. Restart the launcher so it picks up the new files ([`launcher`]).
//!
//! [`sync::run`] drives the steps. The host is reached only through the
//! [`env::AccentReader`] and [`env::ProcessControl`] traits, which have mock
//! implementations for tests.
//!
//! ```no_run
//! use accent_sync::{run, Config, GSettings, SyncOptions, SystemProcesses};
//!
//! let config = Config::load(None, None)?;
//! let reader = GSettings::new(&config.gsettings);
//! let report = run(&config, &reader, &SystemProcesses, &SyncOptions::default())?;
//! println!("synced to {}", report.hex());
//! # Ok::<(), accent_sync::SyncError>(())
//! ```

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod launcher;
pub mod palette;
pub mod sync;
pub mod theme;

pub use config::Config;
pub use env::{AccentReader, GSettings, ProcessControl, SystemProcesses, Termination};
pub use error::SyncError;
pub use palette::{AccentColor, UnsupportedAccent};
pub use sync::{run, SyncOptions, SyncReport};

//! Layered configuration.
//!
//! Built-in defaults describe a stock setup: GNOME's `gsettings`, Ulauncher,
//! and the `ulauncher-theme-gnome-light` user theme. An optional YAML file
//! can override any of it, and command-line flags override the file.
//!
//! ```yaml
//! theme_dir: ~/.config/ulauncher/user-themes/my-theme
//! gsettings:
//!   timeout_secs: 5
//! launcher:
//!   command: ulauncher
//!   process_pattern: ulauncher
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File name of the structured theme manifest inside the theme directory.
pub const MANIFEST_FILE: &str = "manifest.json";
/// File name of the stylesheet inside the theme directory.
pub const STYLESHEET_FILE: &str = "theme.css";

const DEFAULT_THEME_DIR: &str = ".config/ulauncher/user-themes/ulauncher-theme-gnome-light";
const CONFIG_FILE: &str = "accent-sync/config.yaml";

/// Errors raised while building a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("Failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// How to ask the desktop for its accent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GSettingsConfig {
    pub program: String,
    pub schema: String,
    pub key: String,
    /// No timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for GSettingsConfig {
    fn default() -> Self {
        Self {
            program: "gsettings".to_string(),
            schema: "org.gnome.desktop.interface".to_string(),
            key: "accent-color".to_string(),
            timeout_secs: None,
        }
    }
}

/// How to stop and start the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Program spawned to start a fresh instance.
    pub command: String,
    /// Pattern matched against full command lines when terminating.
    pub process_pattern: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            command: "ulauncher".to_string(),
            process_pattern: "ulauncher".to_string(),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub theme_dir: PathBuf,
    pub gsettings: GSettingsConfig,
    pub launcher: LauncherConfig,
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    theme_dir: Option<PathBuf>,
    gsettings: Option<GSettingsConfig>,
    launcher: Option<LauncherConfig>,
}

impl Config {
    /// Built-in defaults rooted at `home`.
    pub fn with_home(home: &Path) -> Self {
        Self {
            theme_dir: home.join(DEFAULT_THEME_DIR),
            gsettings: GSettingsConfig::default(),
            launcher: LauncherConfig::default(),
        }
    }

    /// Load defaults, then the config file, then a theme directory override.
    ///
    /// With `explicit` set, that file must exist. Otherwise the per-user
    /// config file is read only if it is present. A leading `~` in
    /// `theme_dir` is expanded like the one in the file.
    pub fn load(explicit: Option<&Path>, theme_dir: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_home(explicit, theme_dir, dirs::home_dir().as_deref())
    }

    fn load_with_home(
        explicit: Option<&Path>,
        theme_dir: Option<&Path>,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        // Without a home directory only an absolute override can name the
        // theme; every home-relative value below gets replaced by it.
        let home = match (home, theme_dir) {
            (Some(home), _) => home.to_path_buf(),
            (None, Some(dir)) if !dir.starts_with("~") => PathBuf::new(),
            (None, _) => return Err(ConfigError::NoHomeDir),
        };
        let mut config = Self::with_home(&home);

        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => dirs::config_dir()
                .map(|dir| dir.join(CONFIG_FILE))
                .filter(|path| path.is_file()),
        };

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "loading config file");
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            config.merge_yaml(&text, &home).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        }

        if let Some(dir) = theme_dir {
            config.theme_dir = expand_home(dir, &home);
        }

        Ok(config)
    }

    /// Overlay a YAML document on top of the current values.
    pub fn merge_yaml(&mut self, yaml: &str, home: &Path) -> Result<(), serde_yaml::Error> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(());
        }
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        if let Some(dir) = file.theme_dir {
            self.theme_dir = expand_home(&dir, home);
        }
        if let Some(gsettings) = file.gsettings {
            self.gsettings = gsettings;
        }
        if let Some(launcher) = file.launcher {
            self.launcher = launcher;
        }
        Ok(())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.theme_dir.join(MANIFEST_FILE)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.theme_dir.join(STYLESHEET_FILE)
    }
}

/// Replace a leading `~` component with `home`.
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

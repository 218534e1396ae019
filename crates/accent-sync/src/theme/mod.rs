//! The two theme artifacts and how they get rewritten.
//!
//! A run first builds a [`ThemePlan`]: both files are read and both patches
//! computed in memory. Nothing is written until that succeeds, so a bad
//! manifest or a stylesheet without the color directive leaves the theme
//! exactly as it was.

pub mod manifest;
pub mod stylesheet;

use std::fs;
use std::path::{Path, PathBuf};

pub use manifest::{patch_manifest, ManifestError};
pub use stylesheet::{patch_stylesheet, StylesheetError};

use crate::config::{MANIFEST_FILE, STYLESHEET_FILE};

/// Locations of the manifest and stylesheet for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFiles {
    pub manifest: PathBuf,
    pub stylesheet: PathBuf,
}

impl ThemeFiles {
    /// The standard file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            manifest: dir.join(MANIFEST_FILE),
            stylesheet: dir.join(STYLESHEET_FILE),
        }
    }
}

/// Error from either artifact.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),
}

/// Patched contents for both artifacts, ready to be written.
#[derive(Debug, Clone)]
pub struct ThemePlan {
    files: ThemeFiles,
    hex: String,
    manifest: String,
    stylesheet: String,
    stylesheet_before: Option<String>,
}

impl ThemePlan {
    /// Read both files and compute their patched contents.
    pub fn prepare(files: &ThemeFiles, hex: &str) -> Result<Self, ThemeError> {
        let manifest_src =
            fs::read_to_string(&files.manifest).map_err(|source| ManifestError::Read {
                path: files.manifest.clone(),
                source,
            })?;
        let manifest = patch_manifest(&manifest_src, hex)?;

        let css_src =
            fs::read_to_string(&files.stylesheet).map_err(|source| StylesheetError::Read {
                path: files.stylesheet.clone(),
                source,
            })?;
        let stylesheet = patch_stylesheet(&css_src, hex).map_err(|err| match err {
            StylesheetError::DirectiveNotFound { .. } => StylesheetError::DirectiveNotFound {
                path: Some(files.stylesheet.clone()),
            },
            other => other,
        })?;

        Ok(Self {
            files: files.clone(),
            hex: hex.to_string(),
            manifest,
            stylesheet,
            stylesheet_before: stylesheet::current_color(&css_src).map(str::to_string),
        })
    }

    pub fn files(&self) -> &ThemeFiles {
        &self.files
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The color the stylesheet carried before patching.
    pub fn previous_color(&self) -> Option<&str> {
        self.stylesheet_before.as_deref()
    }

    pub fn manifest_contents(&self) -> &str {
        &self.manifest
    }

    pub fn stylesheet_contents(&self) -> &str {
        &self.stylesheet
    }

    /// Overwrite the manifest with its patched contents.
    pub fn write_manifest(&self) -> Result<(), ThemeError> {
        fs::write(&self.files.manifest, &self.manifest).map_err(|source| {
            ManifestError::Write {
                path: self.files.manifest.clone(),
                source,
            }
            .into()
        })
    }

    /// Overwrite the stylesheet with its patched contents.
    pub fn write_stylesheet(&self) -> Result<(), ThemeError> {
        fs::write(&self.files.stylesheet, &self.stylesheet).map_err(|source| {
            StylesheetError::Write {
                path: self.files.stylesheet.clone(),
                source,
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "{\n  \"matched_text_hl_colors\": {\n    \"when_selected\": \"#000000\",\n    \"when_not_selected\": \"#000000\"\n  }\n}\n";
    const CSS: &str = "@define-color selected_bg_color #000000;\n";

    fn theme_dir(manifest: &str, css: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), manifest).unwrap();
        fs::write(dir.path().join(STYLESHEET_FILE), css).unwrap();
        dir
    }

    #[test]
    fn test_prepare_does_not_write() {
        let dir = theme_dir(MANIFEST, CSS);
        let files = ThemeFiles::in_dir(dir.path());
        let plan = ThemePlan::prepare(&files, "#ed5b00").unwrap();

        assert!(plan.manifest_contents().contains("#ed5b00"));
        assert!(plan.stylesheet_contents().contains("#ed5b00"));
        assert_eq!(plan.previous_color(), Some("#000000"));
        assert_eq!(fs::read_to_string(&files.manifest).unwrap(), MANIFEST);
        assert_eq!(fs::read_to_string(&files.stylesheet).unwrap(), CSS);
    }

    #[test]
    fn test_write_both() {
        let dir = theme_dir(MANIFEST, CSS);
        let files = ThemeFiles::in_dir(dir.path());
        let plan = ThemePlan::prepare(&files, "#ed5b00").unwrap();
        plan.write_manifest().unwrap();
        plan.write_stylesheet().unwrap();

        assert_eq!(
            fs::read_to_string(&files.manifest).unwrap(),
            MANIFEST.replace("#000000", "#ed5b00")
        );
        assert_eq!(
            fs::read_to_string(&files.stylesheet).unwrap(),
            "@define-color selected_bg_color #ed5b00;\n"
        );
    }

    #[test]
    fn test_missing_directive_blocks_whole_plan() {
        let dir = theme_dir(MANIFEST, "window { color: red; }\n");
        let files = ThemeFiles::in_dir(dir.path());
        let err = ThemePlan::prepare(&files, "#ed5b00").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::Stylesheet(StylesheetError::DirectiveNotFound { path: Some(_) })
        ));
        assert!(err.to_string().contains("theme.css"));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STYLESHEET_FILE), CSS).unwrap();
        let err = ThemePlan::prepare(&ThemeFiles::in_dir(dir.path()), "#ed5b00").unwrap_err();
        assert!(matches!(err, ThemeError::Manifest(ManifestError::Read { .. })));
    }

    #[test]
    fn test_missing_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), MANIFEST).unwrap();
        let err = ThemePlan::prepare(&ThemeFiles::in_dir(dir.path()), "#ed5b00").unwrap_err();
        assert!(matches!(
            err,
            ThemeError::Stylesheet(StylesheetError::Read { .. })
        ));
    }
}

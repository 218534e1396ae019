//! Patching the theme's `manifest.json`.
//!
//! The manifest is a JSON object. Ulauncher reads the highlight color for
//! matched text from
//!
//! ```json
//! "matched_text_hl_colors": {
//!   "when_selected": "#3584e4",
//!   "when_not_selected": "#3584e4"
//! }
//! ```
//!
//! Both fields are overwritten with the accent. Everything else is parsed
//! and written back in its original key order.

use std::path::PathBuf;

use serde_json::Value;

/// Object holding the highlight colors.
pub const HIGHLIGHT_KEY: &str = "matched_text_hl_colors";
/// Highlight color fields rewritten inside [`HIGHLIGHT_KEY`].
pub const HIGHLIGHT_FIELDS: [&str; 2] = ["when_selected", "when_not_selected"];

/// Errors raised while patching the manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest is not valid JSON")]
    Parse(#[from] serde_json::Error),

    /// An expected key is absent or not an object.
    #[error("Manifest has no key '{0}'")]
    MissingKey(String),
}

/// Return `source` with both highlight fields set to `hex`.
///
/// Output is pretty-printed with two-space indentation. A trailing newline
/// on the input is kept.
pub fn patch_manifest(source: &str, hex: &str) -> Result<String, ManifestError> {
    let mut manifest: Value = serde_json::from_str(source)?;

    let colors = manifest
        .get_mut(HIGHLIGHT_KEY)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ManifestError::MissingKey(HIGHLIGHT_KEY.to_string()))?;

    for field in HIGHLIGHT_FIELDS {
        let slot = colors
            .get_mut(field)
            .ok_or_else(|| ManifestError::MissingKey(format!("{}.{}", HIGHLIGHT_KEY, field)))?;
        *slot = Value::String(hex.to_string());
    }

    let mut out = serde_json::to_string_pretty(&manifest)?;
    if source.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

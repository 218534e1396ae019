//! Patching the theme's GTK stylesheet.
//!
//! Ulauncher themes define their selection color with a GTK named color:
//!
//! ```css
//! @define-color selected_bg_color #3584e4;
//! ```
//!
//! Only the value of that directive changes. The rest of the file is
//! passed through untouched.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Name of the GTK color the accent is written to.
pub const COLOR_NAME: &str = "selected_bg_color";

static DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@define-color selected_bg_color #[0-9a-fA-F]{6};")
        .expect("directive pattern is valid")
});

/// Errors raised while patching the stylesheet.
#[derive(Debug, thiserror::Error)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write stylesheet {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `selected_bg_color` definition to replace.
    #[error("No `@define-color selected_bg_color #rrggbb;` line{}", location(.path))]
    DirectiveNotFound {
        /// Optional source file path.
        path: Option<PathBuf>,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// The directive as it will appear after patching.
pub fn directive(hex: &str) -> String {
    format!("@define-color {} {};", COLOR_NAME, hex)
}

/// Return `source` with the first `selected_bg_color` definition set to `hex`.
///
/// Fails with [`StylesheetError::DirectiveNotFound`] when there is nothing
/// to replace, so a theme that was edited by hand is never reported as
/// updated.
pub fn patch_stylesheet(source: &str, hex: &str) -> Result<String, StylesheetError> {
    if !DIRECTIVE.is_match(source) {
        return Err(StylesheetError::DirectiveNotFound { path: None });
    }
    let replacement = directive(hex);
    Ok(DIRECTIVE
        .replace(source, NoExpand(&replacement))
        .into_owned())
}

/// The color currently assigned by the directive, if any.
pub fn current_color(source: &str) -> Option<&str> {
    DIRECTIVE.find(source).map(|m| {
        let text = m.as_str();
        // "#rrggbb;" is always the last eight bytes of a match.
        &text[text.len() - 8..text.len() - 1]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CSS: &str = "/* GNOME light */\n\
@define-color bg_color #ffffff;\n\
@define-color selected_bg_color #000000;\n\
@define-color selected_fg_color #ffffff;\n\
\n\
.app {\n  background-color: @bg_color;\n}\n";

    #[test]
    fn test_patch_replaces_only_the_value() {
        let out = patch_stylesheet(CSS, "#9141ac").unwrap();
        let before: Vec<&str> = CSS.lines().collect();
        let after: Vec<&str> = out.lines().collect();
        assert_eq!(before.len(), after.len());
        for (i, (b, a)) in before.iter().zip(&after).enumerate() {
            if i == 2 {
                assert_eq!(*a, "@define-color selected_bg_color #9141ac;");
            } else {
                assert_eq!(b, a);
            }
        }
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_patch_accepts_uppercase_existing_value() {
        let out = patch_stylesheet("@define-color selected_bg_color #ABCDEF;", "#3584e4").unwrap();
        assert_eq!(out, "@define-color selected_bg_color #3584e4;");
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let input = "@define-color selected_bg_color #111111;\n@define-color selected_bg_color #222222;\n";
        let out = patch_stylesheet(input, "#3584e4").unwrap();
        assert_eq!(
            out,
            "@define-color selected_bg_color #3584e4;\n@define-color selected_bg_color #222222;\n"
        );
    }

    #[test]
    fn test_missing_directive_is_an_error() {
        let input = "@define-color bg_color #ffffff;\n";
        assert!(matches!(
            patch_stylesheet(input, "#3584e4"),
            Err(StylesheetError::DirectiveNotFound { path: None })
        ));
    }

    #[test]
    fn test_short_hex_does_not_match() {
        let input = "@define-color selected_bg_color #fff;\n";
        assert!(patch_stylesheet(input, "#3584e4").is_err());
    }

    #[test]
    fn test_current_color() {
        assert_eq!(current_color(CSS), Some("#000000"));
        assert_eq!(current_color("body {}"), None);
    }

    proptest! {
        #[test]
        fn prop_surrounding_text_passes_through(
            prefix in "[a-z{}:;. \n]{0,80}",
            suffix in "[a-z{}:;. \n]{0,80}",
            old in "[0-9a-fA-F]{6}",
        ) {
            let input = format!("{}@define-color selected_bg_color #{};{}", prefix, old, suffix);
            let out = patch_stylesheet(&input, "#2190a4").unwrap();
            prop_assert_eq!(
                out,
                format!("{}@define-color selected_bg_color #2190a4;{}", prefix, suffix)
            );
        }
    }
}

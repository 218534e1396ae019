//! The fixed accent palette.
//!
//! GNOME exposes the accent as a bare name (`org.gnome.desktop.interface
//! accent-color`). Each name maps to the libadwaita hex value for that
//! accent. The table order is the order the names are listed to users.

use std::fmt;
use std::str::FromStr;

/// One of the accent colors GNOME lets the user pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccentColor {
    Blue,
    Teal,
    Green,
    Yellow,
    Orange,
    Red,
    Pink,
    Purple,
    Slate,
}

impl AccentColor {
    /// Every accent, in palette order.
    pub const ALL: [AccentColor; 9] = [
        AccentColor::Blue,
        AccentColor::Teal,
        AccentColor::Green,
        AccentColor::Yellow,
        AccentColor::Orange,
        AccentColor::Red,
        AccentColor::Pink,
        AccentColor::Purple,
        AccentColor::Slate,
    ];

    /// The name as gsettings reports it.
    pub fn name(self) -> &'static str {
        match self {
            AccentColor::Blue => "blue",
            AccentColor::Teal => "teal",
            AccentColor::Green => "green",
            AccentColor::Yellow => "yellow",
            AccentColor::Orange => "orange",
            AccentColor::Red => "red",
            AccentColor::Pink => "pink",
            AccentColor::Purple => "purple",
            AccentColor::Slate => "slate",
        }
    }

    /// `#rrggbb`, lowercase.
    pub fn hex(self) -> &'static str {
        match self {
            AccentColor::Blue => "#3584e4",
            AccentColor::Teal => "#2190a4",
            AccentColor::Green => "#3a944a",
            AccentColor::Yellow => "#c88800",
            AccentColor::Orange => "#ed5b00",
            AccentColor::Red => "#e62d42",
            AccentColor::Pink => "#d56199",
            AccentColor::Purple => "#9141ac",
            AccentColor::Slate => "#6f8396",
        }
    }

    /// Names of every supported accent, in palette order.
    pub fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|accent| accent.name()).collect()
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccentColor {
    type Err = UnsupportedAccent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccentColor::ALL
            .into_iter()
            .find(|accent| accent.name() == s)
            .ok_or_else(|| UnsupportedAccent {
                name: s.to_string(),
            })
    }
}

/// The desktop reported an accent name that is not in the palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported color: {name}. Supported: {}", AccentColor::supported_names().join(", "))]
pub struct UnsupportedAccent {
    /// The name as it was received.
    pub name: String,
}

/// Look up `name` in the palette.
pub fn resolve(name: &str) -> Result<AccentColor, UnsupportedAccent> {
    name.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves_to_documented_hex() {
        let expected = [
            ("blue", "#3584e4"),
            ("teal", "#2190a4"),
            ("green", "#3a944a"),
            ("yellow", "#c88800"),
            ("orange", "#ed5b00"),
            ("red", "#e62d42"),
            ("pink", "#d56199"),
            ("purple", "#9141ac"),
            ("slate", "#6f8396"),
        ];
        assert_eq!(expected.len(), AccentColor::ALL.len());
        for (name, hex) in expected {
            assert_eq!(resolve(name).unwrap().hex(), hex, "accent {}", name);
        }
    }

    #[test]
    fn test_names_round_trip_through_display() {
        for accent in AccentColor::ALL {
            assert_eq!(resolve(&accent.to_string()), Ok(accent));
        }
    }

    #[test]
    fn test_hex_values_are_six_lowercase_digits() {
        for accent in AccentColor::ALL {
            let hex = accent.hex();
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_unknown_name_lists_all_choices() {
        let err = resolve("cyan").unwrap_err();
        assert_eq!(err.name, "cyan");
        assert_eq!(
            err.to_string(),
            "Unsupported color: cyan. Supported: blue, teal, green, yellow, orange, red, pink, purple, slate"
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(resolve("Blue").is_err());
        assert!(resolve(" blue").is_err());
        assert!(resolve("'blue'").is_err());
        assert!(resolve("").is_err());
    }
}

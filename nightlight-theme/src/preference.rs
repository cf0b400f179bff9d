// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The color scheme the user asked for.
///
/// Exactly one value is active at a time. [ThemePreference::System] defers
/// to whatever the operating system reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the OS appearance.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

impl ThemePreference {
    /// Every valid preference, in the order a settings screen lists them.
    pub const ALL: [ThemePreference; 3] = [Self::System, Self::Light, Self::Dark];

    /// The token this preference is persisted as.
    pub fn as_token(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Derive the scheme that should be rendered, given the OS appearance.
    pub fn resolve(self, os_scheme: ColorScheme) -> ColorScheme {
        match self {
            Self::System => os_scheme,
            Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
        }
    }

    /// Returns `true` if this preference follows the OS appearance.
    pub fn follows_system(self) -> bool {
        matches!(self, Self::System)
    }
}

impl FromStr for ThemePreference {
    type Err = ThemeError;

    /// Tokens are matched exactly; persisted records are always written lowercase.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "system" => Ok(Self::System),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeError::invalid_preference(other)),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// A concrete light or dark scheme.
///
/// The OS appearance signal and the effective scheme share this type. An
/// unknown OS appearance is reported as [ColorScheme::Light].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl ColorScheme {
    /// Returns `true` for [ColorScheme::Dark].
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
        assert_eq!(ColorScheme::default(), ColorScheme::Light);
    }

    #[test]
    fn test_resolve_table() {
        let cases = [
            (ThemePreference::System, ColorScheme::Light, ColorScheme::Light),
            (ThemePreference::System, ColorScheme::Dark, ColorScheme::Dark),
            (ThemePreference::Light, ColorScheme::Light, ColorScheme::Light),
            (ThemePreference::Light, ColorScheme::Dark, ColorScheme::Light),
            (ThemePreference::Dark, ColorScheme::Light, ColorScheme::Dark),
            (ThemePreference::Dark, ColorScheme::Dark, ColorScheme::Dark),
        ];

        for (preference, os, expected) in cases {
            assert_eq!(
                preference.resolve(os),
                expected,
                "{preference} under OS {os}"
            );
        }
    }

    #[test]
    fn test_tokens_parse_back() {
        for preference in ThemePreference::ALL {
            assert_eq!(preference.as_token().parse::<ThemePreference>().unwrap(), preference);
        }
    }

    #[test]
    fn test_rejects_unknown_tokens() {
        for token in ["", "Dark", " light", "auto", "null"] {
            let err = token.parse::<ThemePreference>().unwrap_err();
            assert!(matches!(err, ThemeError::InvalidPreference { .. }), "{token:?}");
        }
    }
}

//! Editor theme preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two themes the editor ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Normalize an arbitrary stored or user-supplied value.
    /// Anything outside the known set falls back to the default theme.
    pub fn normalize(value: Option<&str>) -> Theme {
        value
            .and_then(|raw| Theme::from_str(raw).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!(
                "Invalid theme: '{}'. Valid themes are: dark, light",
                s
            )),
        }
    }
}

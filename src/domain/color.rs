//! Color tags for notes and notebooks

use crate::error::PixelpadError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn hex_color_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^#?[0-9a-fA-F]{6}$").unwrap())
}

/// A normalized `#RRGGBB` color (always uppercase, always with the `#`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Validate and normalize a color string.
    ///
    /// Accepts six hex digits with or without a leading `#`, surrounded by
    /// optional whitespace. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Color> {
        let candidate = value.trim();
        if !hex_color_regex().is_match(candidate) {
            return None;
        }
        let digits = candidate.trim_start_matches('#');
        Some(Color(format!("#{}", digits.to_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = PixelpadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| PixelpadError::InvalidColor(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Color::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adds_hash_and_uppercases() {
        assert_eq!(Color::parse("1a2b3c").unwrap().as_str(), "#1A2B3C");
        assert_eq!(Color::parse("#ff00aa").unwrap().as_str(), "#FF00AA");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Color::parse("  #abcdef ").unwrap().as_str(), "#ABCDEF");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Color::parse("").is_none());
        assert!(Color::parse("#12345").is_none());
        assert!(Color::parse("#1234567").is_none());
        assert!(Color::parse("##123456").is_none());
        assert!(Color::parse("red").is_none());
        assert!(Color::parse("#GGGGGG").is_none());
    }

    #[test]
    fn test_from_str_reports_invalid_color() {
        match Color::from_str("blue") {
            Err(PixelpadError::InvalidColor(value)) => assert_eq!(value, "blue"),
            other => panic!("Expected InvalidColor, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_normalizes() {
        let color: Color = serde_json::from_str("\"00ff00\"").unwrap();
        assert_eq!(color.as_str(), "#00FF00");
        assert!(serde_json::from_str::<Color>("\"green\"").is_err());
    }
}

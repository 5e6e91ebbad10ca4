//! Note file naming rules

use crate::error::{PixelpadError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File extensions a note may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteExtension {
    /// Plain text (.txt)
    #[default]
    Text,
    /// Markdown (.md)
    Markdown,
}

impl NoteExtension {
    pub const ALL: [NoteExtension; 2] = [NoteExtension::Text, NoteExtension::Markdown];

    /// The suffix including its leading dot
    pub fn suffix(&self) -> &'static str {
        match self {
            NoteExtension::Text => ".txt",
            NoteExtension::Markdown => ".md",
        }
    }

    /// Extension of an existing or prospective note path
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension() {
            Some(ext) => ext.to_string_lossy().parse(),
            None => Err(PixelpadError::UnsupportedExtension(String::new())),
        }
    }

    /// Whether a path carries one of the supported extensions
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

impl fmt::Display for NoteExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for NoteExtension {
    type Err = PixelpadError;

    /// Accepts `md`, `.md`, `.MD` and so on
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        let suffix = if lowered.starts_with('.') {
            lowered
        } else {
            format!(".{}", lowered)
        };
        NoteExtension::ALL
            .into_iter()
            .find(|ext| ext.suffix() == suffix)
            .ok_or(PixelpadError::UnsupportedExtension(suffix))
    }
}

/// File name for a new note, derived from a requested name and a fallback extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFileName {
    pub stem: String,
    pub extension: NoteExtension,
}

impl NoteFileName {
    /// Derive the file name for a new note.
    ///
    /// An explicit suffix on `name` wins over `default_extension`. Any
    /// directory components in `name` are discarded.
    pub fn derive(name: &str, default_extension: &str) -> Result<Self> {
        let requested = Path::new(name);
        let (stem, extension) = match requested.extension() {
            Some(ext) => (
                requested.file_stem(),
                ext.to_string_lossy().parse::<NoteExtension>()?,
            ),
            None => (
                requested.file_name(),
                default_extension.parse::<NoteExtension>()?,
            ),
        };

        let stem = stem
            .map(|s| s.to_string_lossy().trim().to_string())
            .unwrap_or_default();
        if stem.is_empty() {
            return Err(PixelpadError::InvalidName(
                "Note name must not be empty".to_string(),
            ));
        }

        Ok(NoteFileName { stem, extension })
    }
}

impl fmt::Display for NoteFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.extension)
    }
}

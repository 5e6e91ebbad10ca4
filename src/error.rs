//! Error types for pixelpad

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pixelpad
#[derive(Debug, Error)]
pub enum PixelpadError {
    #[error("Notes repository is not configured: {0}")]
    RepositoryNotConfigured(String),

    #[error("Repository path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Unsupported note extension: {0}")]
    UnsupportedExtension(String),

    #[error("Path must reside within the configured repository: {0}")]
    OutsideRepository(PathBuf),

    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Is a directory: {0}")]
    IsADirectory(PathBuf),

    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Notebook is not empty: {0}")]
    NotEmpty(PathBuf),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid color '{0}': expected a hex value in the form #RRGGBB")]
    InvalidColor(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Opener error: {0}")]
    Opener(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PixelpadError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PixelpadError::RepositoryNotConfigured(_) => 2,
            e if e.is_invalid_argument() => 3,
            PixelpadError::PathNotFound(_) | PixelpadError::NotFound(_) => 4,
            PixelpadError::AlreadyExists(_)
            | PixelpadError::IsADirectory(_)
            | PixelpadError::NotADirectory(_)
            | PixelpadError::NotEmpty(_)
            | PixelpadError::InvalidOperation(_) => 5,
            _ => 1,
        }
    }

    /// Errors caused by a bad argument rather than by repository state
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            PixelpadError::OutsideRepository(_)
                | PixelpadError::InvalidName(_)
                | PixelpadError::InvalidColor(_)
                | PixelpadError::UnsupportedExtension(_)
        )
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            PixelpadError::RepositoryNotConfigured(reason) => {
                format!(
                    "Notes repository is not configured: {}\n\n\
                    Suggestions:\n\
                    • Select a notes folder: pixelpad config repository <PATH>\n\
                    • Check that the previously configured folder still exists\n\
                    • Set PIXELPAD_CONFIG_DIR to use a different configuration",
                    reason
                )
            }
            PixelpadError::PathNotFound(path) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Create the folder first, then select it again\n\
                    • Pass an existing directory: pixelpad config repository {}",
                    self,
                    path.display()
                )
            }
            PixelpadError::UnsupportedExtension(ext) => {
                format!(
                    "Unsupported note extension: '{}'\n\n\
                    Supported extensions: .txt, .md",
                    ext
                )
            }
            PixelpadError::InvalidColor(_) => {
                format!(
                    "{}\n\n\
                    Examples: #1A2B3C, 1a2b3c",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using PixelpadError
pub type Result<T> = std::result::Result<T, PixelpadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_suggestion() {
        let err = PixelpadError::RepositoryNotConfigured("never set".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("pixelpad config repository"));
        assert!(msg.contains("PIXELPAD_CONFIG_DIR"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_unsupported_extension_lists_supported() {
        let err = PixelpadError::UnsupportedExtension(".pdf".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains(".txt, .md"));
        assert!(msg.contains("'.pdf'"));
    }

    #[test]
    fn test_invalid_argument_grouping() {
        assert!(PixelpadError::OutsideRepository(PathBuf::from("/etc")).is_invalid_argument());
        assert!(PixelpadError::InvalidColor("red".to_string()).is_invalid_argument());
        assert!(!PixelpadError::NotFound(PathBuf::from("a.md")).is_invalid_argument());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            PixelpadError::RepositoryNotConfigured(String::new()).exit_code(),
            2
        );
        assert_eq!(
            PixelpadError::OutsideRepository(PathBuf::from("/etc")).exit_code(),
            3
        );
        assert_eq!(PixelpadError::NotFound(PathBuf::from("a.md")).exit_code(), 4);
        assert_eq!(PixelpadError::NotEmpty(PathBuf::from("Work")).exit_code(), 5);
        assert_eq!(PixelpadError::Config("bad".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = PixelpadError::Opener("xdg-open missing".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Opener error: xdg-open missing");
    }
}

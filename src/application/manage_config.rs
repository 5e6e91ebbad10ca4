//! Config management use case

use crate::error::{PixelpadError, Result};
use crate::infrastructure::{Config, NotesRepository};
use std::path::Path;

const VALID_KEYS: &str = "repository, theme";

/// Service for reading and changing the persisted settings
pub struct ConfigService<'a> {
    repository: &'a mut NotesRepository,
}

impl<'a> ConfigService<'a> {
    /// Create a new config service
    pub fn new(repository: &'a mut NotesRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "repository" => self
                .repository
                .repository_path()
                .map(|path| path.display().to_string())
                .ok_or_else(|| {
                    PixelpadError::RepositoryNotConfigured(
                        "no repository has been selected yet".to_string(),
                    )
                }),
            "theme" => Ok(self.repository.theme().to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value, returning the value as stored
    pub fn set(&mut self, key: &str, value: &str) -> Result<String> {
        match key {
            "repository" => {
                let resolved = self.repository.set_repository_path(Path::new(value))?;
                Ok(resolved.display().to_string())
            }
            "theme" => {
                let theme = self.repository.set_theme(value)?;
                Ok(theme.to_string())
            }
            _ => Err(unknown_key(key)),
        }
    }

    /// List all config values
    pub fn list(&self) -> Config {
        self.repository.config().clone()
    }
}

fn unknown_key(key: &str) -> PixelpadError {
    PixelpadError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}

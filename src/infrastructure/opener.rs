//! File manager integration for revealing the repository folder

use crate::error::{PixelpadError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Overrides the platform file manager command
pub const FILE_MANAGER_ENV: &str = "PIXELPAD_FILE_MANAGER";

/// Launches an external program on a directory
pub struct FileManager {
    command: String,
}

impl FileManager {
    /// Create a launcher with the given command
    pub fn new(command: String) -> Self {
        FileManager { command }
    }

    /// `PIXELPAD_FILE_MANAGER` if set, otherwise the platform default
    pub fn from_env() -> Self {
        let command = std::env::var(FILE_MANAGER_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::platform_default().to_string());
        FileManager::new(command)
    }

    fn platform_default() -> &'static str {
        if cfg!(windows) {
            "explorer"
        } else if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        }
    }

    /// Open `dir` and return without waiting for the program to exit
    pub fn open(&self, dir: &Path) -> Result<()> {
        let (program, mut args) = self.parse_command();
        args.push(dir.to_string_lossy().to_string());

        debug!(program = %program, ?args, "launching file manager");
        Command::new(&program).args(&args).spawn().map_err(|e| {
            PixelpadError::Opener(format!("Failed to launch '{}': {}", program, e))
        })?;

        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        match parts.split_first() {
            Some((program, rest)) => (
                program.to_string(),
                rest.iter().map(|s| s.to_string()).collect(),
            ),
            None => (Self::platform_default().to_string(), vec![]),
        }
    }
}

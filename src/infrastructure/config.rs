//! Configuration management

use crate::domain::Theme;
use crate::error::Result;
use crate::infrastructure::sandbox::{expand_home, resolve_lenient};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_DIR_ENV: &str = "PIXELPAD_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".pixelpad";
pub const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_SECTION: &str = "pixelpad";

/// Per-user configuration directory.
/// `PIXELPAD_CONFIG_DIR` wins over `~/.pixelpad`.
pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Settings persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub repository_path: Option<PathBuf>,
    pub theme: Theme,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigFile {
    pixelpad: ConfigSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repository_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// Reads and writes `config.toml` inside the configuration directory
#[derive(Debug)]
pub struct ConfigStore {
    dir: PathBuf,
    config: Config,
    /// Theme as last seen on disk; `None` until the section exists
    persisted_theme: Option<Theme>,
}

impl ConfigStore {
    /// Load the configuration from `dir/config.toml`.
    ///
    /// A missing file yields defaults. A file that cannot be parsed is
    /// treated as empty.
    pub fn open(dir: PathBuf) -> Result<Self> {
        let mut store = ConfigStore {
            dir,
            config: Config::default(),
            persisted_theme: None,
        };

        let contents = match fs::read_to_string(store.file_path()) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(store),
            Err(e) => return Err(e.into()),
        };

        let table = match contents.parse::<toml::Table>() {
            Ok(table) => table,
            Err(e) => {
                warn!(file = %store.file_path().display(), error = %e, "ignoring malformed config file");
                return Ok(store);
            }
        };

        let Some(section) = table.get(CONFIG_SECTION).and_then(|v| v.as_table()) else {
            return Ok(store);
        };

        let theme = Theme::normalize(section.get("theme").and_then(|v| v.as_str()));
        store.config.theme = theme;
        store.persisted_theme = Some(theme);

        store.config.repository_path = section
            .get("repository_path")
            .and_then(|v| v.as_str())
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| resolve_lenient(&expand_home(Path::new(raw))));

        debug!(config = ?store.config, "loaded configuration");
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILENAME)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository_path(&self) -> Option<&Path> {
        self.config.repository_path.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Persist a new repository root together with the current theme.
    /// `path` is expected to be canonical already.
    pub fn set_repository_path(&mut self, path: PathBuf) -> Result<()> {
        self.config.repository_path = Some(path);
        self.save()
    }

    /// Change the theme. Returns `false` when nothing had to be written.
    pub fn set_theme(&mut self, theme: Theme) -> Result<bool> {
        if self.config.theme == theme && self.persisted_theme == Some(theme) {
            return Ok(false);
        }
        self.config.theme = theme;
        self.save()?;
        Ok(true)
    }

    fn save(&mut self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let file = ConfigFile {
            pixelpad: ConfigSection {
                repository_path: self
                    .config
                    .repository_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                theme: Some(self.config.theme.as_str().to_string()),
            },
        };
        let contents = toml::to_string_pretty(&file)?;
        fs::write(self.file_path(), contents)?;

        self.persisted_theme = Some(self.config.theme);
        debug!(file = %self.file_path().display(), "saved configuration");
        Ok(())
    }
}

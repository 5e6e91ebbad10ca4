//! Notes repository manager
//!
//! Owns the persisted configuration and the color metadata cache for the
//! currently selected repository. Note and notebook operations live in
//! `notes.rs` and `notebooks.rs` as further `impl` blocks on the same type.

use crate::domain::{Color, NoteExtension, Theme};
use crate::error::{PixelpadError, Result};
use crate::infrastructure::config::{default_config_dir, Config, ConfigStore};
use crate::infrastructure::metadata::{ColorScope, ColorStore, LEGACY_METADATA_DIR_NAME};
use crate::infrastructure::opener::FileManager;
use crate::infrastructure::sandbox::{expand_home, Sandbox};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Number of notes returned by the recent-notes listing
pub const RECENT_LIMIT: usize = 10;

/// Whether a usable repository is currently selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryState {
    Unconfigured,
    Configured(PathBuf),
}

/// Repository manager: configuration, path sandboxing and color tags
#[derive(Debug)]
pub struct NotesRepository {
    config: ConfigStore,
    colors: Option<ColorStore>,
}

impl NotesRepository {
    /// Open the manager with its configuration stored in `config_dir`
    pub fn open(config_dir: PathBuf) -> Result<Self> {
        let config = ConfigStore::open(config_dir)?;
        let mut repository = NotesRepository {
            config,
            colors: None,
        };

        if repository.require_repository().is_ok() {
            if let Err(e) = repository.colors() {
                warn!(error = %e, "cannot load color metadata");
            }
        }

        Ok(repository)
    }

    /// Open the manager with the per-user configuration directory
    pub fn open_default() -> Result<Self> {
        Self::open(default_config_dir())
    }

    pub fn config_dir(&self) -> &Path {
        self.config.dir()
    }

    pub fn config(&self) -> &Config {
        self.config.config()
    }

    /// The last configured root, whether or not it still exists
    pub fn repository_path(&self) -> Option<&Path> {
        self.config.repository_path()
    }

    pub fn state(&self) -> RepositoryState {
        match self.require_repository() {
            Ok(root) => RepositoryState::Configured(root),
            Err(_) => RepositoryState::Unconfigured,
        }
    }

    /// Canonical repository root, re-validated on every call
    pub fn require_repository(&self) -> Result<PathBuf> {
        let Some(path) = self.config.repository_path() else {
            return Err(PixelpadError::RepositoryNotConfigured(
                "no repository has been selected yet".to_string(),
            ));
        };
        if !path.exists() {
            return Err(PixelpadError::RepositoryNotConfigured(format!(
                "configured repository path is missing: {}",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PixelpadError::RepositoryNotConfigured(format!(
                "configured repository path is not a directory: {}",
                path.display()
            )));
        }

        path.canonicalize().map_err(|e| {
            PixelpadError::RepositoryNotConfigured(format!(
                "cannot resolve repository path {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Select a new repository root and persist it.
    ///
    /// Returns the canonical path. The color cache is reloaded for the new root.
    pub fn set_repository_path(&mut self, candidate: &Path) -> Result<PathBuf> {
        let candidate = expand_home(candidate);
        if !candidate.exists() {
            return Err(PixelpadError::PathNotFound(candidate));
        }
        if !candidate.is_dir() {
            return Err(PixelpadError::NotADirectory(candidate));
        }

        let resolved = candidate.canonicalize()?;
        self.config.set_repository_path(resolved.clone())?;
        self.colors = None;
        self.colors()?;

        info!(repository = %resolved.display(), "repository configured");
        Ok(resolved)
    }

    pub fn theme(&self) -> Theme {
        self.config.theme()
    }

    /// Change the theme; unknown names fall back to the default theme
    pub fn set_theme(&mut self, name: &str) -> Result<Theme> {
        let theme = Theme::normalize(Some(name));
        self.config.set_theme(theme)?;
        Ok(theme)
    }

    /// Open the repository folder in `file_manager`. Returns the opened root.
    pub fn open_repository(&self, file_manager: &FileManager) -> Result<PathBuf> {
        let root = self.require_repository()?;
        file_manager.open(&root)?;
        Ok(root)
    }

    pub(crate) fn sandbox(&self) -> Result<Sandbox> {
        Ok(Sandbox::new(self.require_repository()?))
    }

    /// Color store for the current repository, loading it on first use
    /// or after the repository changed.
    pub(crate) fn colors(&mut self) -> Result<&mut ColorStore> {
        let root = self.require_repository()?;
        let cached = self
            .colors
            .take()
            .filter(|store| store.repository() == root);
        let store = match cached {
            Some(store) => store,
            None => ColorStore::load(self.config.dir(), &root)?,
        };
        Ok(self.colors.insert(store))
    }

    /// Resolve an optional target directory for new entries, creating it if needed
    pub(crate) fn prepare_directory(
        &self,
        sandbox: &Sandbox,
        directory: Option<&Path>,
    ) -> Result<PathBuf> {
        let Some(directory) = directory else {
            return Ok(sandbox.root().to_path_buf());
        };
        let resolved = sandbox.resolve(directory)?;
        if resolved.exists() && !resolved.is_dir() {
            return Err(PixelpadError::NotADirectory(resolved));
        }
        fs::create_dir_all(&resolved)?;
        Ok(resolved)
    }

    /// Set or clear (`None`) the color tag of a note
    pub fn set_note_color(&mut self, note: &Path, color: Option<&str>) -> Result<()> {
        let sandbox = self.sandbox()?;
        let path = sandbox.resolve(note)?;
        NoteExtension::from_path(&path)?;
        let key = sandbox.relative_key(&path)?;
        self.colors()?.set(ColorScope::Note, &key, color)
    }

    /// Set or clear (`None`) the color tag of a notebook
    pub fn set_notebook_color(&mut self, notebook: &Path, color: Option<&str>) -> Result<()> {
        let sandbox = self.sandbox()?;
        let path = sandbox.resolve(notebook)?;
        if sandbox.is_root(&path) {
            return Err(PixelpadError::InvalidOperation(
                "The repository root notebook has no color".to_string(),
            ));
        }
        let key = sandbox.relative_key(&path)?;
        self.colors()?.set(ColorScope::Notebook, &key, color)
    }

    /// Note colors keyed by absolute path
    pub fn note_colors(&mut self) -> Result<BTreeMap<PathBuf, Color>> {
        self.colors_for(ColorScope::Note)
    }

    /// Notebook colors keyed by absolute path
    pub fn notebook_colors(&mut self) -> Result<BTreeMap<PathBuf, Color>> {
        self.colors_for(ColorScope::Notebook)
    }

    fn colors_for(&mut self, scope: ColorScope) -> Result<BTreeMap<PathBuf, Color>> {
        let sandbox = self.sandbox()?;
        let store = self.colors()?;
        store.prune_missing()?;
        Ok(store
            .entries(scope)
            .iter()
            .map(|(key, color)| (sandbox.absolute(key), color.clone()))
            .collect())
    }

    /// Rewrite both color mappings after a notebook moved
    pub(crate) fn reassign_tree_colors(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        let store = self.colors()?;
        for scope in ColorScope::ALL {
            store.reassign_subtree(scope, old_key, new_key)?;
        }
        Ok(())
    }

    /// Drop both color mappings beneath a removed notebook
    pub(crate) fn remove_tree_colors(&mut self, key: &str) -> Result<()> {
        let store = self.colors()?;
        for scope in ColorScope::ALL {
            store.remove_subtree(scope, key)?;
        }
        Ok(())
    }
}

/// Every entry beneath `root` except the legacy `<root>/.pixelpad` metadata folder
pub(crate) fn walk_repository(root: &Path) -> impl Iterator<Item = DirEntry> {
    let legacy_dir = root.join(LEGACY_METADATA_DIR_NAME);
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(move |entry| entry.path() != legacy_dir.as_path())
        .filter_map(|entry| entry.ok())
}

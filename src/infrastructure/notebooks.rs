//! Notebook (directory) operations

use crate::domain::Color;
use crate::error::{PixelpadError, Result};
use crate::infrastructure::metadata::ColorScope;
use crate::infrastructure::repository::{walk_repository, NotesRepository};
use crate::infrastructure::sandbox::Sandbox;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options for creating a notebook
#[derive(Debug, Clone, Default)]
pub struct CreateNotebookOptions {
    /// Parent notebook (None = repository root)
    pub parent: Option<PathBuf>,

    /// Return an existing notebook instead of failing
    pub exist_ok: bool,

    /// Color tag for the notebook
    pub color: Option<String>,
}

/// Split a notebook name into trimmed path components.
/// `Work/2025` creates nested notebooks.
fn notebook_components(name: &str) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    for part in name.split(['/', '\\']) {
        let part = part.trim();
        match part {
            "" => continue,
            "." | ".." => {
                return Err(PixelpadError::InvalidName(format!(
                    "Notebook name may not contain '{}'",
                    part
                )))
            }
            _ => relative.push(part),
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(PixelpadError::InvalidName(
            "Notebook name must not be empty".to_string(),
        ));
    }
    Ok(relative)
}

/// Resolve an existing, non-root notebook
fn resolve_notebook(sandbox: &Sandbox, notebook: &Path, action: &str) -> Result<PathBuf> {
    let path = sandbox.resolve(notebook)?;
    if sandbox.is_root(&path) {
        return Err(PixelpadError::InvalidOperation(format!(
            "Cannot {} the repository root notebook",
            action
        )));
    }
    if !path.exists() {
        return Err(PixelpadError::NotFound(path));
    }
    if !path.is_dir() {
        return Err(PixelpadError::NotADirectory(path));
    }
    Ok(path)
}

fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

impl NotesRepository {
    /// Create a notebook under `options.parent` (default: repository root)
    pub fn create_notebook(&mut self, name: &str, options: CreateNotebookOptions) -> Result<PathBuf> {
        let sandbox = self.sandbox()?;
        let relative = notebook_components(name)?;
        let color = options
            .color
            .as_deref()
            .map(str::parse::<Color>)
            .transpose()?;

        let parent = self.prepare_directory(&sandbox, options.parent.as_deref())?;
        let notebook = sandbox.resolve(&parent.join(relative))?;

        if notebook.exists() {
            if !notebook.is_dir() {
                return Err(PixelpadError::AlreadyExists(notebook));
            }
            if !options.exist_ok {
                return Err(PixelpadError::AlreadyExists(notebook));
            }
        } else {
            fs::create_dir_all(&notebook)?;
            info!(notebook = %notebook.display(), "created notebook");
        }

        if let Some(color) = color {
            let key = sandbox.relative_key(&notebook)?;
            self.colors()?
                .set(ColorScope::Notebook, &key, Some(color.as_str()))?;
        }
        Ok(notebook)
    }

    /// Rename a notebook in place. Color tags beneath it follow.
    pub fn rename_notebook(&mut self, notebook: &Path, new_name: &str) -> Result<PathBuf> {
        let sandbox = self.sandbox()?;
        let path = resolve_notebook(&sandbox, notebook, "rename")?;

        let cleaned = Path::new(new_name)
            .file_name()
            .map(|name| name.to_string_lossy().trim().to_string())
            .unwrap_or_default();
        if cleaned.is_empty() {
            return Err(PixelpadError::InvalidName(
                "Notebook name must not be empty".to_string(),
            ));
        }

        let parent = path.parent().unwrap_or(sandbox.root());
        let target = sandbox.resolve(&parent.join(&cleaned))?;
        if target == path {
            return Ok(path);
        }
        if target.exists() {
            return Err(PixelpadError::AlreadyExists(target));
        }

        fs::rename(&path, &target)?;
        let old_key = sandbox.relative_key(&path)?;
        let new_key = sandbox.relative_key(&target)?;
        self.reassign_tree_colors(&old_key, &new_key)?;

        info!(from = %path.display(), to = %target.display(), "renamed notebook");
        Ok(target)
    }

    /// Delete a notebook.
    ///
    /// Without `recursive` the notebook must be empty. Afterwards every
    /// now-empty ancestor below the repository root is removed too.
    pub fn delete_notebook(&mut self, notebook: &Path, recursive: bool) -> Result<()> {
        let sandbox = self.sandbox()?;
        let path = resolve_notebook(&sandbox, notebook, "delete")?;

        if !is_empty_dir(&path)? {
            if !recursive {
                return Err(PixelpadError::NotEmpty(path));
            }
            self.remove_notebook_tree(&sandbox, &path)?;
        } else {
            fs::remove_dir(&path)?;
        }

        let key = sandbox.relative_key(&path)?;
        self.remove_tree_colors(&key)?;
        prune_empty_ancestors(&sandbox, &path);

        info!(notebook = %path.display(), recursive, "deleted notebook");
        Ok(())
    }

    /// Depth-first removal, clearing each note's color tag on the way
    fn remove_notebook_tree(&mut self, sandbox: &Sandbox, dir: &Path) -> Result<()> {
        let mut children = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        children.sort();

        for child in children.into_iter().rev() {
            if fs::symlink_metadata(&child)?.is_dir() {
                self.remove_notebook_tree(sandbox, &child)?;
            } else {
                if let Ok(key) = sandbox.relative_key(&child) {
                    self.colors()?.set(ColorScope::Note, &key, None)?;
                }
                fs::remove_file(&child)?;
            }
        }

        fs::remove_dir(dir)?;
        debug!(dir = %dir.display(), "removed notebook directory");
        Ok(())
    }

    /// Move a notebook under a different parent. Returns the new path.
    pub fn move_notebook(&mut self, notebook: &Path, target_parent: &Path) -> Result<PathBuf> {
        let sandbox = self.sandbox()?;
        let path = resolve_notebook(&sandbox, notebook, "move")?;

        let target_dir = sandbox.resolve(target_parent)?;
        if target_dir.starts_with(&path) {
            return Err(PixelpadError::InvalidOperation(
                "Cannot move a notebook into itself or one of its descendants".to_string(),
            ));
        }
        if !target_dir.exists() {
            return Err(PixelpadError::NotFound(target_dir));
        }
        if !target_dir.is_dir() {
            return Err(PixelpadError::NotADirectory(target_dir));
        }
        if path.parent() == Some(target_dir.as_path()) {
            return Err(PixelpadError::InvalidOperation(format!(
                "Notebook is already in {}",
                target_dir.display()
            )));
        }

        let Some(name) = path.file_name() else {
            return Err(PixelpadError::InvalidOperation(format!(
                "Cannot move {}",
                path.display()
            )));
        };
        let destination = target_dir.join(name);
        if destination.exists() {
            return Err(PixelpadError::AlreadyExists(destination));
        }

        fs::rename(&path, &destination)?;
        let old_key = sandbox.relative_key(&path)?;
        let new_key = sandbox.relative_key(&destination)?;
        self.reassign_tree_colors(&old_key, &new_key)?;

        info!(from = %path.display(), to = %destination.display(), "moved notebook");
        Ok(destination)
    }

    /// Every notebook below the root, sorted by relative path
    pub fn list_notebooks(&self) -> Result<Vec<PathBuf>> {
        let sandbox = self.sandbox()?;

        let mut notebooks: Vec<(String, PathBuf)> = walk_repository(sandbox.root())
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let path = entry.into_path();
                let key = sandbox.relative_key(&path).ok()?;
                Some((key, path))
            })
            .collect();

        notebooks.sort();
        Ok(notebooks.into_iter().map(|(_, path)| path).collect())
    }
}

/// Remove empty directories above `path`, stopping at the repository root
fn prune_empty_ancestors(sandbox: &Sandbox, path: &Path) {
    let mut current = path.parent();
    while let Some(dir) = current {
        if sandbox.is_root(dir) || !sandbox.contains(dir) {
            break;
        }
        match is_empty_dir(dir) {
            Ok(true) => {}
            _ => break,
        }
        if let Err(e) = fs::remove_dir(dir) {
            warn!(dir = %dir.display(), error = %e, "cannot prune empty notebook");
            break;
        }
        debug!(dir = %dir.display(), "pruned empty notebook");
        current = dir.parent();
    }
}

//! Note operations

use crate::domain::{Color, NoteExtension, NoteFileName};
use crate::error::{PixelpadError, Result};
use crate::infrastructure::metadata::ColorScope;
use crate::infrastructure::repository::{walk_repository, NotesRepository};
use crate::infrastructure::sandbox::Sandbox;
use std::cmp::Reverse;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tracing::info;

/// Options for creating a note
#[derive(Debug, Clone, Default)]
pub struct CreateNoteOptions {
    /// Directory to create the note in (None = repository root)
    pub directory: Option<PathBuf>,

    /// Truncate an existing note instead of failing
    pub overwrite: bool,

    /// Color tag for the new note
    pub color: Option<String>,
}

fn resolve_note_path(sandbox: &Sandbox, note: &Path) -> Result<PathBuf> {
    let path = sandbox.resolve(note)?;
    NoteExtension::from_path(&path)?;
    Ok(path)
}

/// A bare file name is a sibling of `source`; anything else is taken as given
fn rename_target(source: &Path, new_name: &Path) -> PathBuf {
    let mut components = new_name.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => source
            .parent()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|| new_name.to_path_buf()),
        _ => new_name.to_path_buf(),
    }
}

impl NotesRepository {
    /// Create an empty note.
    ///
    /// `name` may carry its own supported suffix; otherwise `extension` is used.
    pub fn create_note(
        &mut self,
        name: &str,
        extension: &str,
        options: CreateNoteOptions,
    ) -> Result<PathBuf> {
        let sandbox = self.sandbox()?;
        let file_name = NoteFileName::derive(name, extension)?;
        let color = options
            .color
            .as_deref()
            .map(str::parse::<Color>)
            .transpose()?;

        let directory = self.prepare_directory(&sandbox, options.directory.as_deref())?;
        let note_path = sandbox.resolve(&directory.join(file_name.to_string()))?;

        if note_path.is_dir() {
            return Err(PixelpadError::IsADirectory(note_path));
        }
        if note_path.exists() && !options.overwrite {
            return Err(PixelpadError::AlreadyExists(note_path));
        }
        fs::File::create(&note_path)?;

        let key = sandbox.relative_key(&note_path)?;
        let colors = self.colors()?;
        match color {
            Some(color) => colors.set(ColorScope::Note, &key, Some(color.as_str()))?,
            None if options.overwrite => colors.set(ColorScope::Note, &key, None)?,
            None => {}
        }

        info!(note = %note_path.display(), "created note");
        Ok(note_path)
    }

    /// Read a note as UTF-8 text
    pub fn load_note(&self, note: &Path) -> Result<String> {
        let sandbox = self.sandbox()?;
        let path = resolve_note_path(&sandbox, note)?;

        if !path.exists() {
            return Err(PixelpadError::NotFound(path));
        }
        if path.is_dir() {
            return Err(PixelpadError::IsADirectory(path));
        }

        Ok(fs::read_to_string(&path)?)
    }

    /// Write a note, creating parent directories. Returns the canonical path.
    pub fn save_note(&self, note: &Path, content: &str) -> Result<PathBuf> {
        let sandbox = self.sandbox()?;
        let path = resolve_note_path(&sandbox, note)?;

        if path.is_dir() {
            return Err(PixelpadError::IsADirectory(path));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Rename or move a note within the repository.
    ///
    /// A target without an extension keeps the note's current one. The
    /// color tag follows the note. Returns the new path.
    pub fn rename_note(&mut self, note: &Path, new_name: &Path, overwrite: bool) -> Result<PathBuf> {
        let sandbox = self.sandbox()?;
        let source = resolve_note_path(&sandbox, note)?;
        if !source.exists() {
            return Err(PixelpadError::NotFound(source));
        }
        if source.is_dir() {
            return Err(PixelpadError::IsADirectory(source));
        }

        let mut target = sandbox.resolve(&rename_target(&source, new_name))?;
        if target.is_dir() {
            return Err(PixelpadError::IsADirectory(target));
        }
        if target.extension().is_none() {
            if let Some(ext) = source.extension() {
                target.set_extension(ext);
            }
        }
        if target.is_dir() {
            return Err(PixelpadError::IsADirectory(target));
        }
        NoteExtension::from_path(&target)?;

        if target == source {
            return Ok(target);
        }

        let replace = target.exists();
        if replace && !overwrite {
            return Err(PixelpadError::AlreadyExists(target));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        if replace {
            fs::remove_file(&target)?;
        }

        fs::rename(&source, &target)?;

        let old_key = sandbox.relative_key(&source)?;
        let new_key = sandbox.relative_key(&target)?;
        self.colors()?
            .reassign_subtree(ColorScope::Note, &old_key, &new_key)?;

        info!(from = %source.display(), to = %target.display(), "renamed note");
        Ok(target)
    }

    /// Delete a note and its color tag
    pub fn delete_note(&mut self, note: &Path) -> Result<()> {
        let sandbox = self.sandbox()?;
        let path = resolve_note_path(&sandbox, note)?;

        if !path.exists() {
            return Err(PixelpadError::NotFound(path));
        }
        if path.is_dir() {
            return Err(PixelpadError::IsADirectory(path));
        }

        fs::remove_file(&path)?;
        let key = sandbox.relative_key(&path)?;
        self.colors()?.set(ColorScope::Note, &key, None)?;

        info!(note = %path.display(), "deleted note");
        Ok(())
    }

    /// Every note in the repository, sorted case-insensitively by file name
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let root = self.require_repository()?;

        let mut notes: Vec<PathBuf> = walk_repository(&root)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| NoteExtension::is_supported(path))
            .collect();

        notes.sort_by_cached_key(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            (name, path.clone())
        });
        Ok(notes)
    }

    /// The `limit` most recently modified notes, newest first
    pub fn recent_notes(&self, limit: usize) -> Result<Vec<PathBuf>> {
        let mut notes = self.list_notes()?;

        notes.sort_by_cached_key(|path| {
            let modified = fs::metadata(path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            Reverse(modified)
        });
        notes.truncate(limit);
        Ok(notes)
    }
}

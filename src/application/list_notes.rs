//! List notes and notebooks use case

use crate::domain::Color;
use crate::error::Result;
use crate::infrastructure::sandbox::posix_key;
use crate::infrastructure::{NotesRepository, RECENT_LIMIT};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// A note as shown in listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub path: PathBuf,
    /// Repository-relative path with `/` separators
    pub relative: String,
    pub modified: DateTime<Local>,
    pub color: Option<Color>,
}

/// A notebook as shown in listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookEntry {
    pub path: PathBuf,
    pub relative: String,
    pub color: Option<Color>,
}

fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(posix_key)
        .unwrap_or_else(|_| path.display().to_string())
}

/// List notes alphabetically, or the most recently modified ones when `recent` is set
pub fn list_notes(repository: &mut NotesRepository, recent: bool) -> Result<Vec<NoteEntry>> {
    let root = repository.require_repository()?;
    let paths = if recent {
        repository.recent_notes(RECENT_LIMIT)?
    } else {
        repository.list_notes()?
    };
    let colors = repository.note_colors()?;

    paths
        .into_iter()
        .map(|path| -> Result<NoteEntry> {
            let modified = fs::metadata(&path)?.modified()?;
            Ok(NoteEntry {
                relative: relative_to(&root, &path),
                modified: DateTime::<Local>::from(modified),
                color: colors.get(&path).cloned(),
                path,
            })
        })
        .collect()
}

/// List every notebook below the repository root
pub fn list_notebooks(repository: &mut NotesRepository) -> Result<Vec<NotebookEntry>> {
    let root = repository.require_repository()?;
    let paths = repository.list_notebooks()?;
    let colors = repository.notebook_colors()?;

    Ok(paths
        .into_iter()
        .map(|path| NotebookEntry {
            relative: relative_to(&root, &path),
            color: colors.get(&path).cloned(),
            path,
        })
        .collect())
}

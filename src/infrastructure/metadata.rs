//! Color tag side-store kept outside the notes repository

use crate::domain::Color;
use crate::error::{PixelpadError, Result};
use serde::Serialize;
use serde_json::Value;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

pub const METADATA_DIR_NAME: &str = "metadata";
pub const COLOR_METADATA_FILENAME: &str = "colors.json";
pub const LEGACY_METADATA_DIR_NAME: &str = ".pixelpad";

/// Which of the two color mappings an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScope {
    Note,
    Notebook,
}

impl ColorScope {
    pub const ALL: [ColorScope; 2] = [ColorScope::Note, ColorScope::Notebook];

    /// Top-level key in `colors.json`
    pub fn key(&self) -> &'static str {
        match self {
            ColorScope::Note => "notes",
            ColorScope::Notebook => "notebooks",
        }
    }
}

/// On-disk shape of `colors.json`: repository-relative path -> color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorDocument {
    pub notebooks: BTreeMap<String, Color>,
    pub notes: BTreeMap<String, Color>,
}

impl ColorDocument {
    /// Parse leniently, keeping only string keys that map to valid colors.
    /// Returns `None` when the text is not JSON at all.
    pub fn from_json(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let mut document = ColorDocument::default();

        for scope in ColorScope::ALL {
            let Some(section) = value.get(scope.key()).and_then(|v| v.as_object()) else {
                continue;
            };
            let mapping = document.mapping_mut(scope);
            for (rel_path, color) in section.iter().filter(|(key, _)| is_relative_key(key)) {
                if let Some(color) = color.as_str().and_then(Color::parse) {
                    mapping.insert(rel_path.clone(), color);
                }
            }
        }

        Some(document)
    }

    pub fn mapping(&self, scope: ColorScope) -> &BTreeMap<String, Color> {
        match scope {
            ColorScope::Note => &self.notes,
            ColorScope::Notebook => &self.notebooks,
        }
    }

    fn mapping_mut(&mut self, scope: ColorScope) -> &mut BTreeMap<String, Color> {
        match scope {
            ColorScope::Note => &mut self.notes,
            ColorScope::Notebook => &mut self.notebooks,
        }
    }
}

/// Non-empty and made only of normal components, so it cannot leave the repository
fn is_relative_key(key: &str) -> bool {
    let path = Path::new(key);
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

fn in_subtree(entry: &str, key: &str) -> bool {
    entry == key
        || entry
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Color metadata for one repository.
///
/// Every mutation rewrites the whole document.
#[derive(Debug)]
pub struct ColorStore {
    repository: PathBuf,
    file: PathBuf,
    document: ColorDocument,
}

impl ColorStore {
    /// `<config_dir>/metadata/<sha1 of repository path>/colors.json`
    pub fn metadata_file(config_dir: &Path, repository: &Path) -> PathBuf {
        let mut hasher = Sha1::new();
        hasher.update(repository.to_string_lossy().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        config_dir
            .join(METADATA_DIR_NAME)
            .join(digest)
            .join(COLOR_METADATA_FILENAME)
    }

    /// Where older versions kept the document, inside the repository itself
    pub fn legacy_file(repository: &Path) -> PathBuf {
        repository
            .join(LEGACY_METADATA_DIR_NAME)
            .join(COLOR_METADATA_FILENAME)
    }

    /// Load the store for a canonical repository root.
    ///
    /// Migrates a legacy in-repository document if no canonical one exists,
    /// then drops entries whose paths are gone.
    pub fn load(config_dir: &Path, repository: &Path) -> Result<Self> {
        let file = Self::metadata_file(config_dir, repository);
        if !file.exists() {
            Self::migrate_legacy(repository, &file);
        }

        let document = match fs::read_to_string(&file) {
            Ok(raw) => ColorDocument::from_json(&raw).unwrap_or_else(|| {
                warn!(file = %file.display(), "color metadata is corrupt, starting empty");
                ColorDocument::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ColorDocument::default(),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "cannot read color metadata, starting empty");
                ColorDocument::default()
            }
        };

        let mut store = ColorStore {
            repository: repository.to_path_buf(),
            file,
            document,
        };
        store.prune_missing()?;
        Ok(store)
    }

    /// Best-effort move of the legacy document to `target`
    fn migrate_legacy(repository: &Path, target: &Path) {
        let legacy = Self::legacy_file(repository);
        let contents = match fs::read_to_string(&legacy) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                warn!(file = %legacy.display(), error = %e, "cannot read legacy color metadata");
                return;
            }
        };

        let written = target
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| fs::write(target, &contents));
        if let Err(e) = written {
            warn!(file = %target.display(), error = %e, "cannot write migrated color metadata");
            return;
        }

        if let Err(e) = fs::remove_file(&legacy) {
            warn!(file = %legacy.display(), error = %e, "cannot remove legacy color metadata");
            return;
        }
        if let Some(legacy_dir) = legacy.parent() {
            let is_empty = fs::read_dir(legacy_dir)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if legacy_dir != repository && is_empty {
                if let Err(e) = fs::remove_dir(legacy_dir) {
                    warn!(dir = %legacy_dir.display(), error = %e, "cannot remove legacy metadata directory");
                }
            }
        }

        info!(from = %legacy.display(), to = %target.display(), "migrated legacy color metadata");
    }

    pub fn repository(&self) -> &Path {
        &self.repository
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn document(&self) -> &ColorDocument {
        &self.document
    }

    pub fn entries(&self, scope: ColorScope) -> &BTreeMap<String, Color> {
        self.document.mapping(scope)
    }

    pub fn get(&self, scope: ColorScope, key: &str) -> Option<&Color> {
        self.document.mapping(scope).get(key)
    }

    /// Set or clear (`None`) the color for one key.
    /// Fails with `InvalidColor` if `color` does not validate.
    pub fn set(&mut self, scope: ColorScope, key: &str, color: Option<&str>) -> Result<()> {
        let mapping = self.document.mapping_mut(scope);
        let changed = match color {
            None => mapping.remove(key).is_some(),
            Some(raw) => {
                let color = Color::parse(raw)
                    .ok_or_else(|| PixelpadError::InvalidColor(raw.to_string()))?;
                if mapping.get(key) == Some(&color) {
                    false
                } else {
                    mapping.insert(key.to_string(), color);
                    true
                }
            }
        };

        if changed {
            self.save()?;
        }
        Ok(())
    }

    /// Remove `key` and every key beneath it
    pub fn remove_subtree(&mut self, scope: ColorScope, key: &str) -> Result<()> {
        if key.is_empty() {
            return Ok(());
        }
        let mapping = self.document.mapping_mut(scope);
        let before = mapping.len();
        mapping.retain(|entry, _| !in_subtree(entry, key));

        if mapping.len() != before {
            self.save()?;
        }
        Ok(())
    }

    /// Move `old` and every key beneath it to `new`, keeping the suffixes.
    /// Existing entries at the destination are replaced.
    pub fn reassign_subtree(&mut self, scope: ColorScope, old: &str, new: &str) -> Result<()> {
        if old == new || old.is_empty() {
            return Ok(());
        }
        let mapping = self.document.mapping_mut(scope);

        let moved: Vec<String> = mapping
            .keys()
            .filter(|entry| in_subtree(entry, old))
            .cloned()
            .collect();
        let stale: Vec<String> = mapping
            .keys()
            .filter(|entry| in_subtree(entry, new))
            .cloned()
            .collect();
        if moved.is_empty() && stale.is_empty() {
            return Ok(());
        }

        let relocated: Vec<(String, Color)> = moved
            .into_iter()
            .filter_map(|entry| {
                let color = mapping.remove(&entry)?;
                let suffix = entry[old.len()..].trim_start_matches('/');
                let replacement = if suffix.is_empty() {
                    new.to_string()
                } else {
                    format!("{}/{}", new, suffix)
                };
                Some((replacement, color))
            })
            .collect();
        for entry in stale {
            mapping.remove(&entry);
        }
        mapping.extend(relocated);

        self.save()
    }

    /// Drop entries whose target no longer exists. Returns whether anything was dropped.
    pub fn prune_missing(&mut self) -> Result<bool> {
        let repository = self.repository.clone();
        let mut pruned = 0;
        for scope in ColorScope::ALL {
            let mapping = self.document.mapping_mut(scope);
            let before = mapping.len();
            mapping.retain(|entry, _| {
                entry
                    .split('/')
                    .filter(|part| !part.is_empty())
                    .fold(repository.clone(), |path, part| path.join(part))
                    .exists()
            });
            pruned += before - mapping.len();
        }

        if pruned > 0 {
            debug!(pruned, "dropped color tags for missing paths");
            self.save()?;
        }
        Ok(pruned > 0)
    }

    /// Write the whole document through a temporary file in the same directory
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.document)?;
        let tmp_path = self.file.with_file_name(format!(
            "{}.tmp-{}",
            COLOR_METADATA_FILENAME,
            std::process::id()
        ));
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.file)?;
        Ok(())
    }
}

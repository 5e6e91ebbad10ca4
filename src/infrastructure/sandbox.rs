//! Path resolution confined to the notes repository

use crate::error::{PixelpadError, Result};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolves caller-supplied paths against a canonical repository root
/// and rejects anything that escapes it.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// `root` must already be canonical.
    pub fn new(root: PathBuf) -> Self {
        Sandbox { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `path` to an absolute, symlink-free form inside the repository.
    ///
    /// Relative paths are taken relative to the repository root. The target
    /// does not need to exist.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        let expanded = expand_home(path);
        let joined = if expanded.is_absolute() {
            expanded
        } else {
            self.root.join(expanded)
        };
        let resolved = resolve_lenient(&joined);

        if !self.contains(&resolved) {
            debug!(path = %path.display(), resolved = %resolved.display(), "path escapes repository");
            return Err(PixelpadError::OutsideRepository(resolved));
        }
        Ok(resolved)
    }

    /// Component-wise containment, so `/notes2` is not inside `/notes`.
    pub fn contains(&self, resolved: &Path) -> bool {
        resolved.starts_with(&self.root)
    }

    pub fn is_root(&self, resolved: &Path) -> bool {
        resolved == self.root
    }

    /// Forward-slash path of `resolved` relative to the root (empty for the root itself)
    pub fn relative_key(&self, resolved: &Path) -> Result<String> {
        let rel = resolved
            .strip_prefix(&self.root)
            .map_err(|_| PixelpadError::OutsideRepository(resolved.to_path_buf()))?;
        Ok(posix_key(rel))
    }

    /// Absolute path for a relative key produced by [`Sandbox::relative_key`]
    pub fn absolute(&self, key: &str) -> PathBuf {
        key.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

/// Join the normal components of a relative path with `/`
pub fn posix_key(rel: &Path) -> String {
    rel.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Replace a leading `~` with the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Canonicalize as much of `path` as exists and append the remainder.
///
/// `.` and `..` are folded lexically first, then the deepest existing
/// ancestor is canonicalized so symlinks in it are resolved.
pub fn resolve_lenient(path: &Path) -> PathBuf {
    let logical = normalize_logical(path);
    let mut existing = logical.as_path();
    let mut tail = Vec::new();

    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return tail.iter().rev().fold(canonical, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = parent;
            }
            _ => break,
        }
    }

    logical
}

/// Logical path normalization without touching the filesystem.
fn normalize_logical(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            Component::CurDir => {}
            other => components.push(other),
        }
    }
    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sandbox_in(temp: &TempDir) -> Sandbox {
        Sandbox::new(temp.path().canonicalize().unwrap())
    }

    #[test]
    fn test_relative_path_resolves_under_root() {
        let temp = TempDir::new().unwrap();
        let sandbox = sandbox_in(&temp);

        let resolved = sandbox.resolve(Path::new("Work/plan.md")).unwrap();
        assert_eq!(resolved, sandbox.root().join("Work").join("plan.md"));
    }

    #[test]
    fn test_parent_escape_rejected() {
        let temp = TempDir::new().unwrap();
        let sandbox = sandbox_in(&temp);

        let result = sandbox.resolve(Path::new("../outside.md"));
        assert!(matches!(result, Err(PixelpadError::OutsideRepository(_))));
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_outside() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        fs::create_dir(base.join("repo")).unwrap();
        fs::create_dir(base.join("repo2")).unwrap();
        let sandbox = Sandbox::new(base.join("repo"));

        let result = sandbox.resolve(&base.join("repo2").join("a.md"));
        assert!(matches!(result, Err(PixelpadError::OutsideRepository(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_rejected() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let sandbox = sandbox_in(&temp);
        std::os::unix::fs::symlink(outside.path(), sandbox.root().join("link")).unwrap();

        let result = sandbox.resolve(Path::new("link/note.md"));
        assert!(matches!(result, Err(PixelpadError::OutsideRepository(_))));
    }

    #[test]
    fn test_dot_segments_inside_root_are_folded() {
        let temp = TempDir::new().unwrap();
        let sandbox = sandbox_in(&temp);

        let resolved = sandbox.resolve(Path::new("a/./b/../c.md")).unwrap();
        assert_eq!(resolved, sandbox.root().join("a").join("c.md"));
    }

    #[test]
    fn test_relative_key_uses_forward_slashes() {
        let temp = TempDir::new().unwrap();
        let sandbox = sandbox_in(&temp);

        let path = sandbox.root().join("A").join("B").join("n.md");
        assert_eq!(sandbox.relative_key(&path).unwrap(), "A/B/n.md");
        assert_eq!(sandbox.relative_key(sandbox.root()).unwrap(), "");
        assert_eq!(sandbox.absolute("A/B/n.md"), path);
    }

    #[test]
    fn test_root_detection() {
        let temp = TempDir::new().unwrap();
        let sandbox = sandbox_in(&temp);

        let root = sandbox.resolve(Path::new(".")).unwrap();
        assert!(sandbox.is_root(&root));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));
        assert_eq!(expand_home(Path::new("notes")), PathBuf::from("notes"));
    }

    #[test]
    fn test_resolve_lenient_for_missing_tail() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();

        let resolved = resolve_lenient(&temp.path().join("missing").join("deeper"));
        assert_eq!(resolved, base.join("missing").join("deeper"));
    }
}

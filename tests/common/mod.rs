#![allow(dead_code)]

use assert_cmd::Command;
use pixelpad::infrastructure::NotesRepository;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn pixelpad_cmd(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("pixelpad").unwrap();
    cmd.env("PIXELPAD_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("PIXELPAD_FILE_MANAGER");
    cmd
}

/// A temporary base directory holding `notes/` (the repository) and `config/`
pub struct Workspace {
    pub temp: TempDir,
    pub base: PathBuf,
    pub repo: PathBuf,
    pub config_dir: PathBuf,
}

pub fn workspace() -> Workspace {
    let temp = TempDir::new().unwrap();
    let base = temp.path().canonicalize().unwrap();
    let repo = base.join("notes");
    fs::create_dir(&repo).unwrap();
    Workspace {
        config_dir: base.join("config"),
        repo,
        base,
        temp,
    }
}

/// Workspace plus a manager already pointed at its repository
pub fn configured() -> (Workspace, NotesRepository) {
    let ws = workspace();
    let mut manager = NotesRepository::open(ws.config_dir.clone()).unwrap();
    manager.set_repository_path(&ws.repo).unwrap();
    (ws, manager)
}

/// Every path below `root`, relative and sorted
pub fn snapshot(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    paths.sort();
    paths
}

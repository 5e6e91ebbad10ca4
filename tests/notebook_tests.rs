//! Integration tests for notebook operations

use pixelpad::error::PixelpadError;
use pixelpad::infrastructure::{CreateNoteOptions, CreateNotebookOptions};
use std::fs;
use std::path::Path;

mod common;
use common::{configured, snapshot};

fn plain() -> CreateNotebookOptions {
    CreateNotebookOptions::default()
}

#[test]
fn test_rename_notebook_scenario() {
    let (ws, mut manager) = configured();
    let a = manager.create_notebook("A", plain()).unwrap();
    let b = manager.create_notebook("A/B", plain()).unwrap();
    manager.set_notebook_color(&a, Some("#aa0000")).unwrap();
    manager.set_notebook_color(&b, Some("#00bb00")).unwrap();

    let z = manager.rename_notebook(&a, "Z").unwrap();

    assert_eq!(z, ws.repo.join("Z"));
    let colors = manager.notebook_colors().unwrap();
    assert_eq!(colors.len(), 2);
    assert_eq!(colors[&ws.repo.join("Z")].as_str(), "#AA0000");
    assert_eq!(colors[&ws.repo.join("Z").join("B")].as_str(), "#00BB00");
}

#[test]
fn test_rename_notebook_to_same_name_is_noop() {
    let (_ws, mut manager) = configured();
    let a = manager.create_notebook("A", plain()).unwrap();

    assert_eq!(manager.rename_notebook(&a, "A").unwrap(), a);
    assert!(a.is_dir());
}

#[test]
fn test_renaming_root_always_fails() {
    let (ws, mut manager) = configured();

    for name in ["Renamed", "notes", "", "../elsewhere"] {
        assert!(matches!(
            manager.rename_notebook(&ws.repo, name),
            Err(PixelpadError::InvalidOperation(_))
        ));
        assert!(matches!(
            manager.rename_notebook(Path::new("."), name),
            Err(PixelpadError::InvalidOperation(_))
        ));
    }
    assert!(ws.repo.is_dir());
}

#[test]
fn test_move_reassigns_every_prefixed_key() {
    let (ws, mut manager) = configured();
    let a = manager.create_notebook("Projects/A", plain()).unwrap();
    let deep = manager.create_notebook("Projects/A/B/C", plain()).unwrap();
    manager.create_notebook("Projects/AB", plain()).unwrap();
    let note = manager
        .create_note(
            "plan",
            "md",
            CreateNoteOptions {
                directory: Some(deep.clone()),
                color: Some("#0C0C0C".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    manager.set_notebook_color(&a, Some("#0A0A0A")).unwrap();
    manager.set_notebook_color(&deep, Some("#0B0B0B")).unwrap();
    manager
        .set_notebook_color(Path::new("Projects/AB"), Some("#0D0D0D"))
        .unwrap();
    let archive = manager.create_notebook("Archive", plain()).unwrap();

    let moved = manager.move_notebook(&a, &archive).unwrap();

    assert_eq!(moved, ws.repo.join("Archive").join("A"));
    assert!(!note.exists());
    let notebooks = manager.notebook_colors().unwrap();
    assert_eq!(notebooks[&moved].as_str(), "#0A0A0A");
    assert_eq!(notebooks[&moved.join("B").join("C")].as_str(), "#0B0B0B");
    assert_eq!(notebooks[&ws.repo.join("Projects").join("AB")].as_str(), "#0D0D0D");
    assert!(notebooks
        .keys()
        .all(|path| !path.starts_with(ws.repo.join("Projects").join("A"))));
    let notes = manager.note_colors().unwrap();
    assert_eq!(
        notes[&moved.join("B").join("C").join("plan.md")].as_str(),
        "#0C0C0C"
    );
}

#[test]
fn test_move_rejections() {
    let (ws, mut manager) = configured();
    let a = manager.create_notebook("A", plain()).unwrap();
    let child = manager.create_notebook("A/Child", plain()).unwrap();
    manager.save_note(Path::new("file.md"), "").unwrap();

    let cases = vec![
        manager.move_notebook(&ws.repo, &a),
        manager.move_notebook(&a, &a),
        manager.move_notebook(&a, &child),
        manager.move_notebook(&a, &ws.repo),
        manager.move_notebook(&child, &a),
    ];
    for result in cases {
        assert!(matches!(result, Err(PixelpadError::InvalidOperation(_))));
    }
    assert!(matches!(
        manager.move_notebook(&a, Path::new("Missing")),
        Err(PixelpadError::NotFound(_))
    ));
    assert!(matches!(
        manager.move_notebook(&a, Path::new("file.md")),
        Err(PixelpadError::NotADirectory(_))
    ));
    assert!(child.is_dir());
}

#[test]
fn test_non_recursive_delete_of_non_empty_notebook_changes_nothing() {
    let (ws, mut manager) = configured();
    let work = manager
        .create_notebook(
            "Work",
            CreateNotebookOptions {
                color: Some("#FACADE".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let inner = manager.create_notebook("Work/Inner", plain()).unwrap();
    manager
        .save_note(&inner.join("memo.txt"), "keep me")
        .unwrap();
    manager
        .set_note_color(&inner.join("memo.txt"), Some("#BADA55"))
        .unwrap();

    let before = snapshot(&ws.repo);
    let result = manager.delete_notebook(&work, false);

    assert!(matches!(result, Err(PixelpadError::NotEmpty(_))));
    assert_eq!(snapshot(&ws.repo), before);
    assert_eq!(manager.notebook_colors().unwrap().len(), 1);
    assert_eq!(manager.note_colors().unwrap().len(), 1);
}

#[test]
fn test_recursive_delete_removes_everything_below() {
    let (ws, mut manager) = configured();
    let work = manager.create_notebook("Work", plain()).unwrap();
    let inner = manager.create_notebook("Work/Inner", plain()).unwrap();
    manager.save_note(&inner.join("memo.txt"), "bye").unwrap();
    manager.set_notebook_color(&inner, Some("#111111")).unwrap();
    manager
        .set_note_color(&inner.join("memo.txt"), Some("#222222"))
        .unwrap();
    manager.save_note(Path::new("root.md"), "stays").unwrap();

    manager.delete_notebook(&work, true).unwrap();

    assert_eq!(snapshot(&ws.repo), vec![Path::new("root.md").to_path_buf()]);
    assert!(manager.notebook_colors().unwrap().is_empty());
    assert!(manager.note_colors().unwrap().is_empty());
}

#[test]
fn test_delete_prunes_empty_ancestors_only() {
    let (ws, mut manager) = configured();
    let leaf = manager.create_notebook("a/b/c", plain()).unwrap();
    manager.create_notebook("a/sibling", plain()).unwrap();

    manager.delete_notebook(&leaf, false).unwrap();

    assert!(!ws.repo.join("a").join("b").exists());
    assert!(ws.repo.join("a").join("sibling").is_dir());
    assert!(ws.repo.is_dir());
}

#[test]
fn test_create_notebook_names() {
    let (ws, mut manager) = configured();

    assert!(matches!(
        manager.create_notebook("   ", plain()),
        Err(PixelpadError::InvalidName(_))
    ));
    assert!(matches!(
        manager.create_notebook("ok", CreateNotebookOptions {
            color: Some("purple".to_string()),
            ..Default::default()
        }),
        Err(PixelpadError::InvalidColor(_))
    ));
    assert!(!ws.repo.join("ok").exists());

    let nested = manager.create_notebook("Year/2025", plain()).unwrap();
    assert_eq!(nested, ws.repo.join("Year").join("2025"));

    let listed = manager.list_notebooks().unwrap();
    assert_eq!(listed, vec![ws.repo.join("Year"), nested]);
}

#[test]
fn test_dot_notebooks_are_listed_after_creation() {
    let (ws, mut manager) = configured();
    let archive = manager.create_notebook(".archive", plain()).unwrap();
    let note = manager
        .create_note(
            "old",
            "md",
            CreateNoteOptions {
                directory: Some(archive.clone()),
                ..Default::default()
            },
        )
        .unwrap();
    fs::create_dir(ws.repo.join("Visible")).unwrap();

    assert_eq!(
        manager.list_notebooks().unwrap(),
        vec![archive, ws.repo.join("Visible")]
    );
    assert_eq!(manager.list_notes().unwrap(), vec![note]);
}

#[test]
fn test_legacy_metadata_folder_is_not_a_notebook() {
    let (ws, manager) = configured();
    fs::create_dir(ws.repo.join(".pixelpad")).unwrap();
    fs::write(ws.repo.join(".pixelpad").join("notes.md"), "").unwrap();

    assert!(manager.list_notebooks().unwrap().is_empty());
    assert!(manager.list_notes().unwrap().is_empty());
}

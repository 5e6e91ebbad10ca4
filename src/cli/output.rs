//! Output formatting utilities

use crate::application::{NoteEntry, NotebookEntry};
use crate::domain::Color;
use crate::infrastructure::Config;
use std::path::Path;

fn color_suffix(color: Option<&Color>) -> String {
    color.map(|c| format!("  {}", c)).unwrap_or_default()
}

/// Format a list of note entries for display
pub fn format_note_list(notes: &[NoteEntry]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for entry in notes {
        output.push_str(&format!(
            "{}  {}{}\n",
            entry.modified.format("%Y-%m-%d %H:%M"),
            entry.relative,
            color_suffix(entry.color.as_ref())
        ));
    }
    output
}

/// Format a list of notebooks for display, one relative path per line
pub fn format_notebook_list(notebooks: &[NotebookEntry]) -> String {
    if notebooks.is_empty() {
        return "No notebooks found".to_string();
    }

    let mut output = String::new();
    for entry in notebooks {
        output.push_str(&format!(
            "{}/{}\n",
            entry.relative,
            color_suffix(entry.color.as_ref())
        ));
    }
    output
}

/// Confirmation line for a color change, showing the stored color
pub fn format_color_change(path: &Path, color: Option<&Color>) -> String {
    match color {
        Some(color) => format!("Set color of {} to {}", path.display(), color),
        None => format!("Cleared color of {}", path.display()),
    }
}

/// Format the persisted settings as `key = value` lines
pub fn format_config(config: &Config) -> String {
    let repository = config
        .repository_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string());
    format!("repository = {}\ntheme = {}\n", repository, config.theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn note(relative: &str, color: Option<&str>) -> NoteEntry {
        NoteEntry {
            path: PathBuf::from("/repo").join(relative),
            relative: relative.to_string(),
            modified: Local.with_ymd_and_hms(2025, 1, 17, 9, 30, 0).unwrap(),
            color: color.and_then(Color::parse),
        }
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_note_list(&[]), "No notes found");
        assert_eq!(format_notebook_list(&[]), "No notebooks found");
    }

    #[test]
    fn test_format_note_list() {
        let notes = vec![note("a.txt", None), note("Work/b.md", Some("ff0000"))];

        let output = format_note_list(&notes);
        assert_eq!(
            output,
            "2025-01-17 09:30  a.txt\n2025-01-17 09:30  Work/b.md  #FF0000\n"
        );
    }

    #[test]
    fn test_format_notebook_list() {
        let notebooks = vec![
            NotebookEntry {
                path: PathBuf::from("/repo/Work"),
                relative: "Work".to_string(),
                color: Color::parse("#00ff00"),
            },
            NotebookEntry {
                path: PathBuf::from("/repo/Work/Clients"),
                relative: "Work/Clients".to_string(),
                color: None,
            },
        ];

        let output = format_notebook_list(&notebooks);
        assert_eq!(output, "Work/  #00FF00\nWork/Clients/\n");
    }

    #[test]
    fn test_format_color_change_shows_normalized_color() {
        let color = "1a2b3c".parse::<Color>().unwrap();

        assert_eq!(
            format_color_change(Path::new("a.md"), Some(&color)),
            "Set color of a.md to #1A2B3C"
        );
        assert_eq!(
            format_color_change(Path::new("Work"), None),
            "Cleared color of Work"
        );
    }

    #[test]
    fn test_format_config() {
        let unset = Config::default();
        assert_eq!(format_config(&unset), "repository = (not set)\ntheme = dark\n");

        let config = Config {
            repository_path: Some(PathBuf::from("/home/me/notes")),
            theme: Theme::Light,
        };
        assert_eq!(
            format_config(&config),
            "repository = /home/me/notes\ntheme = light\n"
        );
    }
}

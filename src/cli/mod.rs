//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, NoteCommand, NotebookCommand};
pub use output::{format_color_change, format_config, format_note_list, format_notebook_list};

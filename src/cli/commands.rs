//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixelpad")]
#[command(about = "Notes repository manager", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View or modify configuration
    Config {
        /// Config key to get or set (repository, theme)
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Open the repository folder in the file manager
    Open,

    /// List notes or notebooks
    List {
        /// Show only the most recently modified notes
        #[arg(short, long, conflicts_with = "notebooks")]
        recent: bool,

        /// List notebooks instead of notes
        #[arg(short, long)]
        notebooks: bool,
    },

    /// Manage notes
    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },

    /// Manage notebooks
    Notebook {
        #[command(subcommand)]
        command: NotebookCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Create an empty note
    New {
        /// Note name; an explicit .txt or .md suffix wins over --extension
        name: String,

        /// Extension used when the name carries none (txt, md)
        #[arg(short, long, default_value = "txt")]
        extension: String,

        /// Notebook to create the note in (default: repository root)
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Truncate an existing note instead of failing
        #[arg(long)]
        overwrite: bool,

        /// Color tag (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Print a note
    Show { path: PathBuf },

    /// Replace a note's content (reads stdin unless --content is given)
    Save {
        path: PathBuf,

        #[arg(long)]
        content: Option<String>,
    },

    /// Rename or move a note
    Rename {
        path: PathBuf,

        /// New name; a bare name stays in the same notebook
        new_name: PathBuf,

        /// Replace an existing note at the target
        #[arg(long)]
        overwrite: bool,
    },

    /// Delete a note
    Rm { path: PathBuf },

    /// Set or clear a note's color tag
    Color {
        path: PathBuf,

        #[arg(required_unless_present = "clear")]
        color: Option<String>,

        #[arg(long, conflicts_with = "color")]
        clear: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotebookCommand {
    /// Create a notebook (nested names like Work/2025 are allowed)
    New {
        name: String,

        /// Parent notebook (default: repository root)
        #[arg(short, long)]
        parent: Option<PathBuf>,

        /// Succeed if the notebook already exists
        #[arg(long)]
        exist_ok: bool,

        /// Color tag (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename a notebook in place
    Rename { path: PathBuf, new_name: String },

    /// Delete a notebook
    Rm {
        path: PathBuf,

        /// Delete the notebook with everything inside it
        #[arg(short, long)]
        recursive: bool,
    },

    /// Move a notebook under another notebook
    Mv { path: PathBuf, target: PathBuf },

    /// Set or clear a notebook's color tag
    Color {
        path: PathBuf,

        #[arg(required_unless_present = "clear")]
        color: Option<String>,

        #[arg(long, conflicts_with = "color")]
        clear: bool,
    },
}

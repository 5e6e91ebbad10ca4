//! Infrastructure layer - Filesystem access and persistence

pub mod config;
pub mod metadata;
pub mod notebooks;
pub mod notes;
pub mod opener;
pub mod repository;
pub mod sandbox;

pub use config::{default_config_dir, Config, ConfigStore};
pub use metadata::{ColorScope, ColorStore};
pub use notebooks::CreateNotebookOptions;
pub use notes::CreateNoteOptions;
pub use opener::FileManager;
pub use repository::{NotesRepository, RepositoryState, RECENT_LIMIT};
pub use sandbox::Sandbox;

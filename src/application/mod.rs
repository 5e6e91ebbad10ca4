//! Application layer - Use cases consumed by the command-line shell

pub mod list_notes;
pub mod manage_config;
pub mod open_repository;

pub use list_notes::{list_notebooks, list_notes, NoteEntry, NotebookEntry};
pub use manage_config::ConfigService;
pub use open_repository::OpenRepositoryService;

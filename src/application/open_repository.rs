//! Open repository use case

use crate::error::Result;
use crate::infrastructure::{FileManager, NotesRepository};
use std::path::PathBuf;

/// Reveals the configured repository folder in a file manager
pub struct OpenRepositoryService<'a> {
    repository: &'a NotesRepository,
    file_manager: FileManager,
}

impl<'a> OpenRepositoryService<'a> {
    /// Use the file manager selected by the environment
    pub fn new(repository: &'a NotesRepository) -> Self {
        Self::with_file_manager(repository, FileManager::from_env())
    }

    pub fn with_file_manager(repository: &'a NotesRepository, file_manager: FileManager) -> Self {
        OpenRepositoryService {
            repository,
            file_manager,
        }
    }

    /// Open the repository and return its path
    pub fn execute(&self) -> Result<PathBuf> {
        self.repository.open_repository(&self.file_manager)
    }
}

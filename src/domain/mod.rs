//! Domain layer - Value types shared by the notes repository

pub mod color;
pub mod note;
pub mod theme;

pub use color::Color;
pub use note::{NoteExtension, NoteFileName};
pub use theme::Theme;

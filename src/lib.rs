//! pixelpad - Notes repository manager
//!
//! Manages a folder of plain-text and markdown notes organized into
//! notebooks (directories), with per-repository color tags and a small
//! persistent configuration.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::PixelpadError;

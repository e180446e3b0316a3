//! Business logic services.

pub mod notes;

pub use notes::NotesService;

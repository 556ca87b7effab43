//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod note_repo;
pub mod tag_repo;

pub use note_repo::NoteRepo;
pub use tag_repo::TagRepo;

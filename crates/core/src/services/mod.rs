//! Business-rule layer between the HTTP handlers and storage.
//!
//! Every service method classifies storage failures the same way: a
//! not-found error passes through untouched, anything else is wrapped with a
//! method-specific message via [`CoreError::context`].
//!
//! [`CoreError::context`]: crate::error::CoreError::context

pub mod note_service;
pub mod tag_service;

pub use note_service::NoteService;
pub use tag_service::TagService;

//! Domain layer for the notes service.
//!
//! Holds the note and tag models, the partial-update [`patch::Patch`]
//! wrapper, the error taxonomy, the storage contracts implemented by
//! `notes-db`, and the services that enforce business rules on top of them.
//! Nothing in here knows about HTTP or SQL.

pub mod error;
pub mod notes;
pub mod patch;
pub mod services;
pub mod storage;
pub mod tags;
pub mod types;

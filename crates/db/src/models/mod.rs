//! Row structs as stored in PostgreSQL.
//!
//! Each row converts into its `notes-core` view with `From`; nothing above
//! the db crate sees these types.

pub mod note;
pub mod tag;

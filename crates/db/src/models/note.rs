//! Note row model.

use notes_core::notes::Note;
use notes_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub uuid: String,
    pub header: String,
    pub body: String,
    pub short_body: String,
    pub category_uuid: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            uuid: row.uuid,
            header: row.header,
            body: row.body,
            short_body: row.short_body,
            category_uuid: row.category_uuid,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

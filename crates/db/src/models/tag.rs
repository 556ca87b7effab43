//! Tag row model.

use notes_core::tags::Tag;
use notes_core::types::DbId;
use sqlx::FromRow;

/// A row from the `tags` table, without audit columns.
#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            name: row.name,
            color: row.color,
        }
    }
}

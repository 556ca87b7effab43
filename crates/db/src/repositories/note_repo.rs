//! Repository for the `notes` table.

use notes_core::notes::{short_body, NewNote, UpdateNote};
use sqlx::PgPool;

use crate::models::note::NoteRow;

/// Column list for `notes` queries.
const COLUMNS: &str = "\
    uuid, header, body, short_body, category_uuid, tags, \
    created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note under the given uuid.
    pub async fn create(pool: &PgPool, uuid: &str, note: &NewNote) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notes (uuid, header, body, short_body, category_uuid, tags) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(uuid)
        .bind(&note.header)
        .bind(&note.body)
        .bind(&note.short_body)
        .bind(&note.category_uuid)
        .bind(&note.tags)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Find a note by its uuid.
    pub async fn find_by_uuid(
        pool: &PgPool,
        uuid: &str,
    ) -> Result<Option<NoteRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE uuid = $1");
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// List notes of a category, oldest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_uuid: &str,
    ) -> Result<Vec<NoteRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes \
             WHERE category_uuid = $1 \
             ORDER BY created_at, uuid"
        );
        sqlx::query_as::<_, NoteRow>(&query)
            .bind(category_uuid)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update in a single statement.
    ///
    /// Scalar fields are only written when `changes` carries a non-empty
    /// value; `short_body` follows `body`. The tag list is replaced only when
    /// `tags_update` is set. Returns `false` if no note has this uuid.
    pub async fn update(
        pool: &PgPool,
        uuid: &str,
        changes: &UpdateNote,
        tags_update: bool,
    ) -> Result<bool, sqlx::Error> {
        let body = changes.body();
        let result = sqlx::query(
            "UPDATE notes SET \
                 header = COALESCE($2, header), \
                 body = COALESCE($3, body), \
                 short_body = COALESCE($4, short_body), \
                 category_uuid = COALESCE($5, category_uuid), \
                 tags = CASE WHEN $6 THEN $7 ELSE tags END, \
                 updated_at = NOW() \
             WHERE uuid = $1",
        )
        .bind(uuid)
        .bind(changes.header())
        .bind(body)
        .bind(body.map(short_body))
        .bind(changes.category_uuid())
        .bind(tags_update)
        .bind(changes.tags())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a note. Returns `false` if no note has this uuid.
    pub async fn delete(pool: &PgPool, uuid: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE uuid = $1")
            .bind(uuid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

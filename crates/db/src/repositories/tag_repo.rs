//! Repository for the `tags` table.

use notes_core::tags::{CreateTag, UpdateTag};
use notes_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::TagRow;

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, color";

/// Provides CRUD operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a tag, returning its generated id.
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("INSERT INTO tags (name, color) VALUES ($1, $2) RETURNING id")
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TagRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, TagRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find every tag whose id is in `ids`, ordered by id.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<TagRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, TagRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update `name` and/or `color`. A null color in `changes` clears it.
    ///
    /// Returns `false` if no tag with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateTag,
    ) -> Result<bool, sqlx::Error> {
        let color = changes.color.clone().into_option();
        let result = sqlx::query(
            "UPDATE tags SET \
                 name = COALESCE($2, name), \
                 color = CASE WHEN $3 THEN $4 ELSE color END, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(changes.name())
        .bind(color.is_some())
        .bind(color.flatten())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a tag. Returns `false` if no tag with the given id exists.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

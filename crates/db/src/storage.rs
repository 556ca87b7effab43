//! PostgreSQL implementations of the `notes-core` storage traits.

use async_trait::async_trait;
use notes_core::error::{CoreError, CoreResult};
use notes_core::notes::{NewNote, Note, UpdateNote, NOTE_ENTITY};
use notes_core::storage::{NoteStorage, TagStorage};
use notes_core::tags::{CreateTag, Tag, UpdateTag, TAG_ENTITY};
use notes_core::types::{DbId, NoteUuid};
use uuid::Uuid;

use crate::repositories::{NoteRepo, TagRepo};
use crate::DbPool;

/// Map a driver failure to an unclassified core error.
fn query_failed(err: sqlx::Error) -> CoreError {
    tracing::debug!(error = %err, "Database query failed");
    CoreError::internal("database query failed", err)
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgNoteStorage {
    pool: DbPool,
}

impl PgNoteStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStorage for PgNoteStorage {
    async fn create(&self, note: NewNote) -> CoreResult<NoteUuid> {
        let uuid = Uuid::new_v4().to_string();
        NoteRepo::create(&self.pool, &uuid, &note)
            .await
            .map_err(query_failed)?;
        Ok(uuid)
    }

    async fn find_one(&self, uuid: &str) -> CoreResult<Note> {
        NoteRepo::find_by_uuid(&self.pool, uuid)
            .await
            .map_err(query_failed)?
            .map(Note::from)
            .ok_or_else(|| CoreError::not_found(NOTE_ENTITY, uuid))
    }

    async fn find_by_category_uuid(&self, category_uuid: &str) -> CoreResult<Vec<Note>> {
        let rows = NoteRepo::list_by_category(&self.pool, category_uuid)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn update(&self, uuid: &str, changes: &UpdateNote, tags_update: bool) -> CoreResult<()> {
        let updated = NoteRepo::update(&self.pool, uuid, changes, tags_update)
            .await
            .map_err(query_failed)?;
        if !updated {
            return Err(CoreError::not_found(NOTE_ENTITY, uuid));
        }
        Ok(())
    }

    async fn delete(&self, uuid: &str) -> CoreResult<()> {
        let deleted = NoteRepo::delete(&self.pool, uuid)
            .await
            .map_err(query_failed)?;
        if !deleted {
            return Err(CoreError::not_found(NOTE_ENTITY, uuid));
        }
        Ok(())
    }

    async fn ping(&self) -> CoreResult<()> {
        crate::health_check(&self.pool).await.map_err(query_failed)
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgTagStorage {
    pool: DbPool,
}

impl PgTagStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagStorage for PgTagStorage {
    async fn create(&self, tag: &CreateTag) -> CoreResult<DbId> {
        TagRepo::create(&self.pool, tag).await.map_err(query_failed)
    }

    async fn find_one(&self, id: DbId) -> CoreResult<Tag> {
        TagRepo::find_by_id(&self.pool, id)
            .await
            .map_err(query_failed)?
            .map(Tag::from)
            .ok_or_else(|| CoreError::not_found(TAG_ENTITY, id.to_string()))
    }

    async fn find_many(&self, ids: &[DbId]) -> CoreResult<Vec<Tag>> {
        let rows = TagRepo::find_by_ids(&self.pool, ids)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn update(&self, id: DbId, changes: &UpdateTag) -> CoreResult<()> {
        let updated = TagRepo::update(&self.pool, id, changes)
            .await
            .map_err(query_failed)?;
        if !updated {
            return Err(CoreError::not_found(TAG_ENTITY, id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        let deleted = TagRepo::delete(&self.pool, id).await.map_err(query_failed)?;
        if !deleted {
            return Err(CoreError::not_found(TAG_ENTITY, id.to_string()));
        }
        Ok(())
    }
}

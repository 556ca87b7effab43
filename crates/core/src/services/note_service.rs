use std::sync::Arc;

use tracing::{Instrument, Span};

use crate::error::{CoreError, CoreResult};
use crate::notes::{CreateNote, NewNote, Note, UpdateNote};
use crate::storage::NoteStorage;
use crate::types::NoteUuid;

/// Entity name reported when a category owns no notes.
const CATEGORY_NOTES_ENTITY: &str = "Notes of category";

pub struct NoteService {
    storage: Arc<dyn NoteStorage>,
    span: Span,
}

impl NoteService {
    /// `span` scopes every storage call made by this service.
    pub fn new(storage: Arc<dyn NoteStorage>, span: Span) -> Self {
        Self { storage, span }
    }

    /// Validate the payload, derive `short_body`, and persist the note.
    pub async fn create(&self, input: CreateNote) -> CoreResult<NoteUuid> {
        let note = NewNote::try_from(input)?;

        self.storage
            .create(note)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to create note"))
    }

    pub async fn get_one(&self, uuid: &str) -> CoreResult<Note> {
        self.storage
            .find_one(uuid)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to find note by uuid"))
    }

    /// Notes of a category. An empty result is reported as not-found.
    pub async fn get_by_category_uuid(&self, category_uuid: &str) -> CoreResult<Vec<Note>> {
        let notes = self
            .storage
            .find_by_category_uuid(category_uuid)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to find notes by category uuid"))?;

        if notes.is_empty() {
            return Err(CoreError::not_found(CATEGORY_NOTES_ENTITY, category_uuid));
        }
        Ok(notes)
    }

    /// Apply a partial update. Rejects payloads that would change nothing
    /// without touching storage.
    pub async fn update(
        &self,
        uuid: &str,
        changes: &UpdateNote,
        tags_present: bool,
    ) -> CoreResult<()> {
        if changes.has_no_field_changes() && !tags_present {
            return Err(CoreError::bad_request("nothing to update"));
        }

        self.storage
            .update(uuid, changes, tags_present)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to update note"))
    }

    pub async fn delete(&self, uuid: &str) -> CoreResult<()> {
        self.storage
            .delete(uuid)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to delete note"))
    }

    /// Whether the backing store answers.
    pub async fn storage_healthy(&self) -> bool {
        match self.storage.ping().instrument(self.span.clone()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Note storage ping failed");
                false
            }
        }
    }
}

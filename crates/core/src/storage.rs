//! Persistence contracts consumed by the services.
//!
//! Implementations originate [`CoreError::NotFound`] when a keyed record is
//! missing and [`CoreError::Internal`] for every backend failure. They never
//! produce bad-request errors.
//!
//! [`CoreError::NotFound`]: crate::error::CoreError::NotFound
//! [`CoreError::Internal`]: crate::error::CoreError::Internal

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::notes::{NewNote, Note, UpdateNote};
use crate::tags::{CreateTag, Tag, UpdateTag};
use crate::types::{DbId, NoteUuid};

#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// Persist a note under a freshly assigned uuid and return that uuid.
    async fn create(&self, note: NewNote) -> CoreResult<NoteUuid>;

    async fn find_one(&self, uuid: &str) -> CoreResult<Note>;

    /// All notes of a category, oldest first. No match is not an error.
    async fn find_by_category_uuid(&self, category_uuid: &str) -> CoreResult<Vec<Note>>;

    /// Apply the non-empty scalar fields of `changes` (recomputing
    /// `short_body` when `body` changes) and, only when `tags_update` is set,
    /// replace the tag list wholesale.
    async fn update(&self, uuid: &str, changes: &UpdateNote, tags_update: bool) -> CoreResult<()>;

    async fn delete(&self, uuid: &str) -> CoreResult<()>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> CoreResult<()>;
}

#[async_trait]
pub trait TagStorage: Send + Sync {
    async fn create(&self, tag: &CreateTag) -> CoreResult<DbId>;

    async fn find_one(&self, id: DbId) -> CoreResult<Tag>;

    /// Tags matching `ids`, in id order. Unknown ids are skipped.
    async fn find_many(&self, ids: &[DbId]) -> CoreResult<Vec<Tag>>;

    async fn update(&self, id: DbId, changes: &UpdateTag) -> CoreResult<()>;

    async fn delete(&self, id: DbId) -> CoreResult<()>;
}

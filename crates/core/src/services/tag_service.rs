use std::sync::Arc;

use tracing::{Instrument, Span};
use validator::Validate;

use crate::error::{CoreError, CoreResult};
use crate::storage::TagStorage;
use crate::tags::{CreateTag, Tag, UpdateTag, TAG_ENTITY};
use crate::types::DbId;

pub struct TagService {
    storage: Arc<dyn TagStorage>,
    span: Span,
}

impl TagService {
    pub fn new(storage: Arc<dyn TagStorage>, span: Span) -> Self {
        Self { storage, span }
    }

    pub async fn create(&self, input: CreateTag) -> CoreResult<DbId> {
        input
            .validate()
            .map_err(|errors| CoreError::bad_request(errors.to_string()))?;

        self.storage
            .create(&input)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to create tag"))
    }

    pub async fn get_one(&self, id: DbId) -> CoreResult<Tag> {
        self.storage
            .find_one(id)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to find tag by id"))
    }

    /// Tags for a list of ids. None of them existing is reported as not-found.
    pub async fn get_many(&self, ids: &[DbId]) -> CoreResult<Vec<Tag>> {
        let tags = self
            .storage
            .find_many(ids)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to find tags by ids"))?;

        if tags.is_empty() {
            let id_list = ids
                .iter()
                .map(DbId::to_string)
                .collect::<Vec<_>>()
                .join(",");
            return Err(CoreError::not_found(TAG_ENTITY, id_list));
        }
        Ok(tags)
    }

    pub async fn update(&self, id: DbId, changes: &UpdateTag) -> CoreResult<()> {
        if changes.is_empty() {
            return Err(CoreError::bad_request("nothing to update"));
        }
        changes.validate_name()?;

        self.storage
            .update(id, changes)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to update tag"))
    }

    pub async fn delete(&self, id: DbId) -> CoreResult<()> {
        self.storage
            .delete(id)
            .instrument(self.span.clone())
            .await
            .map_err(|e| e.context("failed to delete tag"))
    }
}

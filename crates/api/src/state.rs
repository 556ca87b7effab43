use std::sync::Arc;

use notes_core::services::{NoteService, TagService};
use notes_core::storage::{NoteStorage, TagStorage};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    pub notes: Arc<NoteService>,
    pub tags: Arc<TagService>,
}

impl AppState {
    /// Wire the services over the given storages, each with its own span.
    pub fn new(
        config: ServerConfig,
        note_storage: Arc<dyn NoteStorage>,
        tag_storage: Arc<dyn TagStorage>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            notes: Arc::new(NoteService::new(
                note_storage,
                tracing::info_span!("note_service"),
            )),
            tags: Arc::new(TagService::new(
                tag_storage,
                tracing::info_span!("tag_service"),
            )),
        }
    }
}

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use notes_api::config::{ListenType, LogFormat, ServerConfig};
use notes_api::router::build_app_router;
use notes_api::state::AppState;
use notes_core::error::{CoreError, CoreResult};
use notes_core::notes::{short_body, NewNote, Note, UpdateNote, NOTE_ENTITY};
use notes_core::storage::{NoteStorage, TagStorage};
use notes_core::tags::{CreateTag, Tag, UpdateTag, TAG_ENTITY};
use notes_core::types::{DbId, NoteUuid};

// ---------------------------------------------------------------------------
// In-memory storages
// ---------------------------------------------------------------------------

/// Note storage backed by a map, with the same semantics as the Postgres one.
#[derive(Default)]
pub struct MemoryNoteStorage {
    notes: Mutex<HashMap<NoteUuid, Note>>,
    next_id: AtomicUsize,
}

#[async_trait]
impl NoteStorage for MemoryNoteStorage {
    async fn create(&self, note: NewNote) -> CoreResult<NoteUuid> {
        let uuid = format!("note-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        self.notes.lock().unwrap().insert(
            uuid.clone(),
            Note {
                uuid: uuid.clone(),
                header: note.header,
                body: note.body,
                short_body: note.short_body,
                category_uuid: note.category_uuid,
                tags: note.tags,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(uuid)
    }

    async fn find_one(&self, uuid: &str) -> CoreResult<Note> {
        self.notes
            .lock()
            .unwrap()
            .get(uuid)
            .cloned()
            .ok_or_else(|| CoreError::not_found(NOTE_ENTITY, uuid))
    }

    async fn find_by_category_uuid(&self, category_uuid: &str) -> CoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self
            .notes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.category_uuid == category_uuid)
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.uuid.cmp(&b.uuid));
        Ok(notes)
    }

    async fn update(
        &self,
        uuid: &str,
        changes: &UpdateNote,
        tags_update: bool,
    ) -> CoreResult<()> {
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .get_mut(uuid)
            .ok_or_else(|| CoreError::not_found(NOTE_ENTITY, uuid))?;
        if let Some(header) = changes.header() {
            note.header = header.to_string();
        }
        if let Some(body) = changes.body() {
            note.body = body.to_string();
            note.short_body = short_body(body);
        }
        if let Some(category_uuid) = changes.category_uuid() {
            note.category_uuid = category_uuid.to_string();
        }
        if tags_update {
            note.tags = changes.tags().to_vec();
        }
        note.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, uuid: &str) -> CoreResult<()> {
        self.notes
            .lock()
            .unwrap()
            .remove(uuid)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found(NOTE_ENTITY, uuid))
    }

    async fn ping(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// Tag storage backed by an ordered map.
#[derive(Default)]
pub struct MemoryTagStorage {
    tags: Mutex<BTreeMap<DbId, Tag>>,
}

#[async_trait]
impl TagStorage for MemoryTagStorage {
    async fn create(&self, tag: &CreateTag) -> CoreResult<DbId> {
        let mut tags = self.tags.lock().unwrap();
        let id = tags.keys().next_back().map_or(1, |last| last + 1);
        tags.insert(
            id,
            Tag {
                id,
                name: tag.name.clone(),
                color: tag.color.clone(),
            },
        );
        Ok(id)
    }

    async fn find_one(&self, id: DbId) -> CoreResult<Tag> {
        self.tags
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::not_found(TAG_ENTITY, id.to_string()))
    }

    async fn find_many(&self, ids: &[DbId]) -> CoreResult<Vec<Tag>> {
        let tags = self.tags.lock().unwrap();
        Ok(tags
            .values()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    async fn update(&self, id: DbId, changes: &UpdateTag) -> CoreResult<()> {
        let mut tags = self.tags.lock().unwrap();
        let tag = tags
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(TAG_ENTITY, id.to_string()))?;
        if let Some(name) = changes.name() {
            tag.name = name.to_string();
        }
        if let Some(color) = changes.color.clone().into_option() {
            tag.color = color;
        }
        Ok(())
    }

    async fn delete(&self, id: DbId) -> CoreResult<()> {
        self.tags
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found(TAG_ENTITY, id.to_string()))
    }
}

/// Note storage whose every call fails like a dropped database connection.
pub struct BrokenNoteStorage;

pub const DRIVER_SECRET: &str = "password authentication failed for user \"notes\"";

fn driver_failure() -> CoreError {
    CoreError::internal(
        "database query failed",
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, DRIVER_SECRET),
    )
}

#[async_trait]
impl NoteStorage for BrokenNoteStorage {
    async fn create(&self, _note: NewNote) -> CoreResult<NoteUuid> {
        Err(driver_failure())
    }

    async fn find_one(&self, _uuid: &str) -> CoreResult<Note> {
        Err(driver_failure())
    }

    async fn find_by_category_uuid(&self, _category_uuid: &str) -> CoreResult<Vec<Note>> {
        Err(driver_failure())
    }

    async fn update(&self, _uuid: &str, _changes: &UpdateNote, _tags: bool) -> CoreResult<()> {
        Err(driver_failure())
    }

    async fn delete(&self, _uuid: &str) -> CoreResult<()> {
        Err(driver_failure())
    }

    async fn ping(&self) -> CoreResult<()> {
        Err(driver_failure())
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        listen: ListenType::Port,
        cors_origins: vec!["http://localhost:3000".parse().unwrap()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router over the given note storage.
pub fn build_app_with(note_storage: Arc<dyn NoteStorage>) -> Router {
    build_app_with_config(test_config(), note_storage)
}

pub fn build_app_with_config(config: ServerConfig, note_storage: Arc<dyn NoteStorage>) -> Router {
    let state = AppState::new(
        config.clone(),
        note_storage,
        Arc::new(MemoryTagStorage::default()),
    );
    build_app_router(state, &config)
}

/// Build the full application router over empty in-memory storages.
///
/// The router is cheap to clone and clones share the same storage, so a
/// test can issue several requests against one state.
pub fn build_test_app() -> Router {
    build_app_with(Arc::new(MemoryNoteStorage::default()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: &Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &str) -> Response<Body> {
    send_json(app, Method::PATCH, uri, body).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// The `Location` header of a 201 response.
pub fn location(response: &Response<Body>) -> String {
    response.headers()["location"].to_str().unwrap().to_string()
}

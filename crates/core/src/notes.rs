//! Note model, DTOs, and the `short_body` derivation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::patch::Patch;
use crate::types::{NoteUuid, Timestamp};

/// Entity name used in not-found errors.
pub const NOTE_ENTITY: &str = "Note";

/// Maximum number of characters kept in `short_body`.
pub const SHORT_BODY_MAX_CHARS: usize = 100;

/// Suffix appended to a truncated `short_body`.
pub const SHORT_BODY_ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// The note view returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub uuid: NoteUuid,
    pub header: String,
    pub body: String,
    pub short_body: String,
    pub category_uuid: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request payload for `POST /api/notes`.
///
/// `short_body` is not part of the payload; it is always derived from `body`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    #[validate(length(min = 1, message = "header must not be empty"))]
    pub header: String,
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
    #[validate(length(min = 1, message = "category_uuid must not be empty"))]
    pub category_uuid: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for `PATCH /api/notes/{uuid}`.
///
/// `header`, `body` and `category_uuid` are required on the entity, so a
/// null or empty value leaves them unchanged. `tags` may be cleared: any
/// present key (`[]` or `null`) replaces the stored list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNote {
    #[serde(default)]
    pub header: Patch<String>,
    #[serde(default)]
    pub body: Patch<String>,
    #[serde(default)]
    pub category_uuid: Patch<String>,
    #[serde(default)]
    pub tags: Patch<Vec<String>>,
}

impl UpdateNote {
    pub fn header(&self) -> Option<&str> {
        non_empty(&self.header)
    }

    pub fn body(&self) -> Option<&str> {
        non_empty(&self.body)
    }

    pub fn category_uuid(&self) -> Option<&str> {
        non_empty(&self.category_uuid)
    }

    /// Whether the `tags` key was sent, regardless of its value.
    pub fn tags_present(&self) -> bool {
        self.tags.is_present()
    }

    /// Replacement tag list. Empty when `tags` was null or missing.
    pub fn tags(&self) -> &[String] {
        self.tags.as_value().map(Vec::as_slice).unwrap_or_default()
    }

    /// True when none of the scalar fields would change anything.
    pub fn has_no_field_changes(&self) -> bool {
        self.header().is_none() && self.body().is_none() && self.category_uuid().is_none()
    }
}

fn non_empty(field: &Patch<String>) -> Option<&str> {
    field
        .as_value()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// A validated note ready to be persisted, with `short_body` already derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub header: String,
    pub body: String,
    pub short_body: String,
    pub category_uuid: String,
    pub tags: Vec<String>,
}

impl TryFrom<CreateNote> for NewNote {
    type Error = CoreError;

    fn try_from(input: CreateNote) -> Result<Self, Self::Error> {
        input
            .validate()
            .map_err(|errors| CoreError::bad_request(errors.to_string()))?;

        Ok(NewNote {
            short_body: short_body(&input.body),
            header: input.header,
            body: input.body,
            category_uuid: input.category_uuid,
            tags: input.tags,
        })
    }
}

// ---------------------------------------------------------------------------
// Derived fields
// ---------------------------------------------------------------------------

/// Summarize `body` for list views.
///
/// Bodies of at most [`SHORT_BODY_MAX_CHARS`] characters are returned as-is.
/// Longer bodies are cut on a character boundary, stripped of trailing
/// whitespace and suffixed with [`SHORT_BODY_ELLIPSIS`].
pub fn short_body(body: &str) -> String {
    match body.char_indices().nth(SHORT_BODY_MAX_CHARS) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}{SHORT_BODY_ELLIPSIS}", body[..cut].trim_end()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn create(header: &str, body: &str, category_uuid: &str) -> CreateNote {
        CreateNote {
            header: header.to_string(),
            body: body.to_string(),
            category_uuid: category_uuid.to_string(),
            tags: vec![],
        }
    }

    // -- short_body ---------------------------------------------------------

    #[test]
    fn short_body_keeps_short_text() {
        assert_eq!(short_body("B"), "B");
        assert_eq!(short_body(""), "");
    }

    #[test]
    fn short_body_keeps_text_at_exact_limit() {
        let body = "a".repeat(SHORT_BODY_MAX_CHARS);
        assert_eq!(short_body(&body), body);
    }

    #[test]
    fn short_body_truncates_long_text() {
        let body = "a".repeat(SHORT_BODY_MAX_CHARS + 20);
        let short = short_body(&body);
        assert_eq!(short, format!("{}...", "a".repeat(SHORT_BODY_MAX_CHARS)));
    }

    #[test]
    fn short_body_trims_whitespace_before_ellipsis() {
        let body = format!("{}     tail", "x".repeat(SHORT_BODY_MAX_CHARS - 3));
        assert_eq!(
            short_body(&body),
            format!("{}...", "x".repeat(SHORT_BODY_MAX_CHARS - 3))
        );
    }

    #[test]
    fn short_body_counts_characters_not_bytes() {
        let body = "é".repeat(SHORT_BODY_MAX_CHARS + 1);
        let short = short_body(&body);
        assert_eq!(short.chars().count(), SHORT_BODY_MAX_CHARS + SHORT_BODY_ELLIPSIS.len());
    }

    #[test]
    fn short_body_is_deterministic() {
        let body = "A very long string ".repeat(20);
        assert_eq!(short_body(&body), short_body(&body));
    }

    // -- CreateNote -> NewNote ---------------------------------------------

    #[test]
    fn new_note_derives_short_body() {
        let note = NewNote::try_from(create("H", "B", "c1")).unwrap();
        assert_eq!(note.short_body, "B");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn new_note_rejects_empty_header() {
        let result = NewNote::try_from(create("", "B", "c1"));
        assert_matches!(result, Err(CoreError::BadRequest(msg)) if msg.contains("header"));
    }

    #[test]
    fn new_note_rejects_empty_category() {
        let result = NewNote::try_from(create("H", "B", ""));
        assert_matches!(result, Err(CoreError::BadRequest(msg)) if msg.contains("category_uuid"));
    }

    #[test]
    fn create_payload_ignores_client_short_body() {
        let input: CreateNote = serde_json::from_str(
            r#"{"header":"H","body":"B","category_uuid":"c1","short_body":"forged"}"#,
        )
        .unwrap();
        let note = NewNote::try_from(input).unwrap();
        assert_eq!(note.short_body, "B");
    }

    // -- UpdateNote ---------------------------------------------------------

    #[test]
    fn update_with_empty_tags_marks_tags_present() {
        let input: UpdateNote = serde_json::from_str(r#"{"tags": []}"#).unwrap();
        assert!(input.tags_present());
        assert!(input.tags().is_empty());
        assert!(input.has_no_field_changes());
    }

    #[test]
    fn update_without_tags_leaves_tags_absent() {
        let input: UpdateNote = serde_json::from_str(r#"{"header": "New"}"#).unwrap();
        assert!(!input.tags_present());
        assert_eq!(input.header(), Some("New"));
        assert!(!input.has_no_field_changes());
    }

    #[test]
    fn update_treats_empty_and_null_strings_as_unchanged() {
        let input: UpdateNote =
            serde_json::from_str(r#"{"header": "", "body": null, "category_uuid": ""}"#).unwrap();
        assert_eq!(input.header(), None);
        assert_eq!(input.body(), None);
        assert_eq!(input.category_uuid(), None);
        assert!(input.has_no_field_changes());
    }

    #[test]
    fn update_with_null_tags_clears_them() {
        let input: UpdateNote = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(input.tags_present());
        assert!(input.tags().is_empty());
    }
}

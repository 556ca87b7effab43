//! Tag model, DTOs, and id-list parsing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::patch::Patch;
use crate::types::DbId;

/// Entity name used in not-found errors.
pub const TAG_ENTITY: &str = "Tag";

/// Maximum length of a tag name in characters.
pub const MAX_TAG_NAME_LENGTH: usize = 64;

/// `MAX_TAG_NAME_LENGTH` as `u64`, the type the `validator` length bound expects.
const MAX_TAG_NAME_LENGTH_U64: u64 = MAX_TAG_NAME_LENGTH as u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

/// Request payload for `POST /api/tags`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    #[validate(length(
        min = 1,
        max = MAX_TAG_NAME_LENGTH_U64,
        message = "name must be 1 to 64 characters"
    ))]
    pub name: String,
    pub color: Option<String>,
}

/// Request payload for `PATCH /api/tags/{id}`.
///
/// `name` cannot be cleared; `color` can be removed with an explicit null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTag {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub color: Patch<String>,
}

impl UpdateTag {
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_value()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Whether the payload changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.name().is_none() && !self.color.is_present()
    }

    pub fn validate_name(&self) -> Result<(), CoreError> {
        match self.name() {
            Some(name) if name.chars().count() > MAX_TAG_NAME_LENGTH => Err(
                CoreError::bad_request(format!(
                    "name must be 1 to {MAX_TAG_NAME_LENGTH} characters"
                )),
            ),
            _ => Ok(()),
        }
    }
}

/// Parse a comma-separated id list such as `"1, 2,3"`.
///
/// Blank entries are skipped and duplicates collapse onto their first
/// occurrence. An input that yields no ids at all is rejected.
pub fn parse_id_list(raw: &str) -> Result<Vec<DbId>, CoreError> {
    let mut ids = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id: DbId = part.parse().map_err(|_| {
            CoreError::bad_request(format!(
                "id query parameter must be comma separated integers, got '{part}'"
            ))
        })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        return Err(CoreError::bad_request(
            "id query parameter is required and must be comma separated integers",
        ));
    }
    Ok(ids)
}
